//! Round-only "lower is better" composite rating, modelled after third-party
//! cut-quality calculators but derived entirely from the rubric sub-scores.

use super::domain::{
    CanonicalRecord, PerformanceRating, RedFlags, SecondaryComponent, SecondaryRating,
    SpreadResult, SpreadStatus, SubScore,
};
use super::rubric::{clamp_score, round_to, RUBRIC};

pub const MODEL_NAME: &str = "HCA-like deterministic template";
pub const SCALE: &str = "Lower is better";

const LEAKAGE_PENALTY: i32 = 12;
const DEPTH_AVOID_PENALTY: i32 = 6;
const LEAKAGE_MARKER: &str = "leakage";
const DEPTH_AVOID_MARKER: &str = "depth is outside avoid threshold";

const RATING_LADDER: &str = ">=90 Excellent, 80-89 Very Good, 70-79 Good, 60-69 Fair, <60 Poor";
const UNAVAILABLE_RECOMMENDATION: &str =
    "HCA-like score is only available for round diamonds in this template.";

pub fn rating_for(score: i32) -> PerformanceRating {
    match score {
        s if s >= 90 => PerformanceRating::Excellent,
        s if s >= 80 => PerformanceRating::VeryGood,
        s if s >= 70 => PerformanceRating::Good,
        s if s >= 60 => PerformanceRating::Fair,
        _ => PerformanceRating::Poor,
    }
}

/// Point cost of a rating; unrated defaults to the middle of the ladder.
pub fn points_for(rating: PerformanceRating) -> f64 {
    match rating {
        PerformanceRating::Excellent => 0.5,
        PerformanceRating::VeryGood => 1.0,
        PerformanceRating::Good => 1.8,
        PerformanceRating::Fair => 2.6,
        PerformanceRating::Poor => 3.6,
        PerformanceRating::Unknown => 2.0,
    }
}

pub fn spread_performance(status: SpreadStatus) -> i32 {
    match status {
        SpreadStatus::Excellent => 92,
        SpreadStatus::Balanced => 84,
        SpreadStatus::SlightlyHidden => 72,
        SpreadStatus::HiddenWeight => 58,
        SpreadStatus::Unknown => 70,
    }
}

/// Band and recommendation for a total; an Excellent band also needs zero flags.
pub fn band_for(total: f64, red_flags: &RedFlags) -> (&'static str, &'static str) {
    if total <= 2.0 && red_flags.is_empty() {
        (
            "Excellent",
            "Excellent candidate in this rejection-style model.",
        )
    } else if total <= 2.5 {
        (
            "Very Good",
            "Very strong candidate; verify with imagery and vendor data.",
        )
    } else if total <= 4.0 {
        ("Good", "Worth considering with careful visual checks.")
    } else if total <= 6.0 {
        (
            "Fair",
            "Borderline option; compare against better geometry candidates.",
        )
    } else {
        ("Poor", "Reject in this model and keep searching.")
    }
}

pub(crate) struct SubScores<'a> {
    pub brightness: &'a SubScore,
    pub fire: &'a SubScore,
    pub risk: &'a SubScore,
}

pub(crate) fn evaluate_secondary(
    record: &CanonicalRecord,
    scores: SubScores<'_>,
    spread: &SpreadResult,
    red_flags: &RedFlags,
) -> SecondaryRating {
    if !record.shape.is_round() {
        return SecondaryRating {
            available: false,
            model: MODEL_NAME,
            scale: SCALE,
            score: None,
            band: "Unavailable",
            recommendation: UNAVAILABLE_RECOMMENDATION,
            components: Vec::new(),
            explanation:
                "Round-only mode is used to keep this output aligned with angle-based rejection logic.",
        };
    }

    let mut light_return = scores.brightness.score;
    if red_flags.any_contains(LEAKAGE_MARKER) {
        light_return -= LEAKAGE_PENALTY;
    }
    if red_flags.any_contains(DEPTH_AVOID_MARKER) {
        light_return -= DEPTH_AVOID_PENALTY;
    }
    let light_return = clamp_score(f64::from(light_return));

    let components = vec![
        component(
            "Light Return",
            light_return,
            RATING_LADDER,
            "Derived from brightness, with extra penalty if leakage/depth red flags were triggered.",
        ),
        component(
            "Fire",
            scores.fire.score,
            RATING_LADDER,
            "Derived from crown/table balance and facet proportion effects.",
        ),
        component(
            "Scintillation",
            scintillation(record, &scores),
            RATING_LADDER,
            "Derived from brightness/fire blend plus lower-halves, symmetry, and angle pairing.",
        ),
        component(
            "Spread",
            spread_performance(spread.status),
            "Mapped from spread status: excellent/balanced/slightly-hidden/hidden-weight/unknown",
            "Derived from face-up diameter efficiency for the given carat weight.",
        ),
    ];

    let total = round_to(components.iter().map(|c| c.points).sum(), 1);
    let (band, recommendation) = band_for(total, red_flags);

    SecondaryRating {
        available: true,
        model: MODEL_NAME,
        scale: SCALE,
        score: Some(total),
        band,
        recommendation,
        components,
        explanation:
            "This is an HCA-like template output and not the original patented HCA calculation.",
    }
}

fn component(
    name: &'static str,
    score: i32,
    threshold: &'static str,
    explanation: &'static str,
) -> SecondaryComponent {
    let rating = rating_for(score);
    SecondaryComponent {
        name,
        score,
        rating,
        points: points_for(rating),
        threshold,
        explanation,
    }
}

/// Brightness/fire/safety blend nudged by lower halves, symmetry, and angle pairing.
fn scintillation(record: &CanonicalRecord, scores: &SubScores<'_>) -> i32 {
    let mut score = RUBRIC.scores.overall_weights.blend(
        scores.brightness.score,
        scores.fire.score,
        scores.risk.score,
    );

    if let Some(lower_halves) = record.lower_halves_pct {
        let zone = RUBRIC.max_shine_zone.lower_halves;
        score += if zone.bonus.contains(lower_halves) {
            5.0
        } else if zone.pass.contains(lower_halves) {
            2.0
        } else {
            -4.0
        };
    }

    if let Some(symmetry) = record.symmetry.as_deref() {
        score += match symmetry.trim().to_lowercase().as_str() {
            "excellent" => 5.0,
            "very good" => 2.0,
            "good" => -3.0,
            _ => -6.0,
        };
    }

    if let (Some(crown), Some(pavilion)) = (record.crown_angle, record.pavilion_angle) {
        let pairing = RUBRIC.angle_pairing;
        let distance = pairing.distance(crown, pavilion);
        score += if distance <= pairing.good_distance {
            5.0
        } else if distance <= pairing.penalty_distance {
            1.0
        } else {
            -5.0
        };
    }

    clamp_score(score)
}
