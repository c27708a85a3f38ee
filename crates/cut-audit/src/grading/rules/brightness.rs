use super::{score_rules, Rule, RuleHit};
use crate::grading::domain::{CanonicalRecord, RedFlags, ScoreCategory, SubScore};
use crate::grading::rubric::RUBRIC;

const PAVILION_NEAR_TOLERANCE: f64 = 0.15;

const RULES: &[Rule] = &[pavilion, depth, angle_pairing, table];

/// Light-return score. Raises the leakage flag into `flags`.
pub fn evaluate_brightness(record: &CanonicalRecord, flags: &mut RedFlags) -> SubScore {
    score_rules(
        ScoreCategory::Brightness,
        RUBRIC.scores.brightness_base,
        RULES,
        record,
        flags,
    )
}

fn pavilion(record: &CanonicalRecord) -> Option<RuleHit> {
    let angle = record.pavilion_angle?;
    let zone = RUBRIC.max_shine_zone.pavilion_angle.pass;
    let leakage = RUBRIC.avoid_list.pavilion_leakage;

    let hit = if zone.contains(angle) {
        RuleHit::new(
            "pavilion-core",
            14,
            zone.label(),
            "Pavilion angle is in the high-return zone for brightness.",
        )
    } else if zone.near(angle, PAVILION_NEAR_TOLERANCE) {
        RuleHit::new(
            "pavilion-near",
            5,
            format!("near {}", zone.label()),
            "Pavilion angle is near target, with moderate light-return confidence.",
        )
    } else if angle >= leakage {
        RuleHit::new(
            "pavilion-leakage",
            -22,
            format!(">= {leakage}"),
            "Pavilion angle enters leakage-prone territory and reduces brightness.",
        )
        .flag(format!(
            "Pavilion angle is {leakage} or higher (high leakage risk)."
        ))
    } else {
        RuleHit::new(
            "pavilion-off",
            -8,
            zone.label(),
            "Pavilion angle is outside preferred zone.",
        )
    };
    Some(hit)
}

fn depth(record: &CanonicalRecord) -> Option<RuleHit> {
    let depth = record.depth_pct?;
    let zone = RUBRIC.max_shine_zone.depth;

    let hit = if zone.bonus.contains(depth) {
        RuleHit::new(
            "depth-bonus",
            8,
            zone.bonus.label(),
            "Depth sits in the center of the ideal spread/light-return balance.",
        )
    } else if zone.pass.contains(depth) {
        RuleHit::new(
            "depth-pass",
            4,
            zone.pass.label(),
            "Depth is inside the acceptable maximum shine zone.",
        )
    } else {
        RuleHit::new(
            "depth-off",
            -10,
            zone.pass.label(),
            "Depth is outside preferred geometry and may hurt light return.",
        )
    };
    Some(hit)
}

fn angle_pairing(record: &CanonicalRecord) -> Option<RuleHit> {
    let pairing = RUBRIC.angle_pairing;
    let distance = pairing.distance(record.crown_angle?, record.pavilion_angle?);

    let hit = if distance <= pairing.full_bonus_distance {
        RuleHit::new(
            "angle-pairing-perfect",
            12,
            format!("distance <= {}", pairing.full_bonus_distance),
            "Crown/pavilion pairing is extremely close to the target pair (34.5 / 40.8).",
        )
    } else if distance <= pairing.good_distance {
        RuleHit::new(
            "angle-pairing-good",
            6,
            format!("distance <= {:.2}", pairing.good_distance),
            "Angle pairing is close and supports brightness.",
        )
    } else if distance <= pairing.penalty_distance {
        RuleHit::new(
            "angle-pairing-neutral",
            2,
            format!("distance <= {}", pairing.penalty_distance),
            "Angle pairing is acceptable but not optimized.",
        )
    } else {
        RuleHit::new(
            "angle-pairing-weak",
            -9,
            format!("distance > {}", pairing.penalty_distance),
            "Angle pairing drifts too far from the target pair, reducing brightness confidence.",
        )
    };
    Some(hit)
}

fn table(record: &CanonicalRecord) -> Option<RuleHit> {
    let table = record.table_pct?;
    let zone = RUBRIC.max_shine_zone.table;

    let hit = if zone.bonus.contains(table) {
        RuleHit::new(
            "table-bonus",
            5,
            zone.bonus.label(),
            "Table is in the top brightness/fire balance window.",
        )
    } else if zone.pass.contains(table) {
        RuleHit::new(
            "table-pass",
            3,
            zone.pass.label(),
            "Table is in the preferred shine zone.",
        )
    } else {
        RuleHit::new(
            "table-off",
            -7,
            zone.pass.label(),
            "Table proportion is outside the target shine zone.",
        )
    };
    Some(hit)
}
