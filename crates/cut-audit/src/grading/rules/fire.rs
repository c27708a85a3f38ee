use super::{score_rules, Rule, RuleHit};
use crate::grading::domain::{CanonicalRecord, RedFlags, ScoreCategory, SubScore};
use crate::grading::rubric::RUBRIC;

const CROWN_NEAR_TOLERANCE: f64 = 0.4;

const RULES: &[Rule] = &[crown, table, lower_halves, star];

/// Dispersion score. Fire rules never raise red flags.
pub fn evaluate_fire(record: &CanonicalRecord) -> SubScore {
    let mut unused = RedFlags::new();
    score_rules(
        ScoreCategory::Fire,
        RUBRIC.scores.fire_base,
        RULES,
        record,
        &mut unused,
    )
}

fn crown(record: &CanonicalRecord) -> Option<RuleHit> {
    let angle = record.crown_angle?;
    let crown = RUBRIC.max_shine_zone.crown_angle;

    let hit = if angle == crown.ideal {
        RuleHit::new(
            "crown-perfect",
            14,
            format!("= {}", crown.ideal),
            "Crown angle sits at the exact target for strong fire.",
        )
    } else if crown.pass.contains(angle) {
        RuleHit::new(
            "crown-pass",
            10,
            crown.pass.label(),
            "Crown angle supports strong dispersion potential.",
        )
    } else if crown.pass.near(angle, CROWN_NEAR_TOLERANCE) {
        RuleHit::new(
            "crown-near",
            3,
            format!("near {:.1}-{:.1}", crown.pass.min, crown.pass.max),
            "Crown angle is close, with moderate fire potential.",
        )
    } else {
        RuleHit::new(
            "crown-off",
            -10,
            crown.pass.label(),
            "Crown angle is outside preferred fire geometry.",
        )
    };
    Some(hit)
}

fn table(record: &CanonicalRecord) -> Option<RuleHit> {
    let table = record.table_pct?;
    let zone = RUBRIC.max_shine_zone.table;

    let hit = if zone.bonus.contains(table) {
        RuleHit::new(
            "table-fire-bonus",
            9,
            zone.bonus.label(),
            "Table size supports balanced white light and spectral fire.",
        )
    } else if zone.pass.contains(table) {
        RuleHit::new(
            "table-fire-pass",
            4,
            zone.pass.label(),
            "Table is in acceptable fire range.",
        )
    } else {
        RuleHit::new(
            "table-fire-off",
            -9,
            zone.pass.label(),
            "Table size is outside preferred fire range.",
        )
    };
    Some(hit)
}

fn lower_halves(record: &CanonicalRecord) -> Option<RuleHit> {
    let lower_halves = record.lower_halves_pct?;
    let zone = RUBRIC.max_shine_zone.lower_halves;

    let hit = if zone.bonus.contains(lower_halves) {
        RuleHit::new(
            "lower-halves-bonus",
            5,
            zone.bonus.label(),
            "Lower-half facets are in the crisp scintillation sweet spot.",
        )
    } else if zone.pass.contains(lower_halves) {
        RuleHit::new(
            "lower-halves-pass",
            2,
            zone.pass.label(),
            "Lower-half facets are acceptable for balanced fire.",
        )
    } else {
        RuleHit::new(
            "lower-halves-off",
            -4,
            zone.pass.label(),
            "Lower-half facets are outside preferred range.",
        )
    };
    Some(hit)
}

fn star(record: &CanonicalRecord) -> Option<RuleHit> {
    let star = record.star_pct?;
    let zone = RUBRIC.max_shine_zone.star;

    let hit = if zone.contains(star) {
        RuleHit::new(
            "star-pass",
            3,
            zone.label(),
            "Star facets are in the preferred range for balanced patterning.",
        )
    } else {
        RuleHit::new(
            "star-off",
            -3,
            zone.label(),
            "Star facets are outside preferred range.",
        )
    };
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::rules::fixtures::{empty_record, ideal_record};

    fn crown_hit(angle: f64) -> (String, i32) {
        let mut record = empty_record();
        record.crown_angle = Some(angle);
        let score = evaluate_fire(&record);
        let component = &score.components[0];
        (component.id.clone(), component.delta)
    }

    #[test]
    fn ideal_geometry_saturates_fire() {
        let score = evaluate_fire(&ideal_record());
        assert_eq!(score.score, 100);
        assert_eq!(score.components.len(), 4);
    }

    #[test]
    fn crown_tiers() {
        assert_eq!(crown_hit(34.5), ("crown-perfect".to_string(), 14));
        assert_eq!(crown_hit(34.0), ("crown-pass".to_string(), 10));
        assert_eq!(crown_hit(35.3), ("crown-near".to_string(), 3));
        assert_eq!(crown_hit(36.4), ("crown-off".to_string(), -10));
    }

    #[test]
    fn near_crown_threshold_keeps_one_decimal() {
        let mut record = empty_record();
        record.crown_angle = Some(33.8);
        let score = evaluate_fire(&record);
        assert_eq!(score.components[0].threshold, "near 34.0-35.0");
    }

    #[test]
    fn lower_halves_and_star_penalties() {
        let mut record = empty_record();
        record.lower_halves_pct = Some(70.0);
        record.star_pct = Some(60.0);
        let score = evaluate_fire(&record);
        assert_eq!(score.score, 70 - 4 - 3);
    }

    #[test]
    fn table_outside_zone_costs_fire() {
        let mut record = empty_record();
        record.table_pct = Some(62.0);
        assert_eq!(evaluate_fire(&record).score, 61);
    }
}
