use super::domain::{CanonicalRecord, ChecklistEntry, ChecklistStatus, ChecklistValue};
use super::rubric::{contains_any, matches_any, Zone, RUBRIC};

const NOT_PROVIDED: &str = "Not provided";

/// Per-field pass/near/fail classification against the rubric ranges.
///
/// Deliberately independent of the sub-score rules: it re-derives every
/// status straight from the rubric.
pub fn build_checklist(record: &CanonicalRecord) -> Vec<ChecklistEntry> {
    let zone = &RUBRIC.max_shine_zone;
    vec![
        numeric_entry("Table %", record.table_pct, zone.table.pass, 0.3),
        numeric_entry("Depth %", record.depth_pct, zone.depth.pass, 0.25),
        numeric_entry("Crown angle", record.crown_angle, zone.crown_angle.pass, 0.3),
        numeric_entry(
            "Pavilion angle",
            record.pavilion_angle,
            zone.pavilion_angle.pass,
            0.12,
        ),
        text_entry(
            "Girdle",
            record.girdle.as_deref(),
            zone.preferred_girdles,
            zone.avoid_girdles,
        ),
        text_entry("Culet", record.culet.as_deref(), zone.preferred_culets, &[]),
        text_entry("Polish", record.polish.as_deref(), zone.preferred_finish, &[]),
        text_entry(
            "Symmetry",
            record.symmetry.as_deref(),
            zone.preferred_finish,
            &[],
        ),
        text_entry(
            "Fluorescence",
            record.fluorescence.as_deref(),
            zone.preferred_fluorescence,
            &[],
        ),
        numeric_entry("Star %", record.star_pct, zone.star, 1.0),
        numeric_entry(
            "Lower halves %",
            record.lower_halves_pct,
            zone.lower_halves.pass,
            1.0,
        ),
    ]
}

/// An absent field never fails the zone.
pub fn passes_maximum_shine_zone(checklist: &[ChecklistEntry]) -> bool {
    checklist.iter().all(|entry| {
        matches!(
            entry.status,
            ChecklistStatus::Pass | ChecklistStatus::Unknown
        )
    })
}

fn numeric_entry(
    label: &'static str,
    value: Option<f64>,
    zone: Zone,
    tolerance: f64,
) -> ChecklistEntry {
    let target = zone.label();
    let Some(value) = value else {
        return ChecklistEntry {
            label,
            status: ChecklistStatus::Unknown,
            actual: ChecklistValue::Text(NOT_PROVIDED.to_string()),
            target,
            explanation: "Input not provided.",
        };
    };

    let (status, explanation) = if zone.contains(value) {
        (ChecklistStatus::Pass, "Inside maximum shine zone.")
    } else if zone.near(value, tolerance) {
        (ChecklistStatus::Near, "Near zone boundary.")
    } else {
        (ChecklistStatus::Fail, "Outside maximum shine zone.")
    };

    ChecklistEntry {
        label,
        status,
        actual: ChecklistValue::Number(value),
        target,
        explanation,
    }
}

fn text_entry(
    label: &'static str,
    value: Option<&str>,
    preferred: &[&str],
    avoid: &[&str],
) -> ChecklistEntry {
    let target = preferred.join(" / ");
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return ChecklistEntry {
            label,
            status: ChecklistStatus::Unknown,
            actual: ChecklistValue::Text(NOT_PROVIDED.to_string()),
            target,
            explanation: "Input not provided.",
        };
    };

    let (status, explanation) = if !avoid.is_empty() && contains_any(avoid, value) {
        (ChecklistStatus::Fail, "Matches avoid-list condition.")
    } else if matches_any(preferred, value) {
        (ChecklistStatus::Pass, "Matches preferred specification.")
    } else {
        (ChecklistStatus::Near, "Acceptable but not preferred.")
    };

    ChecklistEntry {
        label,
        status,
        actual: ChecklistValue::Text(value.to_string()),
        target,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::rules::fixtures::{empty_record, ideal_record};

    fn status_of(checklist: &[ChecklistEntry], label: &str) -> ChecklistStatus {
        checklist
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.status)
            .expect("label present")
    }

    #[test]
    fn ideal_record_passes_every_entry() {
        let checklist = build_checklist(&ideal_record());
        assert_eq!(checklist.len(), 11);
        assert!(checklist
            .iter()
            .all(|entry| entry.status == ChecklistStatus::Pass));
        assert!(passes_maximum_shine_zone(&checklist));
    }

    #[test]
    fn absent_fields_are_unknown_and_do_not_fail_the_zone() {
        let checklist = build_checklist(&empty_record());
        assert!(checklist
            .iter()
            .all(|entry| entry.status == ChecklistStatus::Unknown));
        assert!(passes_maximum_shine_zone(&checklist));
        assert_eq!(checklist[0].actual.to_string(), "Not provided");
    }

    #[test]
    fn per_field_tolerances_decide_near() {
        let mut record = empty_record();
        record.table_pct = Some(58.2);
        record.depth_pct = Some(62.8);
        record.pavilion_angle = Some(41.0);
        record.star_pct = Some(56.0);
        let checklist = build_checklist(&record);

        assert_eq!(status_of(&checklist, "Table %"), ChecklistStatus::Near);
        assert_eq!(status_of(&checklist, "Depth %"), ChecklistStatus::Fail);
        assert_eq!(status_of(&checklist, "Pavilion angle"), ChecklistStatus::Near);
        assert_eq!(status_of(&checklist, "Star %"), ChecklistStatus::Near);
        assert!(!passes_maximum_shine_zone(&checklist));
    }

    #[test]
    fn text_entries_compare_case_insensitively() {
        let mut record = empty_record();
        record.girdle = Some("very thin".to_string());
        record.polish = Some("EXCELLENT".to_string());
        record.fluorescence = Some("Medium".to_string());
        let checklist = build_checklist(&record);

        assert_eq!(status_of(&checklist, "Girdle"), ChecklistStatus::Fail);
        assert_eq!(status_of(&checklist, "Polish"), ChecklistStatus::Pass);
        assert_eq!(status_of(&checklist, "Fluorescence"), ChecklistStatus::Near);
    }
}
