use super::domain::{CanonicalRecord, SpreadResult, SpreadStatus};
use super::rubric::round_to;

/// Empirical round-brilliant relation: carat = 0.00373 * diameter^3.
const CARAT_PER_CUBIC_MM: f64 = 0.00373;

const EXCELLENT_RATIO: f64 = 1.01;
const BALANCED_RATIO: f64 = 0.99;
const SLIGHTLY_HIDDEN_RATIO: f64 = 0.97;

pub fn expected_diameter_mm(carat: f64) -> f64 {
    (carat / CARAT_PER_CUBIC_MM).cbrt()
}

/// Face-up size relative to what the carat weight should show.
pub fn evaluate_spread(record: &CanonicalRecord) -> SpreadResult {
    let (Some(carat), Some(diameter)) = (record.carat, record.avg_diameter_mm) else {
        return SpreadResult {
            status: SpreadStatus::Unknown,
            actual_diameter_mm: record.avg_diameter_mm,
            expected_diameter_mm: None,
            ratio: None,
            explanation:
                "Provide both carat and average diameter or measurements to estimate spread.",
        };
    };

    let expected = expected_diameter_mm(carat);
    let ratio = diameter / expected;
    let (status, explanation) = classify(ratio);

    SpreadResult {
        status,
        actual_diameter_mm: Some(round_to(diameter, 2)),
        expected_diameter_mm: Some(round_to(expected, 2)),
        ratio: Some(round_to(ratio, 3)),
        explanation,
    }
}

/// Band boundaries are inclusive on the lower edge.
pub fn classify(ratio: f64) -> (SpreadStatus, &'static str) {
    if ratio >= EXCELLENT_RATIO {
        (
            SpreadStatus::Excellent,
            "Face-up spread appears above expected for this carat weight.",
        )
    } else if ratio >= BALANCED_RATIO {
        (
            SpreadStatus::Balanced,
            "Face-up spread is in the expected range.",
        )
    } else if ratio >= SLIGHTLY_HIDDEN_RATIO {
        (
            SpreadStatus::SlightlyHidden,
            "Slight spread penalty; some weight may be hidden in depth.",
        )
    } else {
        (
            SpreadStatus::HiddenWeight,
            "Noticeable spread penalty; likely hidden weight / smaller face-up look.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::rules::fixtures::{empty_record, ideal_record};

    #[test]
    fn one_carat_expects_about_six_and_a_half_millimetres() {
        let expected = expected_diameter_mm(1.0);
        assert!((expected - 6.449).abs() < 0.01, "got {expected}");
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(classify(1.01).0, SpreadStatus::Excellent);
        assert_eq!(classify(1.2).0, SpreadStatus::Excellent);
        assert_eq!(classify(0.99).0, SpreadStatus::Balanced);
        assert_eq!(classify(0.97).0, SpreadStatus::SlightlyHidden);
        assert_eq!(classify(0.969).0, SpreadStatus::HiddenWeight);
    }

    #[test]
    fn requires_carat_and_diameter() {
        let mut record = empty_record();
        record.avg_diameter_mm = Some(6.4);
        let spread = evaluate_spread(&record);
        assert_eq!(spread.status, SpreadStatus::Unknown);
        assert_eq!(spread.actual_diameter_mm, Some(6.4));
        assert_eq!(spread.ratio, None);
    }

    #[test]
    fn reports_rounded_ratio_and_diameters() {
        let spread = evaluate_spread(&ideal_record());
        assert_eq!(spread.status, SpreadStatus::Balanced);
        assert_eq!(spread.actual_diameter_mm, Some(6.45));
        assert_eq!(spread.expected_diameter_mm, Some(6.45));
        assert_eq!(spread.ratio, Some(1.0));
    }

    #[test]
    fn status_uses_the_unrounded_ratio() {
        let mut record = ideal_record();
        record.carat = Some(1.0);
        record.avg_diameter_mm = Some(0.9896 * expected_diameter_mm(1.0));

        let spread = evaluate_spread(&record);
        assert_eq!(spread.ratio, Some(0.99));
        assert_eq!(spread.status, SpreadStatus::SlightlyHidden);

        record.avg_diameter_mm = Some(1.0096 * expected_diameter_mm(1.0));
        let spread = evaluate_spread(&record);
        assert_eq!(spread.ratio, Some(1.01));
        assert_eq!(spread.status, SpreadStatus::Balanced);
    }
}
