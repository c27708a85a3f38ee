use super::domain::{CategoryOutcome, Evaluation, ValueResult, Winner};
use super::rubric::{round_to, RUBRIC};

/// Integer sub-score comparison; differences at or under the close-call
/// threshold are reported as a tie.
pub fn compare_category(
    category: &'static str,
    a: i32,
    b: i32,
    lower_is_better: bool,
) -> CategoryOutcome {
    let difference = f64::from((a - b).abs());
    let winner = if difference <= RUBRIC.thresholds.close_call {
        Winner::TooClose
    } else if (a < b) == lower_is_better {
        Winner::DiamondA
    } else {
        Winner::DiamondB
    };

    CategoryOutcome {
        category,
        winner,
        difference: round_to(difference, 1),
    }
}

pub fn compare_secondary(a: &Evaluation, b: &Evaluation) -> CategoryOutcome {
    const CATEGORY: &str = "HCA-like";

    let (Some(left), Some(right)) = (a.secondary_rating.score, b.secondary_rating.score) else {
        return CategoryOutcome {
            category: CATEGORY,
            winner: Winner::NotApplicable,
            difference: 0.0,
        };
    };

    let difference = (left - right).abs();
    let winner = if difference <= RUBRIC.thresholds.secondary_close_call {
        Winner::TooClose
    } else if left < right {
        Winner::DiamondA
    } else {
        Winner::DiamondB
    };

    CategoryOutcome {
        category: CATEGORY,
        winner,
        difference: round_to(difference, 1),
    }
}

pub fn compare_value(a: &ValueResult, b: &ValueResult) -> CategoryOutcome {
    const CATEGORY: &str = "Value";

    let winner = match (a.status.is_comparable(), b.status.is_comparable()) {
        (false, false) => Winner::NoComparableBenchmark,
        (true, false) => Winner::OnlyDiamondA,
        (false, true) => Winner::OnlyDiamondB,
        (true, true) => {
            let (left, right) = (a.status.rank(), b.status.rank());
            let difference = f64::from(left.abs_diff(right));
            let winner = match left.cmp(&right) {
                std::cmp::Ordering::Equal => Winner::TooClose,
                std::cmp::Ordering::Greater => Winner::DiamondA,
                std::cmp::Ordering::Less => Winner::DiamondB,
            };
            return CategoryOutcome {
                category: CATEGORY,
                winner,
                difference,
            };
        }
    };

    CategoryOutcome {
        category: CATEGORY,
        winner,
        difference: 0.0,
    }
}

/// Per-category winners in fixed order, plus the overall summary.
pub(crate) fn winners(a: &Evaluation, b: &Evaluation) -> (Vec<CategoryOutcome>, CategoryOutcome) {
    let categories = vec![
        compare_category("Brightness", a.brightness.score, b.brightness.score, false),
        compare_category("Fire", a.fire.score, b.fire.score, false),
        compare_category("Risk", a.risk.score, b.risk.score, true),
        compare_secondary(a, b),
        compare_value(&a.value, &b.value),
    ];
    let overall = compare_category("Overall", a.overall.score, b.overall.score, false);
    (categories, overall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::domain::ValueStatus;

    fn value(status: ValueStatus) -> ValueResult {
        ValueResult {
            status,
            label: "",
            explanation: "",
            benchmark: None,
            price_per_carat: None,
            delta_pct: None,
        }
    }

    #[test]
    fn close_call_is_inclusive() {
        let outcome = compare_category("Brightness", 80, 83, false);
        assert_eq!(outcome.winner, Winner::TooClose);
        assert_eq!(outcome.difference, 3.0);

        let outcome = compare_category("Brightness", 80, 84, false);
        assert_eq!(outcome.winner, Winner::DiamondB);
        assert_eq!(outcome.difference, 4.0);
    }

    #[test]
    fn risk_prefers_the_lower_score() {
        assert_eq!(compare_category("Risk", 10, 40, true).winner, Winner::DiamondA);
        assert_eq!(compare_category("Risk", 40, 10, true).winner, Winner::DiamondB);
    }

    #[test]
    fn value_needs_a_comparable_side() {
        let unsupported = value(ValueStatus::CurrencyUnsupported);
        let outcome = compare_value(&unsupported, &value(ValueStatus::NoPrice));
        assert_eq!(outcome.winner, Winner::NoComparableBenchmark);

        let outcome = compare_value(&value(ValueStatus::Above), &unsupported);
        assert_eq!(outcome.winner, Winner::OnlyDiamondA);
        let outcome = compare_value(&unsupported, &value(ValueStatus::Above));
        assert_eq!(outcome.winner, Winner::OnlyDiamondB);
    }

    #[test]
    fn value_ranks_cheaper_bands_higher() {
        let outcome = compare_value(&value(ValueStatus::Above), &value(ValueStatus::Below));
        assert_eq!(outcome.winner, Winner::DiamondB);
        assert_eq!(outcome.difference, 2.0);

        let outcome = compare_value(&value(ValueStatus::Fair), &value(ValueStatus::Fair));
        assert_eq!(outcome.winner, Winner::TooClose);
        assert_eq!(outcome.difference, 0.0);
    }
}
