use super::benchmarks::{match_benchmark, BenchmarkBand};
use super::domain::{CanonicalRecord, ValueResult, ValueStatus};
use super::rubric::round_to;

/// The benchmark table is priced in this currency only; other currencies are
/// reported but never converted.
pub const BENCHMARK_CURRENCY: &str = "USD";

/// Classifies price-per-carat against the first matching reference band.
pub fn evaluate_value(record: &CanonicalRecord, bands: &[BenchmarkBand]) -> ValueResult {
    let (Some(price), Some(carat)) = (record.price, record.carat) else {
        return ValueResult {
            status: ValueStatus::NoPrice,
            label: "No price entered",
            explanation: "Add price and carat to run deterministic value comparison.",
            benchmark: None,
            price_per_carat: None,
            delta_pct: None,
        };
    };

    let price_per_carat = price / carat;
    let reported = finite(round_to(price_per_carat, 0));

    if record.currency != BENCHMARK_CURRENCY {
        return ValueResult {
            status: ValueStatus::CurrencyUnsupported,
            label: "No USD reference for selected currency",
            explanation:
                "Local benchmark table is USD-only. Convert the input price to USD to compare value.",
            benchmark: None,
            price_per_carat: reported,
            delta_pct: None,
        };
    }

    let Some(band) = match_benchmark(record, bands) else {
        return ValueResult {
            status: ValueStatus::NoReference,
            label: "No reference band available",
            explanation: "No benchmark row matched shape/carat/color/clarity/cut inputs.",
            benchmark: None,
            price_per_carat: reported,
            delta_pct: None,
        };
    };

    let midpoint = band.midpoint();
    let delta_pct = finite(round_to((price_per_carat - midpoint) / midpoint * 100.0, 1));

    let (status, label, explanation) = if price_per_carat < band.price_per_carat_min {
        (
            ValueStatus::Below,
            "Below reference",
            "Price per carat is below the matched local benchmark band.",
        )
    } else if price_per_carat <= band.price_per_carat_max {
        (
            ValueStatus::Fair,
            "Fair range",
            "Price per carat is inside the matched local benchmark band.",
        )
    } else {
        (
            ValueStatus::Above,
            "Above reference",
            "Price per carat is above the matched local benchmark band.",
        )
    };

    ValueResult {
        status,
        label,
        explanation,
        benchmark: Some(band.clone()),
        price_per_carat: reported,
        delta_pct,
    }
}

/// Zero-carat or zero-midpoint inputs would otherwise leak infinities.
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::rules::fixtures::{empty_record, ideal_record};

    fn band() -> BenchmarkBand {
        BenchmarkBand {
            shape: "round".to_string(),
            carat_min: 0.9,
            carat_max: 1.09,
            cut_grades: vec!["Excellent".to_string(), "Ideal".to_string()],
            color_best: "E".to_string(),
            color_worst: "G".to_string(),
            clarity_best: "VVS2".to_string(),
            clarity_worst: "VS2".to_string(),
            price_per_carat_min: 6500.0,
            price_per_carat_max: 8000.0,
        }
    }

    #[test]
    fn missing_price_or_carat_is_no_price() {
        let mut record = ideal_record();
        record.price = None;
        assert_eq!(evaluate_value(&record, &[band()]).status, ValueStatus::NoPrice);
        assert_eq!(
            evaluate_value(&empty_record(), &[band()]).status,
            ValueStatus::NoPrice
        );
    }

    #[test]
    fn non_usd_still_reports_price_per_carat() {
        let mut record = ideal_record();
        record.currency = "EUR".to_string();
        record.carat = Some(1.5);
        record.price = Some(10000.0);
        let value = evaluate_value(&record, &[band()]);
        assert_eq!(value.status, ValueStatus::CurrencyUnsupported);
        assert_eq!(value.price_per_carat, Some(6667.0));
        assert!(value.benchmark.is_none());
    }

    #[test]
    fn empty_band_list_is_no_reference() {
        let value = evaluate_value(&ideal_record(), &[]);
        assert_eq!(value.status, ValueStatus::NoReference);
        assert_eq!(value.price_per_carat, Some(7200.0));
    }

    #[test]
    fn fair_price_reports_delta_from_midpoint() {
        let value = evaluate_value(&ideal_record(), &[band()]);
        assert_eq!(value.status, ValueStatus::Fair);
        assert_eq!(value.delta_pct, Some(-0.7));
        assert_eq!(value.label, "Fair range");
    }

    #[test]
    fn below_and_above_band() {
        let mut record = ideal_record();
        record.price = Some(6000.0);
        assert_eq!(evaluate_value(&record, &[band()]).status, ValueStatus::Below);
        record.price = Some(8000.0);
        assert_eq!(evaluate_value(&record, &[band()]).status, ValueStatus::Fair);
        record.price = Some(8001.0);
        assert_eq!(evaluate_value(&record, &[band()]).status, ValueStatus::Above);
    }

    #[test]
    fn first_matching_band_wins() {
        let mut cheap = band();
        cheap.price_per_carat_min = 1000.0;
        cheap.price_per_carat_max = 2000.0;
        let value = evaluate_value(&ideal_record(), &[cheap, band()]);
        assert_eq!(value.status, ValueStatus::Above);
    }

    #[test]
    fn cut_color_and_clarity_must_all_match() {
        let mut record = ideal_record();
        record.cut_grade = Some("Very Good".to_string());
        assert_eq!(
            evaluate_value(&record, &[band()]).status,
            ValueStatus::NoReference
        );

        let mut record = ideal_record();
        record.color = Some("H".to_string());
        assert_eq!(
            evaluate_value(&record, &[band()]).status,
            ValueStatus::NoReference
        );

        let mut record = ideal_record();
        record.clarity = Some("SI1".to_string());
        assert_eq!(
            evaluate_value(&record, &[band()]).status,
            ValueStatus::NoReference
        );
    }
}
