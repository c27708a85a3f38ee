use cut_audit::grading::domain::{DiameterSource, SpreadStatus, ValueStatus};
use cut_audit::grading::spread::classify;
use cut_audit::grading::{
    diagnose, evaluate, normalize, parse_benchmarks, BenchmarkBand, Grade, RawInput, Shape,
    Verdict,
};
use serde_json::{json, Value};

fn ideal_payload() -> Value {
    json!({
        "shape": "Round",
        "carat": 1.0,
        "lab": "GIA",
        "cutGrade": "Excellent",
        "color": "F",
        "clarity": "VS1",
        "tablePct": 56,
        "depthPct": 61.8,
        "crownAngle": 34.5,
        "pavilionAngle": 40.8,
        "girdle": "Medium",
        "culet": "None",
        "starPct": 50,
        "lowerHalvesPct": 78,
        "polish": "Excellent",
        "symmetry": "Excellent",
        "fluorescence": "None",
        "hazyMilky": false,
        "avgDiameterMm": 6.45,
        "price": 7200,
        "currency": "USD"
    })
}

fn leaky_deep_payload() -> Value {
    let mut payload = ideal_payload();
    payload["pavilionAngle"] = json!(41.3);
    payload["depthPct"] = json!(63.4);
    payload
}

fn bands() -> Vec<BenchmarkBand> {
    parse_benchmarks(&json!([
        {
            "shape": "Round",
            "carat_min": 0.9,
            "carat_max": 1.09,
            "cut_grades": ["Excellent", "Ideal"],
            "color_best": "E",
            "color_worst": "G",
            "clarity_best": "VVS2",
            "clarity_worst": "VS2",
            "price_per_carat_min": 6500,
            "price_per_carat_max": 8000
        }
    ]))
}

#[test]
fn ideal_record_earns_an_a_without_flags() {
    let evaluation = evaluate(&RawInput::from(ideal_payload()), &bands());

    assert!(evaluation.brightness.score >= 90);
    assert!(evaluation.fire.score >= 90);
    assert!(evaluation.risk.score <= 20);
    assert!(evaluation.red_flags.is_empty());
    assert_eq!(evaluation.overall.grade, Grade::A);
    assert!(evaluation.pass_maximum_shine_zone);
    assert_eq!(evaluation.value.status, ValueStatus::Fair);
    assert_eq!(evaluation.spread.status, SpreadStatus::Balanced);
    assert!(evaluation.secondary_rating.available);
    assert_eq!(
        Verdict::from_evaluation(&evaluation),
        Verdict::StrongCandidate
    );
}

#[test]
fn leakage_with_deep_depth_forces_an_f() {
    let evaluation = evaluate(&RawInput::from(leaky_deep_payload()), &[]);

    assert!(evaluation.red_flags.any_contains("leakage"));
    assert!(evaluation
        .red_flags
        .iter()
        .any(|flag| flag.starts_with("Depth is outside avoid threshold")));
    assert_eq!(evaluation.overall.grade, Grade::F);
    assert!(evaluation
        .overall
        .explanation
        .contains("major red-flag combination"));
    assert_eq!(Verdict::from_evaluation(&evaluation), Verdict::Reject);
}

#[test]
fn sub_scores_stay_in_bounds_for_extreme_inputs() {
    let raw = RawInput::from(json!({
        "carat": 3.2,
        "tablePct": 70,
        "depthPct": 52,
        "crownAngle": 26,
        "pavilionAngle": 42.9,
        "girdle": "Extremely Thick",
        "culet": "Large",
        "starPct": 70,
        "lowerHalvesPct": 60,
        "polish": "Fair",
        "symmetry": "Poor",
        "fluorescence": "Very Strong",
        "hazyMilky": "yes",
        "cloudsNote": "clouds throughout"
    }));
    let evaluation = evaluate(&raw, &[]);

    for score in [
        evaluation.brightness.score,
        evaluation.fire.score,
        evaluation.risk.score,
        evaluation.overall.score,
    ] {
        assert!((0..=100).contains(&score), "score {score} out of range");
    }
    assert_eq!(evaluation.risk.score, 100);
    assert_eq!(evaluation.overall.grade, Grade::F);
    assert!(!evaluation.pass_maximum_shine_zone);
}

#[test]
fn evaluation_is_deterministic() {
    let raw = RawInput::from(leaky_deep_payload());
    assert_eq!(evaluate(&raw, &bands()), evaluate(&raw, &bands()));
}

#[test]
fn non_round_shapes_have_no_secondary_score() {
    let mut payload = ideal_payload();
    payload["shape"] = json!("oval");
    let evaluation = evaluate(&RawInput::from(payload), &[]);

    assert_eq!(evaluation.input.shape, Shape::Oval);
    assert!(!evaluation.secondary_rating.available);
    assert_eq!(evaluation.secondary_rating.score, None);

    let serialized = serde_json::to_value(&evaluation).expect("serializes");
    assert_eq!(serialized["secondaryRating"]["score"], Value::Null);
    assert_eq!(serialized["input"]["shape"], json!("Oval"));
}

#[test]
fn malformed_input_degrades_instead_of_failing() {
    let raw = RawInput::from(json!({
        "carat": "heavy",
        "tablePct": "",
        "depthPct": null,
        "price": "NaN",
        "measurements": "unknown"
    }));
    let evaluation = evaluate(&raw, &bands());

    assert_eq!(evaluation.input.carat, None);
    assert_eq!(evaluation.input.price, None);
    assert_eq!(evaluation.value.status, ValueStatus::NoPrice);
    assert_eq!(evaluation.spread.status, SpreadStatus::Unknown);
    assert!(evaluation.brightness.components.is_empty());
}

#[test]
fn measurements_fill_in_a_missing_diameter() {
    let mut payload = ideal_payload();
    payload["avgDiameterMm"] = Value::Null;
    payload["measurements"] = json!("6.40-6.45 x 3.95 mm");
    let record = normalize(&RawInput::from(payload));

    assert_eq!(record.diameter_source, DiameterSource::Measurements);
    let diameter = record.avg_diameter_mm.expect("diameter derived");
    assert!((diameter - 6.425).abs() < 1e-9);

    let diagnostics = diagnose(&record);
    assert_eq!(diagnostics.notes.len(), 1);
    assert!(diagnostics.errors.is_empty());
}

#[test]
fn spread_boundaries_are_inclusive() {
    assert_eq!(classify(1.01).0, SpreadStatus::Excellent);
    assert_eq!(classify(0.99).0, SpreadStatus::Balanced);
}

#[test]
fn currency_other_than_usd_is_not_compared() {
    let mut payload = ideal_payload();
    payload["currency"] = json!("eur");
    let evaluation = evaluate(&RawInput::from(payload), &bands());

    assert_eq!(evaluation.input.currency, "EUR");
    assert_eq!(evaluation.value.status, ValueStatus::CurrencyUnsupported);
    assert_eq!(evaluation.value.price_per_carat, Some(7200.0));
}
