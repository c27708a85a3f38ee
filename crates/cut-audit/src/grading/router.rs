use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::benchmarks::BenchmarkBand;
use super::diagnostics::{diagnose, InputDiagnostics};
use super::domain::{ComparisonResult, Evaluation, RawInput};
use super::normalizer::normalize;
use super::policy::{Verdict, VerdictView};
use super::rubric::{Rubric, RUBRIC};
use super::{evaluate_record, GradingEngine};

/// Router builder exposing the grading endpoints.
pub fn grading_router(engine: Arc<GradingEngine>) -> Router {
    Router::new()
        .route("/api/v1/evaluate", post(evaluate_handler))
        .route("/api/v1/compare", post(compare_handler))
        .route("/api/v1/rubric", get(rubric_handler))
        .route("/api/v1/benchmarks", get(benchmarks_handler))
        .with_state(engine)
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub generated_at: DateTime<Utc>,
    pub benchmarks_loaded: bool,
    pub evaluation: Evaluation,
    pub diagnostics: InputDiagnostics,
    pub verdict: VerdictView,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub generated_at: DateTime<Utc>,
    pub benchmarks_loaded: bool,
    pub comparison: ComparisonResult,
    pub diamond_a: SideReport,
    pub diamond_b: SideReport,
}

/// Input checks and verdict for one side of a comparison.
#[derive(Debug, Serialize)]
pub struct SideReport {
    pub diagnostics: InputDiagnostics,
    pub verdict: VerdictView,
}

impl SideReport {
    fn new(raw: &RawInput, evaluation: &Evaluation) -> Self {
        Self {
            diagnostics: diagnose(&normalize(raw)),
            verdict: Verdict::from_evaluation(evaluation).view(),
        }
    }
}

/// Pulls one side out of a compare body. Either key spelling is accepted,
/// camelCase first; a missing side or a non-object body is an empty record.
fn side(payload: &Value, camel: &str, snake: &str) -> RawInput {
    let value = payload
        .get(camel)
        .or_else(|| payload.get(snake))
        .cloned()
        .unwrap_or(Value::Null);
    RawInput::from_value(value)
}

#[derive(Debug, Serialize)]
pub struct BenchmarksResponse {
    pub loaded: bool,
    pub bands: Vec<BenchmarkBand>,
}

/// Evaluation plus diagnostics and verdict for one raw payload.
pub fn evaluation_envelope(engine: &GradingEngine, raw: &RawInput) -> EvaluateResponse {
    let record = normalize(raw);
    let diagnostics = diagnose(&record);
    let evaluation = evaluate_record(record, engine.bands());
    let verdict = Verdict::from_evaluation(&evaluation).view();

    debug!(
        grade = %evaluation.overall.grade,
        overall = evaluation.overall.score,
        red_flags = evaluation.red_flags.len(),
        "evaluated record"
    );

    EvaluateResponse {
        generated_at: Utc::now(),
        benchmarks_loaded: engine.benchmarks_loaded(),
        evaluation,
        diagnostics,
        verdict,
    }
}

pub fn comparison_envelope(
    engine: &GradingEngine,
    a: &RawInput,
    b: &RawInput,
) -> CompareResponse {
    let comparison = engine.compare(a, b);
    let diamond_a = SideReport::new(a, &comparison.diamond_a);
    let diamond_b = SideReport::new(b, &comparison.diamond_b);

    debug!(
        overall = %comparison.overall.winner,
        difference = comparison.overall.difference,
        "compared records"
    );

    CompareResponse {
        generated_at: Utc::now(),
        benchmarks_loaded: engine.benchmarks_loaded(),
        comparison,
        diamond_a,
        diamond_b,
    }
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<GradingEngine>>,
    Json(payload): Json<Value>,
) -> Json<EvaluateResponse> {
    let raw = RawInput::from_value(payload);
    Json(evaluation_envelope(&engine, &raw))
}

pub(crate) async fn compare_handler(
    State(engine): State<Arc<GradingEngine>>,
    Json(payload): Json<Value>,
) -> Json<CompareResponse> {
    let a = side(&payload, "diamondA", "diamond_a");
    let b = side(&payload, "diamondB", "diamond_b");
    Json(comparison_envelope(&engine, &a, &b))
}

pub(crate) async fn rubric_handler() -> Json<Rubric> {
    Json(RUBRIC)
}

pub(crate) async fn benchmarks_handler(
    State(engine): State<Arc<GradingEngine>>,
) -> Json<BenchmarksResponse> {
    Json(BenchmarksResponse {
        loaded: engine.benchmarks_loaded(),
        bands: engine.bands().to_vec(),
    })
}
