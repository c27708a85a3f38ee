//! Cut-proportion grading pipeline.
//!
//! Data flows one way: raw input is normalized, scored by the brightness,
//! fire, and risk rule tables, checked against the rubric ranges, priced
//! against reference bands, and finally graded. Every stage is a pure
//! function of its inputs; the only shared state is the read-only rubric
//! and the band list the caller supplies.

pub mod benchmarks;
pub mod checklist;
pub mod comparator;
pub mod diagnostics;
pub mod domain;
pub mod normalizer;
pub mod policy;
pub mod router;
pub mod rubric;
pub mod rules;
pub mod secondary;
pub mod spread;
pub mod tradeoffs;
pub mod value;

pub use benchmarks::{load_benchmarks, parse_benchmarks, BenchmarkBand, BenchmarkLoadError};
pub use diagnostics::{diagnose, InputDiagnostics};
pub use domain::{
    CanonicalRecord, CategoryOutcome, ComparisonResult, Evaluation, RawInput, RedFlags, Shape,
    SubScore, Winner,
};
pub use normalizer::normalize;
pub use policy::Verdict;
pub use router::grading_router;
pub use rubric::{Grade, RUBRIC};

use std::path::Path;
use tracing::{info, warn};

use checklist::{build_checklist, passes_maximum_shine_zone};
use policy::decide_overall;
use rules::{evaluate_brightness, evaluate_fire, evaluate_risk};
use secondary::{evaluate_secondary, SubScores};
use spread::evaluate_spread;
use tradeoffs::derive_tradeoffs;
use value::evaluate_value;

/// Runs the full pipeline on one raw record.
pub fn evaluate(raw: &RawInput, bands: &[BenchmarkBand]) -> Evaluation {
    evaluate_record(normalize(raw), bands)
}

/// Evaluates both records independently and reports per-category winners.
pub fn compare(a: &RawInput, b: &RawInput, bands: &[BenchmarkBand]) -> ComparisonResult {
    let diamond_a = evaluate(a, bands);
    let diamond_b = evaluate(b, bands);
    let (winner_by_category, overall) = comparator::winners(&diamond_a, &diamond_b);

    ComparisonResult {
        diamond_a,
        diamond_b,
        winner_by_category,
        overall,
    }
}

pub fn evaluate_record(record: CanonicalRecord, bands: &[BenchmarkBand]) -> Evaluation {
    let mut red_flags = RedFlags::new();

    let brightness = evaluate_brightness(&record, &mut red_flags);
    let fire = evaluate_fire(&record);
    let risk = evaluate_risk(&record, &mut red_flags);
    let checklist = build_checklist(&record);
    let spread = evaluate_spread(&record);
    let value = evaluate_value(&record, bands);

    let secondary_rating = evaluate_secondary(
        &record,
        SubScores {
            brightness: &brightness,
            fire: &fire,
            risk: &risk,
        },
        &spread,
        &red_flags,
    );
    let overall = decide_overall(&record, &brightness, &fire, &risk, &red_flags);
    let tradeoffs = derive_tradeoffs(&brightness, &fire, &risk);

    Evaluation {
        input: record,
        overall,
        pass_maximum_shine_zone: passes_maximum_shine_zone(&checklist),
        brightness,
        fire,
        risk,
        checklist,
        red_flags,
        spread,
        value,
        secondary_rating,
        tradeoffs,
    }
}

/// Holds the process-wide reference bands so callers do not have to thread
/// them through every call.
#[derive(Debug, Clone, Default)]
pub struct GradingEngine {
    bands: Vec<BenchmarkBand>,
    loaded: bool,
}

impl GradingEngine {
    pub fn new(bands: Vec<BenchmarkBand>) -> Self {
        Self {
            bands,
            loaded: true,
        }
    }

    /// An engine whose band source could not be read; value checks degrade
    /// to `no-reference`.
    pub fn without_benchmarks() -> Self {
        Self::default()
    }

    /// Loads bands from `path`, falling back to an empty, not-loaded table.
    pub fn from_benchmark_file(path: &Path) -> Self {
        match load_benchmarks(path) {
            Ok(bands) => {
                info!(path = %path.display(), bands = bands.len(), "benchmark bands loaded");
                Self::new(bands)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "benchmark bands unavailable; value check may show no reference band"
                );
                Self::without_benchmarks()
            }
        }
    }

    pub fn bands(&self) -> &[BenchmarkBand] {
        &self.bands
    }

    pub fn benchmarks_loaded(&self) -> bool {
        self.loaded
    }

    pub fn evaluate(&self, raw: &RawInput) -> Evaluation {
        evaluate(raw, &self.bands)
    }

    pub fn compare(&self, a: &RawInput, b: &RawInput) -> ComparisonResult {
        compare(a, b, &self.bands)
    }
}
