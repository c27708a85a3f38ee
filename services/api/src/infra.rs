use cut_audit::config::DEFAULT_BENCHMARKS_PATH;
use cut_audit::error::AppError;
use cut_audit::grading::{GradingEngine, RawInput};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads a JSON record from disk. Any JSON shape is accepted; non-objects
/// become an empty record.
pub(crate) fn read_raw_input(path: &Path) -> Result<RawInput, AppError> {
    let contents = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    Ok(RawInput::from_value(value))
}

pub(crate) fn engine_for(benchmarks: Option<PathBuf>) -> GradingEngine {
    let path = benchmarks.unwrap_or_else(|| PathBuf::from(DEFAULT_BENCHMARKS_PATH));
    GradingEngine::from_benchmark_file(&path)
}
