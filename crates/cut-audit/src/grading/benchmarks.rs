use super::domain::CanonicalRecord;
use super::rubric::{rank_of, CLARITY_ORDER, COLOR_ORDER};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reference price-per-carat range keyed by shape, carat, cut, color, and clarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkBand {
    pub shape: String,
    pub carat_min: f64,
    pub carat_max: f64,
    pub cut_grades: Vec<String>,
    pub color_best: String,
    pub color_worst: String,
    pub clarity_best: String,
    pub clarity_worst: String,
    pub price_per_carat_min: f64,
    pub price_per_carat_max: f64,
}

impl BenchmarkBand {
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        let shape_match = self.shape.trim().to_lowercase() == record.shape.label().to_lowercase();
        let carat_match = record
            .carat
            .map(|carat| carat >= self.carat_min && carat <= self.carat_max)
            .unwrap_or(false);
        let cut = record
            .cut_grade
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let cut_match = self
            .cut_grades
            .iter()
            .any(|allowed| allowed.trim().to_lowercase() == cut);
        let color_match = rank_within(
            record.color.as_deref(),
            &self.color_best,
            &self.color_worst,
            COLOR_ORDER,
        );
        let clarity_match = rank_within(
            record.clarity.as_deref(),
            &self.clarity_best,
            &self.clarity_worst,
            CLARITY_ORDER,
        );

        shape_match && carat_match && cut_match && color_match && clarity_match
    }

    pub fn midpoint(&self) -> f64 {
        (self.price_per_carat_min + self.price_per_carat_max) / 2.0
    }
}

/// Inclusive bound check by table index; unknown letters never match.
fn rank_within(value: Option<&str>, best: &str, worst: &str, order: &[&str]) -> bool {
    let Some(value) = value else {
        return false;
    };
    match (
        rank_of(value, order),
        rank_of(best.trim(), order),
        rank_of(worst.trim(), order),
    ) {
        (Some(value), Some(best), Some(worst)) => value >= best && value <= worst,
        _ => false,
    }
}

/// First band that accepts the record, in list order.
pub fn match_benchmark<'a>(
    record: &CanonicalRecord,
    bands: &'a [BenchmarkBand],
) -> Option<&'a BenchmarkBand> {
    bands.iter().find(|band| band.matches(record))
}

/// Accepts either a bare array of bands or an object with a `bands` array.
///
/// Anything else is treated as an empty dataset, and individual entries that
/// do not describe a band are skipped.
pub fn parse_benchmarks(payload: &Value) -> Vec<BenchmarkBand> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("bands") {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match BenchmarkBand::deserialize(entry) {
                Ok(band) => Some(band),
                Err(err) => {
                    warn!(index, error = %err, "skipping malformed benchmark band");
                    None
                }
            },
        )
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum BenchmarkLoadError {
    #[error("failed to read benchmark dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("benchmark dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("benchmark dataset is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads a dataset from disk, choosing the parser by file extension.
pub fn load_benchmarks(path: &Path) -> Result<Vec<BenchmarkBand>, BenchmarkLoadError> {
    let file = File::open(path).map_err(|source| BenchmarkLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let bands = if is_csv {
        read_csv_benchmarks(file)?
    } else {
        read_json_benchmarks(file)?
    };

    debug!(path = %path.display(), bands = bands.len(), "benchmark dataset loaded");
    Ok(bands)
}

pub fn read_json_benchmarks<R: Read>(reader: R) -> Result<Vec<BenchmarkBand>, BenchmarkLoadError> {
    let payload: Value = serde_json::from_reader(reader)?;
    Ok(parse_benchmarks(&payload))
}

pub fn read_csv_benchmarks<R: Read>(reader: R) -> Result<Vec<BenchmarkBand>, BenchmarkLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut bands = Vec::new();

    for row in csv_reader.deserialize::<BenchmarkRow>() {
        bands.push(row?.into_band());
    }

    Ok(bands)
}

#[derive(Debug, Deserialize)]
struct BenchmarkRow {
    shape: String,
    carat_min: f64,
    carat_max: f64,
    cut_grades: String,
    color_best: String,
    color_worst: String,
    clarity_best: String,
    clarity_worst: String,
    price_per_carat_min: f64,
    price_per_carat_max: f64,
}

impl BenchmarkRow {
    fn into_band(self) -> BenchmarkBand {
        BenchmarkBand {
            shape: self.shape,
            carat_min: self.carat_min,
            carat_max: self.carat_max,
            cut_grades: self
                .cut_grades
                .split('|')
                .map(str::trim)
                .filter(|grade| !grade.is_empty())
                .map(str::to_string)
                .collect(),
            color_best: self.color_best,
            color_worst: self.color_worst,
            clarity_best: self.clarity_best,
            clarity_worst: self.clarity_worst,
            price_per_carat_min: self.price_per_carat_min,
            price_per_carat_max: self.price_per_carat_max,
        }
    }
}
