use super::domain::{CanonicalRecord, DiameterSource};
use super::rubric::RUBRIC;
use serde::Serialize;

/// Accepted input range for one numeric field.
#[derive(Debug, Clone, Copy)]
pub struct InputLimit {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

const fn limit(label: &'static str, min: f64, max: f64) -> InputLimit {
    InputLimit { label, min, max }
}

pub const CARAT: InputLimit = limit("Carat", 0.1, 20.0);
pub const TABLE: InputLimit = limit("Table %", 45.0, 75.0);
pub const DEPTH: InputLimit = limit("Depth %", 50.0, 75.0);
pub const CROWN: InputLimit = limit("Crown angle", 25.0, 45.0);
pub const PAVILION: InputLimit = limit("Pavilion angle", 38.0, 43.0);
pub const STAR: InputLimit = limit("Star %", 0.0, 100.0);
pub const LOWER_HALVES: InputLimit = limit("Lower halves %", 0.0, 100.0);
pub const DIAMETER: InputLimit = limit("Average diameter (mm)", 2.0, 20.0);
pub const PRICE: InputLimit = limit("Price", 0.0, 100_000_000.0);

/// Validation findings for a normalized record. Never affects scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputDiagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

impl InputDiagnostics {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn diagnose(record: &CanonicalRecord) -> InputDiagnostics {
    let mut out = InputDiagnostics::default();

    if record.diameter_source == DiameterSource::Measurements {
        if let Some(diameter) = record.avg_diameter_mm {
            out.notes.push(format!(
                "Average diameter was auto-derived from measurements: {diameter} mm."
            ));
        }
    }

    for (value, limit) in [
        (record.table_pct, TABLE),
        (record.depth_pct, DEPTH),
        (record.crown_angle, CROWN),
        (record.pavilion_angle, PAVILION),
    ] {
        if value.is_none() {
            out.errors.push(format!("{} is required.", limit.label));
        }
    }

    for (value, limit) in [
        (record.carat, CARAT),
        (record.table_pct, TABLE),
        (record.depth_pct, DEPTH),
        (record.crown_angle, CROWN),
        (record.pavilion_angle, PAVILION),
        (record.star_pct, STAR),
        (record.lower_halves_pct, LOWER_HALVES),
        (record.avg_diameter_mm, DIAMETER),
        (record.price, PRICE),
    ] {
        if let Some(value) = value {
            if value < limit.min || value > limit.max {
                out.errors.push(format!(
                    "{} must be between {} and {}.",
                    limit.label, limit.min, limit.max
                ));
            }
        }
    }

    let has_measurements = record.measurements.is_some();

    if has_measurements && record.avg_diameter_mm.is_none() {
        out.warnings.push(
            "Measurements format could not be parsed. Use something like 6.40-6.45 x 3.95."
                .to_string(),
        );
    }
    if record.price.is_some() && record.carat.is_none() {
        out.warnings
            .push("Price was entered without carat. Value check needs both.".to_string());
    }
    if record.carat.is_some() && record.price.is_none() {
        out.warnings
            .push("Price missing: value check will be skipped.".to_string());
    }
    if record.avg_diameter_mm.is_none() && !has_measurements {
        out.warnings.push(
            "No diameter or measurements provided: spread analysis may be limited.".to_string(),
        );
    }

    let avoid = RUBRIC.avoid_list;
    if record.table_pct.is_some_and(|table| avoid.table_avoided(table)) {
        out.warnings
            .push("Table is in avoid-list territory (<53 or >60).".to_string());
    }
    if record.depth_pct.is_some_and(|depth| avoid.depth_avoided(depth)) {
        out.warnings
            .push("Depth is in avoid-list territory (<59 or >63).".to_string());
    }
    if record
        .pavilion_angle
        .is_some_and(|pavilion| pavilion >= avoid.pavilion_leakage)
    {
        out.warnings
            .push("Pavilion angle is 41.2 or higher (leakage risk).".to_string());
    }
    if record.hazy_milky {
        out.warnings
            .push("Hazy/milky was checked and will strongly increase risk.".to_string());
    }

    out
}
