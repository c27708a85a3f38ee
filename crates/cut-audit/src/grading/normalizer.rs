use super::domain::{CanonicalRecord, DiameterSource, RawInput, Shape};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const DEFAULT_SHAPE: &str = "Round";
const DEFAULT_CURRENCY: &str = "USD";

/// Coerces a raw field bag into a canonical record. Never fails: anything
/// unusable becomes absent.
pub fn normalize(raw: &RawInput) -> CanonicalRecord {
    let measurements = text(raw.measurements.as_ref());
    let explicit_diameter = number(raw.avg_diameter_mm.as_ref());
    let (avg_diameter_mm, diameter_source) = match explicit_diameter {
        Some(diameter) => (Some(diameter), DiameterSource::Explicit),
        None => match measurements.as_deref().and_then(diameter_from_measurements) {
            Some(diameter) => (Some(diameter), DiameterSource::Measurements),
            None => (None, DiameterSource::Missing),
        },
    };

    let shape_title = text(raw.shape.as_ref())
        .map(|shape| to_title(&shape))
        .filter(|shape| !shape.is_empty())
        .unwrap_or_else(|| DEFAULT_SHAPE.to_string());

    CanonicalRecord {
        shape: Shape::from_title(&shape_title),
        carat: number(raw.carat.as_ref()),
        lab: text(raw.lab.as_ref()),
        cut_grade: text(raw.cut_grade.as_ref()),
        color: text(raw.color.as_ref()).map(|color| color.to_uppercase()),
        clarity: text(raw.clarity.as_ref()).map(|clarity| clarity.to_uppercase()),
        table_pct: number(raw.table_pct.as_ref()),
        depth_pct: number(raw.depth_pct.as_ref()),
        crown_angle: number(raw.crown_angle.as_ref()),
        pavilion_angle: number(raw.pavilion_angle.as_ref()),
        girdle: text(raw.girdle.as_ref()),
        culet: text(raw.culet.as_ref()),
        star_pct: number(raw.star_pct.as_ref()),
        lower_halves_pct: number(raw.lower_halves_pct.as_ref()),
        polish: text(raw.polish.as_ref()),
        symmetry: text(raw.symmetry.as_ref()),
        fluorescence: text(raw.fluorescence.as_ref()),
        hazy_milky: flag(raw.hazy_milky.as_ref()),
        clouds_note: text(raw.clouds_note.as_ref()),
        avg_diameter_mm,
        diameter_source,
        measurements,
        price: number(raw.price.as_ref()),
        currency: text(raw.currency.as_ref())
            .map(|currency| currency.to_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    }
}

/// Finite number from a JSON number or numeric string.
fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|value| value.is_finite())
}

/// Trimmed text; empty strings are absent.
fn text(value: Option<&Value>) -> Option<String> {
    let raw = match value? {
        Value::String(raw) => raw.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(checked)) => *checked,
        Some(Value::Number(number)) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Some(Value::String(raw)) => matches!(
            raw.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "1" | "checked"
        ),
        _ => false,
    }
}

/// "very good" -> "Very-Good", "round" -> "Round".
pub(crate) fn to_title(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/'))
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn number_token() -> Option<&'static Regex> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN
        .get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").ok())
        .as_ref()
}

/// Averages the first two numbers of a string like "6.40-6.45 x 3.95".
pub fn diameter_from_measurements(measurements: &str) -> Option<f64> {
    let token = number_token()?;
    let mut numbers = token
        .find_iter(measurements)
        .filter_map(|found| found.as_str().parse::<f64>().ok());
    let first = numbers.next()?;
    let second = numbers.next()?;
    let average = (first + second) / 2.0;
    average.is_finite().then_some(average)
}
