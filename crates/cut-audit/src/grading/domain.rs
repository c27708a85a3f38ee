use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Untyped field bag as received from a form, API payload, or fixture.
///
/// Every field may be missing, mistyped, or padded; the normalizer decides
/// what survives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInput {
    pub shape: Option<Value>,
    pub carat: Option<Value>,
    pub lab: Option<Value>,
    pub cut_grade: Option<Value>,
    pub color: Option<Value>,
    pub clarity: Option<Value>,
    pub table_pct: Option<Value>,
    pub depth_pct: Option<Value>,
    pub crown_angle: Option<Value>,
    pub pavilion_angle: Option<Value>,
    pub girdle: Option<Value>,
    pub culet: Option<Value>,
    pub star_pct: Option<Value>,
    pub lower_halves_pct: Option<Value>,
    pub polish: Option<Value>,
    pub symmetry: Option<Value>,
    pub fluorescence: Option<Value>,
    pub hazy_milky: Option<Value>,
    pub clouds_note: Option<Value>,
    pub avg_diameter_mm: Option<Value>,
    pub measurements: Option<Value>,
    pub price: Option<Value>,
    pub currency: Option<Value>,
}

impl RawInput {
    /// Builds a raw input from any JSON value; non-objects yield an empty bag.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Round,
    Princess,
    Oval,
    Cushion,
    Emerald,
    Radiant,
    Pear,
    Marquise,
    Other(String),
}

impl Shape {
    /// Maps an already title-cased label onto a known cut.
    pub fn from_title(title: &str) -> Self {
        match title {
            "Round" => Shape::Round,
            "Princess" => Shape::Princess,
            "Oval" => Shape::Oval,
            "Cushion" => Shape::Cushion,
            "Emerald" => Shape::Emerald,
            "Radiant" => Shape::Radiant,
            "Pear" => Shape::Pear,
            "Marquise" => Shape::Marquise,
            other => Shape::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Shape::Round => "Round",
            Shape::Princess => "Princess",
            Shape::Oval => "Oval",
            Shape::Cushion => "Cushion",
            Shape::Emerald => "Emerald",
            Shape::Radiant => "Radiant",
            Shape::Pear => "Pear",
            Shape::Marquise => "Marquise",
            Shape::Other(label) => label,
        }
    }

    pub fn is_round(&self) -> bool {
        matches!(self, Shape::Round)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Where the average diameter on a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiameterSource {
    Explicit,
    Measurements,
    Missing,
}

/// Typed, trimmed, case-normalized diamond record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub shape: Shape,
    pub carat: Option<f64>,
    pub lab: Option<String>,
    pub cut_grade: Option<String>,
    pub color: Option<String>,
    pub clarity: Option<String>,
    pub table_pct: Option<f64>,
    pub depth_pct: Option<f64>,
    pub crown_angle: Option<f64>,
    pub pavilion_angle: Option<f64>,
    pub girdle: Option<String>,
    pub culet: Option<String>,
    pub star_pct: Option<f64>,
    pub lower_halves_pct: Option<f64>,
    pub polish: Option<String>,
    pub symmetry: Option<String>,
    pub fluorescence: Option<String>,
    pub hazy_milky: bool,
    pub clouds_note: Option<String>,
    pub avg_diameter_mm: Option<f64>,
    pub diameter_source: DiameterSource,
    pub measurements: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Brightness,
    Fire,
    Risk,
}

/// Discrete contribution to a sub-score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub id: String,
    pub category: ScoreCategory,
    pub delta: i32,
    pub threshold: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub score: i32,
    pub components: Vec<ScoreComponent>,
}

/// Ordered, de-duplicated set of warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedFlags(Vec<String>);

impl RedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag unless an identical message is already present.
    pub fn raise(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.0.contains(&message) {
            self.0.push(message);
        }
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, messages: I) {
        for message in messages {
            self.raise(message);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn any_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.0
            .iter()
            .any(|flag| flag.to_lowercase().contains(&needle))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStatus {
    Pass,
    Near,
    Fail,
    Unknown,
}

/// Displayed value of a checklist field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChecklistValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ChecklistValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecklistValue::Number(value) => write!(f, "{value}"),
            ChecklistValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistEntry {
    pub label: &'static str,
    pub status: ChecklistStatus,
    pub actual: ChecklistValue,
    pub target: String,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadStatus {
    Unknown,
    Excellent,
    Balanced,
    SlightlyHidden,
    HiddenWeight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadResult {
    pub status: SpreadStatus,
    pub actual_diameter_mm: Option<f64>,
    pub expected_diameter_mm: Option<f64>,
    pub ratio: Option<f64>,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueStatus {
    NoPrice,
    CurrencyUnsupported,
    NoReference,
    Below,
    Fair,
    Above,
}

impl ValueStatus {
    /// Statuses that came from an actual benchmark match.
    pub fn is_comparable(&self) -> bool {
        matches!(self, ValueStatus::Below | ValueStatus::Fair | ValueStatus::Above)
    }

    /// Higher is a better deal.
    pub fn rank(&self) -> u8 {
        match self {
            ValueStatus::Below => 3,
            ValueStatus::Fair => 2,
            ValueStatus::Above => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueResult {
    pub status: ValueStatus,
    pub label: &'static str,
    pub explanation: &'static str,
    pub benchmark: Option<super::benchmarks::BenchmarkBand>,
    pub price_per_carat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceRating {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    Poor,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryComponent {
    pub name: &'static str,
    pub score: i32,
    pub rating: PerformanceRating,
    pub points: f64,
    pub threshold: &'static str,
    pub explanation: &'static str,
}

/// Round-only, lower-is-better composite rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryRating {
    pub available: bool,
    pub model: &'static str,
    pub scale: &'static str,
    pub score: Option<f64>,
    pub band: &'static str,
    pub recommendation: &'static str,
    pub components: Vec<SecondaryComponent>,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallAssessment {
    pub score: i32,
    pub grade: super::rubric::Grade,
    pub explanation: String,
    pub thresholds: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tradeoffs {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Complete, immutable result of evaluating one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub input: CanonicalRecord,
    pub overall: OverallAssessment,
    pub brightness: SubScore,
    pub fire: SubScore,
    pub risk: SubScore,
    pub pass_maximum_shine_zone: bool,
    pub checklist: Vec<ChecklistEntry>,
    pub red_flags: RedFlags,
    pub spread: SpreadResult,
    pub value: ValueResult,
    pub secondary_rating: SecondaryRating,
    pub tradeoffs: Tradeoffs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    #[serde(rename = "Diamond A")]
    DiamondA,
    #[serde(rename = "Diamond B")]
    DiamondB,
    #[serde(rename = "Too close to call")]
    TooClose,
    #[serde(rename = "N/A (round-only metric)")]
    NotApplicable,
    #[serde(rename = "No comparable benchmark")]
    NoComparableBenchmark,
    #[serde(rename = "Diamond A (only comparable one)")]
    OnlyDiamondA,
    #[serde(rename = "Diamond B (only comparable one)")]
    OnlyDiamondB,
}

impl Winner {
    pub fn label(&self) -> &'static str {
        match self {
            Winner::DiamondA => "Diamond A",
            Winner::DiamondB => "Diamond B",
            Winner::TooClose => "Too close to call",
            Winner::NotApplicable => "N/A (round-only metric)",
            Winner::NoComparableBenchmark => "No comparable benchmark",
            Winner::OnlyDiamondA => "Diamond A (only comparable one)",
            Winner::OnlyDiamondB => "Diamond B (only comparable one)",
        }
    }

    /// The same outcome seen from the other side of the comparison.
    pub fn swapped(&self) -> Self {
        match self {
            Winner::DiamondA => Winner::DiamondB,
            Winner::DiamondB => Winner::DiamondA,
            Winner::OnlyDiamondA => Winner::OnlyDiamondB,
            Winner::OnlyDiamondB => Winner::OnlyDiamondA,
            other => *other,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutcome {
    pub category: &'static str,
    pub winner: Winner,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub diamond_a: Evaluation,
    pub diamond_b: Evaluation,
    pub winner_by_category: Vec<CategoryOutcome>,
    pub overall: CategoryOutcome,
}
