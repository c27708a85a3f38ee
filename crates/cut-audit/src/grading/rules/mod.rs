//! Sub-score evaluators.
//!
//! Each evaluator is an ordered table of field-scoped rules. A rule looks at
//! the canonical record, returns `None` when its field is absent, and
//! otherwise picks exactly one tier: a delta, a threshold label, an
//! explanation, and optionally a red flag. Table order is component order.

mod brightness;
mod fire;
mod risk;

pub use brightness::evaluate_brightness;
pub use fire::evaluate_fire;
pub use risk::evaluate_risk;

use super::domain::{CanonicalRecord, RedFlags, ScoreCategory, ScoreComponent, SubScore};
use super::rubric::clamp_score;

pub(crate) type Rule = fn(&CanonicalRecord) -> Option<RuleHit>;

/// The tier a rule selected for one record.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleHit {
    pub id: &'static str,
    pub delta: i32,
    pub threshold: String,
    pub explanation: &'static str,
    pub red_flag: Option<String>,
}

impl RuleHit {
    pub(crate) fn new(
        id: &'static str,
        delta: i32,
        threshold: impl Into<String>,
        explanation: &'static str,
    ) -> Self {
        Self {
            id,
            delta,
            threshold: threshold.into(),
            explanation,
            red_flag: None,
        }
    }

    pub(crate) fn flag(mut self, message: impl Into<String>) -> Self {
        self.red_flag = Some(message.into());
        self
    }
}

/// Runs a rule table from `base`, appending any raised flags to `flags`.
pub(crate) fn score_rules(
    category: ScoreCategory,
    base: i32,
    rules: &[Rule],
    record: &CanonicalRecord,
    flags: &mut RedFlags,
) -> SubScore {
    let mut running = base;
    let mut components = Vec::new();

    for hit in rules.iter().filter_map(|rule| rule(record)) {
        running += hit.delta;
        if let Some(message) = hit.red_flag {
            flags.raise(message);
        }
        components.push(ScoreComponent {
            id: hit.id.to_string(),
            category,
            delta: hit.delta,
            threshold: hit.threshold,
            explanation: hit.explanation.to_string(),
        });
    }

    SubScore {
        score: clamp_score(f64::from(running)),
        components,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::grading::domain::{CanonicalRecord, DiameterSource, Shape};

    /// A fully-specified record sitting on every rubric ideal.
    pub(crate) fn ideal_record() -> CanonicalRecord {
        CanonicalRecord {
            shape: Shape::Round,
            carat: Some(1.0),
            lab: Some("GIA".to_string()),
            cut_grade: Some("Excellent".to_string()),
            color: Some("F".to_string()),
            clarity: Some("VS1".to_string()),
            table_pct: Some(56.0),
            depth_pct: Some(61.8),
            crown_angle: Some(34.5),
            pavilion_angle: Some(40.8),
            girdle: Some("Medium".to_string()),
            culet: Some("None".to_string()),
            star_pct: Some(50.0),
            lower_halves_pct: Some(78.0),
            polish: Some("Excellent".to_string()),
            symmetry: Some("Excellent".to_string()),
            fluorescence: Some("None".to_string()),
            hazy_milky: false,
            clouds_note: None,
            avg_diameter_mm: Some(6.45),
            diameter_source: DiameterSource::Explicit,
            measurements: None,
            price: Some(7200.0),
            currency: "USD".to_string(),
        }
    }

    /// A record with every field absent.
    pub(crate) fn empty_record() -> CanonicalRecord {
        CanonicalRecord {
            shape: Shape::Round,
            carat: None,
            lab: None,
            cut_grade: None,
            color: None,
            clarity: None,
            table_pct: None,
            depth_pct: None,
            crown_angle: None,
            pavilion_angle: None,
            girdle: None,
            culet: None,
            star_pct: None,
            lower_halves_pct: None,
            polish: None,
            symmetry: None,
            fluorescence: None,
            hazy_milky: false,
            clouds_note: None,
            avg_diameter_mm: None,
            diameter_source: DiameterSource::Missing,
            measurements: None,
            price: None,
            currency: "USD".to_string(),
        }
    }
}
