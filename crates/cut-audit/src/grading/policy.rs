use super::domain::{CanonicalRecord, Evaluation, OverallAssessment, RedFlags, SubScore};
use super::rubric::{clamp_score, Grade, GRADE_THRESHOLDS, RUBRIC};
use serde::Serialize;

pub const GRADE_LADDER: &str =
    "A>=90 (no red flags), B=80-89, C=70-79, D=60-69, F<60 or major red flag";

/// Leakage-range pavilion combined with an avoid-list depth.
pub fn major_red_flag(record: &CanonicalRecord) -> bool {
    let combo = RUBRIC.thresholds.major_red_flag_combo;
    match (record.pavilion_angle, record.depth_pct) {
        (Some(pavilion), Some(depth)) => {
            pavilion >= combo.pavilion_at_or_above
                && (depth > combo.depth_above || depth < combo.depth_below)
        }
        _ => false,
    }
}

pub fn overall_score(brightness: &SubScore, fire: &SubScore, risk: &SubScore) -> i32 {
    clamp_score(
        RUBRIC
            .scores
            .overall_weights
            .blend(brightness.score, fire.score, risk.score),
    )
}

/// Letter grade as a pure function of score, flag count, and the major combination.
pub fn grade_for(overall: i32, red_flag_count: usize, major_flag: bool) -> (Grade, String) {
    if overall < 60 || major_flag {
        return (
            Grade::F,
            "Score fell below 60 or major red-flag combination was triggered.".to_string(),
        );
    }

    let grade = GRADE_THRESHOLDS
        .iter()
        .find(|threshold| overall >= threshold.min)
        .map(|threshold| threshold.grade)
        .unwrap_or(Grade::F);

    if grade == Grade::A && red_flag_count > 0 {
        return (
            Grade::B,
            "Numeric score reached A-range, but red flags prevent an A grade.".to_string(),
        );
    }

    (grade, format!("Numeric overall score mapped to grade {grade}."))
}

pub(crate) fn decide_overall(
    record: &CanonicalRecord,
    brightness: &SubScore,
    fire: &SubScore,
    risk: &SubScore,
    red_flags: &RedFlags,
) -> OverallAssessment {
    let score = overall_score(brightness, fire, risk);
    let (grade, explanation) = grade_for(score, red_flags.len(), major_red_flag(record));

    OverallAssessment {
        score,
        grade,
        explanation,
        thresholds: GRADE_LADDER,
    }
}

/// Shortlist recommendation layered on top of a finished evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Reject,
    StrongCandidate,
    Promising,
}

impl Verdict {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let secondary = evaluation.secondary_rating.score;
        let flag_count = evaluation.red_flags.len();

        if evaluation.overall.grade == Grade::F
            || flag_count >= 3
            || secondary.map(|score| score > 4.5).unwrap_or(false)
        {
            return Verdict::Reject;
        }

        if secondary.map(|score| score <= 2.5).unwrap_or(false)
            && evaluation.risk.score <= 30
            && flag_count == 0
        {
            return Verdict::StrongCandidate;
        }

        Verdict::Promising
    }

    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Reject => "Reject / Keep Searching",
            Verdict::StrongCandidate => "Strong Candidate",
            Verdict::Promising => "Promising, Verify Carefully",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Verdict::Reject => "Geometry risk is too high in this template.",
            Verdict::StrongCandidate => "Passes this rejection-style screen with high confidence.",
            Verdict::Promising => "Worth shortlist review with imagery and vendor confirmation.",
        }
    }

    pub fn view(&self) -> VerdictView {
        VerdictView {
            kind: *self,
            title: self.title(),
            subtitle: self.subtitle(),
        }
    }
}

/// Serialized verdict including its display copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerdictView {
    pub kind: Verdict,
    pub title: &'static str,
    pub subtitle: &'static str,
}
