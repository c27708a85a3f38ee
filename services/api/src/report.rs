use crate::cli::OutputFormat;
use crate::infra::{engine_for, read_raw_input};
use clap::Args;
use cut_audit::error::AppError;
use cut_audit::grading::domain::{ChecklistStatus, SpreadStatus};
use cut_audit::grading::router::{
    comparison_envelope, evaluation_envelope, CompareResponse, EvaluateResponse,
};
use cut_audit::grading::{Evaluation, InputDiagnostics};
use serde::Serialize;
use std::path::PathBuf;

const NO_BENCHMARKS_NOTE: &str =
    "Benchmarks were not loaded. Value check may show no reference band.";

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding one record
    pub(crate) input: PathBuf,
    /// Reference band dataset (.json or .csv). Defaults to data/benchmarks.json.
    #[arg(long)]
    pub(crate) benchmarks: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// JSON file for diamond A
    pub(crate) first: PathBuf,
    /// JSON file for diamond B
    pub(crate) second: PathBuf,
    /// Reference band dataset (.json or .csv). Defaults to data/benchmarks.json.
    #[arg(long)]
    pub(crate) benchmarks: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        benchmarks,
        format,
    } = args;

    let raw = read_raw_input(&input)?;
    let engine = engine_for(benchmarks);
    let response = evaluation_envelope(&engine, &raw);

    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(&response)?),
        OutputFormat::Text => println!("{}", render_evaluation(&response)),
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        first,
        second,
        benchmarks,
        format,
    } = args;

    let a = read_raw_input(&first)?;
    let b = read_raw_input(&second)?;
    let engine = engine_for(benchmarks);
    let response = comparison_envelope(&engine, &a, &b);

    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(&response)?),
        OutputFormat::Text => println!("{}", render_comparison(&response)),
    }
    Ok(())
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(AppError::from)
}

pub(crate) fn render_evaluation(response: &EvaluateResponse) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} - {}",
        response.verdict.title, response.verdict.subtitle
    ));
    push_evaluation(&mut lines, &response.evaluation);
    push_diagnostics(&mut lines, &response.diagnostics);
    if !response.benchmarks_loaded {
        lines.push(String::new());
        lines.push(NO_BENCHMARKS_NOTE.to_string());
    }
    lines.join("\n")
}

pub(crate) fn render_comparison(response: &CompareResponse) -> String {
    let comparison = &response.comparison;
    let mut lines = vec!["Comparison".to_string()];

    for outcome in &comparison.winner_by_category {
        lines.push(format!(
            "- {}: {} (difference {})",
            outcome.category, outcome.winner, outcome.difference
        ));
    }
    lines.push(format!(
        "Overall comparison: {} (difference {}).",
        comparison.overall.winner, comparison.overall.difference
    ));

    for (label, evaluation, side) in [
        ("Diamond A", &comparison.diamond_a, &response.diamond_a),
        ("Diamond B", &comparison.diamond_b, &response.diamond_b),
    ] {
        lines.push(String::new());
        lines.push(format!("== {label} =="));
        lines.push(format!("{} - {}", side.verdict.title, side.verdict.subtitle));
        push_evaluation(&mut lines, evaluation);
        push_diagnostics(&mut lines, &side.diagnostics);
    }

    if !response.benchmarks_loaded {
        lines.push(String::new());
        lines.push(NO_BENCHMARKS_NOTE.to_string());
    }
    lines.join("\n")
}

fn push_evaluation(lines: &mut Vec<String>, evaluation: &Evaluation) {
    let overall = &evaluation.overall;
    lines.push(format!(
        "Overall: {} (grade {}) - {}",
        overall.score, overall.grade, overall.explanation
    ));
    lines.push(format!(
        "Brightness {} | Fire {} | Risk {} (lower is better)",
        evaluation.brightness.score, evaluation.fire.score, evaluation.risk.score
    ));

    let secondary = &evaluation.secondary_rating;
    match secondary.score {
        Some(score) => lines.push(format!(
            "HCA-like: {score} ({}) - {}",
            secondary.band, secondary.recommendation
        )),
        None => lines.push(format!("HCA-like: unavailable - {}", secondary.recommendation)),
    }

    let spread = &evaluation.spread;
    match spread.ratio {
        Some(ratio) => lines.push(format!(
            "Spread: {} (ratio {ratio:.3}) - {}",
            spread_label(spread.status),
            spread.explanation
        )),
        None => lines.push(format!("Spread: unknown - {}", spread.explanation)),
    }

    let value = &evaluation.value;
    let mut value_line = format!("Value: {} - {}", value.label, value.explanation);
    if let Some(price_per_carat) = value.price_per_carat {
        value_line.push_str(&format!(" (price/ct {price_per_carat}"));
        if let Some(delta) = value.delta_pct {
            value_line.push_str(&format!(", {delta:+}% vs band midpoint"));
        }
        value_line.push(')');
    }
    lines.push(value_line);

    lines.push(format!(
        "Maximum Shine Zone: {}",
        if evaluation.pass_maximum_shine_zone {
            "pass"
        } else {
            "not met"
        }
    ));
    lines.push("Checklist:".to_string());
    for entry in &evaluation.checklist {
        lines.push(format!(
            "  [{}] {}: {} (target {})",
            checklist_label(entry.status),
            entry.label,
            entry.actual,
            entry.target
        ));
    }

    if evaluation.red_flags.is_empty() {
        lines.push("Red flags: none".to_string());
    } else {
        lines.push("Red flags:".to_string());
        for flag in evaluation.red_flags.iter() {
            lines.push(format!("  - {flag}"));
        }
    }

    push_list(lines, "Pros", &evaluation.tradeoffs.pros);
    push_list(lines, "Cons", &evaluation.tradeoffs.cons);
}

fn push_diagnostics(lines: &mut Vec<String>, diagnostics: &InputDiagnostics) {
    push_list(lines, "Input errors", &diagnostics.errors);
    push_list(lines, "Input warnings", &diagnostics.warnings);
    push_list(lines, "Notes", &diagnostics.notes);
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{heading}:"));
    for item in items {
        lines.push(format!("  - {item}"));
    }
}

fn checklist_label(status: ChecklistStatus) -> &'static str {
    match status {
        ChecklistStatus::Pass => "pass",
        ChecklistStatus::Near => "near",
        ChecklistStatus::Fail => "fail",
        ChecklistStatus::Unknown => "unknown",
    }
}

fn spread_label(status: SpreadStatus) -> &'static str {
    match status {
        SpreadStatus::Unknown => "unknown",
        SpreadStatus::Excellent => "excellent",
        SpreadStatus::Balanced => "balanced",
        SpreadStatus::SlightlyHidden => "slightly-hidden",
        SpreadStatus::HiddenWeight => "hidden-weight",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cut_audit::grading::{GradingEngine, RawInput};
    use serde_json::json;

    fn ideal() -> RawInput {
        RawInput::from(json!({
            "shape": "Round",
            "carat": 1.0,
            "cutGrade": "Excellent",
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
            "avgDiameterMm": 6.45
        }))
    }

    #[test]
    fn evaluation_text_leads_with_the_verdict() {
        let engine = GradingEngine::without_benchmarks();
        let text = render_evaluation(&evaluation_envelope(&engine, &ideal()));

        let first = text.lines().next().unwrap_or_default();
        assert!(first.starts_with("Strong Candidate"), "{first}");
        assert!(text.contains("Overall: 100 (grade A)"));
        assert!(text.contains("Red flags: none"));
        assert!(text.contains("Price missing: value check will be skipped."));
        assert!(text.ends_with(NO_BENCHMARKS_NOTE));
    }

    #[test]
    fn comparison_text_lists_every_category() {
        let engine = GradingEngine::new(Vec::new());
        let text = render_comparison(&comparison_envelope(&engine, &ideal(), &ideal()));

        for category in ["Brightness", "Fire", "Risk", "HCA-like", "Value"] {
            assert!(text.contains(&format!("- {category}:")), "{category}");
        }
        assert!(text.contains("Overall comparison: Too close to call (difference 0)."));
        assert!(!text.contains(NO_BENCHMARKS_NOTE));
    }

    #[test]
    fn comparison_text_carries_verdict_and_input_notes_per_side() {
        let engine = GradingEngine::new(Vec::new());
        let mut leaky = ideal();
        leaky.pavilion_angle = Some(json!(41.3));
        let text = render_comparison(&comparison_envelope(&engine, &ideal(), &leaky));

        let (side_a, side_b) = text
            .split_once("== Diamond B ==")
            .expect("both sides rendered");
        assert!(side_a.contains("== Diamond A ==\nStrong Candidate"));
        assert!(side_b.contains("Input warnings:"));
        assert!(side_b.contains("Price missing: value check will be skipped."));
    }
}
