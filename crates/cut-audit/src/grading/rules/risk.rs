use super::{score_rules, Rule, RuleHit};
use crate::grading::domain::{CanonicalRecord, RedFlags, ScoreCategory, SubScore};
use crate::grading::rubric::{contains_any, matches_any, RUBRIC};

const RULES: &[Rule] = &[
    depth,
    table,
    girdle,
    culet,
    polish,
    symmetry,
    fluorescence,
    hazy,
    clouds,
];

/// Lower-is-better structural risk score. Raises avoid-list flags into `flags`.
pub fn evaluate_risk(record: &CanonicalRecord, flags: &mut RedFlags) -> SubScore {
    score_rules(
        ScoreCategory::Risk,
        RUBRIC.scores.risk_base,
        RULES,
        record,
        flags,
    )
}

fn depth(record: &CanonicalRecord) -> Option<RuleHit> {
    let depth = record.depth_pct?;
    let avoid = RUBRIC.avoid_list;
    let zone = RUBRIC.max_shine_zone.depth.pass;

    let hit = if avoid.depth_avoided(depth) {
        RuleHit::new(
            "depth-avoid",
            18,
            format!("< {} or > {}", avoid.depth_low, avoid.depth_high),
            "Depth is in avoid-list territory, increasing leakage/spread risk.",
        )
        .flag(format!(
            "Depth is outside avoid threshold ({}-{}): {:.2}.",
            avoid.depth_low, avoid.depth_high, depth
        ))
    } else if !zone.contains(depth) {
        RuleHit::new(
            "depth-outside-zone",
            7,
            zone.label(),
            "Depth is outside the preferred maximum shine zone.",
        )
    } else {
        RuleHit::new(
            "depth-in-zone",
            -3,
            zone.label(),
            "Depth is in target zone, reducing structural risk signals.",
        )
    };
    Some(hit)
}

fn table(record: &CanonicalRecord) -> Option<RuleHit> {
    let table = record.table_pct?;
    let avoid = RUBRIC.avoid_list;
    let zone = RUBRIC.max_shine_zone.table.pass;

    let hit = if avoid.table_avoided(table) {
        RuleHit::new(
            "table-avoid",
            12,
            format!("< {} or > {}", avoid.table_low, avoid.table_high),
            "Table is in avoid-list territory.",
        )
        .flag(format!(
            "Table is outside avoid threshold ({}-{}): {:.2}.",
            avoid.table_low, avoid.table_high, table
        ))
    } else if !zone.contains(table) {
        RuleHit::new(
            "table-outside-zone",
            5,
            zone.label(),
            "Table is outside preferred shine zone.",
        )
    } else {
        RuleHit::new(
            "table-in-zone",
            -2,
            zone.label(),
            "Table is in preferred zone.",
        )
    };
    Some(hit)
}

fn girdle(record: &CanonicalRecord) -> Option<RuleHit> {
    let girdle = record.girdle.as_deref()?;
    let zone = &RUBRIC.max_shine_zone;

    let hit = if contains_any(zone.avoid_girdles, girdle) {
        RuleHit::new(
            "girdle-extreme",
            15,
            "avoid: very thin / very thick",
            "Extreme girdle can imply durability or spread penalties.",
        )
        .flag("Girdle is at an extreme (very thin or very thick).")
    } else if matches_any(zone.preferred_girdles, girdle) {
        RuleHit::new(
            "girdle-preferred",
            -4,
            "Thin-Medium / Medium",
            "Girdle is in preferred range.",
        )
    } else {
        RuleHit::new(
            "girdle-neutral",
            4,
            "preferred: Thin-Medium / Medium",
            "Girdle is acceptable but outside preferred center.",
        )
    };
    Some(hit)
}

fn culet(record: &CanonicalRecord) -> Option<RuleHit> {
    let culet = record.culet.as_deref()?;

    let hit = if matches_any(RUBRIC.max_shine_zone.preferred_culets, culet) {
        RuleHit::new(
            "culet-preferred",
            -2,
            "None / Very Small",
            "Culet is in preferred range.",
        )
    } else {
        RuleHit::new(
            "culet-off",
            3,
            "None / Very Small",
            "Larger culet can modestly reduce light performance.",
        )
    };
    Some(hit)
}

fn is_excellent(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("excellent")
}

fn polish(record: &CanonicalRecord) -> Option<RuleHit> {
    let polish = record.polish.as_deref()?;
    let hit = if is_excellent(polish) {
        RuleHit::new(
            "polish-quality",
            -2,
            "Excellent preferred",
            "Polish quality is optimal.",
        )
    } else {
        RuleHit::new(
            "polish-quality",
            4,
            "Excellent preferred",
            "Non-excellent polish can introduce minor light scatter.",
        )
    };
    Some(hit)
}

fn symmetry(record: &CanonicalRecord) -> Option<RuleHit> {
    let symmetry = record.symmetry.as_deref()?;
    let hit = if is_excellent(symmetry) {
        RuleHit::new(
            "symmetry-quality",
            -2,
            "Excellent preferred",
            "Symmetry quality is optimal.",
        )
    } else {
        RuleHit::new(
            "symmetry-quality",
            4,
            "Excellent preferred",
            "Non-excellent symmetry can reduce pattern precision.",
        )
    };
    Some(hit)
}

fn fluorescence(record: &CanonicalRecord) -> Option<RuleHit> {
    let fluorescence = record.fluorescence.as_deref()?;

    let hit = if matches_any(RUBRIC.max_shine_zone.preferred_fluorescence, fluorescence) {
        RuleHit::new(
            "fluor-safe",
            -2,
            "None/Faint",
            "Fluorescence is in safest range.",
        )
    } else {
        RuleHit::new(
            "fluor-warning",
            8,
            "Medium+ warning",
            "Medium or stronger fluorescence can carry market/perception risk.",
        )
        .flag("Fluorescence is Medium or stronger.")
    };
    Some(hit)
}

fn hazy(record: &CanonicalRecord) -> Option<RuleHit> {
    record.hazy_milky.then(|| {
        RuleHit::new(
            "hazy-flag",
            25,
            "hazy/milky checked",
            "Possible milkiness can significantly suppress transparency and sparkle.",
        )
        .flag("Hazy/milky appearance was flagged.")
    })
}

fn clouds(record: &CanonicalRecord) -> Option<RuleHit> {
    record.clouds_note.as_ref()?;
    Some(RuleHit::new(
        "clouds-note",
        4,
        "cloud note present",
        "Cloud inclusions note added; verify transparency in photos/videos.",
    ))
}
