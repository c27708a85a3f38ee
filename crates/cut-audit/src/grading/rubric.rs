use serde::Serialize;
use std::fmt;

/// Inclusive numeric window used by every proportion rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub min: f64,
    pub max: f64,
}

impl Zone {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when the value sits inside the zone widened by `tolerance` on both sides.
    pub fn near(&self, value: f64, tolerance: f64) -> bool {
        value >= self.min - tolerance && value <= self.max + tolerance
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// A pass window with a narrower bonus window inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredZone {
    pub pass: Zone,
    pub bonus: Zone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleZone {
    pub pass: Zone,
    pub ideal: f64,
}

/// Proportion ranges believed to maximize brightness and fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxShineZone {
    pub table: TieredZone,
    pub depth: TieredZone,
    pub crown_angle: AngleZone,
    pub pavilion_angle: AngleZone,
    pub star: Zone,
    pub lower_halves: TieredZone,
    pub preferred_girdles: &'static [&'static str],
    pub avoid_girdles: &'static [&'static str],
    pub preferred_culets: &'static [&'static str],
    pub preferred_finish: &'static [&'static str],
    pub preferred_fluorescence: &'static [&'static str],
}

/// Thresholds treated as definite risk regardless of other scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidList {
    pub depth_high: f64,
    pub depth_low: f64,
    pub table_high: f64,
    pub table_low: f64,
    pub pavilion_leakage: f64,
}

impl AvoidList {
    pub fn depth_avoided(&self, depth: f64) -> bool {
        depth > self.depth_high || depth < self.depth_low
    }

    pub fn table_avoided(&self, table: f64) -> bool {
        table > self.table_high || table < self.table_low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnglePairing {
    pub crown_ideal: f64,
    pub pavilion_ideal: f64,
    pub full_bonus_distance: f64,
    pub good_distance: f64,
    pub penalty_distance: f64,
}

impl AnglePairing {
    /// Euclidean distance of a crown/pavilion pair from the ideal pair.
    pub fn distance(&self, crown: f64, pavilion: f64) -> f64 {
        (crown - self.crown_ideal).hypot(pavilion - self.pavilion_ideal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallWeights {
    pub brightness: f64,
    pub fire: f64,
    pub safety: f64,
}

impl OverallWeights {
    /// Weighted blend of the three sub-scores; risk contributes as `100 - risk`.
    pub fn blend(&self, brightness: i32, fire: i32, risk: i32) -> f64 {
        f64::from(brightness) * self.brightness
            + f64::from(fire) * self.fire
            + f64::from(100 - risk) * self.safety
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBases {
    pub brightness_base: i32,
    pub fire_base: i32,
    pub risk_base: i32,
    pub overall_weights: OverallWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorRedFlagCombo {
    pub pavilion_at_or_above: f64,
    pub depth_above: f64,
    pub depth_below: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub close_call: f64,
    pub secondary_close_call: f64,
    pub major_red_flag_combo: MajorRedFlagCombo,
}

/// Static rubric consulted by every scoring component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    pub max_shine_zone: MaxShineZone,
    pub avoid_list: AvoidList,
    pub angle_pairing: AnglePairing,
    pub scores: ScoreBases,
    pub thresholds: Thresholds,
}

pub const RUBRIC: Rubric = Rubric {
    max_shine_zone: MaxShineZone {
        table: TieredZone {
            pass: Zone::new(54.0, 58.0),
            bonus: Zone::new(55.0, 57.0),
        },
        depth: TieredZone {
            pass: Zone::new(60.5, 62.5),
            bonus: Zone::new(61.0, 62.0),
        },
        crown_angle: AngleZone {
            pass: Zone::new(34.0, 35.0),
            ideal: 34.5,
        },
        pavilion_angle: AngleZone {
            pass: Zone::new(40.6, 40.9),
            ideal: 40.8,
        },
        star: Zone::new(45.0, 55.0),
        lower_halves: TieredZone {
            pass: Zone::new(75.0, 80.0),
            bonus: Zone::new(77.0, 80.0),
        },
        preferred_girdles: &["Thin-Medium", "Medium", "Medium-Slightly Thick"],
        avoid_girdles: &["Very Thin", "Extremely Thin", "Very Thick", "Extremely Thick"],
        preferred_culets: &["None", "Very Small"],
        preferred_finish: &["Excellent"],
        preferred_fluorescence: &["None", "Faint"],
    },
    avoid_list: AvoidList {
        depth_high: 63.0,
        depth_low: 59.0,
        table_high: 60.0,
        table_low: 53.0,
        pavilion_leakage: 41.2,
    },
    angle_pairing: AnglePairing {
        crown_ideal: 34.5,
        pavilion_ideal: 40.8,
        full_bonus_distance: 0.08,
        good_distance: 0.2,
        penalty_distance: 0.45,
    },
    scores: ScoreBases {
        brightness_base: 70,
        fire_base: 70,
        risk_base: 15,
        overall_weights: OverallWeights {
            brightness: 0.45,
            fire: 0.35,
            safety: 0.20,
        },
    },
    thresholds: Thresholds {
        close_call: 3.0,
        secondary_close_call: 0.3,
        major_red_flag_combo: MajorRedFlagCombo {
            pavilion_at_or_above: 41.2,
            depth_above: 63.0,
            depth_below: 59.0,
        },
    },
};

/// Color grades, best first. Extends past the input options because
/// benchmark bands may reference any letter.
pub const COLOR_ORDER: &[&str] = &[
    "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U", "V",
    "W", "X", "Y", "Z",
];

/// Clarity grades, best first.
pub const CLARITY_ORDER: &[&str] = &[
    "FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1", "I2", "I3",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeThreshold {
    pub grade: Grade,
    pub min: i32,
}

/// Descending letter-grade boundaries on the overall score.
pub const GRADE_THRESHOLDS: &[GradeThreshold] = &[
    GradeThreshold { grade: Grade::A, min: 90 },
    GradeThreshold { grade: Grade::B, min: 80 },
    GradeThreshold { grade: Grade::C, min: 70 },
    GradeThreshold { grade: Grade::D, min: 60 },
    GradeThreshold { grade: Grade::F, min: 0 },
];

/// Rounds half-up and clamps into `[0, 100]`.
pub fn clamp_score(value: f64) -> i32 {
    let rounded = (value + 0.5).floor();
    rounded.clamp(0.0, 100.0) as i32
}

/// Rounds to a fixed number of decimals for reporting.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Position of a grade in one of the fixed rank tables.
pub fn rank_of(value: &str, order: &[&str]) -> Option<usize> {
    order.iter().position(|entry| *entry == value)
}

/// Case-insensitive exact membership.
pub(crate) fn matches_any(values: &[&str], target: &str) -> bool {
    let target = target.trim().to_lowercase();
    values.iter().any(|value| value.to_lowercase() == target)
}

/// Case-insensitive substring membership, so "Very Thick to Extremely Thick" matches "Very Thick".
pub(crate) fn contains_any(values: &[&str], target: &str) -> bool {
    let target = target.trim().to_lowercase();
    values
        .iter()
        .any(|value| target.contains(&value.to_lowercase()))
}
