//! Health-benefit scoring
//!
//! Collapses a [`HealthMetrics`] snapshot into a single 0–100 score.
//! Each dimension is mapped onto 0–100 and the five are averaged:
//!
//! | Dimension | Sub-score |
//! |-----------|-----------|
//! | heart rate | 100 inside 60–100 bpm, else `100 - |80 - hr|` (floored at 0) |
//! | stress | `100 - 10·stress` (floored at 0) |
//! | energy | `10·energy` |
//! | hydration | `10·hydration` |
//! | sleep | `10·sleep` |

use crate::types::HealthMetrics;

/// Score used when there are no metrics to judge.
pub const DEFAULT_SCORE: u8 = 50;

/// Score a health snapshot, `None` yields [`DEFAULT_SCORE`].
pub fn score(metrics: Option<&HealthMetrics>) -> u8 {
    let Some(m) = metrics else {
        return DEFAULT_SCORE;
    };

    let heart = if (60.0..=100.0).contains(&m.heart_rate) {
        100.0
    } else {
        (100.0 - (80.0 - m.heart_rate).abs()).max(0.0)
    };
    let stress = (100.0 - m.stress_level * 10.0).max(0.0);
    let energy = m.energy_level * 10.0;
    let hydration = m.hydration_level * 10.0;
    let sleep = m.sleep_quality * 10.0;

    let mean = (heart + stress + energy + hydration + sleep) / 5.0;
    if mean.is_nan() {
        return DEFAULT_SCORE;
    }
    mean.round().clamp(0.0, 100.0) as u8
}

/// Qualitative tier of a health-benefits score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBenefit {
    Excellent,
    Good,
    Moderate,
    Low,
    Poor,
}

impl HealthBenefit {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => HealthBenefit::Excellent,
            60..=79 => HealthBenefit::Good,
            40..=59 => HealthBenefit::Moderate,
            20..=39 => HealthBenefit::Low,
            _ => HealthBenefit::Poor,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HealthBenefit::Excellent => "Excellent health benefits",
            HealthBenefit::Good => "Good health benefits",
            HealthBenefit::Moderate => "Moderate health benefits",
            HealthBenefit::Low => "Low health benefits",
            HealthBenefit::Poor => "Poor health benefits",
        }
    }
}

/// Label for a score, e.g. "Good health benefits".
pub fn describe(score: u8) -> &'static str {
    HealthBenefit::from_score(score).description()
}
