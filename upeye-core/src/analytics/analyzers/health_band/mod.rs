//! Health-Correlated Analyzer
//!
//! Two fixed rules, evaluated independently over activities that carry
//! health metrics:
//!
//! | Id | Rule | Minimum members |
//! |----|------|-----------------|
//! | `health_high_stress` | stress level ≥ 7 | 3 |
//! | `health_high_energy` | energy level ≥ 8 | 3 |
//!
//! An activity can fall into both groups.

use crate::analytics::engine::PatternAnalyzer;
use crate::analytics::stats::summarize_group;
use crate::error::Result;
use crate::types::{Activity, HealthMetrics, Pattern, PatternType};

const MIN_MEMBERS: usize = 3;

/// A fixed health rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthRule {
    HighStress,
    HighEnergy,
}

impl HealthRule {
    pub const ALL: [HealthRule; 2] = [HealthRule::HighStress, HealthRule::HighEnergy];

    pub fn pattern_id(&self) -> &'static str {
        match self {
            HealthRule::HighStress => "health_high_stress",
            HealthRule::HighEnergy => "health_high_energy",
        }
    }

    pub fn pattern_name(&self) -> &'static str {
        match self {
            HealthRule::HighStress => "High Stress Activities",
            HealthRule::HighEnergy => "High Energy Activities",
        }
    }

    pub fn matches(&self, metrics: &HealthMetrics) -> bool {
        match self {
            HealthRule::HighStress => metrics.stress_level >= 7.0,
            HealthRule::HighEnergy => metrics.energy_level >= 8.0,
        }
    }
}

/// Analyzer that groups activities by health rule.
pub struct HealthBandAnalyzer;

impl HealthBandAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthBandAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAnalyzer for HealthBandAnalyzer {
    fn name(&self) -> &str {
        "core.health_band"
    }

    fn analyze(&self, activities: &[Activity]) -> Result<Vec<Pattern>> {
        let mut patterns = Vec::new();

        for rule in HealthRule::ALL {
            let members: Vec<&Activity> = activities
                .iter()
                .filter(|a| a.health_metrics.as_ref().is_some_and(|m| rule.matches(m)))
                .collect();

            if members.len() >= MIN_MEMBERS {
                patterns.push(summarize_group(
                    rule.pattern_id().to_string(),
                    rule.pattern_name().to_string(),
                    PatternType::HealthBased,
                    &members,
                ));
            }
        }

        Ok(patterns)
    }
}
