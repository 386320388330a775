//! Frequency Analyzer
//!
//! Pattern length 1: every activity name logged at least twice becomes a
//! pattern. Health metrics are summarized with the per-dimension median,
//! unlike the sequential analyzer's mean, so one unusual reading does not
//! skew a habit's profile.

use crate::analytics::engine::PatternAnalyzer;
use crate::analytics::stats::{slug, summarize_group};
use crate::error::Result;
use crate::types::{Activity, Pattern, PatternType};
use std::collections::HashMap;

/// Minimum number of records sharing a name.
const MIN_OCCURRENCES: usize = 2;

/// Analyzer that groups activities by exact name.
pub struct FrequencyAnalyzer;

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Group by name, preserving first-appearance order.
    fn group<'a>(activities: &'a [Activity]) -> Vec<(&'a str, Vec<&'a Activity>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&Activity>)> = Vec::new();

        for activity in activities {
            let slot = *index.entry(activity.name.as_str()).or_insert_with(|| {
                groups.push((activity.name.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(activity);
        }
        groups
    }
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAnalyzer for FrequencyAnalyzer {
    fn name(&self) -> &str {
        "core.frequency"
    }

    fn analyze(&self, activities: &[Activity]) -> Result<Vec<Pattern>> {
        Ok(Self::group(activities)
            .into_iter()
            .filter(|(_, members)| members.len() >= MIN_OCCURRENCES)
            .map(|(name, members)| {
                summarize_group(
                    format!("freq_{}", slug(name)),
                    name.to_string(),
                    PatternType::Frequency,
                    &members,
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{activity, activity_with_health, scored};
    use crate::types::HealthMetrics;

    #[test]
    fn test_threshold_is_exact() {
        let activities = vec![
            activity("1", "d1", "Walk", "08:00"),
            activity("2", "d2", "Walk", "08:00"),
            activity("3", "d2", "Read", "21:00"),
        ];
        let patterns = FrequencyAnalyzer::new().analyze(&activities).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "Walk");
        assert_eq!(patterns[0].id, "freq_walk");
        assert_eq!(patterns[0].frequency, 2);
        assert_eq!(patterns[0].pattern_type, PatternType::Frequency);
    }

    #[test]
    fn test_first_appearance_order() {
        let activities = vec![
            activity("1", "d1", "Gym Workout", "18:00"),
            activity("2", "d1", "Walk", "08:00"),
            activity("3", "d2", "Walk", "08:00"),
            activity("4", "d2", "Gym Workout", "18:00"),
        ];
        let patterns = FrequencyAnalyzer::new().analyze(&activities).unwrap();
        let ids: Vec<_> = patterns.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["freq_gym_workout", "freq_walk"]);
    }

    #[test]
    fn test_one_occurrence_per_member() {
        let activities = vec![
            activity("1", "d1", "Walk", "08:00"),
            activity("2", "d2", "Walk", "08:00"),
            activity("3", "d3", "Walk", "08:00"),
        ];
        let pattern = &FrequencyAnalyzer::new().analyze(&activities).unwrap()[0];
        assert_eq!(pattern.occurrences.len(), 3);
        assert_eq!(pattern.occurrences[2].day_id, "d3");
        assert_eq!(pattern.occurrences[2].activity_names, vec!["Walk"]);
    }

    #[test]
    fn test_scores_are_means() {
        let activities = vec![
            scored("1", "Walk", "08:00", 1.0, 9.0),
            scored("2", "Walk", "08:00", 2.0, 9.0),
            scored("3", "Walk", "08:00", 9.0, 2.0),
        ];
        let pattern = &FrequencyAnalyzer::new().analyze(&activities).unwrap()[0];
        assert_eq!(pattern.avg_productivity, 4.0);
        assert_eq!(pattern.avg_satisfaction, 6.7);
    }

    #[test]
    fn test_health_is_median_not_mean() {
        // Energy 1, 2, 9: median 2, mean 4
        let h = |energy: f64, hr: f64| HealthMetrics {
            heart_rate: hr,
            stress_level: 3.0,
            energy_level: energy,
            hydration_level: 5.0,
            sleep_quality: 5.0,
        };
        let activities = vec![
            activity_with_health("1", "d1", "Walk", "08:00", h(1.0, 60.0)),
            activity_with_health("2", "d2", "Walk", "08:00", h(2.0, 64.0)),
            activity_with_health("3", "d3", "Walk", "08:00", h(9.0, 120.0)),
        ];
        let pattern = &FrequencyAnalyzer::new().analyze(&activities).unwrap()[0];
        let metrics = pattern.avg_health_metrics.unwrap();
        assert_eq!(metrics.energy_level, 2.0);
        assert_eq!(metrics.heart_rate, 64.0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let activities = vec![
            activity("1", "d1", "walk", "08:00"),
            activity("2", "d2", "Walk", "08:00"),
        ];
        assert!(FrequencyAnalyzer::new()
            .analyze(&activities)
            .unwrap()
            .is_empty());
    }
}
