//! Sequential Pattern Analyzer
//!
//! Finds ordered runs of activities that recur. Activities are sorted by
//! start time and a fixed-size window slides across them one activity at a
//! time; windows with the same ordered list of names are one pattern.
//!
//! ## Statistics
//!
//! | Field | Computation |
//! |-------|-------------|
//! | `avg_productivity` | mean of per-window mean productivity |
//! | `avg_satisfaction` | mean of per-window mean satisfaction |
//! | `avg_health_metrics` | sum of per-window mean metrics ÷ number of activities that carried metrics |
//!
//! ## Example
//!
//! Activities (already sorted): `Walk, Work, Walk, Work` with a window of 2:
//! - windows: `Walk → Work`, `Work → Walk`, `Walk → Work`
//! - `Walk → Work` occurs twice and is kept
//! - `Work → Walk` occurs once and is dropped

use crate::analytics::engine::PatternAnalyzer;
use crate::analytics::stats::{round1, round_metrics, slug, PatternDraft};
use crate::error::Result;
use crate::types::{Activity, HealthMetrics, Occurrence, Pattern, PatternLength, PatternType};
use std::collections::HashMap;

/// Minimum number of occurrences for a window to count as a pattern.
const MIN_OCCURRENCES: usize = 2;

/// Separator between names in a sequential pattern's display name.
pub const NAME_SEPARATOR: &str = " → ";

/// Analyzer for ordered activity windows of length 2–4.
pub struct SequentialAnalyzer {
    window: usize,
}

impl SequentialAnalyzer {
    pub fn new(length: PatternLength) -> Self {
        Self {
            window: length.get(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn collect(&self, activities: &[Activity]) -> Vec<Pattern> {
        let sorted = sort_by_start_time(activities);
        let mut index: HashMap<Vec<String>, usize> = HashMap::new();
        let mut accumulators: Vec<WindowAccumulator> = Vec::new();

        for window in sliding_windows(&sorted, self.window) {
            let key: Vec<String> = window.iter().map(|a| a.name.clone()).collect();
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                accumulators.push(WindowAccumulator::new(key));
                accumulators.len() - 1
            });
            accumulators[slot].add(window);
        }

        let mut patterns: Vec<Pattern> = accumulators
            .into_iter()
            .filter(|acc| acc.occurrences.len() >= MIN_OCCURRENCES)
            .map(WindowAccumulator::into_pattern)
            .collect();

        // Stable: ties keep first-occurrence order
        patterns.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        patterns
    }
}

impl PatternAnalyzer for SequentialAnalyzer {
    fn name(&self) -> &str {
        "core.sequential"
    }

    fn analyze(&self, activities: &[Activity]) -> Result<Vec<Pattern>> {
        Ok(self.collect(activities))
    }
}

/// Stable sort by `start_time`; lexical order is chronological for `HH:MM`.
pub fn sort_by_start_time(activities: &[Activity]) -> Vec<&Activity> {
    let mut sorted: Vec<&Activity> = activities.iter().collect();
    sorted.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    sorted
}

/// Every contiguous window of `size` activities: `max(0, n - size + 1)` of
/// them. A zero size yields nothing.
pub fn sliding_windows<'a>(
    sorted: &'a [&'a Activity],
    size: usize,
) -> impl Iterator<Item = &'a [&'a Activity]> + 'a {
    let count = if size == 0 {
        0
    } else {
        (sorted.len() + 1).saturating_sub(size)
    };
    (0..count).map(move |start| &sorted[start..start + size])
}

/// Display id for an ordered list of names, e.g. `seq_walk_gym_workout`.
pub fn sequence_id(key: &[String]) -> String {
    let parts: Vec<String> = key.iter().map(|name| slug(name)).collect();
    format!("seq_{}", parts.join("_"))
}

struct WindowAccumulator {
    key: Vec<String>,
    occurrences: Vec<Occurrence>,
    productivity_sum: f64,
    satisfaction_sum: f64,
    health_sum: HealthMetrics,
    /// Activities that carried metrics, across all windows
    health_samples: usize,
}

impl WindowAccumulator {
    fn new(key: Vec<String>) -> Self {
        Self {
            key,
            occurrences: Vec::new(),
            productivity_sum: 0.0,
            satisfaction_sum: 0.0,
            health_sum: HealthMetrics::default(),
            health_samples: 0,
        }
    }

    fn add(&mut self, window: &[&Activity]) {
        let len = window.len() as f64;
        self.productivity_sum += window.iter().map(|a| a.productivity_score).sum::<f64>() / len;
        self.satisfaction_sum += window.iter().map(|a| a.satisfaction_score).sum::<f64>() / len;

        let samples: Vec<&HealthMetrics> = window
            .iter()
            .filter_map(|a| a.health_metrics.as_ref())
            .collect();
        if !samples.is_empty() {
            let n = samples.len() as f64;
            let total = samples
                .iter()
                .fold(HealthMetrics::default(), |acc, m| acc.add(m));
            self.health_sum = self.health_sum.add(&total.map(|v| v / n));
            self.health_samples += samples.len();
        }

        self.occurrences.push(Occurrence {
            activity_names: self.key.clone(),
            day_id: window[0].day_id.clone(),
        });
    }

    fn into_pattern(self) -> Pattern {
        let count = self.occurrences.len() as f64;
        let avg_health_metrics = (self.health_samples > 0).then(|| {
            let samples = self.health_samples as f64;
            round_metrics(self.health_sum.map(|v| v / samples))
        });

        PatternDraft {
            id: sequence_id(&self.key),
            name: self.key.join(NAME_SEPARATOR),
            pattern_type: PatternType::Sequential,
            avg_productivity: round1(self.productivity_sum / count),
            avg_satisfaction: round1(self.satisfaction_sum / count),
            avg_health_metrics,
            occurrences: self.occurrences,
        }
        .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{activity, activity_with_health, scored};

    fn analyzer(n: u8) -> SequentialAnalyzer {
        SequentialAnalyzer::new(PatternLength::new(n).unwrap())
    }

    #[test]
    fn test_equal_start_times_sort_together() {
        let activities = vec![
            activity("1", "d1", "Walk", "08:00"),
            activity("2", "d1", "Work", "09:00"),
            activity("3", "d2", "Walk", "08:00"),
            activity("4", "d2", "Work", "09:00"),
        ];
        // Sorted: Walk(d1), Walk(d2), Work(d1), Work(d2), every window unique
        let patterns = analyzer(2).analyze(&activities).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_walk_work_sequence() {
        let activities = vec![
            activity("1", "d1", "Walk", "08:00"),
            activity("2", "d1", "Work", "09:00"),
            activity("3", "d1", "Walk", "10:00"),
            activity("4", "d1", "Work", "11:00"),
        ];
        let patterns = analyzer(2).analyze(&activities).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "Walk → Work");
        assert_eq!(patterns[0].id, "seq_walk_work");
        assert_eq!(patterns[0].frequency, 2);
        assert_eq!(patterns[0].pattern_type, PatternType::Sequential);
    }

    #[test]
    fn test_window_count() {
        let activities: Vec<_> = (0..7)
            .map(|i| activity(&i.to_string(), "d1", "A", &format!("{:02}:00", i + 6)))
            .collect();
        let sorted = sort_by_start_time(&activities);

        for size in 1..=4 {
            assert_eq!(sliding_windows(&sorted, size).count(), 7 - size + 1);
        }
        assert_eq!(sliding_windows(&sorted[..2], 3).count(), 0);
        assert_eq!(sliding_windows(&sorted[..3], 3).count(), 1);
        assert_eq!(sliding_windows(&[], 2).count(), 0);
        assert_eq!(sliding_windows(&sorted, 0).count(), 0);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let activities = vec![
            activity("1", "d1", "B", "09:00"),
            activity("2", "d1", "A", "08:00"),
            activity("3", "d1", "C", "08:00"),
        ];
        let sorted: Vec<_> = sort_by_start_time(&activities)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(sorted, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_single_occurrence_dropped_two_kept() {
        // A B C A B: "A → B" twice, "B → C" and "C → A" once
        let activities = vec![
            activity("1", "d1", "A", "06:00"),
            activity("2", "d1", "B", "07:00"),
            activity("3", "d1", "C", "08:00"),
            activity("4", "d1", "A", "09:00"),
            activity("5", "d1", "B", "10:00"),
        ];
        let patterns = analyzer(2).analyze(&activities).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "A → B");
        assert_eq!(patterns[0].frequency, 2);
    }

    #[test]
    fn test_fewer_activities_than_window() {
        let activities = vec![
            activity("1", "d1", "A", "06:00"),
            activity("2", "d1", "B", "07:00"),
        ];
        assert!(analyzer(3).analyze(&activities).unwrap().is_empty());
    }

    #[test]
    fn test_occurrence_day_is_first_activity_day() {
        let activities = vec![
            activity("1", "d1", "A", "06:00"),
            activity("2", "d2", "B", "07:00"),
            activity("3", "d3", "A", "08:00"),
            activity("4", "d4", "B", "09:00"),
        ];
        let patterns = analyzer(2).analyze(&activities).unwrap();
        let days: Vec<_> = patterns[0]
            .occurrences
            .iter()
            .map(|o| o.day_id.as_str())
            .collect();
        assert_eq!(days, vec!["d1", "d3"]);
        assert_eq!(patterns[0].occurrences[0].activity_names, vec!["A", "B"]);
    }

    #[test]
    fn test_averages_are_means_of_window_means() {
        let activities = vec![
            scored("1", "A", "06:00", 2.0, 4.0),
            scored("2", "B", "07:00", 4.0, 8.0),
            scored("3", "A", "08:00", 6.0, 1.0),
            scored("4", "B", "09:00", 9.0, 2.0),
        ];
        let patterns = analyzer(2).analyze(&activities).unwrap();
        // window means: (2+4)/2 = 3, (6+9)/2 = 7.5 → 5.25 → 5.3
        assert_eq!(patterns[0].avg_productivity, 5.3);
        // (4+8)/2 = 6, (1+2)/2 = 1.5 → 3.75 → 3.8
        assert_eq!(patterns[0].avg_satisfaction, 3.8);
    }

    #[test]
    fn test_health_is_not_median() {
        // Windows A → B: stress means 1, 1, 10 sum to 12 over 6 samples.
        // A median of the window means would give 1.
        let h = |stress: f64| HealthMetrics {
            heart_rate: 70.0,
            stress_level: stress,
            energy_level: 5.0,
            hydration_level: 5.0,
            sleep_quality: 5.0,
        };
        let activities = vec![
            activity_with_health("1", "d1", "A", "01:00", h(1.0)),
            activity_with_health("2", "d1", "B", "02:00", h(1.0)),
            activity_with_health("3", "d1", "A", "03:00", h(1.0)),
            activity_with_health("4", "d1", "B", "04:00", h(1.0)),
            activity_with_health("5", "d1", "A", "05:00", h(10.0)),
            activity_with_health("6", "d1", "B", "06:00", h(10.0)),
        ];
        let patterns = analyzer(2).analyze(&activities).unwrap();
        let ab = patterns.iter().find(|p| p.name == "A → B").unwrap();
        assert_eq!(ab.frequency, 3);
        assert_eq!(ab.avg_health_metrics.unwrap().stress_level, 2.0);
        assert_eq!(ab.avg_health_metrics.unwrap().heart_rate, 35.0);
    }

    #[test]
    fn test_health_divisor_counts_activities() {
        let activities: Vec<_> = ["A", "B", "A", "B", "A", "B"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut a = activity(&i.to_string(), "d1", name, &format!("{:02}:00", i + 6));
                if let Some(m) = a.health_metrics.as_mut() {
                    m.heart_rate = 80.0;
                    m.stress_level = 4.0;
                }
                a
            })
            .collect();
        let patterns = analyzer(2).analyze(&activities).unwrap();
        let ab = patterns.iter().find(|p| p.name == "A → B").unwrap();
        assert_eq!(ab.frequency, 3);

        // Window means sum to 240 bpm over 6 samples, not 3 windows
        let m = ab.avg_health_metrics.unwrap();
        assert_eq!(m.heart_rate, 40.0);
        assert_eq!(m.stress_level, 2.0);
    }

    #[test]
    fn test_health_divisor_skips_activities_without_metrics() {
        // Only the A of each window carries metrics: 80 + 80 over 2 samples
        let activities: Vec<_> = ["A", "B", "A", "B"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut a = activity(&i.to_string(), "d1", name, &format!("{:02}:00", i + 6));
                if *name == "A" {
                    if let Some(m) = a.health_metrics.as_mut() {
                        m.heart_rate = 80.0;
                    }
                } else {
                    a.health_metrics = None;
                }
                a
            })
            .collect();
        let patterns = analyzer(2).analyze(&activities).unwrap();
        assert_eq!(patterns[0].name, "A → B");
        assert_eq!(patterns[0].avg_health_metrics.unwrap().heart_rate, 80.0);
    }

    #[test]
    fn test_missing_health_scores_default() {
        let activities = vec![
            activity("1", "d1", "A", "06:00"),
            activity("2", "d1", "B", "07:00"),
            activity("3", "d1", "A", "08:00"),
            activity("4", "d1", "B", "09:00"),
        ]
        .into_iter()
        .map(|mut a| {
            a.health_metrics = None;
            a
        })
        .collect::<Vec<_>>();
        let patterns = analyzer(2).analyze(&activities).unwrap();
        assert!(patterns[0].avg_health_metrics.is_none());
        assert_eq!(patterns[0].health_benefits_score, 50);
        assert_eq!(
            patterns[0].health_benefits_description,
            "Moderate health benefits"
        );
    }

    #[test]
    fn test_ordering_by_frequency_then_first_seen() {
        // X Y X Y X Y Z W Z W: X→Y x3, Y→X x2, Z→W x2, Y→Z x1, W→Z x1
        let names = ["X", "Y", "X", "Y", "X", "Y", "Z", "W", "Z", "W"];
        let activities: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| activity(&i.to_string(), "d1", n, &format!("{:02}:00", i + 8)))
            .collect();
        let patterns = analyzer(2).analyze(&activities).unwrap();
        let names: Vec<_> = patterns.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["X → Y", "Y → X", "Z → W"]);
    }

    #[test]
    fn test_sequence_id_handles_spaces() {
        let key = vec!["Gym Workout".to_string(), "Social Time".to_string()];
        assert_eq!(sequence_id(&key), "seq_gym_workout_social_time");
    }

    #[test]
    fn test_names_containing_separator_stay_distinct() {
        // "A → B" as one name vs the two-step sequence A, B
        let activities = vec![
            activity("1", "d1", "A → B", "06:00"),
            activity("2", "d1", "C", "07:00"),
            activity("3", "d1", "A → B", "08:00"),
            activity("4", "d1", "C", "09:00"),
        ];
        let patterns = analyzer(2).analyze(&activities).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].occurrences[0].activity_names, vec!["A → B", "C"]);
    }
}
