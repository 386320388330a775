//! Time-of-Day Analyzer
//!
//! Buckets every activity into one of five fixed bands by the hour of its
//! start time and reports bands with at least five members as routines.
//!
//! | Band | Hours |
//! |------|-------|
//! | Early Morning | 05:00–07:59 |
//! | Morning | 08:00–11:59 |
//! | Afternoon | 12:00–16:59 |
//! | Evening | 17:00–20:59 |
//! | Night | 21:00–04:59 |

use crate::analytics::engine::PatternAnalyzer;
use crate::analytics::stats::summarize_group;
use crate::error::Result;
use crate::types::{Activity, Pattern, PatternType};

/// Bands are larger buckets than name groups, so the bar is higher.
const MIN_MEMBERS: usize = 5;

/// A fixed time-of-day band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeBand {
    /// All bands in reporting order.
    pub const ALL: [TimeBand; 5] = [
        TimeBand::EarlyMorning,
        TimeBand::Morning,
        TimeBand::Afternoon,
        TimeBand::Evening,
        TimeBand::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=7 => TimeBand::EarlyMorning,
            8..=11 => TimeBand::Morning,
            12..=16 => TimeBand::Afternoon,
            17..=20 => TimeBand::Evening,
            _ => TimeBand::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBand::EarlyMorning => "Early Morning",
            TimeBand::Morning => "Morning",
            TimeBand::Afternoon => "Afternoon",
            TimeBand::Evening => "Evening",
            TimeBand::Night => "Night",
        }
    }

    /// Pattern id, e.g. `time_early_morning`.
    pub fn pattern_id(&self) -> String {
        format!("time_{}", self.label().to_lowercase().replace(' ', "_"))
    }

    /// Pattern name, e.g. "Evening Routine".
    pub fn routine_name(&self) -> String {
        format!("{} Routine", self.label())
    }

    fn index(&self) -> usize {
        match self {
            TimeBand::EarlyMorning => 0,
            TimeBand::Morning => 1,
            TimeBand::Afternoon => 2,
            TimeBand::Evening => 3,
            TimeBand::Night => 4,
        }
    }
}

/// Analyzer that reports busy time-of-day bands.
pub struct TimeOfDayAnalyzer;

impl TimeOfDayAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeOfDayAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAnalyzer for TimeOfDayAnalyzer {
    fn name(&self) -> &str {
        "core.time_of_day"
    }

    fn analyze(&self, activities: &[Activity]) -> Result<Vec<Pattern>> {
        let mut bands: [Vec<&Activity>; 5] = Default::default();
        for activity in activities {
            let band = TimeBand::from_hour(activity.hour()?);
            bands[band.index()].push(activity);
        }

        Ok(TimeBand::ALL
            .iter()
            .zip(bands.iter())
            .filter(|(_, members)| members.len() >= MIN_MEMBERS)
            .map(|(band, members)| {
                summarize_group(
                    band.pattern_id(),
                    band.routine_name(),
                    PatternType::TimeBased,
                    members,
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{activity, activity_with_health};
    use crate::types::HealthMetrics;

    fn at(times: &[&str]) -> Vec<Activity> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| activity(&i.to_string(), "d1", &format!("A{}", i), t))
            .collect()
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TimeBand::from_hour(4), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(5), TimeBand::EarlyMorning);
        assert_eq!(TimeBand::from_hour(7), TimeBand::EarlyMorning);
        assert_eq!(TimeBand::from_hour(8), TimeBand::Morning);
        assert_eq!(TimeBand::from_hour(11), TimeBand::Morning);
        assert_eq!(TimeBand::from_hour(12), TimeBand::Afternoon);
        assert_eq!(TimeBand::from_hour(16), TimeBand::Afternoon);
        assert_eq!(TimeBand::from_hour(17), TimeBand::Evening);
        assert_eq!(TimeBand::from_hour(20), TimeBand::Evening);
        assert_eq!(TimeBand::from_hour(21), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(0), TimeBand::Night);
    }

    #[test]
    fn test_band_naming() {
        assert_eq!(TimeBand::EarlyMorning.pattern_id(), "time_early_morning");
        assert_eq!(TimeBand::EarlyMorning.routine_name(), "Early Morning Routine");
        assert_eq!(TimeBand::Night.pattern_id(), "time_night");
    }

    #[test]
    fn test_five_members_required() {
        let four = at(&["08:00", "09:00", "10:00", "11:30"]);
        assert!(TimeOfDayAnalyzer::new().analyze(&four).unwrap().is_empty());

        let five = at(&["08:00", "09:00", "10:00", "11:30", "08:15"]);
        let patterns = TimeOfDayAnalyzer::new().analyze(&five).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "Morning Routine");
        assert_eq!(patterns[0].frequency, 5);
        assert_eq!(patterns[0].occurrences.len(), 5);
        assert_eq!(patterns[0].pattern_type, PatternType::TimeBased);
    }

    #[test]
    fn test_night_wraps_midnight() {
        let night = at(&["21:00", "23:59", "00:30", "03:00", "04:59"]);
        let patterns = TimeOfDayAnalyzer::new().analyze(&night).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].id, "time_night");
    }

    #[test]
    fn test_bands_reported_in_fixed_order() {
        let mut times = vec!["22:00"; 5];
        times.extend(vec!["06:00"; 6]);
        let patterns = TimeOfDayAnalyzer::new().analyze(&at(&times)).unwrap();
        let ids: Vec<_> = patterns.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["time_early_morning", "time_night"]);
    }

    #[test]
    fn test_health_is_median() {
        // Hydration 1, 1, 2, 9, 10: median 2, mean 4.6
        let activities: Vec<_> = [1.0, 1.0, 2.0, 9.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, hydration)| {
                activity_with_health(
                    &i.to_string(),
                    "d1",
                    "Lunch",
                    "13:00",
                    HealthMetrics {
                        heart_rate: 72.0,
                        stress_level: 3.0,
                        energy_level: 5.0,
                        hydration_level: *hydration,
                        sleep_quality: 6.0,
                    },
                )
            })
            .collect();
        let patterns = TimeOfDayAnalyzer::new().analyze(&activities).unwrap();
        assert_eq!(patterns[0].avg_health_metrics.unwrap().hydration_level, 2.0);
    }

    #[test]
    fn test_unparsable_hour_is_malformed() {
        let bad = at(&["08:00", "8am"]);
        assert!(matches!(
            TimeOfDayAnalyzer::new().analyze(&bad),
            Err(crate::Error::MalformedRecord { .. })
        ));
    }
}
