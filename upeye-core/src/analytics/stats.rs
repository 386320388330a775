//! Shared statistics for the analyzers.
//!
//! Rounding follows the display precision of the pattern record: one decimal
//! for scores and 0–10 health dimensions, whole beats for heart rate.

use super::health;
use crate::types::{Activity, HealthMetrics, Occurrence, Pattern, PatternType};

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, `None` for an empty input.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Median, averaging the two middle values for even-length input.
pub(crate) fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

/// Round an aggregate snapshot to display precision.
pub(crate) fn round_metrics(metrics: HealthMetrics) -> HealthMetrics {
    HealthMetrics {
        heart_rate: metrics.heart_rate.round(),
        stress_level: round1(metrics.stress_level),
        energy_level: round1(metrics.energy_level),
        hydration_level: round1(metrics.hydration_level),
        sleep_quality: round1(metrics.sleep_quality),
    }
}

/// Per-dimension median over the given samples, rounded.
pub(crate) fn median_metrics(samples: &[HealthMetrics]) -> Option<HealthMetrics> {
    let dimension = |f: fn(&HealthMetrics) -> f64| median(samples.iter().map(f).collect());

    Some(round_metrics(HealthMetrics {
        heart_rate: dimension(|m| m.heart_rate)?,
        stress_level: dimension(|m| m.stress_level)?,
        energy_level: dimension(|m| m.energy_level)?,
        hydration_level: dimension(|m| m.hydration_level)?,
        sleep_quality: dimension(|m| m.sleep_quality)?,
    }))
}

/// Lowercase a name and collapse whitespace runs into underscores.
pub(crate) fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// A pattern whose statistics are computed but not yet scored.
pub(crate) struct PatternDraft {
    pub id: String,
    pub name: String,
    pub pattern_type: PatternType,
    pub avg_productivity: f64,
    pub avg_satisfaction: f64,
    pub avg_health_metrics: Option<HealthMetrics>,
    pub occurrences: Vec<Occurrence>,
}

impl PatternDraft {
    /// Score health benefits and freeze into a [`Pattern`].
    pub fn finish(self) -> Pattern {
        let score = health::score(self.avg_health_metrics.as_ref());
        Pattern {
            id: self.id,
            name: self.name,
            pattern_type: self.pattern_type,
            frequency: self.occurrences.len(),
            avg_productivity: self.avg_productivity,
            avg_satisfaction: self.avg_satisfaction,
            avg_health_metrics: self.avg_health_metrics,
            health_benefits_score: score,
            health_benefits_description: health::describe(score).to_string(),
            occurrences: self.occurrences,
        }
    }
}

/// Summarize a group of activities: mean scores, median health metrics,
/// one occurrence per member.
pub(crate) fn summarize_group(
    id: String,
    name: String,
    pattern_type: PatternType,
    members: &[&Activity],
) -> Pattern {
    let samples: Vec<HealthMetrics> = members.iter().filter_map(|a| a.health_metrics).collect();

    PatternDraft {
        id,
        name,
        pattern_type,
        avg_productivity: round1(mean(members.iter().map(|a| a.productivity_score)).unwrap_or(0.0)),
        avg_satisfaction: round1(mean(members.iter().map(|a| a.satisfaction_score)).unwrap_or(0.0)),
        avg_health_metrics: median_metrics(&samples),
        occurrences: members.iter().map(|a| Occurrence::single(a)).collect(),
    }
    .finish()
}
