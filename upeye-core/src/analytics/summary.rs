//! Presentation summaries over a computed pattern list.
//!
//! These are the headline numbers, chart rows and option lists a front end
//! shows next to the pattern list. All of them are pure views over the
//! engine's output.

use crate::types::{Pattern, PatternType};
use serde::Serialize;
use std::collections::BTreeSet;

/// Default number of bars in the pattern chart.
pub const DEFAULT_CHART_LIMIT: usize = 10;

/// Headline statistics for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    pub total_patterns: usize,
    /// Name of the first pattern in engine order
    pub most_active: Option<String>,
    /// Band of the busiest time-of-day routine, e.g. "Morning"
    pub peak_time: Option<String>,
}

impl PatternSummary {
    pub fn from_patterns(patterns: &[Pattern]) -> Self {
        let peak_time = patterns
            .iter()
            .find(|p| p.pattern_type == PatternType::TimeBased)
            .map(|p| p.name.replace(" Routine", ""));

        Self {
            total_patterns: patterns.len(),
            most_active: patterns.first().map(|p| p.name.clone()),
            peak_time,
        }
    }
}

/// Sequential and frequency patterns only, most frequent first.
pub fn primary_patterns(patterns: &[Pattern]) -> Vec<Pattern> {
    let mut primary: Vec<Pattern> = patterns
        .iter()
        .filter(|p| p.pattern_type.is_primary())
        .cloned()
        .collect();
    primary.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    primary
}

/// One row of the pattern chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub frequency: usize,
    pub health_benefits_score: u8,
    /// Bar width relative to the first bar, 0–100
    pub width_percent: f64,
}

/// Top `limit` patterns as chart rows, scaled against the first.
///
/// Expects patterns already sorted by frequency, as the engine and
/// [`primary_patterns`] return them.
pub fn chart_bars(patterns: &[Pattern], limit: usize) -> Vec<ChartBar> {
    let Some(top) = patterns.first().map(|p| p.frequency) else {
        return Vec::new();
    };

    patterns
        .iter()
        .take(limit)
        .map(|p| ChartBar {
            label: prettify(&p.name),
            frequency: p.frequency,
            health_benefits_score: p.health_benefits_score,
            width_percent: if top == 0 {
                0.0
            } else {
                p.frequency as f64 / top as f64 * 100.0
            },
        })
        .collect()
}

/// Underscores to spaces, first letter of every word uppercased.
fn prettify(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Sorted, de-duplicated activity names across every occurrence.
pub fn activity_catalog(patterns: &[Pattern]) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|p| p.occurrences.iter())
        .flat_map(|o| o.activity_names.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
