//! Activity-membership filter
//!
//! Narrows a computed pattern list to the patterns that involve a set of
//! selected activity names. A pattern is kept when at least one of its
//! occurrences satisfies the mode:
//!
//! | Mode | Occurrence must |
//! |------|-----------------|
//! | `exclusive` | contain every selected name and have exactly as many names as the selection |
//! | `exclusive-plus` | contain every selected name |
//! | `non-exclusive` | contain any selected name |
//!
//! The cardinality check in `exclusive` counts names as logged, so an
//! occurrence `Walk → Walk` never matches the selection `{Walk}`.

use crate::error::{Error, Result};
use crate::types::{Occurrence, Pattern};
use std::str::FromStr;

/// How selected names must relate to an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Only the selected activities
    Exclusive,
    /// The selected activities, possibly with others
    ExclusivePlus,
    /// Any selected activity
    #[default]
    NonExclusive,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [
        FilterMode::Exclusive,
        FilterMode::ExclusivePlus,
        FilterMode::NonExclusive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Exclusive => "exclusive",
            FilterMode::ExclusivePlus => "exclusive-plus",
            FilterMode::NonExclusive => "non-exclusive",
        }
    }

    /// Human-readable label for option lists.
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::Exclusive => "Exclusive (Only selected activities)",
            FilterMode::ExclusivePlus => "Exclusive Plus (Selected + others)",
            FilterMode::NonExclusive => "Non-Exclusive (Any selected activity)",
        }
    }

    fn matches(&self, occurrence: &Occurrence, selected: &[&str]) -> bool {
        match self {
            FilterMode::Exclusive => {
                occurrence.activity_names.len() == selected.len()
                    && selected.iter().all(|name| occurrence.contains(name))
            }
            FilterMode::ExclusivePlus => selected.iter().all(|name| occurrence.contains(name)),
            FilterMode::NonExclusive => selected.iter().any(|name| occurrence.contains(name)),
        }
    }
}

impl FromStr for FilterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "exclusive" => Ok(FilterMode::Exclusive),
            "exclusive-plus" => Ok(FilterMode::ExclusivePlus),
            "non-exclusive" => Ok(FilterMode::NonExclusive),
            _ => Err(Error::UnknownFilterMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep patterns with a matching occurrence, best health score first.
///
/// Duplicate selections count once. Ties in health score keep their input
/// order.
pub fn filter_patterns(
    patterns: &[Pattern],
    selected: &[String],
    mode: FilterMode,
) -> Result<Vec<Pattern>> {
    if selected.is_empty() {
        return Err(Error::EmptySelection);
    }

    let mut names: Vec<&str> = Vec::with_capacity(selected.len());
    for name in selected {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }

    let mut kept: Vec<Pattern> = patterns
        .iter()
        .filter(|p| p.occurrences.iter().any(|o| mode.matches(o, &names)))
        .cloned()
        .collect();
    kept.sort_by(|a, b| b.health_benefits_score.cmp(&a.health_benefits_score));

    tracing::debug!(
        mode = %mode,
        selected = names.len(),
        input = patterns.len(),
        kept = kept.len(),
        "Filtered patterns"
    );

    Ok(kept)
}
