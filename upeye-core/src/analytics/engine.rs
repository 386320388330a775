//! Pattern-mining engine
//!
//! The engine turns a flat list of activity records into ranked patterns.
//! It is a pure, synchronous function of `(activities, pattern_length)`:
//! no I/O, no state carried between runs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        PATTERN ENGINE                           │
//! │                                                                 │
//! │  primary (by length)          always-on analyzers               │
//! │  ┌──────────────────┐   ┌──────────────┐  ┌──────────────┐      │
//! │  │ length 1: freq   │   │ time_of_day  │  │ health_band  │      │
//! │  │ length 2-4: seq  │   │              │  │              │      │
//! │  └────────┬─────────┘   └──────┬───────┘  └──────┬───────┘      │
//! │           ▼                    ▼                 ▼              │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │        concatenate, stable sort by frequency desc       │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use upeye_core::analytics::create_default_engine;
//! use upeye_core::PatternLength;
//!
//! let engine = create_default_engine();
//! let run = engine.run(&activities, PatternLength::new(2)?)?;
//! for pattern in &run.patterns {
//!     println!("{} ({}x)", pattern.name, pattern.frequency);
//! }
//! ```

use super::analyzers::{FrequencyAnalyzer, SequentialAnalyzer};
use crate::error::Result;
use crate::types::{Activity, Pattern, PatternLength};
use std::time::Instant;

// ============================================
// Analyzer trait
// ============================================

/// Trait implemented by every pattern analyzer.
///
/// Analyzers are stateless and must be:
/// - **Deterministic**: same input, same output in the same order
/// - **Non-mutating**: activities are read-only
/// - **Threshold-driven**: returning an empty set when minimum support is
///   not met is the normal outcome, not an error
///
/// ## Example
///
/// ```rust,ignore
/// use upeye_core::analytics::PatternAnalyzer;
///
/// pub struct WeekendAnalyzer;
///
/// impl PatternAnalyzer for WeekendAnalyzer {
///     fn name(&self) -> &str { "custom.weekend" }
///
///     fn analyze(&self, activities: &[Activity]) -> Result<Vec<Pattern>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait PatternAnalyzer: Send + Sync {
    /// Unique name for this analyzer.
    ///
    /// Convention: `namespace.analyzer_name` (e.g., "core.sequential")
    fn name(&self) -> &str;

    /// Mine patterns from the given activities.
    fn analyze(&self, activities: &[Activity]) -> Result<Vec<Pattern>>;
}

// ============================================
// Run results
// ============================================

/// Observability record for one analyzer invocation.
#[derive(Debug, Clone)]
pub struct AnalyzerRunResult {
    /// Name of the analyzer that was run
    pub analyzer_name: String,
    /// How long the analyzer took (milliseconds)
    pub duration_ms: u64,
    /// Number of patterns emitted
    pub patterns_produced: usize,
}

/// Output of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Pattern length the run was requested with
    pub pattern_length: PatternLength,
    /// Number of input activities
    pub activity_count: usize,
    /// All patterns, sorted by frequency descending
    pub patterns: Vec<Pattern>,
    /// One entry per analyzer, in execution order
    pub analyzer_runs: Vec<AnalyzerRunResult>,
}

// ============================================
// Engine
// ============================================

/// Runs the primary analyzer for a pattern length plus every registered
/// always-on analyzer, and merges their output.
pub struct PatternEngine {
    analyzers: Vec<Box<dyn PatternAnalyzer>>,
}

impl PatternEngine {
    /// Create an engine with no always-on analyzers.
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Register an analyzer that runs on every request regardless of length.
    pub fn register(&mut self, analyzer: Box<dyn PatternAnalyzer>) {
        tracing::debug!(analyzer = analyzer.name(), "Registered pattern analyzer");
        self.analyzers.push(analyzer);
    }

    /// Names of the always-on analyzers.
    pub fn analyzer_names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    /// Check if an analyzer is registered.
    pub fn has_analyzer(&self, name: &str) -> bool {
        self.analyzers.iter().any(|a| a.name() == name)
    }

    /// The analyzer that produces the primary set for a pattern length.
    pub fn primary_analyzer(length: PatternLength) -> Box<dyn PatternAnalyzer> {
        if length.is_frequency() {
            Box::new(FrequencyAnalyzer::new())
        } else {
            Box::new(SequentialAnalyzer::new(length))
        }
    }

    /// Run one analysis.
    ///
    /// Fails fast with [`Error::MalformedRecord`](crate::Error::MalformedRecord)
    /// if any activity has a missing or unparsable start time.
    pub fn run(&self, activities: &[Activity], length: PatternLength) -> Result<AnalysisRun> {
        validate_activities(activities)?;

        let primary = Self::primary_analyzer(length);
        let mut patterns = Vec::new();
        let mut analyzer_runs = Vec::with_capacity(self.analyzers.len() + 1);

        for analyzer in std::iter::once(&primary).chain(self.analyzers.iter()) {
            let start = Instant::now();
            let produced = analyzer.analyze(activities)?;
            let result = AnalyzerRunResult {
                analyzer_name: analyzer.name().to_string(),
                duration_ms: start.elapsed().as_millis() as u64,
                patterns_produced: produced.len(),
            };

            tracing::debug!(
                analyzer = %result.analyzer_name,
                patterns = result.patterns_produced,
                duration_ms = result.duration_ms,
                "Analyzer completed"
            );

            patterns.extend(produced);
            analyzer_runs.push(result);
        }

        // Stable: ties keep analyzer order, then each analyzer's own order
        patterns.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        tracing::info!(
            activities = activities.len(),
            pattern_length = %length,
            patterns = patterns.len(),
            "Pattern analysis completed"
        );

        Ok(AnalysisRun {
            pattern_length: length,
            activity_count: activities.len(),
            patterns,
            analyzer_runs,
        })
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every record's start time before any analyzer runs.
pub fn validate_activities(activities: &[Activity]) -> Result<()> {
    for activity in activities {
        activity.hour()?;
    }
    Ok(())
}

/// Run the default engine and return only the patterns.
pub fn analyze_patterns(activities: &[Activity], length: PatternLength) -> Result<Vec<Pattern>> {
    Ok(super::create_default_engine().run(activities, length)?.patterns)
}
