//! Analytics module for upeye
//!
//! Mines recurring behavior out of a user's activity history:
//! - Analyzer-based pattern engine
//! - Health-benefit scoring
//! - Activity-membership filtering
//! - Summary and chart data for presentation
//!
//! ## Analyzer Framework
//!
//! The engine runs one primary analyzer selected by pattern length plus a
//! set of always-on analyzers. Each analyzer:
//! - Consumes a read-only slice of [`Activity`](crate::Activity) records
//! - Produces [`Pattern`](crate::Pattern)s with occurrences and statistics
//! - Holds no state between runs
//!
//! See [`engine`] module for the core framework and [`analyzers`] for the
//! built-in analyzers.

pub mod analyzers;
pub mod engine;
pub mod filter;
pub mod health;
pub(crate) mod stats;
pub mod summary;

// Engine exports
pub use analyzers::create_default_engine;
pub use engine::{
    analyze_patterns, validate_activities, AnalysisRun, AnalyzerRunResult, PatternAnalyzer,
    PatternEngine,
};

pub use filter::{filter_patterns, FilterMode};
pub use health::{describe as describe_health_score, score as health_benefits_score, HealthBenefit};
pub use summary::{activity_catalog, chart_bars, primary_patterns, ChartBar, PatternSummary};

#[cfg(test)]
pub(crate) mod testing {
    use crate::types::{Activity, HealthMetrics};

    /// Unremarkable health: triggers neither health rule.
    pub fn moderate_health() -> HealthMetrics {
        HealthMetrics {
            heart_rate: 72.0,
            stress_level: 3.0,
            energy_level: 5.0,
            hydration_level: 6.0,
            sleep_quality: 7.0,
        }
    }

    pub fn activity(id: &str, day: &str, name: &str, time: &str) -> Activity {
        activity_with_health(id, day, name, time, moderate_health())
    }

    pub fn activity_with_health(
        id: &str,
        day: &str,
        name: &str,
        time: &str,
        health: HealthMetrics,
    ) -> Activity {
        Activity {
            id: id.to_string(),
            day_id: day.to_string(),
            name: name.to_string(),
            start_time: time.to_string(),
            productivity_score: 5.0,
            satisfaction_score: 5.0,
            health_metrics: Some(health),
        }
    }

    pub fn scored(id: &str, name: &str, time: &str, productivity: f64, satisfaction: f64) -> Activity {
        Activity {
            productivity_score: productivity,
            satisfaction_score: satisfaction,
            ..activity(id, "d1", name, time)
        }
    }
}
