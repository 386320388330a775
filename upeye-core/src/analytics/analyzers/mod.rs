//! Pattern analyzers
//!
//! Each analyzer lives in its own subdirectory.
//!
//! ## Built-in Analyzers
//!
//! - [`sequential`]: Recurring ordered windows of 2–4 activities
//! - [`frequency`]: Activity names logged at least twice
//! - [`time_of_day`]: Busy time-of-day bands
//! - [`health_band`]: High-stress and high-energy groups
//!
//! The first two are selected per request by pattern length; the last two
//! always run. Use [`create_default_engine`] to get an engine with the
//! always-on analyzers registered.

pub mod frequency;
pub mod health_band;
pub mod sequential;
pub mod time_of_day;

pub use frequency::FrequencyAnalyzer;
pub use health_band::{HealthBandAnalyzer, HealthRule};
pub use sequential::SequentialAnalyzer;
pub use time_of_day::{TimeBand, TimeOfDayAnalyzer};

use super::PatternEngine;

/// Create an engine with the always-on analyzers registered.
///
/// ```rust,ignore
/// use upeye_core::analytics::create_default_engine;
///
/// let engine = create_default_engine();
/// println!("Always-on analyzers: {:?}", engine.analyzer_names());
/// ```
pub fn create_default_engine() -> PatternEngine {
    let mut engine = PatternEngine::new();
    engine.register(Box::new(TimeOfDayAnalyzer::new()));
    engine.register(Box::new(HealthBandAnalyzer::new()));
    engine
}
