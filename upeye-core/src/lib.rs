//! # upeye-core
//!
//! Core library for upeye - a personal activity tracker that mines recurring
//! behavior out of logged activities.
//!
//! This library provides:
//! - Domain types for users, days, activities and patterns
//! - Snapshot ingestion with health-metric synthesis
//! - The pattern engine and its analyzers
//! - Membership filtering, summaries and JSON export
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Rows:** Store rows of users, days and activities (immutable input)
//! - **History:** One user's activities with health metrics filled in
//! - **Patterns:** Derived, regenerable on every run, never persisted
//!
//! ## Example
//!
//! ```rust,no_run
//! use upeye_core::analytics::analyze_patterns;
//! use upeye_core::ingest::{demo_snapshot, UserHistory, DEMO_USER_ID};
//! use upeye_core::PatternLength;
//!
//! let snapshot = demo_snapshot();
//! let history = UserHistory::collect(&snapshot, DEMO_USER_ID, None).expect("demo user exists");
//! let length = PatternLength::new(1).expect("valid length");
//! let patterns = analyze_patterns(&history.activities, length).expect("demo data is well-formed");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{MetricSynthesizer, Snapshot, UserHistory};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod types;
