//! Ingestion layer for activity history
//!
//! Turns rows of the hosted store into the analyzable history of one user.
//! The store itself is represented by a [`Snapshot`]: the JSON rows its
//! `users`, `days` and `activities` tables return.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ snapshot.json   │ ──► │   UserHistory    │ ──► │  PatternEngine  │
//! │ (or demo data)  │     │   ::collect      │     │                 │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                               │
//!                               ▼
//!                    ┌──────────────────────┐
//!                    │  MetricSynthesizer   │
//!                    │  (missing health)    │
//!                    └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use upeye_core::ingest::{MetricSynthesizer, Snapshot, UserHistory};
//!
//! let snapshot = Snapshot::load(&config.snapshot_path())?;
//! let mut synth = MetricSynthesizer::from_config_seed(config.ingest.seed);
//! let history = UserHistory::collect(&snapshot, "demo-user-1", Some(&mut synth))?;
//! println!("{} activities over {} days", history.activities.len(), history.days.len());
//! ```

mod demo;
mod form;
mod snapshot;
mod synth;

pub use demo::{demo_snapshot, DEMO_DAY_ID, DEMO_USER_ID};
pub use form::NewActivity;
pub use snapshot::Snapshot;
pub use synth::MetricSynthesizer;

use crate::error::{Error, Result};
use crate::types::{Activity, Day, User};

/// One user's activity history, ready for analysis.
#[derive(Debug, Clone)]
pub struct UserHistory {
    pub user: User,
    /// Oldest first
    pub days: Vec<Day>,
    /// Grouped by day in `days` order, store order within a day
    pub activities: Vec<Activity>,
    /// Number of activities whose health metrics were synthesized
    pub synthesized: usize,
    /// Activities still without health metrics; non-zero only when no
    /// synthesizer was supplied. Their patterns fall back to the default
    /// health score.
    pub missing_health: usize,
}

impl UserHistory {
    /// Gather a user's days and activities.
    ///
    /// `user` is matched by id, then by username. With a synthesizer,
    /// activities stored without health metrics get synthesized ones;
    /// without one they are left as-is.
    pub fn collect(
        snapshot: &Snapshot,
        user: &str,
        mut synthesizer: Option<&mut MetricSynthesizer>,
    ) -> Result<Self> {
        let user = snapshot
            .find_user(user)
            .cloned()
            .ok_or_else(|| Error::UserNotFound(user.to_string()))?;

        let days: Vec<Day> = snapshot
            .days_for_user(&user.user_id)
            .into_iter()
            .cloned()
            .collect();

        let mut activities = Vec::new();
        let mut synthesized = 0;
        let mut missing_health = 0;
        for day in &days {
            for activity in snapshot.activities_for_day(&day.day_id) {
                let mut activity = activity.clone();
                if activity.health_metrics.is_none() {
                    if let Some(synth) = synthesizer.as_deref_mut() {
                        activity.health_metrics = Some(synth.metrics());
                        synthesized += 1;
                    } else {
                        missing_health += 1;
                    }
                }
                activities.push(activity);
            }
        }

        if synthesized > 0 {
            tracing::info!(
                user_id = %user.user_id,
                synthesized,
                "Synthesized missing health metrics"
            );
        }
        if missing_health > 0 {
            tracing::warn!(
                user_id = %user.user_id,
                missing_health,
                "Activities without health metrics; synthesis is disabled"
            );
        }
        tracing::debug!(
            user_id = %user.user_id,
            days = days.len(),
            activities = activities.len(),
            "Collected user history"
        );

        Ok(Self {
            user,
            days,
            activities,
            synthesized,
            missing_health,
        })
    }

    /// Activities logged on one day.
    pub fn activities_for_day(&self, day_id: &str) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.day_id == day_id)
            .collect()
    }

    pub fn find_day(&self, day_id: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.day_id == day_id)
    }
}
