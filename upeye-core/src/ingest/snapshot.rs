//! Snapshot of the hosted store's tables.

use super::form::NewActivity;
use super::synth::MetricSynthesizer;
use crate::error::{Error, Result};
use crate::types::{Activity, Day, User};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rows of the `users`, `days` and `activities` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            users = snapshot.users.len(),
            days = snapshot.days.len(),
            activities = snapshot.activities.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot back as indented JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Find a user by id, falling back to an exact username match.
    pub fn find_user(&self, needle: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.user_id == needle)
            .or_else(|| self.users.iter().find(|u| u.username == needle))
    }

    /// A user's days, oldest first.
    pub fn days_for_user(&self, user_id: &str) -> Vec<&Day> {
        let mut days: Vec<&Day> = self.days.iter().filter(|d| d.user_id == user_id).collect();
        days.sort_by_key(|d| d.activity_date);
        days
    }

    pub fn activities_for_day<'a>(&'a self, day_id: &'a str) -> impl Iterator<Item = &'a Activity> {
        self.activities.iter().filter(move |a| a.day_id == day_id)
    }

    /// Id the store would assign to the next activity row.
    fn next_activity_id(&self) -> String {
        next_row_id(self.activities.iter().map(|a| a.id.as_str()), self.activities.len())
    }

    /// Add a user row, as the sign-up form does.
    ///
    /// The username is trimmed and must be non-empty and not already taken.
    /// A blank email is stored as absent.
    pub fn insert_user(&mut self, username: &str, email: Option<&str>) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidUser("username is empty".to_string()));
        }
        if self.users.iter().any(|u| u.username == username) {
            return Err(Error::InvalidUser(format!(
                "username '{}' is already taken",
                username
            )));
        }

        let user = User {
            user_id: next_row_id(self.users.iter().map(|u| u.user_id.as_str()), self.users.len()),
            username: username.to_string(),
            email: email
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            created_at: Some(Utc::now()),
        };
        tracing::info!(user_id = %user.user_id, username = %user.username, "Added user");
        self.users.push(user.clone());
        Ok(user)
    }

    /// Validate a new activity, synthesize its missing health fields and
    /// append it.
    pub fn insert_activity(
        &mut self,
        new: NewActivity,
        synthesizer: &mut MetricSynthesizer,
    ) -> Result<Activity> {
        let id = self.next_activity_id();
        if !self.days.iter().any(|d| d.day_id == new.day_id) {
            return Err(Error::malformed(
                &id,
                format!("unknown day_id '{}'", new.day_id),
            ));
        }

        let activity = new.into_activity(id, synthesizer)?;
        tracing::info!(
            activity_id = %activity.id,
            day_id = %activity.day_id,
            name = %activity.name,
            "Added activity"
        );
        self.activities.push(activity.clone());
        Ok(activity)
    }
}

/// One past the largest numeric id, or `rows + 1` when no id is numeric.
fn next_row_id<'a>(ids: impl Iterator<Item = &'a str>, rows: usize) -> String {
    match ids.filter_map(|id| id.parse::<u64>().ok()).max() {
        Some(max) => (max + 1).to_string(),
        None => (rows + 1).to_string(),
    }
}
