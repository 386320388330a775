//! Core domain types for upeye
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **User** | The person whose activity history is analyzed |
//! | **Day** | A calendar date on which a User logged activities |
//! | **Activity** | One logged action with productivity, satisfaction and health scores |
//! | **Pattern** | A recurring grouping of activities with aggregated statistics |
//! | **Occurrence** | One concrete instance (names + owning day) contributing to a Pattern |
//!
//! Records arrive from the hosted store as JSON rows. Row ids may be strings
//! or numbers depending on the table, so every id field is normalized to a
//! `String` on the way in.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a JSON string or number and yields its string form.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Treats an explicit `null` score the same as a missing one.
fn deserialize_score<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

// ============================================
// Health metrics
// ============================================

/// Five-dimensional health snapshot.
///
/// Heart rate is in bpm; the other four dimensions are on a 0–10 scale.
/// The hosted store names the heart-rate column `avg_heart_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthMetrics {
    #[serde(alias = "avg_heart_rate", default)]
    pub heart_rate: f64,
    #[serde(default)]
    pub stress_level: f64,
    #[serde(default)]
    pub energy_level: f64,
    #[serde(default)]
    pub hydration_level: f64,
    #[serde(default)]
    pub sleep_quality: f64,
}

impl HealthMetrics {
    /// Apply `f` to each of the five dimensions.
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            heart_rate: f(self.heart_rate),
            stress_level: f(self.stress_level),
            energy_level: f(self.energy_level),
            hydration_level: f(self.hydration_level),
            sleep_quality: f(self.sleep_quality),
        }
    }

    /// Element-wise sum.
    pub fn add(&self, other: &HealthMetrics) -> Self {
        Self {
            heart_rate: self.heart_rate + other.heart_rate,
            stress_level: self.stress_level + other.stress_level,
            energy_level: self.energy_level + other.energy_level,
            hydration_level: self.hydration_level + other.hydration_level,
            sleep_quality: self.sleep_quality + other.sleep_quality,
        }
    }
}

// ============================================
// Users and days
// ============================================

/// A user of the tracking application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A calendar day owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    #[serde(deserialize_with = "deserialize_id")]
    pub day_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    pub activity_date: NaiveDate,
}

// ============================================
// Activities
// ============================================

/// One logged action.
///
/// Immutable for the duration of an analysis run. `health_metrics` is always
/// populated by the ingestion adapter; analyzers still skip records without
/// it when computing health statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(alias = "activity_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub day_id: String,
    #[serde(alias = "activity_name")]
    pub name: String,
    /// Time of day, zero-padded `HH:MM` (a trailing `:SS` is tolerated)
    #[serde(default)]
    pub start_time: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub productivity_score: f64,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub satisfaction_score: f64,
    #[serde(default)]
    pub health_metrics: Option<HealthMetrics>,
}

impl Activity {
    /// Hour component of `start_time` (0–23).
    pub fn hour(&self) -> Result<u32> {
        parse_hour(&self.start_time).ok_or_else(|| {
            if self.start_time.trim().is_empty() {
                Error::malformed(&self.id, "missing start_time")
            } else {
                Error::malformed(
                    &self.id,
                    format!("unparsable start_time '{}'", self.start_time),
                )
            }
        })
    }
}

/// Parse the hour out of a zero-padded `HH:MM` or `HH:MM:SS` string.
///
/// Padding is required: the sequential analyzer orders activities by the raw
/// string, which is only chronological for fixed-width times.
pub(crate) fn parse_hour(start_time: &str) -> Option<u32> {
    let mut fields = start_time.split(':');
    let hour = two_digits(fields.next()?)?;
    let minute = two_digits(fields.next()?)?;
    if let Some(second) = fields.next() {
        if two_digits(second)? >= 60 {
            return None;
        }
    }
    if fields.next().is_some() || hour >= 24 || minute >= 60 {
        return None;
    }
    Some(hour)
}

fn two_digits(field: &str) -> Option<u32> {
    if field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}

// ============================================
// Patterns
// ============================================

/// Which analyzer produced a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Ordered window of activities (length 2–4)
    Sequential,
    /// Single repeated activity (length 1)
    Frequency,
    /// Time-of-day band
    TimeBased,
    /// Health-correlated group
    HealthBased,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Sequential => "sequential",
            PatternType::Frequency => "frequency",
            PatternType::TimeBased => "time_based",
            PatternType::HealthBased => "health_based",
        }
    }

    /// Sequential and frequency patterns make up the primary pattern list.
    pub fn is_primary(&self) -> bool {
        matches!(self, PatternType::Sequential | PatternType::Frequency)
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete instance of a pattern.
///
/// Serialized as `{"activities": [...], "date": <day id>}`, the shape of
/// earlier pattern exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    #[serde(rename = "activities", alias = "activity_names")]
    pub activity_names: Vec<String>,
    #[serde(rename = "date", alias = "day_id")]
    pub day_id: String,
}

impl Occurrence {
    pub fn single(activity: &Activity) -> Self {
        Self {
            activity_names: vec![activity.name.clone()],
            day_id: activity.day_id.clone(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.activity_names.iter().any(|n| n == name)
    }
}

/// A mined behavioral pattern.
///
/// Created fresh on every analysis run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Display id, stable per logical pattern
    #[serde(rename = "pattern_id", alias = "id")]
    pub id: String,
    #[serde(rename = "pattern_name", alias = "name")]
    pub name: String,
    pub pattern_type: PatternType,
    /// Number of occurrences (always equal to `occurrences.len()`)
    pub frequency: usize,
    pub avg_productivity: f64,
    pub avg_satisfaction: f64,
    /// `None` when no constituent activity carried health metrics
    pub avg_health_metrics: Option<HealthMetrics>,
    pub health_benefits_score: u8,
    pub health_benefits_description: String,
    pub occurrences: Vec<Occurrence>,
}

// ============================================
// Analysis parameters
// ============================================

/// Requested pattern length: 1 selects frequency analysis, 2–4 the
/// sequential window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PatternLength(u8);

impl PatternLength {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(length: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&length) {
            Ok(Self(length))
        } else {
            Err(Error::InvalidPatternLength(length))
        }
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }

    pub fn is_frequency(&self) -> bool {
        self.0 == 1
    }
}

impl Default for PatternLength {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for PatternLength {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PatternLength> for u8 {
    fn from(length: PatternLength) -> u8 {
        length.0
    }
}

impl std::fmt::Display for PatternLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
