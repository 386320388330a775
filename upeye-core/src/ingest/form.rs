//! New-activity form values.

use super::synth::MetricSynthesizer;
use crate::error::{Error, Result};
use crate::types::{parse_hour, Activity};

/// An activity as entered by the user, before it is stored.
///
/// Health fields left as `None` are synthesized on conversion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewActivity {
    pub day_id: String,
    pub name: String,
    pub start_time: String,
    pub productivity_score: f64,
    pub satisfaction_score: f64,
    pub heart_rate: Option<f64>,
    pub stress_level: Option<f64>,
    pub energy_level: Option<f64>,
    pub hydration_level: Option<f64>,
    pub sleep_quality: Option<f64>,
}

impl NewActivity {
    pub fn new(
        day_id: impl Into<String>,
        name: impl Into<String>,
        start_time: impl Into<String>,
        productivity_score: f64,
        satisfaction_score: f64,
    ) -> Self {
        Self {
            day_id: day_id.into(),
            name: name.into(),
            start_time: start_time.into(),
            productivity_score,
            satisfaction_score,
            ..Default::default()
        }
    }

    /// Check the entered values; `id` names the record in errors.
    pub fn validate(&self, id: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::malformed(id, "activity name is empty"));
        }
        if parse_hour(self.start_time.trim()).is_none() {
            return Err(Error::malformed(
                id,
                format!("unparsable start_time '{}'", self.start_time),
            ));
        }

        let levels = [
            ("productivity_score", Some(self.productivity_score)),
            ("satisfaction_score", Some(self.satisfaction_score)),
            ("stress_level", self.stress_level),
            ("energy_level", self.energy_level),
            ("hydration_level", self.hydration_level),
            ("sleep_quality", self.sleep_quality),
        ];
        for (field, value) in levels {
            if let Some(value) = value {
                if !(0.0..=10.0).contains(&value) {
                    return Err(Error::malformed(
                        id,
                        format!("{} {} outside 0-10", field, value),
                    ));
                }
            }
        }

        if let Some(bpm) = self.heart_rate {
            if !bpm.is_finite() || bpm <= 0.0 {
                return Err(Error::malformed(id, format!("heart_rate {} not positive", bpm)));
            }
        }
        Ok(())
    }

    /// Validate and build the stored activity row.
    pub fn into_activity(self, id: String, synthesizer: &mut MetricSynthesizer) -> Result<Activity> {
        self.validate(&id)?;

        let mut filled = synthesizer.metrics();
        if let Some(v) = self.heart_rate {
            filled.heart_rate = v;
        }
        if let Some(v) = self.stress_level {
            filled.stress_level = v;
        }
        if let Some(v) = self.energy_level {
            filled.energy_level = v;
        }
        if let Some(v) = self.hydration_level {
            filled.hydration_level = v;
        }
        if let Some(v) = self.sleep_quality {
            filled.sleep_quality = v;
        }

        Ok(Activity {
            id,
            day_id: self.day_id,
            name: self.name.trim().to_string(),
            start_time: self.start_time.trim().to_string(),
            productivity_score: self.productivity_score,
            satisfaction_score: self.satisfaction_score,
            health_metrics: Some(filled),
        })
    }
}
