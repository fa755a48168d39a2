//! Typed sampler settings and their conversion into a metadata record.
//!
//! The four numeric/choice knobs of a diffusion sampling run travel together:
//! step count, guidance scale, sampler name, scheduler. [`SamplerSettings`]
//! validates the numeric ranges once, up front, and
//! [`to_record`](SamplerSettings::to_record) assembles the canonical
//! seven-field [`MetadataRecord`] that every rendering of the metadata is
//! derived from.
//!
//! Sampler and scheduler names are free-form strings — pipelines grow new
//! samplers faster than any fixed list — but the common ones are published
//! as [`SAMPLER_NAMES`] and [`SCHEDULERS`] for help text and defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metadata::MetadataRecord;

/// Commonly available sampler names.
pub const SAMPLER_NAMES: &[&str] = &["euler", "euler_a", "dpm++_2m", "dpm++_sde", "heun", "lms"];

/// Commonly available schedulers.
pub const SCHEDULERS: &[&str] = &["normal", "karras", "exponential", "polyexponential"];

pub const MIN_STEPS: u32 = 1;
pub const MAX_STEPS: u32 = 10_000;
pub const MAX_CFG: f64 = 100.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("steps must be between {MIN_STEPS} and {MAX_STEPS}, got {0}")]
    StepsOutOfRange(u32),
    #[error("cfg must be between 0 and {MAX_CFG}, got {0}")]
    CfgOutOfRange(f64),
}

/// Sampler configuration captured alongside a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerSettings {
    pub steps: u32,
    pub cfg: f64,
    pub sampler_name: String,
    pub scheduler: String,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            steps: 20,
            cfg: 7.0,
            sampler_name: SAMPLER_NAMES[0].to_string(),
            scheduler: SCHEDULERS[0].to_string(),
        }
    }
}

impl SamplerSettings {
    /// Range-check the numeric knobs.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_STEPS..=MAX_STEPS).contains(&self.steps) {
            return Err(SettingsError::StepsOutOfRange(self.steps));
        }
        if !self.cfg.is_finite() || !(0.0..=MAX_CFG).contains(&self.cfg) {
            return Err(SettingsError::CfgOutOfRange(self.cfg));
        }
        Ok(())
    }

    /// Build the canonical metadata record for a save.
    ///
    /// Field order is fixed and shared by the embedded tags, the line
    /// rendering, and the sidecar document.
    pub fn to_record(
        &self,
        model_description: &str,
        positive_prompt: &str,
        negative_prompt: &str,
    ) -> MetadataRecord {
        let mut record = MetadataRecord::new();
        record.push("model_description", model_description);
        record.push("positive_prompt", positive_prompt);
        record.push("negative_prompt", negative_prompt);
        record.push("steps", self.steps);
        record.push("cfg", self.cfg);
        record.push("sampler_name", self.sampler_name.as_str());
        record.push("scheduler", self.scheduler.as_str());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SamplerSettings::default();
        assert_eq!(settings.steps, 20);
        assert_eq!(settings.cfg, 7.0);
        assert_eq!(settings.sampler_name, "euler");
        assert_eq!(settings.scheduler, "normal");
        settings.validate().unwrap();
    }

    #[test]
    fn zero_steps_rejected() {
        let settings = SamplerSettings {
            steps: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::StepsOutOfRange(0))
        ));
    }

    #[test]
    fn oversized_cfg_rejected() {
        let settings = SamplerSettings {
            cfg: 250.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::CfgOutOfRange(_))
        ));
    }

    #[test]
    fn nan_cfg_rejected() {
        let settings = SamplerSettings {
            cfg: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn record_has_canonical_field_order() {
        let record = SamplerSettings::default().to_record("desc", "pos", "neg");
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "model_description",
                "positive_prompt",
                "negative_prompt",
                "steps",
                "cfg",
                "sampler_name",
                "scheduler",
            ]
        );
    }

    #[test]
    fn record_line_rendering_matches_settings() {
        let settings = SamplerSettings {
            steps: 30,
            cfg: 5.5,
            ..Default::default()
        };
        let line = settings.to_record("", "a cat", "").format_line_string();
        assert!(line.contains("Steps: 30"));
        assert!(line.contains("Cfg: 5.5"));
        assert!(line.contains("Sampler Name: euler"));
    }
}
