//! Engine tuning knobs.
//!
//! Heating and cooling deliberately use different steps and periods. All
//! knobs are validated together so a bad config reports every problem at
//! once instead of the first one found.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Problems found in an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("'{field}' must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("'{field}' must be within (0, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("'{field}' must be a non-zero period")]
    ZeroPeriod { field: &'static str },

    #[error("'idle_volume' must be within 0.0..=1.0 (got {value})")]
    VolumeOutOfRange { value: f32 },

    #[error("Config could not be parsed: {0}")]
    Parse(String),
}

/// Highest `max_temperature` a config may ask for; the gauge reads 0..=100.
pub const TEMPERATURE_CEILING: f64 = 100.0;

/// Tuning for the temperature model, timer and audio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound; reaching it blows the engine.
    pub max_temperature: f64,
    /// Increase per heating tick.
    pub heat_step: f64,
    pub heat_period_ms: u64,
    /// Decrease per cooling tick.
    pub cool_step: f64,
    pub cool_period_ms: u64,
    pub idle_volume: f32,
    /// Transitions kept in the history log.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_temperature: 100.0,
            heat_step: 1.0,
            heat_period_ms: 200,
            cool_step: 0.5,
            cool_period_ms: 100,
            idle_volume: 0.8,
            history_capacity: crate::core::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rev_engine::builder::EngineConfig;
    ///
    /// let config = EngineConfig::from_json(r#"{ "heat_step": 2.0 }"#).unwrap();
    /// assert_eq!(config.heat_step, 2.0);
    /// assert_eq!(config.cool_step, 0.5);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn heat_period(&self) -> Duration {
        Duration::from_millis(self.heat_period_ms)
    }

    pub fn cool_period(&self) -> Duration {
        Duration::from_millis(self.cool_period_ms)
    }

    /// Check every knob, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            at_most("max_temperature", self.max_temperature, TEMPERATURE_CEILING),
            positive("heat_step", self.heat_step),
            positive("cool_step", self.cool_step),
            non_zero_period("heat_period_ms", self.heat_period_ms),
            non_zero_period("cool_period_ms", self.cool_period_ms),
            volume(self.idle_volume),
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

fn positive(field: &'static str, value: f64) -> Validation<(), NonEmptyVec<ConfigError>> {
    if value.is_finite() && value > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::NotPositive { field, value })
    }
}

fn at_most(field: &'static str, value: f64, max: f64) -> Validation<(), NonEmptyVec<ConfigError>> {
    if value.is_finite() && value > 0.0 && value <= max {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::OutOfRange { field, value, max })
    }
}

fn non_zero_period(field: &'static str, millis: u64) -> Validation<(), NonEmptyVec<ConfigError>> {
    if millis > 0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::ZeroPeriod { field })
    }
}

fn volume(value: f32) -> Validation<(), NonEmptyVec<ConfigError>> {
    if (0.0..=1.0).contains(&value) {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::VolumeOutOfRange { value })
    }
}
