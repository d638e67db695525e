//! Build errors for the simulator builder.

use crate::builder::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a simulator.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Audio bank not specified. Call .audio(bank) before .build()")]
    MissingAudio,

    #[error("Invalid engine configuration: {}", join(.0))]
    InvalidConfig(Vec<ConfigError>),
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
