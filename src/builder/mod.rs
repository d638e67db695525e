//! Configuration and construction of engine simulators.
//!
//! Tuning lives in [`EngineConfig`]; [`SimulatorBuilder`] validates it and
//! wires the audio bank in.

pub mod config;
pub mod error;
pub mod simulator;

pub use config::{ConfigError, EngineConfig, TEMPERATURE_CEILING};
pub use error::BuildError;
pub use simulator::SimulatorBuilder;
