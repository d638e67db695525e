//! Builder for constructing engine simulators.

use crate::audio::{AudioBank, AudioHandle};
use crate::builder::config::EngineConfig;
use crate::builder::error::BuildError;
use crate::engine::EngineSimulator;
use stillwater::validation::Validation;

/// Builder for constructing simulators with a fluent API.
///
/// # Example
///
/// ```rust
/// use rev_engine::audio::{AudioBank, HeadlessClip};
/// use rev_engine::builder::{EngineConfig, SimulatorBuilder};
/// use rev_engine::core::EngineState;
///
/// let sim = SimulatorBuilder::new()
///     .config(EngineConfig::default())
///     .audio(AudioBank::from_fn(|_| HeadlessClip::new()))
///     .build()
///     .unwrap();
///
/// assert_eq!(sim.state(), EngineState::Idle);
/// ```
pub struct SimulatorBuilder<A: AudioHandle> {
    config: EngineConfig,
    audio: Option<AudioBank<A>>,
}

impl<A: AudioHandle> SimulatorBuilder<A> {
    /// Create a new builder with the default config.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            audio: None,
        }
    }

    /// Replace the whole config.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the audio bank (required).
    pub fn audio(mut self, bank: AudioBank<A>) -> Self {
        self.audio = Some(bank);
        self
    }

    /// Adjust the config in place.
    pub fn tune<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut EngineConfig),
    {
        f(&mut self.config);
        self
    }

    /// Build the simulator.
    /// Returns an error if the audio bank is missing or the config is invalid.
    pub fn build(self) -> Result<EngineSimulator<A>, BuildError> {
        let audio = self.audio.ok_or(BuildError::MissingAudio)?;

        if let Validation::Failure(errors) = self.config.validate() {
            return Err(BuildError::InvalidConfig(errors.iter().cloned().collect()));
        }

        Ok(EngineSimulator::new(self.config, audio))
    }
}

impl<A: AudioHandle> Default for SimulatorBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
