//! Rev Engine: a virtual engine rev button.
//!
//! Holding the button revs the engine: temperature climbs, layered audio
//! cues play, and if the gauge reaches its limit the engine blows until a
//! replacement is fitted. Releasing lets it cool back to idle.
//!
//! The crate follows a "pure core, imperative shell" layout:
//!
//! - [`core`]: the state machine, temperature model, guards and readout,
//!   all free of side effects
//! - [`audio`]: the [`AudioHandle`](audio::AudioHandle) seam and the
//!   sequencer that decides which clips play
//! - [`engine`]: the simulator that owns everything and reacts to input,
//!   elapsed time and audio notifications
//! - [`builder`]: validated configuration and construction
//! - [`runtime`]: a tokio event loop for hosts that want one
//!
//! # Example
//!
//! ```rust
//! use rev_engine::audio::{AudioBank, Clip, HeadlessClip};
//! use rev_engine::builder::SimulatorBuilder;
//! use rev_engine::core::EngineState;
//! use std::time::Duration;
//!
//! let mut sim = SimulatorBuilder::new()
//!     .audio(AudioBank::from_fn(|_| HeadlessClip::new()))
//!     .build()
//!     .unwrap();
//!
//! sim.press();
//! sim.advance(Duration::from_millis(600));
//! assert_eq!(sim.temperature(), 3.0);
//!
//! sim.release();
//! sim.clip_finished(Clip::RevDown);
//! assert_eq!(sim.state(), EngineState::Idle);
//! assert_eq!(sim.readout().status, "Idle");
//! ```

pub mod audio;
pub mod builder;
pub mod core;
pub mod engine;
pub mod runtime;

// Re-export commonly used types
pub use audio::{AudioBank, AudioHandle, Clip, PlaybackError};
pub use builder::{EngineConfig, SimulatorBuilder};
pub use crate::core::{Action, EngineState, Readout};
pub use engine::{EngineSimulator, Event};
