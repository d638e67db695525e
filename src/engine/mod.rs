//! Imperative shell around the pure core.
//!
//! The simulator owns the state, the temperature model, the single tick
//! timer and the sound sequencer, and is the only place where transitions
//! produce side effects.

mod simulator;
mod timer;

pub use simulator::{EngineSimulator, Event};
pub use timer::{TickMode, TickTimer};
