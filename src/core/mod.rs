//! Pure engine core.
//!
//! This module contains logic with no side effects:
//! - The presentation state machine and its transition table
//! - The bounded temperature model
//! - Stale-callback guards
//! - Transition history and the rendered readout
//!
//! Audio and timers live in the imperative shell (`audio`, `engine`).

mod guard;
mod history;
mod input;
mod readout;
mod state;
mod temperature;

pub use guard::{Epoch, StaleGuard};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use input::{Action, HostInput};
pub use readout::{ButtonStyle, GaugeColor, Readout, RESET_LABEL};
pub use state::{EngineState, TransitionError, Trigger};
pub use temperature::{TemperatureModel, TickOutcome, MIN_TEMPERATURE};
