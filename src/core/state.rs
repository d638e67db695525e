//! Presentation state machine for the engine.
//!
//! The transition table is a pure function of the current state and a
//! trigger. Side effects (audio, timers) live in the imperative shell
//! and react to the state this table produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The four presentation states of the engine.
///
/// Exactly one is active at any time. `Exploded` is not terminal: it is
/// left only through an explicit reset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Idle,
    Revving,
    CoolingDown,
    Exploded,
}

impl EngineState {
    /// Get the state's name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Revving => "Revving",
            Self::CoolingDown => "CoolingDown",
            Self::Exploded => "Exploded",
        }
    }

    /// Status text shown to the user.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Revving => "Revving",
            Self::CoolingDown => "Cooling Down",
            Self::Exploded => "BLOWN ENGINE!",
        }
    }

    /// Check if this is the failure state.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Exploded)
    }

    /// Apply a trigger, returning the next state (pure).
    ///
    /// Pairs that are not part of the transition table are rejected with
    /// [`TransitionError::NoTransition`]; callers treat that as a no-op.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rev_engine::core::{EngineState, Trigger};
    ///
    /// let next = EngineState::Idle.apply(Trigger::Press).unwrap();
    /// assert_eq!(next, EngineState::Revving);
    ///
    /// assert!(EngineState::Exploded.apply(Trigger::Press).is_err());
    /// ```
    pub fn apply(self, trigger: Trigger) -> Result<EngineState, TransitionError> {
        use EngineState::*;
        use Trigger::*;

        match (self, trigger) {
            (Idle, Press) | (CoolingDown, Press) => Ok(Revving),
            (Revving, Release) => Ok(CoolingDown),
            (Revving, Overheat) => Ok(Exploded),
            (CoolingDown, CooldownFinished) => Ok(Idle),
            (Exploded, Reset) => Ok(Idle),
            (from, trigger) => Err(TransitionError::NoTransition { from, trigger }),
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events that can move the state machine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// The rev button went down.
    Press,
    /// The rev button came up.
    Release,
    /// Temperature reached the upper bound.
    Overheat,
    /// The rev-down clip played to its end.
    CooldownFinished,
    /// The user asked for a replacement engine.
    Reset,
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Press => "Press",
            Self::Release => "Release",
            Self::Overheat => "Overheat",
            Self::CooldownFinished => "CooldownFinished",
            Self::Reset => "Reset",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors produced by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("No transition from state '{from}' on trigger '{trigger}'")]
    NoTransition { from: EngineState, trigger: Trigger },
}
