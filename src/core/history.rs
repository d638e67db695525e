//! State transition history tracking.
//!
//! Keeps the most recent transitions for diagnostics. The engine runs for
//! the life of the view, so the log is bounded and drops its oldest entries.

use super::state::{EngineState, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Record of a single state transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: EngineState,
    /// The state being transitioned to
    pub to: EngineState,
    /// What caused the transition
    pub trigger: Trigger,
    /// Temperature at the moment of the transition
    pub temperature: f64,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use rev_engine::core::{EngineState, StateHistory, StateTransition, Trigger};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: EngineState::Idle,
///     to: EngineState::Revving,
///     trigger: Trigger::Press,
///     temperature: 0.0,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![EngineState::Idle, EngineState::Revving]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl StateHistory {
    /// Create an empty history keeping at most `capacity` entries.
    ///
    /// A capacity of zero keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed: the first retained `from`, then every `to`.
    pub fn get_path(&self) -> Vec<EngineState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }
}
