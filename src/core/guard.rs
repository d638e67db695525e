//! Stale-callback guards.
//!
//! Audio "finished" notifications arrive asynchronously relative to user
//! input. A handler registered for one state must not act once the engine
//! has moved on, even if it later returns to the same state. Guards capture
//! the transition epoch and the expected state at registration time.

use super::state::EngineState;
use serde::{Deserialize, Serialize};

/// Monotonic counter bumped on every state transition.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Epoch(u64);

impl Epoch {
    pub fn new() -> Self {
        Self(0)
    }

    /// The epoch following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Pure predicate deciding whether a pending handler is still current.
///
/// # Example
///
/// ```rust
/// use rev_engine::core::{EngineState, Epoch, StaleGuard};
///
/// let epoch = Epoch::new().next();
/// let guard = StaleGuard::new(epoch, EngineState::Revving);
///
/// assert!(guard.check(epoch, EngineState::Revving));
/// assert!(!guard.check(epoch, EngineState::CoolingDown));
/// // Same state, but reached through a later transition.
/// assert!(!guard.check(epoch.next().next(), EngineState::Revving));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StaleGuard {
    epoch: Epoch,
    expected: EngineState,
}

impl StaleGuard {
    pub fn new(epoch: Epoch, expected: EngineState) -> Self {
        Self { epoch, expected }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn expected(&self) -> EngineState {
        self.expected
    }

    /// True only if no transition happened since registration.
    pub fn check(&self, epoch: Epoch, state: EngineState) -> bool {
        self.epoch == epoch && self.expected == state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_advances_monotonically() {
        let start = Epoch::new();
        assert_eq!(start.value(), 0);
        assert!(start.next() > start);
        assert_eq!(start.next().next().value(), 2);
    }

    #[test]
    fn guard_passes_for_same_epoch_and_state() {
        let epoch = Epoch::new().next();
        let guard = StaleGuard::new(epoch, EngineState::CoolingDown);
        assert!(guard.check(epoch, EngineState::CoolingDown));
    }

    #[test]
    fn guard_rejects_a_later_epoch_even_in_the_same_state() {
        let epoch = Epoch::new();
        let guard = StaleGuard::new(epoch, EngineState::CoolingDown);

        // CoolingDown -> Revving -> CoolingDown
        let later = epoch.next().next();
        assert!(!guard.check(later, EngineState::CoolingDown));
    }

    #[test]
    fn guard_rejects_a_different_state() {
        let epoch = Epoch::new();
        let guard = StaleGuard::new(epoch, EngineState::Revving);
        assert!(!guard.check(epoch, EngineState::Exploded));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = StaleGuard::new(Epoch::new(), EngineState::Idle);
        let first = guard.check(Epoch::new(), EngineState::Idle);
        let second = guard.check(Epoch::new(), EngineState::Idle);
        assert_eq!(first, second);
    }
}
