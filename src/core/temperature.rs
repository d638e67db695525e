//! Bounded engine temperature.
//!
//! Heating and cooling use different steps and periods so the engine revs
//! up fast and cools slowly. The periods themselves belong to the timer;
//! this model only knows the step applied per tick.

use super::state::EngineState;
use serde::{Deserialize, Serialize};

/// Lower bound of the temperature domain.
pub const MIN_TEMPERATURE: f64 = 0.0;

/// Result of applying one tick.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Temperature rose but stayed below the upper bound.
    Heated(f64),
    /// Temperature fell (or stayed at the lower bound).
    Cooled(f64),
    /// Temperature reached the upper bound and is pinned there.
    Overheated,
    /// No ticking happens in this state.
    Frozen,
}

/// Temperature value with its increase and decrease rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemperatureModel {
    value: f64,
    max: f64,
    heat_step: f64,
    cool_step: f64,
}

impl TemperatureModel {
    pub fn new(max: f64, heat_step: f64, cool_step: f64) -> Self {
        Self {
            value: MIN_TEMPERATURE,
            max,
            heat_step,
            cool_step,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Apply one tick for the given state.
    ///
    /// Reaching `max` while revving reports [`TickOutcome::Overheated`];
    /// the value never exceeds `max` and never drops below zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rev_engine::core::{EngineState, TemperatureModel, TickOutcome};
    ///
    /// let mut temp = TemperatureModel::new(100.0, 1.0, 0.5);
    /// assert_eq!(temp.tick(EngineState::Revving), TickOutcome::Heated(1.0));
    /// assert_eq!(temp.tick(EngineState::CoolingDown), TickOutcome::Cooled(0.5));
    /// ```
    pub fn tick(&mut self, state: EngineState) -> TickOutcome {
        match state {
            EngineState::Revving => {
                let next = self.value + self.heat_step;
                if next >= self.max {
                    self.value = self.max;
                    TickOutcome::Overheated
                } else {
                    self.value = next;
                    TickOutcome::Heated(next)
                }
            }
            EngineState::Idle | EngineState::CoolingDown => {
                self.value = (self.value - self.cool_step).max(MIN_TEMPERATURE);
                TickOutcome::Cooled(self.value)
            }
            EngineState::Exploded => TickOutcome::Frozen,
        }
    }

    /// Return to the initial value.
    pub fn reset(&mut self) {
        self.value = MIN_TEMPERATURE;
    }
}
