//! The single periodic tick timer.
//!
//! Time is injected by the host through elapsed durations, so the timer is
//! fully deterministic. Arming always cancels the previous schedule first.

use std::time::Duration;

/// What the armed timer drives.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickMode {
    Heating,
    Cooling,
}

#[derive(Clone, Copy, Debug)]
struct Schedule {
    mode: TickMode,
    period: Duration,
    elapsed: Duration,
    generation: u64,
}

/// At most one armed periodic schedule.
#[derive(Clone, Debug, Default)]
pub struct TickTimer {
    armed: Option<Schedule>,
    generation: u64,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any current schedule and arm a new one.
    ///
    /// Returns the generation of the new schedule.
    pub fn arm(&mut self, mode: TickMode, period: Duration) -> u64 {
        self.disarm();
        self.generation += 1;
        self.armed = Some(Schedule {
            mode,
            period,
            elapsed: Duration::ZERO,
            generation: self.generation,
        });
        self.generation
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn mode(&self) -> Option<TickMode> {
        self.armed.map(|s| s.mode)
    }

    pub fn period(&self) -> Option<Duration> {
        self.armed.map(|s| s.period)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Generation of the armed schedule, if any.
    pub fn generation(&self) -> Option<u64> {
        self.armed.map(|s| s.generation)
    }

    /// Time left until the next tick.
    pub fn until_next(&self) -> Option<Duration> {
        self.armed.map(|s| s.period.saturating_sub(s.elapsed))
    }

    /// Let time pass without reaching the next tick.
    pub(crate) fn accumulate(&mut self, elapsed: Duration) {
        if let Some(schedule) = self.armed.as_mut() {
            schedule.elapsed = (schedule.elapsed + elapsed).min(schedule.period);
        }
    }

    /// Consume one due tick and start the next period.
    pub(crate) fn fire(&mut self) -> Option<TickMode> {
        let schedule = self.armed.as_mut()?;
        schedule.elapsed = Duration::ZERO;
        Some(schedule.mode)
    }
}
