//! The engine simulator: state, temperature, timer and audio in one owner.

use super::timer::{TickMode, TickTimer};
use crate::audio::{AudioBank, AudioHandle, Clip, FinishAction, SoundSequencer};
use crate::builder::EngineConfig;
use crate::core::{
    Action, EngineState, Epoch, Readout, StaleGuard, StateHistory, StateTransition,
    TemperatureModel, TickOutcome, Trigger,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Everything that can happen to a running engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Event {
    Input(Action),
    /// A clip reached its natural end.
    ClipFinished(Clip),
    /// Time passed on the host clock.
    Elapsed(Duration),
}

/// The virtual engine.
///
/// All state is owned here and mutated through `&mut self`; events are
/// handled one at a time, each to completion.
#[derive(Debug)]
pub struct EngineSimulator<A: AudioHandle> {
    state: EngineState,
    epoch: Epoch,
    temperature: TemperatureModel,
    timer: TickTimer,
    sequencer: SoundSequencer<A>,
    history: StateHistory,
    config: EngineConfig,
}

impl<A: AudioHandle> EngineSimulator<A> {
    /// Create an idle engine at zero and attempt to start the idle loop.
    ///
    /// The config must already be validated; hosts construct through
    /// [`SimulatorBuilder`](crate::builder::SimulatorBuilder).
    pub(crate) fn new(config: EngineConfig, audio: AudioBank<A>) -> Self {
        let mut sim = Self {
            state: EngineState::Idle,
            epoch: Epoch::new(),
            temperature: TemperatureModel::new(
                config.max_temperature,
                config.heat_step,
                config.cool_step,
            ),
            timer: TickTimer::new(),
            sequencer: SoundSequencer::new(audio, config.idle_volume),
            history: StateHistory::with_capacity(config.history_capacity),
            config,
        };
        sim.sequencer.start_idle();
        sim.sync_timer();
        sim
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.value()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn sequencer(&self) -> &SoundSequencer<A> {
        &self.sequencer
    }

    pub fn audio(&self) -> &AudioBank<A> {
        self.sequencer.audio()
    }

    /// Device-side seam for hosts and tests.
    ///
    /// Use it to mirror what the playback device did on its own (a clip
    /// reaching its end, an autoplay block being lifted). Playback commands
    /// stay with the sequencer; issuing `play`/`stop` here bypasses the
    /// finish slots and the one-loop rule.
    pub fn audio_mut(&mut self) -> &mut AudioBank<A> {
        self.sequencer.audio_mut()
    }

    /// Current frame for the host to draw.
    pub fn readout(&self) -> Readout {
        Readout::render(self.state, self.temperature.value())
    }

    /// Time until the armed timer next fires.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.timer.until_next()
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Input(action) => self.act(action),
            Event::ClipFinished(clip) => self.clip_finished(clip),
            Event::Elapsed(elapsed) => self.advance(elapsed),
        }
    }

    pub fn act(&mut self, action: Action) {
        match action {
            Action::Press => self.press(),
            Action::Release => self.release(),
            Action::Reset => self.reset(),
        }
    }

    /// Button down. Ignored while exploded or already revving.
    pub fn press(&mut self) {
        if let Some(guard) = self.transition(Trigger::Press) {
            self.sequencer.on_press(guard);
        }
    }

    /// Button up. Only effective while revving.
    pub fn release(&mut self) {
        if let Some(guard) = self.transition(Trigger::Release) {
            self.sequencer.on_release(guard);
        }
    }

    /// Replace the blown engine. Only effective while exploded.
    pub fn reset(&mut self) {
        if self.state != EngineState::Exploded {
            debug!(state = %self.state, "reset ignored");
            return;
        }
        self.temperature.reset();
        if self.transition(Trigger::Reset).is_some() {
            self.sequencer.on_reset();
        }
    }

    /// The host reports that a clip played to its end.
    ///
    /// The handler registered for the clip runs only if no transition
    /// happened since it was registered.
    pub fn clip_finished(&mut self, clip: Clip) {
        let Some(pending) = self.sequencer.take_finished(clip) else {
            debug!(clip = %clip, "no finish handler registered");
            return;
        };

        if !pending.guard.check(self.epoch, self.state) {
            debug!(
                clip = %clip,
                expected = %pending.guard.expected(),
                state = %self.state,
                "discarding stale finish handler"
            );
            return;
        }

        match pending.action {
            FinishAction::StartRevHold => self.sequencer.start_rev_hold(),
            FinishAction::EnterIdle => {
                if self.transition(Trigger::CooldownFinished).is_some() {
                    self.sequencer.on_idle_reached();
                }
            }
        }
    }

    /// Let time pass, firing every due tick in order.
    ///
    /// Each tick may change state and re-arm or disarm the timer; the
    /// remaining time is applied to whatever is armed afterwards. Time that
    /// passes while nothing is armed is dropped.
    pub fn advance(&mut self, mut elapsed: Duration) {
        while let Some(until) = self.timer.until_next() {
            if self.timer.period() == Some(Duration::ZERO) {
                warn!("tick timer armed with a zero period, dropping elapsed time");
                return;
            }
            if elapsed < until {
                self.timer.accumulate(elapsed);
                return;
            }
            elapsed -= until;
            if self.timer.fire().is_some() {
                self.tick();
            }
        }
    }

    /// Stop the timer and silence every clip.
    pub fn shutdown(&mut self) {
        self.timer.disarm();
        self.sequencer.silence();
    }

    fn tick(&mut self) {
        match self.temperature.tick(self.state) {
            TickOutcome::Overheated => {
                if self.transition(Trigger::Overheat).is_some() {
                    self.sequencer.on_explode();
                }
            }
            TickOutcome::Heated(_) | TickOutcome::Cooled(_) | TickOutcome::Frozen => {}
        }
    }

    /// Apply a trigger; on success bump the epoch, log, and re-sync the timer.
    ///
    /// Returns a guard for the newly entered state.
    fn transition(&mut self, trigger: Trigger) -> Option<StaleGuard> {
        let from = self.state;
        let to = match from.apply(trigger) {
            Ok(to) => to,
            Err(err) => {
                debug!(error = %err, "input ignored");
                return None;
            }
        };

        self.state = to;
        self.epoch = self.epoch.next();
        self.history.record(StateTransition {
            from,
            to,
            trigger,
            temperature: self.temperature.value(),
            timestamp: Utc::now(),
        });
        info!(
            from = %from,
            to = %to,
            trigger = %trigger,
            temperature = self.temperature.value(),
            "engine state changed"
        );

        self.sync_timer();
        Some(StaleGuard::new(self.epoch, to))
    }

    /// Arm the timer for the current state, re-arming only on a mode change.
    fn sync_timer(&mut self) {
        let wanted = match self.state {
            EngineState::Revving => Some((TickMode::Heating, self.config.heat_period())),
            EngineState::Idle | EngineState::CoolingDown => {
                Some((TickMode::Cooling, self.config.cool_period()))
            }
            EngineState::Exploded => None,
        };

        match wanted {
            Some((mode, _)) if self.timer.mode() == Some(mode) => {}
            Some((mode, period)) => {
                self.timer.arm(mode, period);
            }
            None => self.timer.disarm(),
        }
    }
}

impl<A: AudioHandle> Drop for EngineSimulator<A> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::HeadlessClip;

    fn engine() -> EngineSimulator<HeadlessClip> {
        EngineSimulator::new(
            EngineConfig::default(),
            AudioBank::from_fn(|_| HeadlessClip::new()),
        )
    }

    const HEAT: Duration = Duration::from_millis(200);
    const COOL: Duration = Duration::from_millis(100);

    #[test]
    fn starts_idle_cold_with_idle_loop() {
        let sim = engine();
        assert_eq!(sim.state(), EngineState::Idle);
        assert_eq!(sim.temperature(), 0.0);
        assert_eq!(sim.audio().active_loops(), vec![Clip::Idle]);
        assert_eq!(sim.timer().mode(), Some(TickMode::Cooling));
    }

    #[test]
    fn press_arms_heating_timer() {
        let mut sim = engine();
        sim.press();
        assert_eq!(sim.state(), EngineState::Revving);
        assert_eq!(sim.timer().mode(), Some(TickMode::Heating));
        assert_eq!(sim.until_next_tick(), Some(HEAT));
    }

    #[test]
    fn each_heating_period_adds_one_degree() {
        let mut sim = engine();
        sim.press();
        sim.advance(HEAT * 3);
        assert_eq!(sim.temperature(), 3.0);
        sim.advance(HEAT / 2);
        assert_eq!(sim.temperature(), 3.0);
        sim.advance(HEAT / 2);
        assert_eq!(sim.temperature(), 4.0);
    }

    #[test]
    fn release_cools_by_half_a_degree_per_period() {
        let mut sim = engine();
        sim.press();
        sim.advance(HEAT * 4);
        sim.release();
        assert_eq!(sim.state(), EngineState::CoolingDown);
        sim.advance(COOL * 2);
        assert_eq!(sim.temperature(), 3.0);
    }

    #[test]
    fn press_while_revving_is_ignored() {
        let mut sim = engine();
        sim.press();
        let epoch = sim.epoch();
        sim.press();
        assert_eq!(sim.epoch(), epoch);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn overheating_explodes_and_stops_ticking() {
        let mut sim = engine();
        sim.press();
        sim.advance(HEAT * 150);

        assert_eq!(sim.state(), EngineState::Exploded);
        assert_eq!(sim.temperature(), 100.0);
        assert!(!sim.timer().is_armed());
        assert!(sim.audio().get(Clip::Explosion).is_playing());
        assert!(sim.audio().active_loops().is_empty());
    }

    #[test]
    fn rev_up_finish_starts_hold_loop_while_held() {
        let mut sim = engine();
        sim.press();
        sim.clip_finished(Clip::RevUp);
        assert_eq!(sim.audio().active_loops(), vec![Clip::RevHold]);
    }

    #[test]
    fn late_rev_up_finish_after_release_is_ignored() {
        let mut sim = engine();
        sim.press();
        sim.release();
        sim.clip_finished(Clip::RevUp);
        assert!(!sim.audio().get(Clip::RevHold).is_playing());
    }

    #[test]
    fn rev_up_finish_from_an_earlier_press_is_stale() {
        let mut sim = engine();
        sim.press();
        let stale = *sim.sequencer().pending(Clip::RevUp).unwrap();
        sim.release();
        sim.press();

        // Host delivers a finish for the first press after re-registering.
        sim.sequencer.set_on_finished(Clip::RevUp, stale);
        sim.clip_finished(Clip::RevUp);
        assert!(!sim.audio().get(Clip::RevHold).is_playing());
    }

    #[test]
    fn reset_outside_exploded_is_a_no_op() {
        let mut sim = engine();
        sim.press();
        sim.advance(HEAT * 2);
        sim.reset();
        assert_eq!(sim.state(), EngineState::Revving);
        assert_eq!(sim.temperature(), 2.0);
    }

    #[test]
    fn events_dispatch_to_operations() {
        let mut sim = engine();
        sim.handle(Event::Input(Action::Press));
        sim.handle(Event::Elapsed(HEAT));
        sim.handle(Event::Input(Action::Release));
        sim.handle(Event::ClipFinished(Clip::RevDown));
        assert_eq!(sim.state(), EngineState::Idle);
        assert_eq!(sim.temperature(), 1.0);
    }

    #[test]
    fn history_records_trigger_and_temperature() {
        let mut sim = engine();
        sim.press();
        sim.advance(HEAT * 5);
        sim.release();

        let last = sim.history().last().unwrap();
        assert_eq!(last.trigger, Trigger::Release);
        assert_eq!(last.temperature, 5.0);
    }

    #[test]
    fn zero_period_does_not_spin_forever() {
        let mut sim = EngineSimulator::new(
            EngineConfig {
                cool_period_ms: 0,
                ..EngineConfig::default()
            },
            AudioBank::from_fn(|_| HeadlessClip::new()),
        );

        sim.advance(Duration::from_millis(1));
        assert_eq!(sim.state(), EngineState::Idle);
        assert_eq!(sim.temperature(), 0.0);
    }

    #[test]
    fn shutdown_releases_timer_and_audio() {
        let mut sim = engine();
        sim.press();
        sim.shutdown();
        assert!(!sim.timer().is_armed());
        assert!(sim.audio().iter().all(|(_, h)| !h.is_playing()));
    }
}
