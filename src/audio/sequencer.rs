//! Maps state transitions to audio commands.
//!
//! The sequencer owns the audio bank and one finish slot per clip. It never
//! changes engine state itself: when a clip finishes, the pending action is
//! handed back to the simulator, which checks the guard and acts.

use super::{AudioBank, AudioHandle, Clip, PlaybackError};
use crate::core::StaleGuard;
use tracing::{debug, trace, warn};

/// What to do when a clip plays to its end.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FinishAction {
    /// Rev-up ended while the button is still held: loop the hold sound.
    StartRevHold,
    /// Rev-down ended: settle into idle.
    EnterIdle,
}

/// A registered finish handler and the state it was registered for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingFinish {
    pub action: FinishAction,
    pub guard: StaleGuard,
}

/// Drives the five clips so that exactly the right ones are active.
#[derive(Debug)]
pub struct SoundSequencer<A: AudioHandle> {
    bank: AudioBank<A>,
    slots: [Option<PendingFinish>; 5],
    last_rejection: Option<(Clip, PlaybackError)>,
    rejections: usize,
}

impl<A: AudioHandle> SoundSequencer<A> {
    /// Take ownership of the bank and prepare the idle loop.
    pub fn new(mut bank: AudioBank<A>, idle_volume: f32) -> Self {
        let idle = bank.get_mut(Clip::Idle);
        idle.set_loop(true);
        idle.set_volume(idle_volume);

        Self {
            bank,
            slots: [None; 5],
            last_rejection: None,
            rejections: 0,
        }
    }

    pub fn audio(&self) -> &AudioBank<A> {
        &self.bank
    }

    pub(crate) fn audio_mut(&mut self) -> &mut AudioBank<A> {
        &mut self.bank
    }

    /// Most recent rejected playback, if any.
    pub fn last_rejection(&self) -> Option<&(Clip, PlaybackError)> {
        self.last_rejection.as_ref()
    }

    /// Total rejected playback attempts.
    pub fn rejections(&self) -> usize {
        self.rejections
    }

    /// Register a finish handler, replacing whatever the slot held.
    pub fn set_on_finished(&mut self, clip: Clip, pending: PendingFinish) {
        if let Some(previous) = self.slots[clip.index()].replace(pending) {
            trace!(clip = %clip, ?previous, "replaced finish handler");
        }
    }

    pub fn clear_on_finished(&mut self, clip: Clip) {
        self.slots[clip.index()] = None;
    }

    pub fn pending(&self, clip: Clip) -> Option<&PendingFinish> {
        self.slots[clip.index()].as_ref()
    }

    /// Remove and return the handler for a clip that just finished.
    pub fn take_finished(&mut self, clip: Clip) -> Option<PendingFinish> {
        self.slots[clip.index()].take()
    }

    /// First attempt at the idle loop, before any user interaction.
    pub fn start_idle(&mut self) {
        self.play(Clip::Idle);
    }

    /// Button went down: `guard` is the freshly entered `Revving` state.
    pub fn on_press(&mut self, guard: StaleGuard) {
        self.halt(Clip::Idle);
        self.clear_on_finished(Clip::RevDown);
        self.halt(Clip::RevDown);

        self.bank.get_mut(Clip::RevUp).seek_start();
        self.play(Clip::RevUp);
        self.set_on_finished(
            Clip::RevUp,
            PendingFinish {
                action: FinishAction::StartRevHold,
                guard,
            },
        );
    }

    /// Rev-up finished while still held.
    pub fn start_rev_hold(&mut self) {
        let hold = self.bank.get_mut(Clip::RevHold);
        hold.seek_start();
        hold.set_loop(true);
        self.play(Clip::RevHold);
    }

    /// Button came up: `guard` is the freshly entered `CoolingDown` state.
    pub fn on_release(&mut self, guard: StaleGuard) {
        self.clear_on_finished(Clip::RevUp);
        self.halt(Clip::RevUp);
        self.halt(Clip::RevHold);

        self.bank.get_mut(Clip::RevDown).seek_start();
        self.play(Clip::RevDown);
        self.set_on_finished(
            Clip::RevDown,
            PendingFinish {
                action: FinishAction::EnterIdle,
                guard,
            },
        );
    }

    pub fn on_explode(&mut self) {
        self.clear_on_finished(Clip::RevUp);
        self.clear_on_finished(Clip::RevDown);
        for clip in [Clip::RevUp, Clip::RevHold, Clip::RevDown, Clip::Idle] {
            self.bank.get_mut(clip).stop();
        }

        let explosion = self.bank.get_mut(Clip::Explosion);
        explosion.seek_start();
        explosion.set_loop(false);
        self.play(Clip::Explosion);
    }

    /// Back to idle after a replacement engine. The explosion clip is left
    /// to finish on its own.
    pub fn on_reset(&mut self) {
        self.resume_idle();
    }

    /// Rev-down finished and the engine settled.
    pub fn on_idle_reached(&mut self) {
        self.resume_idle();
    }

    /// Stop and rewind every clip and drop pending handlers.
    pub fn silence(&mut self) {
        self.slots = [None; 5];
        for clip in Clip::ALL {
            self.halt(clip);
        }
    }

    fn resume_idle(&mut self) {
        let idle = self.bank.get_mut(Clip::Idle);
        idle.seek_start();
        idle.set_loop(true);
        self.play(Clip::Idle);
    }

    fn halt(&mut self, clip: Clip) {
        let handle = self.bank.get_mut(clip);
        handle.stop();
        handle.seek_start();
    }

    /// Best effort: a rejection is logged and remembered, never propagated.
    fn play(&mut self, clip: Clip) {
        match self.bank.get_mut(clip).play() {
            Ok(()) => debug!(clip = %clip, "playing clip"),
            Err(err) => {
                warn!(clip = %clip, error = %err, "audio playback rejected");
                self.rejections += 1;
                self.last_rejection = Some((clip, err));
            }
        }
    }
}
