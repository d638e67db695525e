//! Audio clips and the handles that play them.
//!
//! The engine owns five long-lived handles for the life of the view. Hosts
//! implement [`AudioHandle`] over whatever playback facility they have and
//! report natural end of playback through
//! [`EngineSimulator::clip_finished`](crate::engine::EngineSimulator::clip_finished).
//!
//! # "Finished" notifications
//!
//! Each clip has a single replaceable finish slot held by the
//! [`SoundSequencer`]. Registering a new handler replaces the previous one;
//! handlers never stack. A notification for a clip with an empty slot is
//! ignored.

mod error;
mod headless;
mod sequencer;

pub use error::PlaybackError;
pub use headless::HeadlessClip;
pub use sequencer::{FinishAction, PendingFinish, SoundSequencer};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A playable audio resource with a single writer.
pub trait AudioHandle {
    /// Start or resume playback from the current position.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback, keeping the position.
    fn stop(&mut self);

    /// Rewind to the beginning.
    fn seek_start(&mut self);

    fn set_loop(&mut self, looping: bool);

    /// Volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);

    fn is_playing(&self) -> bool;

    fn is_looping(&self) -> bool;
}

impl<A: AudioHandle + ?Sized> AudioHandle for Box<A> {
    fn play(&mut self) -> Result<(), PlaybackError> {
        (**self).play()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn seek_start(&mut self) {
        (**self).seek_start()
    }

    fn set_loop(&mut self, looping: bool) {
        (**self).set_loop(looping)
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }

    fn is_looping(&self) -> bool {
        (**self).is_looping()
    }
}

/// The five clips the engine plays.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Clip {
    RevUp,
    RevHold,
    RevDown,
    Idle,
    Explosion,
}

impl Clip {
    pub const ALL: [Clip; 5] = [
        Clip::RevUp,
        Clip::RevHold,
        Clip::RevDown,
        Clip::Idle,
        Clip::Explosion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::RevUp => "rev-up",
            Self::RevHold => "rev-hold",
            Self::RevDown => "rev-down",
            Self::Idle => "idle",
            Self::Explosion => "explosion",
        }
    }

    /// Clips that loop while active.
    pub fn is_loop(&self) -> bool {
        matches!(self, Self::RevHold | Self::Idle)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::RevUp => 0,
            Self::RevHold => 1,
            Self::RevDown => 2,
            Self::Idle => 3,
            Self::Explosion => 4,
        }
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed set of five handles, one per [`Clip`].
#[derive(Debug)]
pub struct AudioBank<A: AudioHandle> {
    handles: [A; 5],
}

impl<A: AudioHandle> AudioBank<A> {
    pub fn new(rev_up: A, rev_hold: A, rev_down: A, idle: A, explosion: A) -> Self {
        Self {
            handles: [rev_up, rev_hold, rev_down, idle, explosion],
        }
    }

    /// Build each handle from its clip.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rev_engine::audio::{AudioBank, AudioHandle, Clip, HeadlessClip};
    ///
    /// let bank = AudioBank::from_fn(|_clip| HeadlessClip::new());
    /// assert!(!bank.get(Clip::Idle).is_playing());
    /// ```
    pub fn from_fn<F>(mut make: F) -> Self
    where
        F: FnMut(Clip) -> A,
    {
        Self {
            handles: Clip::ALL.map(&mut make),
        }
    }

    pub fn get(&self, clip: Clip) -> &A {
        &self.handles[clip.index()]
    }

    pub fn get_mut(&mut self, clip: Clip) -> &mut A {
        &mut self.handles[clip.index()]
    }

    /// Clips currently looping and playing.
    pub fn active_loops(&self) -> Vec<Clip> {
        Clip::ALL
            .into_iter()
            .filter(|clip| {
                let handle = self.get(*clip);
                handle.is_playing() && handle.is_looping()
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Clip, &A)> {
        Clip::ALL.into_iter().zip(self.handles.iter())
    }
}
