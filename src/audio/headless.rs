//! In-memory audio handle.
//!
//! Tracks playback state without producing sound. Useful for tests and for
//! hosts that render the engine without an audio device.

use super::{AudioHandle, PlaybackError};

/// Silent [`AudioHandle`] that records what was asked of it.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessClip {
    playing: bool,
    looping: bool,
    volume: f32,
    at_start: bool,
    play_count: usize,
    rejection: Option<String>,
}

impl Default for HeadlessClip {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessClip {
    pub fn new() -> Self {
        Self {
            playing: false,
            looping: false,
            volume: 1.0,
            at_start: true,
            play_count: 0,
            rejection: None,
        }
    }

    /// A clip whose `play` fails until [`allow`](Self::allow) is called,
    /// like a browser before the first user gesture.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            rejection: Some(reason.into()),
            ..Self::new()
        }
    }

    pub fn allow(&mut self) {
        self.rejection = None;
    }

    /// Simulate the natural end of playback.
    ///
    /// Looping clips never end on their own. Returns whether the clip was
    /// playing and has now finished.
    pub fn finish(&mut self) -> bool {
        if !self.playing || self.looping {
            return false;
        }
        self.playing = false;
        self.at_start = false;
        true
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// True if the clip is rewound and has not played since.
    pub fn is_at_start(&self) -> bool {
        self.at_start
    }

    /// Number of successful `play` calls.
    pub fn play_count(&self) -> usize {
        self.play_count
    }
}

impl AudioHandle for HeadlessClip {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if let Some(reason) = &self.rejection {
            return Err(PlaybackError::rejected(reason.clone()));
        }
        self.playing = true;
        self.at_start = false;
        self.play_count += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn seek_start(&mut self) {
        self.at_start = true;
    }

    fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_looping(&self) -> bool {
        self.looping
    }
}
