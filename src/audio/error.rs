//! Audio error types.

use thiserror::Error;

/// Errors an [`AudioHandle`](super::AudioHandle) may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The host refused to start playback, typically an autoplay policy
    /// before the first user interaction.
    #[error("Playback rejected by host: {reason}")]
    Rejected { reason: String },
}

impl PlaybackError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}
