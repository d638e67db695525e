//! Host input collapsed to logical actions.

use serde::{Deserialize, Serialize};

/// Logical user actions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Action {
    Press,
    Release,
    Reset,
}

/// Raw pointer-ish events a host may forward.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum HostInput {
    MouseDown,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchEnd,
    TouchCancel,
    PointerDown,
    PointerUp,
    PointerLeave,
}

impl HostInput {
    pub fn action(self) -> Action {
        match self {
            Self::MouseDown | Self::TouchStart | Self::PointerDown => Action::Press,
            Self::MouseUp
            | Self::MouseLeave
            | Self::TouchEnd
            | Self::TouchCancel
            | Self::PointerUp
            | Self::PointerLeave => Action::Release,
        }
    }
}

impl From<HostInput> for Action {
    fn from(input: HostInput) -> Self {
        input.action()
    }
}
