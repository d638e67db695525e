//! Rendered output of the engine view.
//!
//! Hosts draw from a [`Readout`]; nothing here knows about pixels.

use super::state::EngineState;
use serde::{Deserialize, Serialize};

/// Label on the reset control.
pub const RESET_LABEL: &str = "Replace Engine";

/// Gauge colour band.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GaugeColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl GaugeColor {
    /// Band for a temperature: `<30` green, `<60` yellow, `<85` orange, else red.
    pub fn for_temperature(temperature: f64) -> Self {
        if temperature < 30.0 {
            Self::Green
        } else if temperature < 60.0 {
            Self::Yellow
        } else if temperature < 85.0 {
            Self::Orange
        } else {
            Self::Red
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#22cc22",
            Self::Yellow => "#cccc22",
            Self::Orange => "#cc7722",
            Self::Red => "#cc2222",
        }
    }
}

/// Visual style of the rev button.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ButtonStyle {
    Normal,
    Revving,
    Exploded,
}

impl ButtonStyle {
    pub fn for_state(state: EngineState) -> Self {
        match state {
            EngineState::Revving => Self::Revving,
            EngineState::Exploded => Self::Exploded,
            EngineState::Idle | EngineState::CoolingDown => Self::Normal,
        }
    }

    /// CSS-style class name, if any.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Revving => Some("revving"),
            Self::Exploded => Some("exploded"),
        }
    }
}

/// Everything a host needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub state: EngineState,
    pub status: String,
    pub temperature: f64,
    /// Gauge fill width in percent, `round(temperature)`.
    pub fill_percent: u8,
    pub color: GaugeColor,
    pub temperature_label: String,
    pub button: ButtonStyle,
    /// The reset control is shown only while exploded.
    pub reset_visible: bool,
}

impl Readout {
    pub fn render(state: EngineState, temperature: f64) -> Self {
        let rounded = temperature.round().clamp(0.0, 100.0);
        Self {
            state,
            status: state.status_label().to_string(),
            temperature,
            fill_percent: rounded as u8,
            color: GaugeColor::for_temperature(temperature),
            temperature_label: format!("{}°C", rounded as u8),
            button: ButtonStyle::for_state(state),
            reset_visible: state == EngineState::Exploded,
        }
    }

    pub fn reset_label(&self) -> Option<&'static str> {
        self.reset_visible.then_some(RESET_LABEL)
    }
}
