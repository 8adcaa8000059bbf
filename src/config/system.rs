//! Controller configuration - root configuration structure.

use serde::Deserialize;

use crate::motion::SteppingMode;

use super::clock::TimerClock;
use super::ramp::RampConfig;

/// Root configuration structure from TOML.
///
/// Every section is optional; missing sections fall back to the board
/// defaults (half stepping, 16 MHz / 64, built-in ramp).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ControllerConfig {
    /// Driver stepping mode selected at initialization.
    #[serde(default)]
    pub stepping_mode: SteppingMode,

    /// Step timer clock.
    #[serde(default)]
    pub timer: TimerClock,

    /// Ramp table and geometry.
    #[serde(default)]
    pub ramp: RampConfig,
}

impl ControllerConfig {
    /// Replace the stepping mode.
    pub fn with_stepping_mode(mut self, mode: SteppingMode) -> Self {
        self.stepping_mode = mode;
        self
    }

    /// Replace the ramp configuration.
    pub fn with_ramp(mut self, ramp: RampConfig) -> Self {
        self.ramp = ramp;
        self
    }
}
