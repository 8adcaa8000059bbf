//! Ramp configuration from TOML.

use heapless::Vec;
use serde::Deserialize;

use crate::motion::MAX_RAMP_STAGES;

/// Built-in ramp: `2500 / sqrt(k + 1)`, a constant-acceleration curve from
/// 50 steps/s up to about 158 steps/s with the default timer clock.
pub const DEFAULT_RAMP_PERIODS: [u16; 10] = [2500, 1768, 1443, 1250, 1118, 1021, 945, 884, 833, 791];

/// Steps spent on each ramp stage.
pub const DEFAULT_RAMP_INTERVAL: u16 = 10;

/// Steps over which the move accelerates (and, symmetrically, decelerates).
pub const DEFAULT_RAMP_DURATION: u16 = DEFAULT_RAMP_INTERVAL * DEFAULT_RAMP_PERIODS.len() as u16;

/// Ramp table and geometry as written in configuration.
///
/// Validated into a [`RampTable`](crate::motion::RampTable) before use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RampConfig {
    /// Timer reload values, slowest first.
    #[serde(default = "default_periods")]
    pub periods: Vec<u16, MAX_RAMP_STAGES>,

    /// Steps over which ramping occurs.
    #[serde(default = "default_duration")]
    pub ramp_duration: u16,

    /// Steps per ramp stage.
    #[serde(default = "default_interval")]
    pub ramp_interval: u16,
}

fn default_periods() -> Vec<u16, MAX_RAMP_STAGES> {
    Vec::from_slice(&DEFAULT_RAMP_PERIODS).unwrap_or_default()
}

fn default_duration() -> u16 {
    DEFAULT_RAMP_DURATION
}

fn default_interval() -> u16 {
    DEFAULT_RAMP_INTERVAL
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            periods: default_periods(),
            ramp_duration: DEFAULT_RAMP_DURATION,
            ramp_interval: DEFAULT_RAMP_INTERVAL,
        }
    }
}

impl RampConfig {
    /// Number of ramp stages.
    #[inline]
    pub fn stages(&self) -> usize {
        self.periods.len()
    }
}
