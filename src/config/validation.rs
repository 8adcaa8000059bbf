//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::MAX_RAMP_STAGES;

use super::clock::TimerClock;
use super::ramp::RampConfig;
use super::ControllerConfig;

/// Validate a controller configuration.
///
/// Checks:
/// - The ramp table is non-empty, fits the controller and has no zero entries
/// - Ramp entries never get slower along the table
/// - `ramp_duration / ramp_interval` equals the table length exactly
/// - The timer clock is non-zero
pub fn validate_config(config: &ControllerConfig) -> Result<()> {
    validate_clock(&config.timer)?;
    validate_ramp(&config.ramp)?;
    Ok(())
}

fn validate_clock(clock: &TimerClock) -> Result<()> {
    if clock.clock_hz == 0 {
        return Err(Error::Config(ConfigError::InvalidClock(clock.clock_hz)));
    }
    Ok(())
}

/// Validate a ramp table and its geometry.
pub(crate) fn validate_ramp_parts(periods: &[u16], duration: u16, interval: u16) -> Result<()> {
    if periods.is_empty() {
        return Err(Error::Config(ConfigError::EmptyRampTable));
    }

    if periods.len() > MAX_RAMP_STAGES {
        return Err(Error::Config(ConfigError::RampTableTooLong(periods.len())));
    }

    if let Some(index) = periods.iter().position(|&p| p == 0) {
        return Err(Error::Config(ConfigError::ZeroRampPeriod { index }));
    }

    if let Some(index) = periods.windows(2).position(|w| w[1] > w[0]) {
        return Err(Error::Config(ConfigError::RampTableNotMonotonic { index: index + 1 }));
    }

    if interval == 0 {
        return Err(Error::Config(ConfigError::ZeroRampInterval));
    }

    if duration % interval != 0 || (duration / interval) as usize != periods.len() {
        return Err(Error::Config(ConfigError::RampGeometryMismatch {
            duration,
            interval,
            stages: periods.len(),
        }));
    }

    Ok(())
}

fn validate_ramp(ramp: &RampConfig) -> Result<()> {
    validate_ramp_parts(&ramp.periods, ramp.ramp_duration, ramp.ramp_interval)
}
