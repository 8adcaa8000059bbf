//! Configuration module for stepper-ramp.
//!
//! Provides the ramp table, timer clock and stepping mode configuration,
//! loadable from TOML files (with `std` feature) or built in code.

mod clock;
#[cfg(feature = "std")]
mod loader;
mod ramp;
mod system;
pub mod units;
mod validation;

pub use clock::{TimerClock, DEFAULT_CLOCK_HZ};
pub use ramp::{RampConfig, DEFAULT_RAMP_DURATION, DEFAULT_RAMP_INTERVAL, DEFAULT_RAMP_PERIODS};
pub use system::ControllerConfig;
pub use validation::validate_config;
pub(crate) use validation::validate_ramp_parts;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Prescaler, StepsPerSec};
