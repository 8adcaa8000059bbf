//! Error types for stepper-ramp.
//!
//! The ramp state machine itself cannot fail: step counts, directions and
//! wheels are trusted as given. Errors come from configuration (ramp table and
//! timer clock validation) and from the GPIO lines reporting a failed write.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-ramp operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor output error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// The ramp table has no entries
    EmptyRampTable,
    /// The ramp table holds more entries than the controller can store
    RampTableTooLong(usize),
    /// A ramp entry is longer (slower) than the one before it
    RampTableNotMonotonic {
        /// Index of the offending entry
        index: usize,
    },
    /// A ramp entry of zero would make the timer fire continuously
    ZeroRampPeriod {
        /// Index of the offending entry
        index: usize,
    },
    /// Steps per ramp stage must be at least one
    ZeroRampInterval,
    /// `ramp_duration / ramp_interval` does not match the table length
    RampGeometryMismatch {
        /// Steps over which ramping occurs
        duration: u16,
        /// Steps per ramp stage
        interval: u16,
        /// Number of entries in the table
        stages: usize,
    },
    /// Prescaler divisor is not one the timer supports (1, 8, 64, 256, 1024)
    InvalidPrescaler(u16),
    /// Timer input clock must be > 0
    InvalidClock(u32),
    /// A builder was finished without a required component
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// The shared controller slot is empty
    NotInstalled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::EmptyRampTable => write!(f, "Ramp table is empty"),
            ConfigError::RampTableTooLong(len) => write!(
                f,
                "Ramp table has {} entries, maximum is {}",
                len,
                crate::motion::MAX_RAMP_STAGES
            ),
            ConfigError::RampTableNotMonotonic { index } => {
                write!(f, "Ramp entry {} is slower than the entry before it", index)
            }
            ConfigError::ZeroRampPeriod { index } => write!(f, "Ramp entry {} is zero", index),
            ConfigError::ZeroRampInterval => write!(f, "Ramp interval must be > 0"),
            ConfigError::RampGeometryMismatch {
                duration,
                interval,
                stages,
            } => write!(
                f,
                "Ramp duration {} / interval {} does not match {} table entries",
                duration, interval, stages
            ),
            ConfigError::InvalidPrescaler(v) => {
                write!(f, "Invalid prescaler: {}. Valid values: 1, 8, 64, 256, 1024", v)
            }
            ConfigError::InvalidClock(v) => write!(f, "Invalid timer clock: {} Hz. Must be > 0", v),
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::NotInstalled => write!(f, "No controller installed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
