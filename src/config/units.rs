//! Unit types for timer and step quantities.
//!
//! Keeps raw timer reload values, step rates and clock divisors apart so they
//! cannot be confused at call sites.

use core::ops::Mul;

use serde::Deserialize;

use crate::error::ConfigError;

/// Step rate in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for StepsPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Timer clock divisor (1, 8, 64, 256, 1024).
///
/// Validated at construction against the divisors the 16-bit timer supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Prescaler(u16);

impl Prescaler {
    /// Timer runs at the input clock.
    pub const DIV_1: Self = Self(1);
    /// Input clock / 8.
    pub const DIV_8: Self = Self(8);
    /// Input clock / 64.
    pub const DIV_64: Self = Self(64);
    /// Input clock / 256.
    pub const DIV_256: Self = Self(256);
    /// Input clock / 1024.
    pub const DIV_1024: Self = Self(1024);

    const VALID_VALUES: [u16; 5] = [1, 8, 64, 256, 1024];

    /// Create a new Prescaler with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPrescaler` for unsupported divisors.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidPrescaler(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Prescaler {
    fn default() -> Self {
        Self::DIV_64
    }
}

impl TryFrom<u16> for Prescaler {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Prescaler {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Prescaler::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
