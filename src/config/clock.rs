//! Timer clock model used to translate ramp periods into step rates.

use serde::Deserialize;

use super::units::{Prescaler, StepsPerSec};

/// Default timer input clock (16 MHz board crystal).
pub const DEFAULT_CLOCK_HZ: u32 = 16_000_000;

/// Input clock and divisor of the step timer.
///
/// The timer runs in clear-on-compare mode: it counts `period + 1` timer ticks
/// between interrupts, and every step takes two interrupts (leading and
/// trailing edge of the pulse).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerClock {
    /// Timer input clock in Hz.
    #[serde(default = "default_clock_hz")]
    pub clock_hz: u32,

    /// Clock divisor.
    #[serde(default)]
    pub prescaler: Prescaler,
}

fn default_clock_hz() -> u32 {
    DEFAULT_CLOCK_HZ
}

impl Default for TimerClock {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            prescaler: Prescaler::default(),
        }
    }
}

impl TimerClock {
    /// Create a timer clock description.
    pub const fn new(clock_hz: u32, prescaler: Prescaler) -> Self {
        Self { clock_hz, prescaler }
    }

    /// Counter increments per second.
    #[inline]
    pub fn tick_hz(&self) -> f32 {
        self.clock_hz as f32 / self.prescaler.value() as f32
    }

    /// Interrupt rate for a given reload value.
    #[inline]
    pub fn interrupt_hz(&self, period: u16) -> f32 {
        self.tick_hz() / (period as f32 + 1.0)
    }

    /// Step rate for a given reload value.
    #[inline]
    pub fn step_rate(&self, period: u16) -> StepsPerSec {
        StepsPerSec(self.interrupt_hz(period) / 2.0)
    }

    /// Seconds spent between two interrupts at a given reload value.
    #[inline]
    pub fn period_secs(&self, period: u16) -> f32 {
        (period as f32 + 1.0) / self.tick_hz()
    }

    /// Reload value producing the requested step rate.
    ///
    /// Returns `None` when the rate is not positive or the reload value would
    /// not fit the 16-bit compare register.
    pub fn period_for_step_rate(&self, rate: StepsPerSec) -> Option<u16> {
        if rate.0 <= 0.0 {
            return None;
        }
        let period = libm::roundf(self.tick_hz() / (2.0 * rate.0)) - 1.0;
        if !(1.0..=u16::MAX as f32).contains(&period) {
            return None;
        }
        Some(period as u16)
    }
}
