//! Ramp table and step period selection.
//!
//! A ramp table lists timer reload values from slowest to fastest. The stage
//! for the next step is picked from whichever is closer, the start or the end
//! of the move, so the same table serves acceleration and deceleration and the
//! resulting velocity profile is a symmetric trapezoid:
//!
//! ```text
//! stage = min(steps_taken, steps_remaining) / ramp_interval
//! ```
//!
//! Moves shorter than twice the ramp duration never reach the cruise entry and
//! form a triangle instead.

use heapless::Vec;

use crate::config::{validate_ramp_parts, RampConfig, TimerClock};
use crate::error::{ConfigError, Error, Result};

/// Maximum number of entries a ramp table can hold.
pub const MAX_RAMP_STAGES: usize = 64;

/// Validated, immutable ramp table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampTable {
    periods: Vec<u16, MAX_RAMP_STAGES>,
    duration: u16,
    interval: u16,
}

impl RampTable {
    /// Create a ramp table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the table is empty, too long, has zero
    /// or rising entries, or if `duration / interval` is not its length.
    pub fn new(periods: &[u16], duration: u16, interval: u16) -> Result<Self> {
        validate_ramp_parts(periods, duration, interval)?;
        let periods = Vec::from_slice(periods)
            .map_err(|_| Error::Config(ConfigError::RampTableTooLong(periods.len())))?;
        Ok(Self {
            periods,
            duration,
            interval,
        })
    }

    /// Create a ramp table from configuration.
    pub fn from_config(config: &RampConfig) -> Result<Self> {
        Self::new(&config.periods, config.ramp_duration, config.ramp_interval)
    }

    /// Generate a constant-acceleration table.
    ///
    /// Step rate grows with the square root of distance travelled under
    /// constant acceleration, so entry `k` is `start_period / sqrt(k + 1)`.
    pub fn constant_acceleration(start_period: u16, stages: usize, interval: u16) -> Result<Self> {
        if stages == 0 {
            return Err(Error::Config(ConfigError::EmptyRampTable));
        }
        if stages > MAX_RAMP_STAGES {
            return Err(Error::Config(ConfigError::RampTableTooLong(stages)));
        }

        let mut periods: Vec<u16, MAX_RAMP_STAGES> = Vec::new();
        for k in 0..stages {
            let period = libm::roundf(start_period as f32 / libm::sqrtf(k as f32 + 1.0));
            let _ = periods.push(period as u16);
        }

        let duration = (stages as u32 * interval as u32).min(u16::MAX as u32) as u16;
        Self::new(&periods, duration, interval)
    }

    /// Number of stages.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false: construction rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Steps over which ramping occurs.
    #[inline]
    pub fn duration(&self) -> u16 {
        self.duration
    }

    /// Steps per stage.
    #[inline]
    pub fn interval(&self) -> u16 {
        self.interval
    }

    /// All entries, slowest first.
    #[inline]
    pub fn periods(&self) -> &[u16] {
        &self.periods
    }

    /// First (slowest) entry, loaded when the controller starts from rest.
    #[inline]
    pub fn slowest(&self) -> u16 {
        self.period(0)
    }

    /// Terminal (fastest) entry, held while cruising.
    #[inline]
    pub fn cruise(&self) -> u16 {
        self.period(self.len() - 1)
    }

    /// Entry for a stage, saturating at the cruise entry.
    #[inline]
    pub fn period(&self, stage: usize) -> u16 {
        self.periods[stage.min(self.len() - 1)]
    }

    /// Ramp stage after a step, or `None` once the move is far enough from
    /// both ends that the cruise period stays in effect.
    pub fn stage_for(&self, steps_taken: u16, steps_remaining: u16) -> Option<usize> {
        let boundary = steps_taken.min(steps_remaining);
        if boundary < self.duration {
            Some(((boundary / self.interval) as usize).min(self.len() - 1))
        } else {
            None
        }
    }

    /// Period in effect after a step.
    #[inline]
    pub fn period_for(&self, steps_taken: u16, steps_remaining: u16) -> u16 {
        match self.stage_for(steps_taken, steps_remaining) {
            Some(stage) => self.period(stage),
            None => self.cruise(),
        }
    }

    /// Preview the periods a move of `steps` steps programs.
    pub fn profile(&self, steps: u16) -> RampProfile<'_> {
        RampProfile {
            table: self,
            steps,
            taken: 0,
        }
    }
}

impl Default for RampTable {
    fn default() -> Self {
        let config = RampConfig::default();
        Self {
            periods: config.periods,
            duration: config.ramp_duration,
            interval: config.ramp_interval,
        }
    }
}

/// Iterator over the timer period programmed as each step of a move is
/// emitted.
///
/// Item `k` (zero based) is the period loaded right after step `k + 1`
/// asserts its pulse. It times that pulse's trailing edge and the wait before
/// the next step, so the distance between consecutive leading edges is twice
/// the item value.
#[derive(Debug, Clone)]
pub struct RampProfile<'a> {
    table: &'a RampTable,
    steps: u16,
    taken: u16,
}

impl RampProfile<'_> {
    /// Number of timer interrupts the move takes.
    #[inline]
    pub fn total_ticks(&self) -> u32 {
        2 * self.steps as u32
    }

    /// Time from starting the timer to the final trailing edge.
    pub fn estimated_duration_secs(&self, clock: &TimerClock) -> f32 {
        if self.steps == 0 {
            return 0.0;
        }

        // Timer starts at the slowest entry; every step then waits its period
        // once for the trailing edge and once before the next leading edge.
        let mut secs = clock.period_secs(self.table.slowest());
        for taken in 1..=self.steps {
            let period = self.table.period_for(taken, self.steps - taken);
            let waits = if taken == self.steps { 1.0 } else { 2.0 };
            secs += waits * clock.period_secs(period);
        }
        secs
    }
}

impl Iterator for RampProfile<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        if self.taken >= self.steps {
            return None;
        }
        self.taken += 1;
        Some(self.table.period_for(self.taken, self.steps - self.taken))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps - self.taken) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RampProfile<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RAMP_PERIODS;

    fn small_table() -> RampTable {
        // 4 stages of 2 steps
        RampTable::new(&[400, 300, 200, 100], 8, 2).unwrap()
    }

    #[test]
    fn test_default_table() {
        let table = RampTable::default();
        assert_eq!(table.periods(), &DEFAULT_RAMP_PERIODS);
        assert_eq!(table.slowest(), 2500);
        assert_eq!(table.cruise(), 791);
    }

    #[test]
    fn test_constant_acceleration_reproduces_default() {
        let table = RampTable::constant_acceleration(2500, 10, 10).unwrap();
        assert_eq!(table, RampTable::default());
    }

    #[test]
    fn test_stage_selection() {
        let table = small_table();
        // Accelerating
        assert_eq!(table.stage_for(0, 50), Some(0));
        assert_eq!(table.stage_for(1, 50), Some(0));
        assert_eq!(table.stage_for(2, 50), Some(1));
        assert_eq!(table.stage_for(7, 50), Some(3));
        // Cruising
        assert_eq!(table.stage_for(8, 50), None);
        assert_eq!(table.stage_for(30, 20), None);
        // Decelerating
        assert_eq!(table.stage_for(50, 7), Some(3));
        assert_eq!(table.stage_for(50, 0), Some(0));
    }

    #[test]
    fn test_stage_symmetric_at_midpoint() {
        let table = small_table();
        // Equal counts select the same stage from either side
        assert_eq!(table.stage_for(5, 5), Some(2));
        assert_eq!(table.stage_for(4, 5), table.stage_for(5, 4));
    }

    #[test]
    fn test_stage_clamped_to_table() {
        // Duration within one interval of the end never overruns the table
        let table = RampTable::new(&[400, 300], 4, 2).unwrap();
        for taken in 0..10 {
            for remaining in 0..10 {
                if let Some(stage) = table.stage_for(taken, remaining) {
                    assert!(stage < table.len());
                }
            }
        }
    }

    #[test]
    fn test_period_saturates() {
        let table = small_table();
        assert_eq!(table.period(3), 100);
        assert_eq!(table.period(99), 100);
    }

    #[test]
    fn test_profile_short_move_is_triangle() {
        let table = small_table();
        let periods: Vec<u16, 8> = table.profile(6).collect();
        // min(k, 6 - k) = 1, 2, 3, 2, 1, 0
        assert_eq!(periods.as_slice(), &[400, 300, 300, 300, 400, 400]);
    }

    #[test]
    fn test_profile_reaches_cruise() {
        let table = small_table();
        let periods: Vec<u16, 32> = table.profile(30).collect();
        assert_eq!(periods.len(), 30);
        assert!(periods[8..22].iter().all(|&p| p == table.cruise()));
    }

    #[test]
    fn test_profile_duration() {
        let table = small_table();
        let clock = TimerClock::default();
        assert_eq!(table.profile(0).estimated_duration_secs(&clock), 0.0);

        // One step: slowest lead-in, then the trailing edge at stage 0
        let one = table.profile(1).estimated_duration_secs(&clock);
        let expected = 2.0 * clock.period_secs(400);
        assert!((one - expected).abs() < 1e-6);
        assert_eq!(table.profile(1).total_ticks(), 2);
    }

    #[test]
    fn test_constant_acceleration_rejects_empty() {
        assert_eq!(
            RampTable::constant_acceleration(1000, 0, 4),
            Err(Error::Config(ConfigError::EmptyRampTable))
        );
    }
}
