//! Motion bookkeeping shared by move commands and the tick handler.

use embedded_hal::digital::PinState;

use super::direction::{Direction, Rotation, Wheel};

/// Level of the pulse lines between two ticks.
///
/// Every step takes two ticks: one raises the pulse lines of the active
/// motors, the next one lowers them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseLevel {
    /// Pulse lines are low; the next tick starts a step.
    #[default]
    Low,
    /// Pulse lines are high; the next tick ends the step.
    High,
}

/// Which motors receive pulses during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseMask {
    /// Left motor steps.
    pub left: bool,
    /// Right motor steps.
    pub right: bool,
}

impl PhaseMask {
    /// Both motors step.
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };

    /// Only the left motor steps.
    pub const LEFT_ONLY: Self = Self {
        left: true,
        right: false,
    };

    /// Only the right motor steps.
    pub const RIGHT_ONLY: Self = Self {
        left: false,
        right: true,
    };

    /// Mask that keeps `wheel` stationary.
    #[inline]
    pub fn holding(wheel: Wheel) -> Self {
        match wheel.other() {
            Wheel::Left => Self::LEFT_ONLY,
            Wheel::Right => Self::RIGHT_ONLY,
        }
    }
}

impl Default for PhaseMask {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Kind of move being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveKind {
    /// Both wheels turn the same way.
    Straight(Direction),
    /// Wheels turn opposite ways; the robot spins in place.
    AboutCenter(Rotation),
    /// One wheel is held; the robot pivots around it.
    AboutWheel(Wheel, Rotation),
}

impl MoveKind {
    /// Direction line levels `(left, right)` for this move.
    ///
    /// The motors are mounted mirrored, so straight travel drives the two
    /// direction lines to opposite levels and rotation drives them equal.
    pub fn direction_levels(self) -> (PinState, PinState) {
        match self {
            MoveKind::Straight(Direction::Forward) => (PinState::Low, PinState::High),
            MoveKind::Straight(Direction::Backward) => (PinState::High, PinState::Low),
            MoveKind::AboutCenter(rotation) | MoveKind::AboutWheel(_, rotation) => match rotation {
                Rotation::Clockwise => (PinState::High, PinState::High),
                Rotation::CounterClockwise => (PinState::Low, PinState::Low),
            },
        }
    }

    /// Pulse mask for this move.
    pub fn phase_mask(self) -> PhaseMask {
        match self {
            MoveKind::AboutWheel(wheel, _) => PhaseMask::holding(wheel),
            _ => PhaseMask::BOTH,
        }
    }
}

/// Snapshot of the controller's motion bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    pub(crate) steps_remaining: u16,
    pub(crate) steps_taken: u16,
    pub(crate) ramp_stage: usize,
    pub(crate) phase_mask: PhaseMask,
    pub(crate) pulse: PulseLevel,
    pub(crate) kind: Option<MoveKind>,
}

impl MotionState {
    /// Idle state: no steps pending, pulses low.
    pub const fn new() -> Self {
        Self {
            steps_remaining: 0,
            steps_taken: 0,
            ramp_stage: 0,
            phase_mask: PhaseMask::BOTH,
            pulse: PulseLevel::Low,
            kind: None,
        }
    }

    /// Steps still to emit in the current move.
    #[inline]
    pub fn steps_remaining(&self) -> u16 {
        self.steps_remaining
    }

    /// Steps emitted since the current move began.
    #[inline]
    pub fn steps_taken(&self) -> u16 {
        self.steps_taken
    }

    /// Stage of the ramp table last programmed into the timer.
    #[inline]
    pub fn ramp_stage(&self) -> usize {
        self.ramp_stage
    }

    /// Motors taking part in the current move.
    #[inline]
    pub fn phase_mask(&self) -> PhaseMask {
        self.phase_mask
    }

    /// Current pulse line level.
    #[inline]
    pub fn pulse(&self) -> PulseLevel {
        self.pulse
    }

    /// The most recent move command, if any.
    #[inline]
    pub fn kind(&self) -> Option<MoveKind> {
        self.kind
    }

    /// True when a pulse is raised and its trailing edge is still due.
    #[inline]
    pub fn pulse_pending(&self) -> bool {
        self.pulse == PulseLevel::High
    }

    /// Overwrite the counters for a new move. The pulse level is kept: a
    /// raised pulse from a preempted move is lowered by the next tick.
    pub(crate) fn begin(&mut self, kind: MoveKind, steps: u16) {
        self.steps_remaining = steps;
        self.steps_taken = 0;
        self.ramp_stage = 0;
        self.phase_mask = kind.phase_mask();
        self.kind = Some(kind);
    }

    /// Account for one emitted step.
    #[inline]
    pub(crate) fn record_step(&mut self) {
        self.steps_remaining = self.steps_remaining.saturating_sub(1);
        self.steps_taken = self.steps_taken.saturating_add(1);
    }

    /// Drop whatever move is in progress.
    pub(crate) fn halt(&mut self) {
        self.steps_remaining = 0;
        self.pulse = PulseLevel::Low;
    }
}
