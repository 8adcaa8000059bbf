//! Move parameters: travel direction, rotation sense, held wheel and the
//! driver stepping mode.

use serde::Deserialize;

/// Direction of straight-line travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Drive forward.
    Forward,
    /// Drive backward.
    Backward,
}

/// Sense of rotation, seen from above the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Clockwise.
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

/// One side of the differential drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wheel {
    /// Left wheel.
    Left,
    /// Right wheel.
    Right,
}

/// Stepping mode of the motor driver chips.
///
/// Half stepping is smoother and halves the step angle; full stepping gives
/// more torque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SteppingMode {
    /// Half stepping (mode line low).
    #[default]
    Half,
    /// Full stepping (mode line high).
    Full,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl Rotation {
    /// The opposite rotation.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

impl Wheel {
    /// The wheel on the other side.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Wheel::Left => Wheel::Right,
            Wheel::Right => Wheel::Left,
        }
    }
}
