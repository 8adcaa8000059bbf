//! Motion module for stepper-ramp.
//!
//! Provides the ramp table, move parameters and the bookkeeping the tick
//! handler works on.

mod direction;
mod ramp;
mod state;

pub use direction::{Direction, Rotation, SteppingMode, Wheel};
pub use ramp::{RampProfile, RampTable, MAX_RAMP_STAGES};
pub use state::{MotionState, MoveKind, PhaseMask, PulseLevel};
