//! # stepper-ramp
//!
//! Timer-interrupt driven trapezoidal ramping for differential-drive stepper
//! robots, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Table-driven ramps**: Acceleration and deceleration read the same table
//!   of timer reload values, giving a symmetric trapezoidal velocity profile
//! - **Interrupt driven**: One call per timer interrupt emits the step pulses
//!   and reprograms the timer period
//! - **Differential drive moves**: Straight, spin in place, pivot about a wheel
//! - **Preemptive commands**: A new move replaces the one in progress
//! - **embedded-hal 1.0**: Uses `OutputPin` for pulse, direction and mode lines
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_ramp::{Direction, DrivePins, SharedStepper, StepperController, SteppingMode};
//!
//! let controller = StepperController::builder()
//!     .timer(timer1)
//!     .outputs(DrivePins::new(left_step, right_step, left_dir, right_dir, mode))
//!     .stepping_mode(SteppingMode::Half)
//!     .build()?;
//!
//! STEPPER.install(controller);
//!
//! // In the timer compare interrupt: STEPPER.on_tick()
//!
//! STEPPER.with(|c| c.move_straight(400, Direction::Forward))??;
//! STEPPER.wait_for_stop();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod timer;

// Re-exports for ergonomic API
pub use config::{validate_config, ControllerConfig, RampConfig, TimerClock};
pub use error::{Error, Result};
pub use motion::{
    Direction, MotionState, MoveKind, PhaseMask, PulseLevel, RampProfile, RampTable, Rotation,
    SteppingMode, Wheel,
};
pub use motor::{DriveOutputs, DrivePins, NoPin, SharedStepper, StepperController, StepperControllerBuilder};
pub use timer::{StepTimer, TickHandler};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Prescaler, StepsPerSec};
