//! Motor module for stepper-ramp.
//!
//! Provides the ramp controller, its builder, the driver output lines and
//! the interrupt-shared controller slot.

mod builder;
mod driver;
mod pins;
mod shared;

pub use builder::StepperControllerBuilder;
pub use driver::StepperController;
pub use pins::{DriveOutputs, DrivePins, NoPin};
pub use shared::SharedStepper;
