//! Output lines of the dual stepper driver.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};

use crate::error::{MotorError, Result};
use crate::motion::{PhaseMask, SteppingMode};

/// Output lines the controller writes.
///
/// Implemented by [`DrivePins`]; boards with the lines on a single port can
/// implement it directly to update several lines in one register write.
pub trait DriveOutputs {
    /// Raise the pulse line of every motor in `mask`.
    fn assert_pulses(&mut self, mask: PhaseMask) -> Result<()>;

    /// Lower both pulse lines.
    fn clear_pulses(&mut self) -> Result<()>;

    /// Drive the `(left, right)` direction lines.
    fn set_directions(&mut self, left: PinState, right: PinState) -> Result<()>;

    /// Drive the step-mode select line.
    fn select_mode(&mut self, mode: SteppingMode) -> Result<()>;
}

/// The four motor lines plus the driver step-mode select line.
///
/// Generic over:
/// - `LP`/`RP`: left/right pulse (STEP) lines
/// - `LD`/`RD`: left/right direction lines
/// - `M`: step-mode select line (low = half, high = full); use [`NoPin`] if
///   the drivers are strapped
pub struct DrivePins<LP, RP, LD, RD, M = NoPin>
where
    LP: OutputPin,
    RP: OutputPin,
    LD: OutputPin,
    RD: OutputPin,
    M: OutputPin,
{
    left_pulse: LP,
    right_pulse: RP,
    left_dir: LD,
    right_dir: RD,
    mode: M,
}

impl<LP, RP, LD, RD, M> DrivePins<LP, RP, LD, RD, M>
where
    LP: OutputPin,
    RP: OutputPin,
    LD: OutputPin,
    RD: OutputPin,
    M: OutputPin,
{
    /// Group the driver lines.
    pub fn new(left_pulse: LP, right_pulse: RP, left_dir: LD, right_dir: RD, mode: M) -> Self {
        Self {
            left_pulse,
            right_pulse,
            left_dir,
            right_dir,
            mode,
        }
    }

    /// Give the lines back.
    pub fn release(self) -> (LP, RP, LD, RD, M) {
        (
            self.left_pulse,
            self.right_pulse,
            self.left_dir,
            self.right_dir,
            self.mode,
        )
    }
}

impl<LP, RP, LD, RD> DrivePins<LP, RP, LD, RD, NoPin>
where
    LP: OutputPin,
    RP: OutputPin,
    LD: OutputPin,
    RD: OutputPin,
{
    /// Group the driver lines for a board without a mode select line.
    pub fn without_mode(left_pulse: LP, right_pulse: RP, left_dir: LD, right_dir: RD) -> Self {
        Self::new(left_pulse, right_pulse, left_dir, right_dir, NoPin)
    }
}

impl<LP, RP, LD, RD, M> DriveOutputs for DrivePins<LP, RP, LD, RD, M>
where
    LP: OutputPin,
    RP: OutputPin,
    LD: OutputPin,
    RD: OutputPin,
    M: OutputPin,
{
    fn assert_pulses(&mut self, mask: PhaseMask) -> Result<()> {
        if mask.left {
            self.left_pulse.set_high().map_err(|_| MotorError::PinError)?;
        }
        if mask.right {
            self.right_pulse.set_high().map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    fn clear_pulses(&mut self) -> Result<()> {
        self.left_pulse.set_low().map_err(|_| MotorError::PinError)?;
        self.right_pulse.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    fn set_directions(&mut self, left: PinState, right: PinState) -> Result<()> {
        self.left_dir.set_state(left).map_err(|_| MotorError::PinError)?;
        self.right_dir.set_state(right).map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    fn select_mode(&mut self, mode: SteppingMode) -> Result<()> {
        let level = match mode {
            SteppingMode::Half => PinState::Low,
            SteppingMode::Full => PinState::High,
        };
        self.mode.set_state(level).map_err(|_| MotorError::PinError)?;
        Ok(())
    }
}

/// Placeholder for a line the board does not have.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    #[inline]
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}
