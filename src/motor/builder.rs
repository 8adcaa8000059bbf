//! Builder pattern for StepperController.

use crate::config::{validate_config, ControllerConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{RampTable, SteppingMode};
use crate::timer::StepTimer;

use super::driver::StepperController;
use super::pins::DriveOutputs;

/// Builder for creating StepperController instances.
pub struct StepperControllerBuilder<TIMER, OUT>
where
    TIMER: StepTimer,
    OUT: DriveOutputs,
{
    timer: Option<TIMER>,
    outputs: Option<OUT>,
    stepping_mode: SteppingMode,
    ramp: Option<RampTable>,
    config: Option<ControllerConfig>,
}

impl<TIMER, OUT> Default for StepperControllerBuilder<TIMER, OUT>
where
    TIMER: StepTimer,
    OUT: DriveOutputs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<TIMER, OUT> StepperControllerBuilder<TIMER, OUT>
where
    TIMER: StepTimer,
    OUT: DriveOutputs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            timer: None,
            outputs: None,
            stepping_mode: SteppingMode::default(),
            ramp: None,
            config: None,
        }
    }

    /// Set the step timer.
    pub fn timer(mut self, timer: TIMER) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the driver output lines.
    pub fn outputs(mut self, outputs: OUT) -> Self {
        self.outputs = Some(outputs);
        self
    }

    /// Set the stepping mode applied at build time.
    pub fn stepping_mode(mut self, mode: SteppingMode) -> Self {
        self.stepping_mode = mode;
        self
    }

    /// Use an already validated ramp table.
    pub fn ramp(mut self, ramp: RampTable) -> Self {
        self.ramp = Some(ramp);
        self
    }

    /// Configure stepping mode and ramp from a ControllerConfig.
    ///
    /// A ramp set with [`ramp`](Self::ramp) takes precedence over the
    /// configured one.
    pub fn from_config(mut self, config: &ControllerConfig) -> Self {
        self.stepping_mode = config.stepping_mode;
        self.config = Some(config.clone());
        self
    }

    /// Build the controller and run its initialization.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer or outputs are missing, the configuration
    /// is invalid, or initializing the output lines fails.
    pub fn build(self) -> Result<StepperController<TIMER, OUT>> {
        let timer = self
            .timer
            .ok_or(Error::Config(ConfigError::MissingComponent("timer")))?;

        let outputs = self
            .outputs
            .ok_or(Error::Config(ConfigError::MissingComponent("outputs")))?;

        if let Some(config) = &self.config {
            validate_config(config)?;
        }

        let ramp = match (self.ramp, &self.config) {
            (Some(ramp), _) => ramp,
            (None, Some(config)) => RampTable::from_config(&config.ramp)?,
            (None, None) => RampTable::default(),
        };

        let mut controller = StepperController::new(timer, outputs, ramp, self.stepping_mode);
        controller.initialize(self.stepping_mode)?;
        Ok(controller)
    }
}
