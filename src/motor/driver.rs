//! Stepper motion controller.
//!
//! Generic over the step timer and the driver output lines. Move commands
//! only record the target and start the timer; the motion itself happens in
//! [`StepperController::on_tick`], called once per timer interrupt.

use embedded_hal::digital::PinState;

use crate::error::Result;
use crate::fmt::{debug, error, info, trace};
use crate::motion::{
    Direction, MotionState, MoveKind, PulseLevel, RampTable, Rotation, SteppingMode, Wheel,
};
use crate::timer::{StepTimer, TickHandler};

use super::builder::StepperControllerBuilder;
use super::pins::DriveOutputs;

/// Trapezoidal-ramp controller for a pair of wheel steppers.
///
/// Generic over:
/// - `TIMER`: periodic timer whose interrupt calls [`on_tick`](Self::on_tick)
/// - `OUT`: the pulse, direction and mode lines
///
/// Step counts, directions and wheels are taken as given. A new command
/// always replaces the move in progress.
pub struct StepperController<TIMER, OUT>
where
    TIMER: StepTimer,
    OUT: DriveOutputs,
{
    /// Step timer.
    timer: TIMER,

    /// Driver output lines.
    outputs: OUT,

    /// Ramp used for every move.
    ramp: RampTable,

    /// Stepping mode applied at the last initialization.
    mode: SteppingMode,

    /// Step bookkeeping shared with the tick handler.
    state: MotionState,
}

impl<TIMER, OUT> StepperController<TIMER, OUT>
where
    TIMER: StepTimer,
    OUT: DriveOutputs,
{
    /// Start building a controller.
    pub fn builder() -> StepperControllerBuilder<TIMER, OUT> {
        StepperControllerBuilder::new()
    }

    /// Create a controller. Call [`initialize`](Self::initialize) before
    /// issuing moves.
    pub(crate) fn new(timer: TIMER, outputs: OUT, ramp: RampTable, mode: SteppingMode) -> Self {
        Self {
            timer,
            outputs,
            ramp,
            mode,
            state: MotionState::new(),
        }
    }

    /// Put the driver and timer into their idle state.
    ///
    /// Stops the timer, selects the stepping mode, lowers the pulse and
    /// direction lines, zeroes the bookkeeping and loads the slowest ramp
    /// period. The timer is left stopped. Safe to call again at any time,
    /// e.g. to switch stepping mode.
    pub fn initialize(&mut self, mode: SteppingMode) -> Result<()> {
        self.timer.stop();
        self.outputs.select_mode(mode)?;
        self.outputs.set_directions(PinState::Low, PinState::Low)?;
        self.outputs.clear_pulses()?;

        self.state = MotionState::new();
        self.mode = mode;
        self.timer.set_period(self.ramp.slowest());

        info!("stepper initialized, {} ramp stages", self.ramp.len());
        Ok(())
    }

    /// Drive both wheels the same way for `steps` steps.
    pub fn move_straight(&mut self, steps: u16, direction: Direction) -> Result<()> {
        self.begin_move(MoveKind::Straight(direction), steps)
    }

    /// Spin in place for `steps` steps.
    pub fn rotate_about_center(&mut self, steps: u16, rotation: Rotation) -> Result<()> {
        self.begin_move(MoveKind::AboutCenter(rotation), steps)
    }

    /// Pivot around `wheel` for `steps` steps; `wheel` does not turn.
    pub fn rotate_about_wheel(&mut self, steps: u16, wheel: Wheel, rotation: Rotation) -> Result<()> {
        self.begin_move(MoveKind::AboutWheel(wheel, rotation), steps)
    }

    /// Replace the move in progress. If a line write fails, the old move is
    /// abandoned as well: timer stopped, counters dropped, pulses lowered.
    fn begin_move(&mut self, kind: MoveKind, steps: u16) -> Result<()> {
        let (left, right) = kind.direction_levels();
        if let Err(e) = self.outputs.set_directions(left, right) {
            self.timer.stop();
            self.state.halt();
            let _ = self.outputs.clear_pulses();
            error!("pin write failed, move {} abandoned", kind);
            return Err(e);
        }
        self.state.begin(kind, steps);

        debug!("move {} for {} steps", kind, steps);

        if steps == 0 {
            // Only keep ticking if a raised pulse still needs lowering.
            if self.state.pulse_pending() {
                self.timer.start();
            } else {
                self.timer.stop();
            }
            return Ok(());
        }

        self.timer.set_period(self.ramp.slowest());
        self.timer.start();
        Ok(())
    }

    /// Handle one timer interrupt.
    ///
    /// Alternates between raising the pulse lines of the active motors (one
    /// step counted, next period chosen from the ramp) and lowering them.
    /// The timer stops on the tick that lowers the last pulse. If a line
    /// write fails the timer is stopped before the error is returned.
    pub fn on_tick(&mut self) -> Result<()> {
        let result = self.tick();
        if result.is_err() {
            self.timer.stop();
            error!("pin write failed, step timer stopped");
        }
        result
    }

    fn tick(&mut self) -> Result<()> {
        if self.state.pulse == PulseLevel::High {
            self.outputs.clear_pulses()?;
            self.state.pulse = PulseLevel::Low;
            if self.state.steps_remaining == 0 {
                self.timer.stop();
                trace!("move complete after {} steps", self.state.steps_taken);
            }
            return Ok(());
        }

        if self.state.steps_remaining == 0 {
            self.timer.stop();
            return Ok(());
        }

        self.outputs.assert_pulses(self.state.phase_mask)?;
        self.state.pulse = PulseLevel::High;
        self.state.record_step();

        if let Some(stage) = self
            .ramp
            .stage_for(self.state.steps_taken, self.state.steps_remaining)
        {
            self.state.ramp_stage = stage;
            self.timer.set_period(self.ramp.period(stage));
        }
        Ok(())
    }

    /// Abandon the move in progress: stop the timer and lower the pulses.
    pub fn stop(&mut self) -> Result<()> {
        self.timer.stop();
        self.state.halt();
        self.outputs.clear_pulses()
    }

    /// Whether a move (or its final trailing edge) is still in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Tick until the timer stops (blocking).
    ///
    /// For hosts and simulations where no interrupt is wired to the
    /// controller; on hardware use [`SharedStepper::wait_for_stop`](super::SharedStepper::wait_for_stop).
    pub fn run_to_completion(&mut self) -> Result<()> {
        while self.is_running() {
            self.on_tick()?;
        }
        Ok(())
    }

    /// Current bookkeeping.
    #[inline]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// The ramp table in use.
    #[inline]
    pub fn ramp(&self) -> &RampTable {
        &self.ramp
    }

    /// Stepping mode applied at the last initialization.
    #[inline]
    pub fn stepping_mode(&self) -> SteppingMode {
        self.mode
    }

    /// The step timer.
    #[inline]
    pub fn timer(&self) -> &TIMER {
        &self.timer
    }

    /// The driver output lines.
    #[inline]
    pub fn outputs(&self) -> &OUT {
        &self.outputs
    }

    /// Tear down the controller and return its hardware.
    pub fn release(self) -> (TIMER, OUT) {
        (self.timer, self.outputs)
    }
}

impl<TIMER, OUT> TickHandler for StepperController<TIMER, OUT>
where
    TIMER: StepTimer,
    OUT: DriveOutputs,
{
    #[inline]
    fn on_tick(&mut self) -> Result<()> {
        StepperController::on_tick(self)
    }

    #[inline]
    fn is_running(&self) -> bool {
        StepperController::is_running(self)
    }
}
