//! Host stand-ins for the step timer and the driver lines.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::digital::{ErrorType, OutputPin};
use stepper_ramp::{DrivePins, PulseLevel, RampTable, StepTimer, StepperController};

/// Timer that only records what the controller asks of it.
#[derive(Debug, Default)]
pub struct SimTimer {
    pub period: u16,
    pub running: bool,
    pub starts: u32,
}

impl StepTimer for SimTimer {
    fn set_period(&mut self, period: u16) {
        self.period = period;
    }

    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Output pin that keeps every level written to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingPin {
    writes: Arc<Mutex<Vec<bool>>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level written (low if never written).
    pub fn is_high(&self) -> bool {
        self.writes.lock().unwrap().last().copied().unwrap_or(false)
    }

    /// Number of low-to-high transitions.
    pub fn rises(&self) -> usize {
        let writes = self.writes.lock().unwrap();
        let mut level = false;
        let mut rises = 0;
        for &w in writes.iter() {
            if w && !level {
                rises += 1;
            }
            level = w;
        }
        rises
    }

    /// Whether the pin was ever driven high.
    pub fn ever_high(&self) -> bool {
        self.writes.lock().unwrap().iter().any(|&w| w)
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(true);
        Ok(())
    }
}

/// Handles on the lines given to a controller.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    pub left_pulse: RecordingPin,
    pub right_pulse: RecordingPin,
    pub left_dir: RecordingPin,
    pub right_dir: RecordingPin,
    pub mode: RecordingPin,
}

pub type Pins = DrivePins<RecordingPin, RecordingPin, RecordingPin, RecordingPin, RecordingPin>;
pub type Controller = StepperController<SimTimer, Pins>;

impl Lines {
    pub fn drive_pins(&self) -> Pins {
        DrivePins::new(
            self.left_pulse.clone(),
            self.right_pulse.clone(),
            self.left_dir.clone(),
            self.right_dir.clone(),
            self.mode.clone(),
        )
    }
}

/// Four stages of two steps: 400, 300, 200, 100.
pub fn small_ramp() -> RampTable {
    RampTable::new(&[400, 300, 200, 100], 8, 2).unwrap()
}

pub fn controller_with(ramp: RampTable) -> (Controller, Lines) {
    let lines = Lines::default();
    let controller = StepperController::builder()
        .timer(SimTimer::default())
        .outputs(lines.drive_pins())
        .ramp(ramp)
        .build()
        .unwrap();
    (controller, lines)
}

/// Tick until the timer stops, returning the period in effect after each
/// leading edge.
pub fn run_recording_periods(controller: &mut Controller) -> Vec<u16> {
    let mut periods = Vec::new();
    while controller.is_running() {
        controller.on_tick().unwrap();
        if controller.state().pulse() == PulseLevel::High {
            periods.push(controller.timer().period);
        }
    }
    periods
}
