//! Integration tests for stepper-ramp.
//!
//! Drive the controller tick by tick against a simulated timer and recording
//! pins, the way the timer interrupt would on hardware.

mod common;

use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
use stepper_ramp::error::ConfigError;
use stepper_ramp::{
    parse_config, ControllerConfig, Direction, DrivePins, Error, PhaseMask, Prescaler, RampTable,
    Rotation, SharedStepper, StepperController, SteppingMode, TimerClock, Wheel,
};

use common::{controller_with, run_recording_periods, small_ramp, Lines, SimTimer};

const ROBOT_CONFIG: &str = r#"
stepping_mode = "full"

[timer]
clock_hz = 16000000
prescaler = 64

[ramp]
periods = [600, 450, 350, 300]
ramp_duration = 12
ramp_interval = 3
"#;

// =============================================================================
// Configuration and initialization
// =============================================================================

#[test]
fn config_to_controller_workflow() {
    let config = parse_config(ROBOT_CONFIG).expect("config should parse");
    let lines = Lines::default();

    let controller = StepperController::builder()
        .timer(SimTimer::default())
        .outputs(lines.drive_pins())
        .from_config(&config)
        .build()
        .expect("controller should build");

    assert_eq!(controller.stepping_mode(), SteppingMode::Full);
    assert_eq!(controller.ramp().periods(), &[600, 450, 350, 300]);
    assert_eq!(controller.ramp().duration(), 12);
    assert_eq!(controller.timer().period, 600);
    assert!(!controller.is_running());
    assert!(lines.mode.is_high());
    assert!(!lines.left_dir.is_high());
    assert!(!lines.right_dir.is_high());
}

#[test]
fn builder_requires_timer_and_outputs() {
    let lines = Lines::default();
    let missing_timer = StepperController::<SimTimer, common::Pins>::builder()
        .outputs(lines.drive_pins())
        .build();
    assert!(missing_timer.is_err());

    let missing_outputs = StepperController::<SimTimer, common::Pins>::builder()
        .timer(SimTimer::default())
        .build();
    assert!(missing_outputs.is_err());
}

#[test]
fn explicit_ramp_does_not_bypass_config_validation() {
    let lines = Lines::default();
    let config = ControllerConfig {
        timer: TimerClock::new(0, Prescaler::DIV_64),
        ..ControllerConfig::default()
    };

    let result = StepperController::builder()
        .timer(SimTimer::default())
        .outputs(lines.drive_pins())
        .ramp(small_ramp())
        .from_config(&config)
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidClock(0)))
    ));
    assert!(!lines.mode.ever_high());
}

#[test]
fn exact_line_sequence_for_single_step() {
    let mut mode = PinMock::new(&[Transaction::set(State::High)]);
    let mut left_dir = PinMock::new(&[Transaction::set(State::Low), Transaction::set(State::Low)]);
    let mut right_dir = PinMock::new(&[Transaction::set(State::Low), Transaction::set(State::High)]);
    let pulse = [
        Transaction::set(State::Low),
        Transaction::set(State::High),
        Transaction::set(State::Low),
    ];
    let mut left_pulse = PinMock::new(&pulse);
    let mut right_pulse = PinMock::new(&pulse);

    let mut controller = StepperController::builder()
        .timer(SimTimer::default())
        .outputs(DrivePins::new(
            left_pulse.clone(),
            right_pulse.clone(),
            left_dir.clone(),
            right_dir.clone(),
            mode.clone(),
        ))
        .stepping_mode(SteppingMode::Full)
        .build()
        .unwrap();

    controller.move_straight(1, Direction::Forward).unwrap();
    controller.on_tick().unwrap();
    controller.on_tick().unwrap();
    assert!(!controller.is_running());

    mode.done();
    left_dir.done();
    right_dir.done();
    left_pulse.done();
    right_pulse.done();
}

#[test]
fn reinitialize_mid_move_stops_everything() {
    let (mut controller, lines) = controller_with(small_ramp());
    controller.move_straight(40, Direction::Forward).unwrap();
    for _ in 0..9 {
        controller.on_tick().unwrap();
    }
    assert!(lines.left_pulse.is_high());

    controller.initialize(SteppingMode::Half).unwrap();
    assert!(!controller.is_running());
    assert_eq!(controller.state().steps_remaining(), 0);
    assert_eq!(controller.state().steps_taken(), 0);
    assert!(!lines.left_pulse.is_high());
    assert!(!lines.mode.is_high());
    assert_eq!(controller.timer().period, 400);
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn move_completes_in_two_ticks_per_step() {
    for steps in [1u16, 2, 7, 16, 17, 100] {
        let (mut controller, lines) = controller_with(small_ramp());
        controller.rotate_about_center(steps, Rotation::Clockwise).unwrap();

        for _ in 0..2 * steps as u32 {
            assert!(controller.is_running());
            controller.on_tick().unwrap();
        }

        assert_eq!(controller.state().steps_remaining(), 0);
        assert_eq!(controller.state().steps_taken(), steps);
        assert!(!controller.is_running(), "timer still running after {} steps", steps);
        assert_eq!(lines.left_pulse.rises(), steps as usize);
        assert_eq!(lines.right_pulse.rises(), steps as usize);
        assert!(!lines.left_pulse.is_high());
    }
}

#[test]
fn full_range_move_counts_without_overflow() {
    let (mut controller, lines) = controller_with(RampTable::default());
    controller.move_straight(u16::MAX, Direction::Backward).unwrap();
    controller.run_to_completion().unwrap();

    assert_eq!(controller.state().steps_taken(), u16::MAX);
    assert_eq!(controller.state().steps_remaining(), 0);
    assert_eq!(lines.right_pulse.rises(), u16::MAX as usize);
}

#[test]
fn zero_step_move_emits_nothing_and_wait_returns() {
    let lines = Lines::default();
    let controller = StepperController::builder()
        .timer(SimTimer::default())
        .outputs(lines.drive_pins())
        .stepping_mode(SteppingMode::Full)
        .build()
        .unwrap();

    let shared = SharedStepper::new();
    shared.install(controller);

    shared
        .with(|c| c.move_straight(0, Direction::Forward))
        .unwrap()
        .unwrap();
    shared.wait_for_stop();

    assert!(!shared.is_running());
    assert!(!lines.left_pulse.ever_high());
    assert!(!lines.right_pulse.ever_high());
}

// =============================================================================
// Ramp shape
// =============================================================================

#[test]
fn controller_follows_ramp_preview() {
    for ramp in [small_ramp(), RampTable::default()] {
        for steps in [1u16, 2, 5, 8, 15, 16, 17, 199, 200, 201, 450] {
            let (mut controller, _lines) = controller_with(ramp.clone());
            controller.move_straight(steps, Direction::Forward).unwrap();
            let periods = run_recording_periods(&mut controller);
            let preview: Vec<u16> = ramp.profile(steps).collect();
            assert_eq!(periods, preview, "{} steps", steps);
        }
    }
}

#[test]
fn midpoint_of_short_moves() {
    // Even move: both halves meet at min(3, 3)
    let (mut controller, _lines) = controller_with(small_ramp());
    controller.move_straight(6, Direction::Forward).unwrap();
    assert_eq!(run_recording_periods(&mut controller), [400, 300, 300, 300, 400, 400]);

    // Odd move: the two middle steps are mirror images
    let (mut controller, _lines) = controller_with(small_ramp());
    controller.move_straight(7, Direction::Forward).unwrap();
    assert_eq!(
        run_recording_periods(&mut controller),
        [400, 300, 300, 300, 300, 400, 400]
    );

    // Twice the ramp duration: last stage from step 6 to step 10, centered
    let (mut controller, _lines) = controller_with(small_ramp());
    controller.move_straight(16, Direction::Forward).unwrap();
    let periods = run_recording_periods(&mut controller);
    assert_eq!(periods[7], 100);
    assert_eq!(periods.iter().filter(|&&p| p == 100).count(), 5);
    assert_eq!(&periods[5..10], &[100; 5]);
}

#[test]
fn every_move_starts_from_slowest_period() {
    let (mut controller, _lines) = controller_with(small_ramp());
    controller.move_straight(40, Direction::Forward).unwrap();
    for _ in 0..30 {
        controller.on_tick().unwrap();
    }
    assert_eq!(controller.timer().period, 100);

    controller.move_straight(40, Direction::Forward).unwrap();
    assert_eq!(controller.timer().period, 400);
}

// =============================================================================
// Preemption and wheel isolation
// =============================================================================

#[test]
fn new_command_preempts_move_in_progress() {
    let (mut controller, lines) = controller_with(small_ramp());
    controller
        .rotate_about_wheel(50, Wheel::Left, Rotation::Clockwise)
        .unwrap();

    // Four steps, the last pulse still raised
    for _ in 0..7 {
        controller.on_tick().unwrap();
    }
    assert_eq!(controller.state().steps_taken(), 4);
    assert!(lines.right_pulse.is_high());

    controller.move_straight(20, Direction::Forward).unwrap();
    assert_eq!(controller.state().steps_taken(), 0);
    assert_eq!(controller.state().steps_remaining(), 20);
    assert_eq!(controller.state().phase_mask(), PhaseMask::BOTH);
    assert!(!lines.left_dir.is_high());
    assert!(lines.right_dir.is_high());

    // First tick only lowers the old pulse
    controller.on_tick().unwrap();
    assert!(!lines.right_pulse.is_high());
    assert_eq!(controller.state().steps_taken(), 0);

    controller.run_to_completion().unwrap();
    assert_eq!(controller.state().steps_taken(), 20);
    assert_eq!(lines.left_pulse.rises(), 20);
    assert_eq!(lines.right_pulse.rises(), 24);
}

#[test]
fn pivot_about_left_wheel_never_steps_left_motor() {
    let (mut controller, lines) = controller_with(small_ramp());
    controller
        .rotate_about_wheel(30, Wheel::Left, Rotation::CounterClockwise)
        .unwrap();

    while controller.is_running() {
        controller.on_tick().unwrap();
        assert!(!lines.left_pulse.is_high());
    }

    assert!(!lines.left_pulse.ever_high());
    assert_eq!(lines.right_pulse.rises(), 30);
}

#[test]
fn pivot_about_right_wheel_never_steps_right_motor() {
    let (mut controller, lines) = controller_with(small_ramp());
    controller
        .rotate_about_wheel(12, Wheel::Right, Rotation::Clockwise)
        .unwrap();
    controller.run_to_completion().unwrap();

    assert!(!lines.right_pulse.ever_high());
    assert_eq!(lines.left_pulse.rises(), 12);
    assert!(lines.left_dir.is_high());
    assert!(lines.right_dir.is_high());
}

// =============================================================================
// Interrupt-shared controller
// =============================================================================

#[test]
fn wait_for_stop_while_interrupt_thread_ticks() {
    let (controller, lines) = controller_with(small_ramp());
    let shared = SharedStepper::new();
    shared.install(controller);

    shared
        .with(|c| c.rotate_about_center(250, Rotation::CounterClockwise))
        .unwrap()
        .unwrap();
    assert!(shared.is_running());

    std::thread::scope(|scope| {
        scope.spawn(|| {
            while shared.is_running() {
                shared.on_tick().unwrap();
            }
        });
        shared.wait_for_stop();
    });

    assert!(!shared.is_running());
    assert_eq!(lines.left_pulse.rises(), 250);
    let controller = shared.take().unwrap();
    assert_eq!(controller.state().steps_taken(), 250);
}
