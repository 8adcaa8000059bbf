//! Differential drive example.
//!
//! Builds a controller from TOML, previews the ramp of a move, then drives a
//! short square pattern with a simulated timer interrupt running on a second
//! thread.
//!
//! Runs on the host; the pins only count their rising edges.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use stepper_ramp::{
    parse_config, Direction, DrivePins, RampTable, Rotation, SharedStepper, StepTimer,
    StepperController, TimerClock, Wheel,
};

/// Simulated step timer.
#[derive(Default)]
struct DemoTimer {
    period: u16,
    running: bool,
}

impl StepTimer for DemoTimer {
    fn set_period(&mut self, period: u16) {
        self.period = period;
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Output pin counting its rising edges.
#[derive(Clone, Default)]
struct EdgeCounter {
    high: bool,
    rises: Arc<AtomicU32>,
}

impl EdgeCounter {
    fn rises(&self) -> u32 {
        self.rises.load(Ordering::Relaxed)
    }
}

impl embedded_hal::digital::OutputPin for EdgeCounter {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rises.fetch_add(1, Ordering::Relaxed);
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for EdgeCounter {
    type Error = core::convert::Infallible;
}

type DemoController = StepperController<
    DemoTimer,
    DrivePins<EdgeCounter, EdgeCounter, EdgeCounter, EdgeCounter, EdgeCounter>,
>;

static STEPPER: SharedStepper<DemoController> = SharedStepper::new();

const ROBOT_CONFIG: &str = r#"
stepping_mode = "half"

[timer]
clock_hz = 16000000
prescaler = 64

[ramp]
periods = [2500, 1768, 1443, 1250, 1118, 1021, 945, 884, 833, 791]
ramp_duration = 100
ramp_interval = 10
"#;

fn print_preview(ramp: &RampTable, clock: &TimerClock, steps: u16) {
    let profile = ramp.profile(steps);
    println!("Move of {} steps: {} interrupts", steps, profile.total_ticks());
    println!(
        "Estimated duration: {:.3} seconds",
        profile.estimated_duration_secs(clock)
    );

    let mut last = None;
    for (index, period) in profile.enumerate() {
        if last != Some(period) {
            println!(
                "  from step {:>4}: period {:>4} ({:.1} steps/s)",
                index + 1,
                period,
                clock.step_rate(period).0
            );
            last = Some(period);
        }
    }
}

fn run(label: &str, command: impl FnOnce(&mut DemoController) -> stepper_ramp::Result<()>) {
    STEPPER
        .with(command)
        .expect("controller not installed")
        .expect("move rejected");
    STEPPER.wait_for_stop();

    let taken = STEPPER
        .with(|c| c.state().steps_taken())
        .expect("controller not installed");
    println!("{:<28} {} steps", label, taken);
}

fn main() {
    println!("=== Differential Drive Example ===\n");

    let config = parse_config(ROBOT_CONFIG).expect("Failed to parse config");
    let ramp = RampTable::from_config(&config.ramp).expect("Invalid ramp");

    println!("=== Ramp Preview ===");
    print_preview(&ramp, &config.timer, 250);
    println!();
    print_preview(&ramp, &config.timer, 60);

    let left_pulse = EdgeCounter::default();
    let right_pulse = EdgeCounter::default();

    let controller = StepperController::builder()
        .timer(DemoTimer::default())
        .outputs(DrivePins::new(
            left_pulse.clone(),
            right_pulse.clone(),
            EdgeCounter::default(),
            EdgeCounter::default(),
            EdgeCounter::default(),
        ))
        .from_config(&config)
        .build()
        .expect("Failed to build controller");
    STEPPER.install(controller);

    // Stand-in for the timer compare interrupt
    let interrupt = std::thread::spawn(|| loop {
        if STEPPER.is_running() {
            STEPPER.on_tick().expect("tick failed");
        } else if STEPPER.with(|_| ()).is_err() {
            break;
        } else {
            std::thread::yield_now();
        }
    });

    println!("\n=== Square Pattern ===");
    let mut heading = Direction::Forward;
    let mut turn = Rotation::Clockwise;
    for _ in 0..2 {
        run("straight", |c| c.move_straight(400, heading));
        run("spin in place", |c| c.rotate_about_center(120, turn));
        heading = heading.reversed();
        turn = turn.reversed();
    }

    let mut pivot = Wheel::Left;
    for _ in 0..2 {
        run("pivot", |c| c.rotate_about_wheel(90, pivot, Rotation::Clockwise));
        pivot = pivot.other();
    }

    STEPPER.take();
    interrupt.join().expect("interrupt thread panicked");

    println!("\nLeft motor steps:  {}", left_pulse.rises());
    println!("Right motor steps: {}", right_pulse.rises());
    println!("\n=== Example Complete ===");
}
