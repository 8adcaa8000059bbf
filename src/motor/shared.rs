//! Controller slot shared between caller context and the timer interrupt.
//!
//! ```rust,ignore
//! static STEPPER: SharedStepper<Controller> = SharedStepper::new();
//!
//! #[interrupt]
//! fn TIMER1_COMPA() {
//!     let _ = STEPPER.on_tick();
//! }
//!
//! STEPPER.install(controller);
//! STEPPER.with(|c| c.move_straight(400, Direction::Forward))??;
//! STEPPER.wait_for_stop();
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::error::{MotorError, Result};
use crate::timer::TickHandler;

/// Holds the one tick handler of the system.
///
/// Every access runs inside a critical section, so a move command updates the
/// step counters and phase mask as one group with respect to the interrupt.
/// Critical sections are kept to a single command or tick.
pub struct SharedStepper<H> {
    inner: Mutex<RefCell<Option<H>>>,
}

impl<H> SharedStepper<H> {
    /// Empty slot, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Register the handler, returning the previous one.
    pub fn install(&self, handler: H) -> Option<H> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(handler))
    }

    /// Unregister the handler.
    pub fn take(&self) -> Option<H> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` on the handler inside a critical section.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::NotInstalled` if the slot is empty.
    pub fn with<R>(&self, f: impl FnOnce(&mut H) -> R) -> Result<R> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            let handler = slot.as_mut().ok_or(MotorError::NotInstalled)?;
            Ok(f(handler))
        })
    }
}

impl<H: TickHandler> SharedStepper<H> {
    /// Forward a timer interrupt to the handler. Call from the ISR.
    pub fn on_tick(&self) -> Result<()> {
        self.with(|handler| handler.on_tick())?
    }

    /// Whether the installed handler's timer is running.
    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| {
            self.inner
                .borrow_ref(cs)
                .as_ref()
                .map(|handler| handler.is_running())
                .unwrap_or(false)
        })
    }

    /// Busy-wait until the current move has finished.
    ///
    /// No timeout and no cancellation: it returns once the timer has stopped,
    /// immediately if nothing is moving or nothing is installed. The interrupt
    /// is only locked out for the duration of each individual poll.
    pub fn wait_for_stop(&self) {
        while self.is_running() {
            core::hint::spin_loop();
        }
    }
}

impl<H> Default for SharedStepper<H> {
    fn default() -> Self {
        Self::new()
    }
}
