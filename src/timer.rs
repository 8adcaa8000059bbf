//! Hardware seams: the step timer and the tick callback it drives.

/// Periodic timer whose interrupt drives the stepper tick handler.
///
/// Implementations wrap a 16-bit timer in clear-on-compare mode. The reload
/// value is the number of timer ticks between interrupts minus one. On parts
/// with a separate output-compare unit, `set_period` also loads the compare
/// register with half the period so the interrupt lands mid-cycle.
pub trait StepTimer {
    /// Reprogram the reload value. Takes effect from the next cycle.
    fn set_period(&mut self, period: u16);

    /// Start counting (no-op if already running).
    fn start(&mut self);

    /// Stop counting; no further interrupts fire.
    fn stop(&mut self);

    /// Whether the timer is counting.
    fn is_running(&self) -> bool;
}

impl<T: StepTimer + ?Sized> StepTimer for &mut T {
    #[inline]
    fn set_period(&mut self, period: u16) {
        T::set_period(self, period)
    }

    #[inline]
    fn start(&mut self) {
        T::start(self)
    }

    #[inline]
    fn stop(&mut self) {
        T::stop(self)
    }

    #[inline]
    fn is_running(&self) -> bool {
        T::is_running(self)
    }
}

/// The single callback registered with the step timer interrupt.
pub trait TickHandler {
    /// Handle one timer interrupt.
    fn on_tick(&mut self) -> crate::Result<()>;

    /// Whether the timer is still producing interrupts.
    fn is_running(&self) -> bool;
}
