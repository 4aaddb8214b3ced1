//! Simulated counter backend for host tests and demos.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::HalResult;
use crate::time::Micros;
use crate::timer::{ClockSource, CounterConfig, CounterHw, MonotonicClock};

/// Counter stand-in driven by the test or demo instead of by hardware.
///
/// Accepts every configuration step and counts only when told to. Interior
/// atomics let a single instance sit in a `static` and serve as both the
/// [`CounterHw`] handed to [`crate::UsTimer`] (via `&SimCounter`) and the
/// knob the simulation turns.
#[derive(Debug, Default)]
pub struct SimCounter {
    count: AtomicU32,
}

impl SimCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Jumps the counter to an absolute value.
    pub fn set(&self, micros: u32) {
        self.count.store(micros, Ordering::Release);
    }

    /// Advances the counter, wrapping like the hardware channel.
    pub fn advance(&self, micros: u32) {
        self.count.fetch_add(micros, Ordering::AcqRel);
    }
}

impl CounterHw for SimCounter {
    fn configure_base(&mut self, _config: &CounterConfig) -> HalResult<()> {
        Ok(())
    }

    fn select_clock_source(&mut self, _source: ClockSource) -> HalResult<()> {
        Ok(())
    }

    fn configure_sync(&mut self) -> HalResult<()> {
        Ok(())
    }

    fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}

impl CounterHw for &SimCounter {
    fn configure_base(&mut self, _config: &CounterConfig) -> HalResult<()> {
        Ok(())
    }

    fn select_clock_source(&mut self, _source: ClockSource) -> HalResult<()> {
        Ok(())
    }

    fn configure_sync(&mut self) -> HalResult<()> {
        Ok(())
    }

    fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}

impl MonotonicClock for SimCounter {
    fn now(&self) -> Micros {
        Micros::new(self.count.load(Ordering::Acquire))
    }
}
