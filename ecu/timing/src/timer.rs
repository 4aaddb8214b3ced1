//! Free-running microsecond timer.
//!
//! Wraps a hardware counter channel into the firmware's monotonic clock:
//! one tick per microsecond, up-counting, full 32-bit period, no periodic
//! interrupt. The counter read is a plain register load, so
//! [`MonotonicClock::now`] is callable from interrupt and task context
//! alike.

use ecu_ulog::ulog_error;

use crate::error::HalResult;
use crate::time::Micros;

/// Counter tick rate; one tick per microsecond.
pub const TICK_HZ: u32 = 1_000_000;

/// Clock source feeding the counter channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Internal bus clock (through the prescaler).
    Internal,
}

/// Base configuration for the free-running counter channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterConfig {
    /// Tick rate after prescaling, in hertz.
    pub tick_hz: u32,
    /// Auto-reload value; counting wraps to zero past it.
    pub period: u32,
}

impl CounterConfig {
    /// 1 MHz up-counter with the full 32-bit period (~70 min overflow).
    pub const fn microseconds() -> Self {
        Self {
            tick_hz: TICK_HZ,
            period: u32::MAX,
        }
    }
}

/// Hardware seam for the counter peripheral behind [`UsTimer`].
pub trait CounterHw {
    /// Configures the channel as a free-running up-counter.
    fn configure_base(&mut self, config: &CounterConfig) -> HalResult<()>;

    /// Selects the clock feeding the counter.
    fn select_clock_source(&mut self, source: ClockSource) -> HalResult<()>;

    /// Parks trigger/synchronisation outputs in their inert defaults.
    fn configure_sync(&mut self) -> HalResult<()>;

    /// Current counter value. Must not block; callable from any context.
    fn count(&self) -> u32;
}

/// Monotonically increasing microsecond clock with defined wraparound.
pub trait MonotonicClock {
    /// Current timestamp. No side effects, never blocks, never fails.
    fn now(&self) -> Micros;
}

/// The firmware's microsecond clock over a [`CounterHw`] channel.
pub struct UsTimer<C> {
    hw: C,
}

impl<C: CounterHw> UsTimer<C> {
    /// Configures `hw` as the 1 MHz free-running counter.
    ///
    /// Each configuration step that the hardware rejects is reported at
    /// ERROR and startup continues with the counter in its default state;
    /// initialization failure is never fatal. A dead counter reads zero
    /// forever and downstream logic sees "engine not turning".
    pub fn init(mut hw: C) -> Self {
        let config = CounterConfig::microseconds();
        if let Err(err) = hw.configure_base(&config) {
            ulog_error!("Failed to initialize microsecond timer: {}", err);
        }
        if let Err(err) = hw.select_clock_source(ClockSource::Internal) {
            ulog_error!("Failed to configure microsecond timer clock source: {}", err);
        }
        if let Err(err) = hw.configure_sync() {
            ulog_error!("Failed to initialize timer master configuration: {}", err);
        }
        Self { hw }
    }

    /// Current counter value as a timestamp.
    pub fn now(&self) -> Micros {
        Micros::new(self.hw.count())
    }
}

impl<C: CounterHw> MonotonicClock for UsTimer<C> {
    fn now(&self) -> Micros {
        UsTimer::now(self)
    }
}
