#![cfg_attr(not(feature = "std"), no_std)]

//! # ecu-ulog
//!
//! Fan-out diagnostic logging for the engine firmware: a bounded table of
//! subscriber callbacks, each with its own severity threshold, fed from a
//! single fixed-capacity message buffer. No heap allocation anywhere, so
//! the facility is usable from any execution context.
//!
//! The subscriber table and message buffer are *not* safe for concurrent
//! mutation on their own. The [`Logger`] context enforces exclusivity
//! through `&mut self`; the process-wide instance behind [`init`],
//! [`subscribe`], [`unsubscribe`] and [`log`] serialises all callers with a
//! critical section, which also makes it usable from interrupt context.
//! Subscriber callbacks run synchronously inside the dispatch pass, in
//! whatever context produced the message, and must not log themselves.
//!
//! ## Usage
//!
//! ```rust
//! use ecu_ulog::{init, subscribe, ulog_info, Level};
//!
//! fn alarm(level: Level, msg: &str) {
//!     // forward to an annunciator, ring buffer, serial port, ...
//!     let _ = (level, msg);
//! }
//!
//! init();
//! subscribe(alarm, Level::Warning).unwrap();
//! ulog_info!("boost {} kPa", 101);   // below alarm's threshold: dropped
//! ```

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;

mod console;
mod level;
mod logger;
mod macros;

pub use console::{console_logger, install_console, ClockFn, TxFn};
pub use level::{level_name, Level};
pub use logger::{Logger, SubscriberFn};

/// Capacity of the subscriber table.
pub const MAX_SUBSCRIBERS: usize = 6;

/// Capacity of the shared message buffer, in bytes.
pub const MAX_MESSAGE_LENGTH: usize = 120;

/// Result type for subscription management.
pub type UlogResult<T> = Result<T, UlogError>;

/// Errors reported by subscription management. [`log`] itself never fails;
/// a message below every threshold is dropped, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlogError {
    /// Subscribe attempted with a full table.
    SubscribersExceeded,
    /// Unsubscribe of a callback that is not in the table.
    NotSubscribed,
}

impl fmt::Display for UlogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UlogError::SubscribersExceeded => write!(f, "subscriber table is full"),
            UlogError::NotSubscribed => write!(f, "callback is not subscribed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UlogError {}

#[cfg(feature = "defmt")]
impl defmt::Format for UlogError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            UlogError::SubscribersExceeded => defmt::write!(fmt, "SubscribersExceeded"),
            UlogError::NotSubscribed => defmt::write!(fmt, "NotSubscribed"),
        }
    }
}

// Process-wide facility instance
static LOGGER: Mutex<RefCell<Logger<MAX_SUBSCRIBERS, MAX_MESSAGE_LENGTH>>> =
    Mutex::new(RefCell::new(Logger::new()));

/// Clears the process-wide subscriber table. Must run before any other
/// facility call during startup.
pub fn init() {
    critical_section::with(|cs| {
        LOGGER.borrow_ref_mut(cs).init();
    });
}

/// Installs `func` in the process-wide table. See [`Logger::subscribe`].
pub fn subscribe(func: SubscriberFn, threshold: Level) -> UlogResult<()> {
    critical_section::with(|cs| LOGGER.borrow_ref_mut(cs).subscribe(func, threshold))
}

/// Removes `func` from the process-wide table. See [`Logger::unsubscribe`].
pub fn unsubscribe(func: SubscriberFn) -> UlogResult<()> {
    critical_section::with(|cs| LOGGER.borrow_ref_mut(cs).unsubscribe(func))
}

/// Formats and dispatches through the process-wide table. Usually invoked
/// via the [`ulog!`] macro family. See [`Logger::log`].
pub fn log(level: Level, args: fmt::Arguments<'_>) {
    critical_section::with(|cs| {
        LOGGER.borrow_ref_mut(cs).log(level, args);
    });
}

/// Lowest active threshold of the process-wide table.
pub fn lowest_threshold() -> Level {
    critical_section::with(|cs| LOGGER.borrow_ref(cs).lowest_threshold())
}
