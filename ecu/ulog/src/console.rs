//! Console subscriber.
//!
//! Renders `<uptime ms> [<LEVEL>]: <message>` lines and hands the bytes to
//! an installed transmit function, typically a blocking UART write with a
//! bounded timeout. The transmit and clock functions are installed at
//! startup so this module owns no peripheral.

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;

use crate::level::Level;
use crate::logger::Truncating;
use crate::MAX_MESSAGE_LENGTH;

/// Byte-sink transmit function. Failures of the sink are not surfaced.
pub type TxFn = fn(&[u8]);

/// Microsecond clock read used for the uptime prefix.
pub type ClockFn = fn() -> u32;

struct Console {
    tx: TxFn,
    clock: ClockFn,
}

static CONSOLE: Mutex<RefCell<Option<Console>>> = Mutex::new(RefCell::new(None));

/// Installs the transmit and clock functions used by [`console_logger`].
/// Until this runs, console output is dropped.
pub fn install_console(tx: TxFn, clock: ClockFn) {
    critical_section::with(|cs| {
        *CONSOLE.borrow_ref_mut(cs) = Some(Console { tx, clock });
    });
}

/// Subscriber that writes formatted lines to the installed byte sink.
///
/// Subscribe it like any other callback:
/// `subscribe(console_logger, Level::Info)`.
pub fn console_logger(level: Level, msg: &str) {
    critical_section::with(|cs| {
        if let Some(console) = CONSOLE.borrow_ref(cs).as_ref() {
            let mut line: heapless::String<{ MAX_MESSAGE_LENGTH + 32 }> = heapless::String::new();
            let mut sink = Truncating::new(&mut line);
            let uptime_ms = (console.clock)() / 1000;
            let _ = write!(sink, "{} [{}]: {}\r\n", uptime_ms, level.name(), msg);
            (console.tx)(line.as_bytes());
        }
    });
}
