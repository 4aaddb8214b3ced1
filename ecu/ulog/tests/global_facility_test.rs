//! Process-wide facility test for ecu-ulog
//! Kept to a single #[test] because every assertion here goes through the
//! shared global table.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ecu_ulog::{
    console_logger, init, install_console, lowest_threshold, subscribe, ulog_debug, ulog_info,
    unsubscribe, Level, UlogError,
};

static RECEIVED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static CONSOLE_OUT: Mutex<Vec<u8>> = Mutex::new(Vec::new());
static CLOCK_READS: AtomicUsize = AtomicUsize::new(0);

fn recorder(level: Level, msg: &str) {
    RECEIVED.lock().unwrap().push((level, msg.to_string()));
}

fn console_tx(bytes: &[u8]) {
    CONSOLE_OUT.lock().unwrap().extend_from_slice(bytes);
}

fn console_clock() -> u32 {
    CLOCK_READS.fetch_add(1, Ordering::SeqCst);
    5_000
}

#[test]
fn test_global_facility_round_trip() {
    init();
    assert_eq!(lowest_threshold(), Level::Always);

    subscribe(recorder, Level::Info).unwrap();
    assert_eq!(lowest_threshold(), Level::Info);

    ulog_debug!("suppressed {}", 1);
    ulog_info!("coolant {} C", 88);
    {
        let received = RECEIVED.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], (Level::Info, String::from("coolant 88 C")));
    }

    // Console subscriber prefixes uptime and level name.
    install_console(console_tx, console_clock);
    subscribe(console_logger, Level::Warning).unwrap();
    ulog_info!("not for the console");
    ecu_ulog::ulog_error!("oil pressure low");

    let out = String::from_utf8(CONSOLE_OUT.lock().unwrap().clone()).unwrap();
    assert_eq!(out, "5 [ERROR]: oil pressure low\r\n");
    assert_eq!(CLOCK_READS.load(Ordering::SeqCst), 1);

    unsubscribe(console_logger).unwrap();
    unsubscribe(recorder).unwrap();
    assert_eq!(unsubscribe(recorder), Err(UlogError::NotSubscribed));
    assert_eq!(lowest_threshold(), Level::Always);
}
