//! Subscriber table and dispatch tests for ecu-ulog
//! These run against an owned Logger context so they can execute in
//! parallel without sharing the process-wide facility.

use core::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ecu_ulog::{Level, Logger, UlogError};

static CALLS_A: AtomicUsize = AtomicUsize::new(0);
static CALLS_B: AtomicUsize = AtomicUsize::new(0);
static CALLS_C: AtomicUsize = AtomicUsize::new(0);
static CALLS_D: AtomicUsize = AtomicUsize::new(0);
static CALLS_E: AtomicUsize = AtomicUsize::new(0);

fn sub_a(_level: Level, _msg: &str) {
    CALLS_A.fetch_add(1, Ordering::SeqCst);
}
fn sub_b(_level: Level, _msg: &str) {
    CALLS_B.fetch_add(1, Ordering::SeqCst);
}
fn sub_c(_level: Level, _msg: &str) {
    CALLS_C.fetch_add(1, Ordering::SeqCst);
}
fn sub_d(_level: Level, _msg: &str) {
    CALLS_D.fetch_add(1, Ordering::SeqCst);
}
fn sub_e(_level: Level, _msg: &str) {
    CALLS_E.fetch_add(1, Ordering::SeqCst);
}

static ORDER: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

fn order_first(_level: Level, _msg: &str) {
    ORDER.lock().unwrap().push("first");
}
fn order_second(_level: Level, _msg: &str) {
    ORDER.lock().unwrap().push("second");
}
fn order_third(_level: Level, _msg: &str) {
    ORDER.lock().unwrap().push("third");
}

/// Counts how many times its Display impl actually renders; format_args!
/// captures arguments lazily, so a rejected log call must leave this at
/// zero.
static FMT_CALLS: AtomicUsize = AtomicUsize::new(0);

struct FmtSpy;

impl fmt::Display for FmtSpy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FMT_CALLS.fetch_add(1, Ordering::SeqCst);
        write!(f, "spy")
    }
}

#[test]
fn test_table_capacity() {
    let mut logger: Logger<2, 64> = Logger::new();
    logger.subscribe(sub_a, Level::Info).unwrap();
    logger.subscribe(sub_b, Level::Info).unwrap();
    assert_eq!(
        logger.subscribe(sub_c, Level::Info),
        Err(UlogError::SubscribersExceeded)
    );
    // The failed subscribe changed nothing.
    assert_eq!(logger.subscriber_count(), 2);
    assert_eq!(logger.lowest_threshold(), Level::Info);
}

#[test]
fn test_resubscribe_updates_in_place() {
    let mut logger: Logger<4, 64> = Logger::new();
    logger.subscribe(sub_a, Level::Error).unwrap();
    logger.subscribe(sub_a, Level::Debug).unwrap();
    assert_eq!(logger.subscriber_count(), 1);
    assert_eq!(logger.lowest_threshold(), Level::Debug);
}

#[test]
fn test_slot_reuse_after_unsubscribe() {
    let mut logger: Logger<2, 64> = Logger::new();
    logger.subscribe(sub_a, Level::Info).unwrap();
    logger.subscribe(sub_b, Level::Info).unwrap();
    logger.unsubscribe(sub_a).unwrap();
    logger.subscribe(sub_c, Level::Warning).unwrap();
    assert_eq!(logger.subscriber_count(), 2);
    assert_eq!(logger.unsubscribe(sub_a), Err(UlogError::NotSubscribed));
}

#[test]
fn test_rejected_log_formats_nothing() {
    let mut logger: Logger<4, 64> = Logger::new();
    logger.subscribe(sub_d, Level::Warning).unwrap();

    logger.log(Level::Debug, format_args!("value {}", FmtSpy));
    assert_eq!(FMT_CALLS.load(Ordering::SeqCst), 0);
    assert_eq!(CALLS_D.load(Ordering::SeqCst), 0);

    logger.log(Level::Error, format_args!("value {}", FmtSpy));
    assert_eq!(FMT_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(CALLS_D.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispatch_exact_subset() {
    let mut logger: Logger<4, 64> = Logger::new();
    logger.subscribe(sub_b, Level::Debug).unwrap();
    logger.subscribe(sub_c, Level::Error).unwrap();

    let b_before = CALLS_B.load(Ordering::SeqCst);
    let c_before = CALLS_C.load(Ordering::SeqCst);
    logger.log(Level::Info, format_args!("x"));

    // Info clears the Debug threshold but not the Error one.
    assert_eq!(CALLS_B.load(Ordering::SeqCst), b_before + 1);
    assert_eq!(CALLS_C.load(Ordering::SeqCst), c_before);
}

#[test]
fn test_dispatch_in_slot_order() {
    let mut logger: Logger<4, 64> = Logger::new();
    logger.subscribe(order_first, Level::Trace).unwrap();
    logger.subscribe(order_second, Level::Trace).unwrap();
    logger.subscribe(order_third, Level::Trace).unwrap();

    logger.log(Level::Info, format_args!("ordered"));
    assert_eq!(*ORDER.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_truncation_is_bounded() {
    let mut logger: Logger<1, 16> = Logger::new();
    logger.subscribe(sub_e, Level::Trace).unwrap();
    logger.log(
        Level::Info,
        format_args!("{}", "a very long message that cannot possibly fit"),
    );
    assert_eq!(logger.last_message(), "a very long mess");
    assert_eq!(logger.last_message().len(), 16);
}

#[test]
fn test_full_table_scenario() {
    // MAX_SUBSCRIBERS = 4 end-to-end walk-through.
    static HIT_DEBUG: AtomicUsize = AtomicUsize::new(0);
    static HIT_INFO: AtomicUsize = AtomicUsize::new(0);
    static HIT_ERROR: AtomicUsize = AtomicUsize::new(0);
    static HIT_WARNING: AtomicUsize = AtomicUsize::new(0);

    fn at_debug(_level: Level, _msg: &str) {
        HIT_DEBUG.fetch_add(1, Ordering::SeqCst);
    }
    fn at_info(_level: Level, _msg: &str) {
        HIT_INFO.fetch_add(1, Ordering::SeqCst);
    }
    fn at_error(_level: Level, _msg: &str) {
        HIT_ERROR.fetch_add(1, Ordering::SeqCst);
    }
    fn at_warning(_level: Level, _msg: &str) {
        HIT_WARNING.fetch_add(1, Ordering::SeqCst);
    }
    fn fifth(_level: Level, _msg: &str) {}

    let mut logger: Logger<4, 64> = Logger::new();
    logger.init();
    logger.subscribe(at_debug, Level::Debug).unwrap();
    logger.subscribe(at_info, Level::Info).unwrap();
    logger.subscribe(at_error, Level::Error).unwrap();
    logger.subscribe(at_warning, Level::Warning).unwrap();

    assert_eq!(
        logger.subscribe(fifth, Level::Trace),
        Err(UlogError::SubscribersExceeded)
    );

    logger.unsubscribe(at_info).unwrap();
    assert_eq!(logger.lowest_threshold(), Level::Debug);

    logger.log(Level::Info, format_args!("x"));
    assert_eq!(HIT_DEBUG.load(Ordering::SeqCst), 1);
    assert_eq!(HIT_INFO.load(Ordering::SeqCst), 0);
    assert_eq!(HIT_ERROR.load(Ordering::SeqCst), 0);
    assert_eq!(HIT_WARNING.load(Ordering::SeqCst), 0);
}
