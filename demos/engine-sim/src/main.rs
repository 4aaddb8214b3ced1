//! Host simulation of the engine timing core.
//!
//! Drives the critical engine task against a simulated counter: a cold
//! start, a cranking phase with crank edges at 400 rpm, and a stall. The
//! console subscriber prints the facility's output to stdout the way the
//! UART subscriber would on target.

use std::io::Write;

use ecu_engine::{CriticalEngineTask, IdleScheduler, CRANKING_THRESHOLD_US};
use ecu_timing::{
    gpio_edge_callback, EdgeTimestamps, MonotonicClock, SimCounter, UsTimer, CRANK_LINE,
};
use ecu_ulog::{console_logger, install_console, ulog_info, ulog_warning, Level};

static CLOCK: SimCounter = SimCounter::new();
static EDGES: EdgeTimestamps = EdgeTimestamps::new();

/// Gap between crank edges at 400 rpm, one edge per revolution.
const CRANK_EDGE_GAP_US: u32 = 150_000;

fn console_tx(bytes: &[u8]) {
    let _ = std::io::stdout().write_all(bytes);
}

fn console_clock() -> u32 {
    CLOCK.now().raw()
}

fn main() {
    ecu_ulog::init();
    install_console(console_tx, console_clock);
    ecu_ulog::subscribe(console_logger, Level::Info).unwrap();

    let timer = UsTimer::init(&CLOCK);
    let mut task = CriticalEngineTask::new(&timer, &EDGES, IdleScheduler);

    ulog_info!("engine-sim starting, cranking threshold {} us", CRANKING_THRESHOLD_US);

    // Cold start: no edge has ever been captured.
    CLOCK.advance(10_000);
    let status = task.poll();
    println!(
        "cold start: last_crank={} elapsed={}us turning={}",
        status.last_crank, status.elapsed_us, status.turning
    );

    // Cranking: one crank edge per revolution at 400 rpm.
    ulog_info!("cranking");
    for _ in 0..5 {
        CLOCK.advance(CRANK_EDGE_GAP_US);
        gpio_edge_callback(&EDGES, CRANK_LINE, &CLOCK);
        CLOCK.advance(1_000);
        let status = task.poll();
        println!(
            "cranking:   last_crank={} elapsed={}us turning={}",
            status.last_crank, status.elapsed_us, status.turning
        );
    }

    // Stall: edges stop, the clock keeps running past the threshold.
    CLOCK.advance(CRANKING_THRESHOLD_US + 1);
    let status = task.poll();
    println!(
        "stalled:    last_crank={} elapsed={}us turning={}",
        status.last_crank, status.elapsed_us, status.turning
    );
    if !status.turning {
        ulog_warning!("engine stopped turning");
    }
}
