//! The critical engine task.

use ecu_timing::{EdgeTimestamps, Micros, MonotonicClock};
use ecu_ulog::ulog_debug;

use crate::scheduler::SparkScheduler;

/// Minimum crankshaft speed considered "cranking", in rpm.
pub const CRANKING_RPM_THRESHOLD: u32 = 400;

/// Longest gap between crank edges still considered cranking, in
/// microseconds.
///
/// Integer division truncates 400 / 60 to 6, so this evaluates to
/// 6_000_000 us, while one revolution at 400 rpm takes 150_000 us.
/// TODO: confirm the intended threshold with the calibration owner before
/// ignition scheduling lands on top of it.
pub const CRANKING_THRESHOLD_US: u32 = CRANKING_RPM_THRESHOLD / 60 * 1_000_000;

/// Snapshot of one control-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    /// Clock reading at the start of the iteration.
    pub now: Micros,
    /// Most recent crank edge at that point.
    pub last_crank: Micros,
    /// Microseconds since that edge, wraparound-correct.
    pub elapsed_us: u32,
    /// Whether the crankshaft is considered to be turning.
    pub turning: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "EngineStatus {{ now: {}, elapsed: {}us, turning: {} }}",
            self.now,
            self.elapsed_us,
            self.turning
        );
    }
}

/// Non-terminating control loop that turns captured crank timestamps into
/// the engine-turning condition and feeds it to the spark scheduler.
///
/// Runs at high scheduling priority under the external kernel. The edge
/// cells it reads are written from interrupt context; any read may be one
/// edge stale. One iteration is exposed as [`poll`](Self::poll) so tests
/// and cooperative schedulers can drive the loop themselves.
pub struct CriticalEngineTask<'a, C, S> {
    clock: &'a C,
    edges: &'a EdgeTimestamps,
    scheduler: S,
}

impl<'a, C, S> CriticalEngineTask<'a, C, S>
where
    C: MonotonicClock,
    S: SparkScheduler,
{
    pub fn new(clock: &'a C, edges: &'a EdgeTimestamps, scheduler: S) -> Self {
        Self {
            clock,
            edges,
            scheduler,
        }
    }

    /// One control-loop iteration.
    ///
    /// Cells still frozen at zero mean the counter or the sensor path is
    /// dead, so they read as "not turning" rather than as a fresh edge.
    pub fn poll(&mut self) -> EngineStatus {
        let now = self.clock.now();
        let last_crank = self.edges.last_crank();
        let elapsed_us = now.elapsed_since(last_crank);
        let turning = last_crank != Micros::ZERO && elapsed_us <= CRANKING_THRESHOLD_US;

        ulog_debug!("CRANK TIME: {}", last_crank.raw());

        let status = EngineStatus {
            now,
            last_crank,
            elapsed_us,
            turning,
        };
        self.scheduler.update(&status, self.edges);
        status
    }

    /// Runs the task forever. There is no shutdown path.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }
}
