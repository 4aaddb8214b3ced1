//! Seam for the spark/injection scheduler.

use ecu_timing::EdgeTimestamps;

use crate::task::EngineStatus;

/// Consumes each control-loop snapshot to schedule ignition and injection
/// events.
///
/// The wasted-spark / semi-sequential and nominal strategies are not
/// implemented yet; this trait fixes their inputs so the state machine can
/// land without reshaping the control loop. Implementations run inside
/// the critical engine task and must complete in bounded time.
pub trait SparkScheduler {
    fn update(&mut self, status: &EngineStatus, edges: &EdgeTimestamps);
}

/// Placeholder scheduler that takes no action.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleScheduler;

impl SparkScheduler for IdleScheduler {
    fn update(&mut self, _status: &EngineStatus, _edges: &EdgeTimestamps) {}
}
