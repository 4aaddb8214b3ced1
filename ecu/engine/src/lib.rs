#![cfg_attr(not(feature = "std"), no_std)]

//! # ecu-engine
//!
//! The critical engine task: reads the captured crank/cam timestamps each
//! iteration, derives whether the engine is turning, and hands the result
//! to the (future) spark/injection scheduler. This task is critical for
//! engine operation and is expected to run at high priority under the
//! external kernel.

pub mod scheduler;
pub mod task;

pub use scheduler::{IdleScheduler, SparkScheduler};
pub use task::{
    CriticalEngineTask, EngineStatus, CRANKING_RPM_THRESHOLD, CRANKING_THRESHOLD_US,
};
