#![cfg_attr(not(feature = "std"), no_std)]

//! # ecu-timing
//!
//! Timing core of the engine firmware: a free-running microsecond clock
//! over a hardware counter channel, and interrupt-context capture of the
//! most recent crank/cam sensor edges.
//!
//! ## Module Overview
//! - [`time`]     – Wraparound-correct microsecond timestamps.
//! - [`timer`]    – Counter hardware seam and the [`UsTimer`] clock.
//! - [`sampling`] – Lock-free edge-timestamp cells and the GPIO callback.
//! - [`sim`]      – Counter stand-in for host tests and demos.
//!
//! The edge cells are single-writer/multi-reader machine words read and
//! written with relaxed atomics; readers may observe a value that is one
//! edge stale and that is the whole consistency contract.

pub mod error;
pub mod sampling;
pub mod sim;
pub mod time;
pub mod timer;

pub use error::{HalError, HalResult};
pub use sampling::{gpio_edge_callback, Channel, EdgeTimestamps, CAM_LINE, CRANK_LINE};
pub use sim::SimCounter;
pub use time::Micros;
pub use timer::{ClockSource, CounterConfig, CounterHw, MonotonicClock, UsTimer, TICK_HZ};
