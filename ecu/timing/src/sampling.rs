//! Interrupt-context edge capture for the position sensors.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::time::Micros;
use crate::timer::MonotonicClock;

/// EXTI line of the crankshaft position sensor.
pub const CRANK_LINE: u16 = 1 << 8;

/// EXTI line of the camshaft position sensor.
pub const CAM_LINE: u16 = 1 << 9;

/// Input channel recognised by the edge-capture handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Crank,
    Cam,
}

impl Channel {
    /// Maps an EXTI line identifier to a recognised channel.
    pub const fn from_line(line: u16) -> Option<Self> {
        match line {
            CRANK_LINE => Some(Self::Crank),
            CAM_LINE => Some(Self::Cam),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Crank => defmt::write!(fmt, "Crank"),
            Self::Cam => defmt::write!(fmt, "Cam"),
        }
    }
}

/// Latest edge timestamps for the crank and cam signals.
///
/// Each cell has exactly one writer, the interrupt handler for that
/// signal, and any number of task-context readers. No history is kept:
/// last writer wins. A read may race a write, but a cell is one aligned
/// machine word, so the reader observes either the old or the new value,
/// never a torn mixture. A read may be stale by one edge; consumers only
/// need the most recent edge. No lock is taken on either side, keeping
/// interrupt latency flat.
pub struct EdgeTimestamps {
    last_crank: AtomicU32,
    last_cam: AtomicU32,
}

impl EdgeTimestamps {
    /// Both cells start at zero, meaning "no edge observed yet".
    pub const fn new() -> Self {
        Self {
            last_crank: AtomicU32::new(0),
            last_cam: AtomicU32::new(0),
        }
    }

    /// Records the timestamp of the most recent edge on `channel`.
    ///
    /// Exactly one relaxed store; bounded time, safe in interrupt context.
    pub fn record(&self, channel: Channel, at: Micros) {
        match channel {
            Channel::Crank => self.last_crank.store(at.raw(), Ordering::Relaxed),
            Channel::Cam => self.last_cam.store(at.raw(), Ordering::Relaxed),
        }
    }

    /// Timestamp of the most recent crank edge; may be stale by one edge.
    pub fn last_crank(&self) -> Micros {
        Micros::new(self.last_crank.load(Ordering::Relaxed))
    }

    /// Timestamp of the most recent cam edge; may be stale by one edge.
    pub fn last_cam(&self) -> Micros {
        Micros::new(self.last_cam.load(Ordering::Relaxed))
    }
}

impl Default for EdgeTimestamps {
    fn default() -> Self {
        Self::new()
    }
}

/// GPIO edge-interrupt entry point.
///
/// Stores one timestamp when `line` is a recognised sensor line and
/// ignores every other line. Runs to completion in bounded, minimal time:
/// no logging, no formatting, no blocking calls. It can preempt a reader
/// mid-access of the same cell.
pub fn gpio_edge_callback(edges: &EdgeTimestamps, line: u16, clock: &impl MonotonicClock) {
    if let Some(channel) = Channel::from_line(line) {
        edges.record(channel, clock.now());
    }
}
