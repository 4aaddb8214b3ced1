//! Subscriber table and message dispatch.

use core::fmt::{self, Write};

use crate::level::Level;
use crate::{UlogError, UlogResult};

/// Subscriber callback. Invoked synchronously from within
/// [`Logger::log`], in whatever context the log call was made; callbacks
/// must be non-blocking and reentrant-safe if logging can occur from
/// interrupt context. Identity is the function address.
pub type SubscriberFn = fn(Level, &str);

#[derive(Clone, Copy)]
struct Subscriber {
    func: SubscriberFn,
    threshold: Level,
}

/// Fan-out logger with a fixed-capacity subscriber table and a single
/// shared message buffer.
///
/// `SUBS` bounds the number of live subscribers, `MSG` the formatted
/// message length in bytes; together they bound worst-case memory and
/// dispatch latency. The context owns all of its state, so `&mut self`
/// keeps one formatting pass in flight at a time. The process-wide
/// instance behind the [`crate::log`] free functions serialises callers
/// with a critical section instead.
pub struct Logger<const SUBS: usize, const MSG: usize> {
    slots: [Option<Subscriber>; SUBS],
    message: heapless::String<MSG>,
    lowest: Level,
}

impl<const SUBS: usize, const MSG: usize> Logger<SUBS, MSG> {
    /// An empty table; the lowest active threshold of an empty table is
    /// `Always`, so everything below it is rejected before formatting.
    pub const fn new() -> Self {
        Self {
            slots: [None; SUBS],
            message: heapless::String::new(),
            lowest: Level::Always,
        }
    }

    /// Clears the subscriber table. Must run before any other operation on
    /// a context whose history is unknown.
    pub fn init(&mut self) {
        self.slots = [None; SUBS];
        self.message.clear();
        self.lowest = self.recompute_lowest();
    }

    /// Installs `func` with the given threshold.
    ///
    /// Re-subscribing an already-subscribed function updates its threshold
    /// in place without consuming a second slot or changing dispatch order.
    /// A new subscriber takes the lowest-index free slot; a full table
    /// fails with [`UlogError::SubscribersExceeded`] and changes nothing.
    pub fn subscribe(&mut self, func: SubscriberFn, threshold: Level) -> UlogResult<()> {
        let mut free_slot = None;
        for i in 0..SUBS {
            match self.slots[i] {
                Some(sub) if sub.func == func => {
                    self.slots[i] = Some(Subscriber { func, threshold });
                    self.lowest = self.recompute_lowest();
                    return Ok(());
                }
                None if free_slot.is_none() => free_slot = Some(i),
                _ => {}
            }
        }
        match free_slot {
            Some(i) => {
                self.slots[i] = Some(Subscriber { func, threshold });
                self.lowest = self.recompute_lowest();
                Ok(())
            }
            None => Err(UlogError::SubscribersExceeded),
        }
    }

    /// Removes `func` from the table, freeing its slot for reuse.
    pub fn unsubscribe(&mut self, func: SubscriberFn) -> UlogResult<()> {
        for i in 0..SUBS {
            if let Some(sub) = self.slots[i] {
                if sub.func == func {
                    self.slots[i] = None;
                    self.lowest = self.recompute_lowest();
                    return Ok(());
                }
            }
        }
        Err(UlogError::NotSubscribed)
    }

    /// Formats `args` once and dispatches to every subscriber whose
    /// threshold is at or below `level`, in slot order.
    ///
    /// Messages below the lowest active threshold return before any
    /// formatting happens; with no subscriber interested, the arguments
    /// are never rendered. Formatted text longer than `MSG` bytes is
    /// truncated at a character boundary; the buffer cannot overrun.
    ///
    /// Subscribers run inside the dispatch pass and must not call back
    /// into the logger.
    pub fn log(&mut self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.lowest {
            return;
        }

        self.message.clear();
        let mut sink = Truncating::new(&mut self.message);
        let _ = sink.write_fmt(args);

        for i in 0..SUBS {
            if let Some(sub) = self.slots[i] {
                if level >= sub.threshold {
                    (sub.func)(level, self.message.as_str());
                }
            }
        }
    }

    /// Minimum threshold among live subscribers, `Always` when none.
    pub fn lowest_threshold(&self) -> Level {
        self.lowest
    }

    /// Number of occupied slots.
    pub fn subscriber_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Contents of the message buffer after the most recent dispatch.
    pub fn last_message(&self) -> &str {
        self.message.as_str()
    }

    fn recompute_lowest(&self) -> Level {
        let mut lowest = Level::Always;
        for sub in self.slots.iter().flatten() {
            if sub.threshold < lowest {
                lowest = sub.threshold;
            }
        }
        lowest
    }
}

impl<const SUBS: usize, const MSG: usize> Default for Logger<SUBS, MSG> {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that fills a fixed-capacity string and silently drops whatever
/// does not fit, instead of surfacing `fmt::Error` mid-format.
pub(crate) struct Truncating<'a, const N: usize> {
    out: &'a mut heapless::String<N>,
    full: bool,
}

impl<'a, const N: usize> Truncating<'a, N> {
    pub(crate) fn new(out: &'a mut heapless::String<N>) -> Self {
        Self { out, full: false }
    }
}

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.full {
            return Ok(());
        }
        for ch in s.chars() {
            if self.out.push(ch).is_err() {
                self.full = true;
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_a(_level: Level, _msg: &str) {}
    fn sub_b(_level: Level, _msg: &str) {}

    #[test]
    fn test_empty_table_threshold() {
        let logger: Logger<4, 64> = Logger::new();
        assert_eq!(logger.lowest_threshold(), Level::Always);
        assert_eq!(logger.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_tracks_lowest() {
        let mut logger: Logger<4, 64> = Logger::new();
        logger.subscribe(sub_a, Level::Warning).unwrap();
        assert_eq!(logger.lowest_threshold(), Level::Warning);
        logger.subscribe(sub_b, Level::Debug).unwrap();
        assert_eq!(logger.lowest_threshold(), Level::Debug);
        logger.unsubscribe(sub_b).unwrap();
        assert_eq!(logger.lowest_threshold(), Level::Warning);
    }

    #[test]
    fn test_unsubscribe_unknown() {
        let mut logger: Logger<4, 64> = Logger::new();
        assert_eq!(logger.unsubscribe(sub_a), Err(UlogError::NotSubscribed));
    }

    #[test]
    fn test_truncating_writer() {
        let mut buf: heapless::String<8> = heapless::String::new();
        let mut sink = Truncating::new(&mut buf);
        sink.write_str("0123456789").unwrap();
        sink.write_str("x").unwrap();
        assert_eq!(buf.as_str(), "01234567");
    }
}
