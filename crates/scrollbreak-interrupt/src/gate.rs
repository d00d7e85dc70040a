//! crates/scrollbreak-interrupt/src/gate.rs
//! The non-blocking decision point for scroll-class emissions.

use std::io;
use std::thread;
use std::time::Duration;

use scrollbreak_core::{Console, Record};

use crate::state::{LastOutput, Shared};

/// How the gate handled a scroll-class record.
///
/// Dropping is a routing decision, not an error, so the gate reports it
/// through this outcome instead of a `Result` failure. The marker is
/// `#[must_use]` so callers that care about the drop law cannot ignore it
/// by accident.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub enum ScrollOutcome {
    /// The scroll lock was free; the line is on the console.
    Written,
    /// The worker holds the scroll lock; the line was silently dropped.
    Dropped,
    /// No session is active; the line was written as ordinary output.
    Bypassed,
}

impl ScrollOutcome {
    /// Returns `true` when the line reached the console.
    #[must_use]
    pub const fn was_written(self) -> bool {
        !matches!(self, Self::Dropped)
    }

    /// Returns `true` when the line was dropped on contention.
    #[must_use]
    pub const fn was_dropped(self) -> bool {
        matches!(self, Self::Dropped)
    }
}

/// Offers a scroll record to the gate.
///
/// With no active session the record is ordinary output and goes straight
/// to the sink. Otherwise the gate try-locks the scroll lock: on success it
/// marks the console as mid-scroll, writes, releases, and pauses for
/// `yield_slack` so the worker's blocking acquire can win the next round;
/// on contention it counts the drop and returns. Neither path ever blocks
/// the caller on the lock.
pub(crate) fn offer(
    shared: &Shared,
    yield_slack: Duration,
    record: &Record,
    sink: &Console,
) -> io::Result<ScrollOutcome> {
    if !shared.session_active() {
        sink.write_line(record.message())?;
        return Ok(ScrollOutcome::Bypassed);
    }

    let Some(mut last) = shared.try_lock_scroll() else {
        shared.count_dropped();
        return Ok(ScrollOutcome::Dropped);
    };
    *last = LastOutput::Scroll;
    let written = sink.write_line(record.message());
    drop(last);

    // Pause only after the lock is released; sleeping under it would extend
    // the very contention window the gate exists to keep short.
    if !yield_slack.is_zero() {
        thread::sleep(yield_slack);
    }
    written.map(|()| ScrollOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollbreak_core::CaptureBuffer;

    const NO_SLACK: Duration = Duration::ZERO;

    #[test]
    fn inactive_session_bypasses_the_gate() {
        let shared = Shared::new();
        let capture = CaptureBuffer::new();
        let console = capture.console();

        let outcome = offer(&shared, NO_SLACK, &Record::scroll("plain"), &console)
            .expect("write succeeds");

        assert_eq!(outcome, ScrollOutcome::Bypassed);
        assert_eq!(capture.contents(), "plain\n");
        assert_eq!(shared.dropped(), 0);
    }

    #[test]
    fn uncontended_scroll_is_written_and_marks_the_console() {
        let shared = Shared::new();
        shared.set_session_active(true);
        let capture = CaptureBuffer::new();
        let console = capture.console();

        let outcome = offer(&shared, NO_SLACK, &Record::scroll("copied 1/3"), &console)
            .expect("write succeeds");

        assert_eq!(outcome, ScrollOutcome::Written);
        assert_eq!(capture.contents(), "copied 1/3\n");
        assert_eq!(*shared.lock_scroll(), LastOutput::Scroll);
    }

    #[test]
    fn contended_scroll_is_dropped_and_counted() {
        let shared = Shared::new();
        shared.set_session_active(true);
        let capture = CaptureBuffer::new();
        let console = capture.console();

        let held = shared.lock_scroll();
        let outcome = offer(&shared, NO_SLACK, &Record::scroll("lost line"), &console)
            .expect("drop is not an error");
        drop(held);

        assert_eq!(outcome, ScrollOutcome::Dropped);
        assert!(capture.is_empty());
        assert_eq!(shared.dropped(), 1);
    }

    #[test]
    fn outcome_predicates_partition_the_variants() {
        assert!(ScrollOutcome::Written.was_written());
        assert!(ScrollOutcome::Bypassed.was_written());
        assert!(!ScrollOutcome::Dropped.was_written());
        assert!(ScrollOutcome::Dropped.was_dropped());
        assert!(!ScrollOutcome::Written.was_dropped());
    }
}
