//! crates/scrollbreak-interrupt/src/worker.rs
//! The background thread that drains pending interruptions.

use std::io::{self, Write};
use std::sync::{Arc, MutexGuard};
use std::time::{Duration, Instant};

use crate::state::{LastOutput, QueuedRecord, Shared};

/// Name of the interrupter's background thread.
pub(crate) const WORKER_THREAD_NAME: &str = "scroll-interrupter";

/// Blank space printed before the first interruption after scroll output.
///
/// The first newline terminates the in-progress scroll line; the rest open
/// a visual gap between the scroll block and the interruption.
const LEADING_PAD: &str = "\n\n\n\n";

/// Terminator printed after every interrupting message: the message's own
/// newline plus one blank line.
const TRAILING_PAD: &str = "\n\n";

/// The worker's position in an interruption episode.
///
/// Holding the scroll lock is encoded in the type: `Draining` and `Grace`
/// own the guard, `Idle` cannot. Releasing the lock is therefore always a
/// visible transition back to `Idle`, never an accident.
enum Phase<'a> {
    /// Not holding the scroll lock; waiting for priority records.
    Idle,
    /// Holding the scroll lock; writing a batch of queued records.
    Draining {
        held: MutexGuard<'a, LastOutput>,
        batch: Vec<QueuedRecord>,
    },
    /// Holding the scroll lock; waiting out the debounce window.
    Grace { held: MutexGuard<'a, LastOutput> },
}

/// The single consumer of the pending queue.
pub(crate) struct Worker {
    shared: Arc<Shared>,
    grace: Duration,
}

impl Worker {
    pub(crate) fn new(shared: Arc<Shared>, grace: Duration) -> Self {
        Self { shared, grace }
    }

    /// Runs the interrupter loop until shutdown is requested.
    ///
    /// Shutdown is polled at the blocking point of each phase; on shutdown
    /// the loop exits without draining leftovers and every held guard is
    /// released by scope exit.
    pub(crate) fn run(&self) {
        let mut phase = Phase::Idle;
        loop {
            phase = match phase {
                Phase::Idle => match self.idle() {
                    Some(next) => next,
                    None => return,
                },
                Phase::Draining { held, batch } => self.drain(held, batch),
                Phase::Grace { held } => match self.grace_wait(held) {
                    Some(next) => next,
                    None => return,
                },
            };
        }
    }

    /// Waits for pending records, then opens an episode.
    fn idle(&self) -> Option<Phase<'_>> {
        let mut pending = self.shared.lock_pending();
        loop {
            if self.shared.stopping() {
                return None;
            }
            if pending.has_work() {
                break;
            }
            pending = self.shared.wait_pending(pending);
        }
        drop(pending);

        // The one blocking acquire in the subsystem. A concurrent scroll
        // emission holds the lock for a single line at most, so this is
        // bounded; records arriving in the meantime join the first batch.
        let held = self.shared.lock_scroll();
        let batch = self.shared.lock_pending().take_batch();
        Some(Phase::Draining { held, batch })
    }

    /// Writes a batch in arrival order with interruption spacing.
    fn drain<'a>(
        &self,
        mut held: MutexGuard<'a, LastOutput>,
        batch: Vec<QueuedRecord>,
    ) -> Phase<'a> {
        for queued in batch {
            let lead = *held == LastOutput::Scroll;
            *held = LastOutput::Interruption;
            let block = interruption_block(queued.record.message(), lead);
            if let Err(error) = queued.sink.write_str(&block) {
                report_emission_failure(&error);
            }
        }
        Phase::Grace { held }
    }

    /// Holds the scroll lock while waiting out the debounce window.
    ///
    /// A record arriving before the deadline extends the episode: the lock
    /// stays held, the new batch drains, and the window restarts. Only a
    /// full quiet window releases the lock.
    fn grace_wait<'a>(&self, held: MutexGuard<'a, LastOutput>) -> Option<Phase<'a>> {
        let deadline = Instant::now() + self.grace;
        let mut pending = self.shared.lock_pending();
        loop {
            if self.shared.stopping() {
                return None;
            }
            if pending.has_work() {
                let batch = pending.take_batch();
                drop(pending);
                return Some(Phase::Draining { held, batch });
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                drop(pending);
                drop(held);
                return Some(Phase::Idle);
            }
            // Spurious wakeups loop back and wait out the remainder.
            pending = self.shared.wait_pending_timeout(pending, remaining);
        }
    }
}

/// Renders one interrupting message with its padding.
fn interruption_block(message: &str, lead: bool) -> String {
    if lead {
        format!("{LEADING_PAD}{message}{TRAILING_PAD}")
    } else {
        format!("{message}{TRAILING_PAD}")
    }
}

/// Last-resort reporting when a queued record's own sink failed.
fn report_emission_failure(error: &io::Error) {
    let _ = writeln!(
        io::stderr().lock(),
        "scrollbreak: failed to emit interrupting record: {error}"
    );
}
