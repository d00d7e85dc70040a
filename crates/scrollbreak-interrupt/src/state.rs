//! crates/scrollbreak-interrupt/src/state.rs
//! Shared coordination state: the scroll lock and the pending monitor.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;

use scrollbreak_core::{Console, Record};

/// What kind of output last reached the console.
///
/// This is the data the scroll lock protects: every mutation happens while
/// the lock is held, either by a scroll emission for one write or by the
/// worker for a whole episode. The worker pads an interrupting message with
/// leading blank lines exactly when the previous output was scroll.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LastOutput {
    /// The previous console output was a scroll line.
    Scroll,
    /// The previous console output was an interruption (or nothing yet).
    Interruption,
}

/// A priority record waiting for the worker, with the sink it must use.
pub(crate) struct QueuedRecord {
    pub(crate) record: Record,
    pub(crate) sink: Arc<Console>,
}

/// Queue state behind the pending monitor's mutex.
#[derive(Default)]
pub(crate) struct Pending {
    queue: Vec<QueuedRecord>,
    notified: bool,
}

impl Pending {
    /// Appends a record; returns `true` when the condvar needs a signal.
    ///
    /// The notified flag coalesces signals: once a wakeup is pending,
    /// further arrivals are picked up by the same drain and need no signal
    /// of their own.
    pub(crate) fn enqueue(&mut self, queued: QueuedRecord) -> bool {
        self.queue.push(queued);
        if self.notified {
            false
        } else {
            self.notified = true;
            true
        }
    }

    /// Returns `true` when records are queued or a signal was sent.
    ///
    /// The worker checks this before every wait, so a signal sent while it
    /// was busy writing (and not waiting) is never lost.
    pub(crate) fn has_work(&self) -> bool {
        self.notified || !self.queue.is_empty()
    }

    /// Takes the whole queue in arrival order and rearms the signal flag.
    pub(crate) fn take_batch(&mut self) -> Vec<QueuedRecord> {
        self.notified = false;
        std::mem::take(&mut self.queue)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}

/// State shared between producers and the worker, always behind an [`Arc`].
///
/// Lock poisoning is tolerated throughout: a producer that panicked while
/// holding a guard must not take the whole logging subsystem down with it,
/// so every acquisition recovers the inner state.
pub(crate) struct Shared {
    scroll: Mutex<LastOutput>,
    pending: Mutex<Pending>,
    wakeup: Condvar,
    session_active: AtomicBool,
    stopping: AtomicBool,
    dropped: AtomicU64,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            // Nothing has scrolled yet, so the first interruption needs no
            // leading padding.
            scroll: Mutex::new(LastOutput::Interruption),
            pending: Mutex::new(Pending::default()),
            wakeup: Condvar::new(),
            session_active: AtomicBool::new(false),
            stopping: AtomicBool::new(false),
            dropped: AtomicU64::new(0),
        }
    }

    /// Blocking scroll-lock acquire; worker only.
    pub(crate) fn lock_scroll(&self) -> MutexGuard<'_, LastOutput> {
        self.scroll.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Non-blocking scroll-lock acquire; `None` means contended.
    pub(crate) fn try_lock_scroll(&self) -> Option<MutexGuard<'_, LastOutput>> {
        match self.scroll.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    pub(crate) fn lock_pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn wait_pending<'a>(
        &self,
        guard: MutexGuard<'a, Pending>,
    ) -> MutexGuard<'a, Pending> {
        self.wakeup
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn wait_pending_timeout<'a>(
        &self,
        guard: MutexGuard<'a, Pending>,
        timeout: Duration,
    ) -> MutexGuard<'a, Pending> {
        self.wakeup
            .wait_timeout(guard, timeout)
            .unwrap_or_else(PoisonError::into_inner)
            .0
    }

    /// Wakes the worker wherever it is waiting.
    pub(crate) fn notify_waiter(&self) {
        self.wakeup.notify_all();
    }

    pub(crate) fn session_active(&self) -> bool {
        self.session_active.load(Ordering::SeqCst)
    }

    pub(crate) fn set_session_active(&self, active: bool) {
        self.session_active.store(active, Ordering::SeqCst);
    }

    pub(crate) fn stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    pub(crate) fn begin_stop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
    }

    pub(crate) fn count_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("session_active", &self.session_active())
            .field("stopping", &self.stopping())
            .field("dropped", &self.dropped())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollbreak_core::CaptureBuffer;

    fn queued(message: &str) -> QueuedRecord {
        QueuedRecord {
            record: Record::info(message),
            sink: Arc::new(CaptureBuffer::new().console()),
        }
    }

    // --- Pending tests ---

    #[test]
    fn first_enqueue_requests_a_signal_and_later_ones_coalesce() {
        let mut pending = Pending::default();
        assert!(pending.enqueue(queued("a")));
        assert!(!pending.enqueue(queued("b")));
        assert!(!pending.enqueue(queued("c")));
        assert_eq!(pending.len(), 3);
    }

    #[test]
    fn take_batch_drains_in_arrival_order_and_rearms() {
        let mut pending = Pending::default();
        let _ = pending.enqueue(queued("first"));
        let _ = pending.enqueue(queued("second"));

        let batch = pending.take_batch();
        let messages: Vec<&str> = batch.iter().map(|q| q.record.message()).collect();
        assert_eq!(messages, ["first", "second"]);

        assert!(!pending.has_work());
        assert!(pending.enqueue(queued("third")), "signal flag was rearmed");
    }

    #[test]
    fn has_work_sees_signal_sent_while_worker_was_busy() {
        let mut pending = Pending::default();
        assert!(!pending.has_work());
        let _ = pending.enqueue(queued("late arrival"));
        assert!(pending.has_work());
    }

    // --- Shared tests ---

    #[test]
    fn scroll_lock_starts_as_interruption() {
        let shared = Shared::new();
        assert_eq!(*shared.lock_scroll(), LastOutput::Interruption);
    }

    #[test]
    fn try_lock_scroll_reports_contention() {
        let shared = Shared::new();
        let held = shared.lock_scroll();
        assert!(shared.try_lock_scroll().is_none());
        drop(held);
        assert!(shared.try_lock_scroll().is_some());
    }

    #[test]
    fn session_and_stop_flags_toggle() {
        let shared = Shared::new();
        assert!(!shared.session_active());
        shared.set_session_active(true);
        assert!(shared.session_active());
        shared.set_session_active(false);
        assert!(!shared.session_active());

        assert!(!shared.stopping());
        shared.begin_stop();
        assert!(shared.stopping());
    }

    #[test]
    fn dropped_counter_accumulates() {
        let shared = Shared::new();
        assert_eq!(shared.dropped(), 0);
        shared.count_dropped();
        shared.count_dropped();
        assert_eq!(shared.dropped(), 2);
    }
}
