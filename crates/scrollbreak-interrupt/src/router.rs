//! crates/scrollbreak-interrupt/src/router.rs
//! Routing for priority-class emissions: direct write or enqueue-and-signal.

use std::io;
use std::sync::Arc;

use scrollbreak_core::{Console, Record};

use crate::state::{QueuedRecord, Shared};

/// Routes a priority record.
///
/// With no active session the record goes straight to its sink, which
/// serializes concurrent writers on its own. With a session active the
/// record is appended to the pending queue with its sink attached and the
/// worker is signaled; the caller returns without waiting for the message
/// to appear. The critical section covers only the queue append.
pub(crate) fn route(shared: &Shared, record: Record, sink: &Arc<Console>) -> io::Result<()> {
    if !shared.session_active() {
        return sink.write_line(record.message());
    }

    let queued = QueuedRecord {
        record,
        sink: Arc::clone(sink),
    };
    let mut pending = shared.lock_pending();
    let needs_signal = pending.enqueue(queued);
    drop(pending);
    if needs_signal {
        shared.notify_waiter();
    }
    Ok(())
}
