//! crates/scrollbreak-interrupt/src/interrupter.rs
//! The owning handle: spawns the worker, exposes emission and sessions.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use scrollbreak_core::{Console, Record};
use thiserror::Error;

use crate::config::InterrupterConfig;
use crate::gate::{self, ScrollOutcome};
use crate::router;
use crate::state::Shared;
use crate::worker::{WORKER_THREAD_NAME, Worker};

/// Errors surfaced by emission calls.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The interrupter has been shut down; emission fails fast.
    #[error("interrupter is shut down")]
    ShutDown,
    /// A direct console write failed.
    #[error("console write failed: {0}")]
    Io(#[from] io::Error),
}

/// The interruption subsystem: one worker thread plus the shared state the
/// gate and router operate on.
///
/// Construction spawns the worker, so an `Interrupter` that exists is
/// always running; a second worker for the same queue is unrepresentable.
/// The handle is meant to be created once at startup, shared behind an
/// [`Arc`], and shut down (explicitly or by drop) at exit.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use scrollbreak_core::{Console, Record};
/// use scrollbreak_interrupt::{Interrupter, InterrupterConfig};
///
/// let config = InterrupterConfig::new().with_grace(Duration::from_millis(20));
/// let interrupter = Interrupter::spawn(config)?;
/// let stdout = Arc::new(Console::stdout());
///
/// interrupter.begin_session();
/// interrupter.emit_priority(Record::info("session opened"), &stdout)?;
/// interrupter.end_session();
/// interrupter.shutdown();
/// # Ok::<(), scrollbreak_interrupt::EmitError>(())
/// ```
#[derive(Debug)]
pub struct Interrupter {
    shared: Arc<Shared>,
    config: InterrupterConfig,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Interrupter {
    /// Starts the worker thread and returns the running subsystem.
    pub fn spawn(config: InterrupterConfig) -> io::Result<Self> {
        let shared = Arc::new(Shared::new());
        let worker = Worker::new(Arc::clone(&shared), config.grace());
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || worker.run())?;
        Ok(Self {
            shared,
            config,
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Offers a scroll-class record to the gate.
    ///
    /// Never blocks on the scroll lock: with the worker mid-episode the
    /// record is dropped and counted, reported as
    /// [`ScrollOutcome::Dropped`]. With no active session the record is
    /// written as ordinary output.
    pub fn emit_scroll(&self, record: Record, sink: &Console) -> Result<ScrollOutcome, EmitError> {
        self.ensure_running()?;
        Ok(gate::offer(
            &self.shared,
            self.config.yield_slack(),
            &record,
            sink,
        )?)
    }

    /// Routes a priority-class record.
    ///
    /// With a session active the record is queued for the worker together
    /// with its destination sink and the call returns immediately. Records
    /// still queued when [`shutdown`](Self::shutdown) runs are discarded.
    pub fn emit_priority(&self, record: Record, sink: &Arc<Console>) -> Result<(), EmitError> {
        self.ensure_running()?;
        router::route(&self.shared, record, sink)?;
        Ok(())
    }

    /// Enables scroll mode. A no-op when already active.
    pub fn begin_session(&self) {
        self.shared.set_session_active(true);
    }

    /// Disables scroll mode. A no-op when no session is active.
    ///
    /// An episode already underway finishes on its own schedule; only new
    /// emissions see the flag change.
    pub fn end_session(&self) {
        self.shared.set_session_active(false);
    }

    /// Returns `true` while a scroll session is active.
    #[must_use]
    pub fn session_active(&self) -> bool {
        self.shared.session_active()
    }

    /// Returns how many scroll lines the gate has dropped on contention.
    #[must_use]
    pub fn dropped_lines(&self) -> u64 {
        self.shared.dropped()
    }

    /// Returns `true` once shutdown has been requested.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shared.stopping()
    }

    /// Returns the configuration the subsystem was spawned with.
    #[must_use]
    pub const fn config(&self) -> &InterrupterConfig {
        &self.config
    }

    /// Stops the worker and waits for it to exit. Idempotent.
    ///
    /// The worker notices the request at its next blocking point, so a
    /// grace period in progress ends early instead of running out.
    pub fn shutdown(&self) {
        self.shared.begin_stop();
        self.shared.notify_waiter();
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                let _ = writeln!(io::stderr().lock(), "scrollbreak: interrupter worker panicked");
            }
        }
    }

    fn ensure_running(&self) -> Result<(), EmitError> {
        if self.shared.stopping() {
            Err(EmitError::ShutDown)
        } else {
            Ok(())
        }
    }
}

impl Drop for Interrupter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
