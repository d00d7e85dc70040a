#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scrollbreak` is console logging for programs that stream a constant
//! scroll of progress lines and still need important messages to be seen.
//! During a scroll session, ordinary output ("scroll") is emitted only when
//! it can win a non-blocking race for the scroll lock; priority messages
//! interrupt the scroll through a background worker that pauses the stream,
//! prints the interruption padded with blank lines so it stands out, and
//! holds the pause briefly so nearby messages share one visual break.
//!
//! # Design
//!
//! [`Logging`] is an explicit value constructed once at startup and passed
//! by reference, not a process-global. It bundles the interrupter worker,
//! the severity-routing dispatcher, and the optional notifier, and its
//! logging calls never fail: destination errors are reported once on stderr
//! and the program's flow continues.
//!
//! # Invariants
//!
//! - A scroll line is either written promptly or discarded; logging calls
//!   never block on the interruption machinery.
//! - Every priority message is emitted exactly once, in arrival order.
//! - Ending a session or shutting down twice is harmless.
//!
//! # Errors
//!
//! Only construction returns errors ([`InitError`]): a worker thread that
//! cannot be spawned or a log file that cannot be opened. Everything after
//! that reports failures on the fallback channel instead of propagating
//! them.
//!
//! # Examples
//!
//! ```
//! use scrollbreak::{Logging, LoggingConfig};
//!
//! let logging = Logging::init(LoggingConfig::new())?;
//! logging.info("starting up");
//! {
//!     let _session = logging.scroll_session();
//!     logging.scroll("segment 1/3");
//!     logging.warn("WARN: segment 2 needed a retry");
//! }
//! logging.info("done");
//! logging.shutdown();
//! # Ok::<(), scrollbreak::InitError>(())
//! ```
//!
//! # See also
//!
//! - [`scrollbreak_interrupt`] for the gate, router, and worker underneath.
//! - [`scrollbreak_logging`] for the dispatcher, log file, and notifier.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use is_terminal::IsTerminal;
use thiserror::Error;

use scrollbreak_interrupt::Interrupter;
use scrollbreak_logging::{Dispatcher, Notifier, RollingFile};

pub use scrollbreak_core::{Class, Console, Record, Severity};
pub use scrollbreak_interrupt::{
    DEFAULT_GRACE, DEFAULT_YIELD_SLACK, EmitError, InterrupterConfig, ScrollOutcome,
};
pub use scrollbreak_logging::{
    Dispatch, FileConfig, GrowlConfig, LoggingConfig, Notification, NotifyError,
};
#[cfg(feature = "tracing")]
pub use scrollbreak_logging::{ScrollbreakLayer, init_tracing, init_tracing_with_filter};

/// Why a [`Logging`] value could not be constructed.
#[derive(Debug, Error)]
pub enum InitError {
    /// Spawning the interrupter worker thread failed.
    #[error("failed to spawn the interrupter worker: {0}")]
    Spawn(#[source] io::Error),
    /// The configured log file could not be opened.
    #[error("failed to open log file '{}': {source}", path.display())]
    LogFile {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// The logging facade: consoles, interrupter, log file, and notifier in
/// one value.
///
/// Logging calls are infallible by design; see the crate-level notes on
/// error handling. Dropping the facade (and any dispatcher handles cloned
/// out of it) shuts the worker down, but calling [`Logging::shutdown`] at
/// the end of the program makes the teardown point explicit.
#[derive(Debug)]
pub struct Logging {
    dispatcher: Arc<Dispatcher>,
    interrupter: Arc<Interrupter>,
    notifier: Option<Notifier>,
}

impl Logging {
    /// Constructs a facade emitting to the process stdout and stderr.
    pub fn init(config: LoggingConfig) -> Result<Self, InitError> {
        Self::with_consoles(config, Console::stdout(), Console::stderr())
    }

    /// Constructs a facade emitting to the given consoles.
    ///
    /// Embedders and tests use this to capture output instead of printing.
    pub fn with_consoles(
        config: LoggingConfig,
        out: Console,
        err: Console,
    ) -> Result<Self, InitError> {
        let interrupter =
            Arc::new(Interrupter::spawn(config.interrupter()).map_err(InitError::Spawn)?);
        let mut dispatcher = Dispatcher::new(Arc::clone(&interrupter), out, err)
            .with_debug_mode(config.debug_mode());
        if let Some(file_config) = config.file() {
            let file = RollingFile::open(file_config).map_err(|source| InitError::LogFile {
                path: file_config.path().to_path_buf(),
                source,
            })?;
            dispatcher = dispatcher.with_file(file);
        }
        let notifier = config.growl().cloned().map(Notifier::new);
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            interrupter,
            notifier,
        })
    }

    /// Emits a scroll line: written if the scroll lock is free, discarded
    /// if an interruption currently holds it.
    pub fn scroll(&self, message: impl Into<String>) {
        let _ = self.dispatcher.dispatch(Record::scroll(message));
    }

    /// Emits a debug message (discarded unless debug mode is on).
    pub fn debug(&self, message: impl Into<String>) {
        let _ = self.dispatcher.dispatch(Record::debug(message));
    }

    /// Emits an informational message.
    pub fn info(&self, message: impl Into<String>) {
        let _ = self.dispatcher.dispatch(Record::info(message));
    }

    /// Emits a warning.
    pub fn warn(&self, message: impl Into<String>) {
        let _ = self.dispatcher.dispatch(Record::warning(message));
    }

    /// Emits an error to the stderr console.
    pub fn error(&self, message: impl Into<String>) {
        let _ = self.dispatcher.dispatch(Record::error(message));
    }

    /// Emits an error with its cause appended, `message: cause`.
    pub fn error_with(&self, message: impl Into<String>, cause: impl std::fmt::Display) {
        let message = format!("{}: {cause}", message.into());
        let _ = self.dispatcher.dispatch(Record::error(message));
    }

    /// Sends a desktop notification, if a notifier is configured.
    ///
    /// Delivery is best effort. Failures are surfaced on the debug rail
    /// rather than returned, so a dead notification daemon cannot disturb
    /// logging.
    pub fn notify(&self, notification: &Notification) {
        if let Some(notifier) = &self.notifier {
            if let Err(error) = notifier.send(notification) {
                self.debug(format!("notification not delivered: {error}"));
            }
        }
    }

    /// Starts a scroll session. Harmless when one is already active.
    pub fn begin_scroll(&self) {
        self.interrupter.begin_session();
    }

    /// Ends the scroll session. Harmless when none is active; an
    /// interruption episode already underway finishes on its own schedule.
    pub fn end_scroll(&self) {
        self.interrupter.end_session();
    }

    /// Starts a scroll session and returns a guard that ends it on drop.
    pub fn scroll_session(&self) -> ScrollSession<'_> {
        self.begin_scroll();
        ScrollSession { logging: self }
    }

    /// Whether a scroll session is active.
    #[must_use]
    pub fn scroll_active(&self) -> bool {
        self.interrupter.session_active()
    }

    /// How many scroll lines have been discarded at the gate so far.
    #[must_use]
    pub fn dropped_scroll_lines(&self) -> u64 {
        self.interrupter.dropped_lines()
    }

    /// The dispatcher behind the facade, for wiring up embedders and the
    /// tracing bridge.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Stops the interrupter worker and waits for it to exit. Records
    /// dispatched afterwards are written directly to their console.
    pub fn shutdown(&self) {
        self.interrupter.shutdown();
    }
}

/// RAII guard for a scroll session; ends the session when dropped.
#[must_use = "the scroll session ends when this guard drops"]
#[derive(Debug)]
pub struct ScrollSession<'a> {
    logging: &'a Logging,
}

impl Drop for ScrollSession<'_> {
    fn drop(&mut self) {
        self.logging.end_scroll();
    }
}

/// Whether the process stdout is attached to a terminal.
///
/// Programs typically skip scroll sessions entirely when piped, the same
/// way progress bars are disabled outside a terminal.
#[must_use]
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}
