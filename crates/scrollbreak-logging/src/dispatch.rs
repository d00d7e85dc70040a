//! crates/scrollbreak-logging/src/dispatch.rs
//! Severity-based routing of records to consoles and the log file.
//!
//! The dispatcher owns the destination decision the way the classic
//! two-handler console setup did: everything up to warnings lands on the
//! stdout console, errors land on the stderr console, debug records are
//! discarded unless debug mode is on, and the log file receives every
//! surviving record except scroll lines. Scroll-class records go through
//! the interrupter's gate; priority records go through its router.

use std::io::{self, Write};
use std::sync::Arc;

use scrollbreak_core::{Console, Record, Severity};
use scrollbreak_interrupt::{EmitError, Interrupter, ScrollOutcome};

use super::rolling::RollingFile;

/// What became of a dispatched record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub enum Dispatch {
    /// The record reached its console (or was queued for the interrupter).
    Written,
    /// A scroll line lost the gate race and was discarded.
    DroppedScroll,
    /// A debug record was discarded because debug mode is off.
    Suppressed,
    /// The console write failed; the failure went to the fallback channel.
    Failed,
}

impl Dispatch {
    /// Whether the record made it to a destination.
    #[must_use]
    pub const fn was_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Routes records to the right console, through the interrupter, and into
/// the log file.
#[derive(Debug)]
pub struct Dispatcher {
    interrupter: Arc<Interrupter>,
    out: Arc<Console>,
    err: Arc<Console>,
    file: Option<RollingFile>,
    debug_mode: bool,
}

impl Dispatcher {
    /// Creates a dispatcher emitting to `out` and `err`.
    pub fn new(interrupter: Arc<Interrupter>, out: Console, err: Console) -> Self {
        Self {
            interrupter,
            out: Arc::new(out),
            err: Arc::new(err),
            file: None,
            debug_mode: false,
        }
    }

    /// Attaches the log file.
    #[must_use]
    pub fn with_file(mut self, file: RollingFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Enables the debug rail.
    #[must_use]
    pub const fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Whether debug records are emitted.
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// The interrupter records are routed through.
    #[must_use]
    pub fn interrupter(&self) -> &Arc<Interrupter> {
        &self.interrupter
    }

    /// Routes one record.
    ///
    /// Failures never propagate: a console or file write error is reported
    /// once on the fallback channel (stderr) and the caller's flow
    /// continues. After the interrupter has shut down, records are written
    /// directly to their console so late logging still lands somewhere.
    pub fn dispatch(&self, record: Record) -> Dispatch {
        if record.severity() == Severity::Debug && !self.debug_mode {
            return Dispatch::Suppressed;
        }
        if !record.class().is_scroll() {
            self.append_to_file(&record);
        }
        let sink = self.sink_for(&record);

        if self.interrupter.is_shut_down() {
            return match sink.write_line(record.message()) {
                Ok(()) => Dispatch::Written,
                Err(error) => {
                    report("console write failed", &error);
                    Dispatch::Failed
                }
            };
        }

        if record.class().is_scroll() {
            match self.interrupter.emit_scroll(record, sink) {
                Ok(ScrollOutcome::Dropped) => Dispatch::DroppedScroll,
                Ok(_) => Dispatch::Written,
                Err(EmitError::ShutDown) => Dispatch::Failed,
                Err(EmitError::Io(error)) => {
                    report("scroll write failed", &error);
                    Dispatch::Failed
                }
            }
        } else {
            match self.interrupter.emit_priority(record, sink) {
                Ok(()) => Dispatch::Written,
                Err(EmitError::ShutDown) => Dispatch::Failed,
                Err(EmitError::Io(error)) => {
                    report("console write failed", &error);
                    Dispatch::Failed
                }
            }
        }
    }

    fn sink_for(&self, record: &Record) -> &Arc<Console> {
        if record.severity() == Severity::Error {
            &self.err
        } else {
            &self.out
        }
    }

    fn append_to_file(&self, record: &Record) {
        if let Some(file) = &self.file {
            if let Err(error) = file.append_record(record) {
                report("log file append failed", &error);
            }
        }
    }
}

fn report(context: &str, error: &io::Error) {
    let _ = writeln!(io::stderr().lock(), "scrollbreak: {context}: {error}");
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::FileConfig;
    use scrollbreak_core::CaptureBuffer;
    use scrollbreak_interrupt::InterrupterConfig;

    fn dispatcher() -> (Dispatcher, CaptureBuffer, CaptureBuffer) {
        let interrupter =
            Interrupter::spawn(InterrupterConfig::new()).expect("spawn worker");
        let out = CaptureBuffer::new();
        let err = CaptureBuffer::new();
        let dispatcher = Dispatcher::new(Arc::new(interrupter), out.console(), err.console());
        (dispatcher, out, err)
    }

    #[test]
    fn info_goes_to_the_stdout_console() {
        let (dispatcher, out, err) = dispatcher();
        let outcome = dispatcher.dispatch(Record::info("status line"));
        assert_eq!(outcome, Dispatch::Written);
        assert_eq!(out.contents(), "status line\n");
        assert!(err.is_empty());
    }

    #[test]
    fn errors_go_to_the_stderr_console() {
        let (dispatcher, out, err) = dispatcher();
        let outcome = dispatcher.dispatch(Record::error("boom"));
        assert_eq!(outcome, Dispatch::Written);
        assert_eq!(err.contents(), "boom\n");
        assert!(out.is_empty());
    }

    #[test]
    fn debug_is_suppressed_unless_enabled() {
        let (dispatcher, out, _err) = dispatcher();
        assert_eq!(
            dispatcher.dispatch(Record::debug("hidden")),
            Dispatch::Suppressed
        );
        assert!(out.is_empty());

        let dispatcher = dispatcher.with_debug_mode(true);
        assert_eq!(
            dispatcher.dispatch(Record::debug("shown")),
            Dispatch::Written
        );
        assert_eq!(out.contents(), "shown\n");
    }

    #[test]
    fn scroll_lines_skip_the_log_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("dispatch.log");
        let file =
            RollingFile::open(&FileConfig::new(&path)).expect("open rolling file");
        let (dispatcher, _out, _err) = dispatcher();
        let dispatcher = dispatcher.with_file(file);

        assert_eq!(
            dispatcher.dispatch(Record::scroll("segment 1/9")),
            Dispatch::Written
        );
        assert_eq!(dispatcher.dispatch(Record::info("archive done")), Dispatch::Written);
        assert_eq!(dispatcher.dispatch(Record::error("one failure")), Dispatch::Written);

        let logged = fs::read_to_string(&path).expect("read log file");
        assert!(!logged.contains("segment 1/9"));
        assert!(logged.contains("INFO archive done\n"));
        assert!(logged.contains("ERROR one failure\n"));
    }

    #[test]
    fn dispatch_after_shutdown_writes_directly() {
        let (dispatcher, out, _err) = dispatcher();
        dispatcher.interrupter().shutdown();
        assert_eq!(
            dispatcher.dispatch(Record::info("late news")),
            Dispatch::Written
        );
        assert_eq!(out.contents(), "late news\n");
    }
}
