//! crates/scrollbreak-core/src/console.rs
//! Internally synchronized console streams shared by every emission path.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

#[cfg(any(test, feature = "test-support"))]
use std::sync::Arc;

/// A shared, internally synchronized output stream.
///
/// Every write locks the underlying writer for the duration of one line (or
/// one padded block), so concurrent emitters never interleave partial
/// output. The scroll subsystem layers its own coordination on top of this
/// guarantee; the console itself knows nothing about sessions or
/// interruptions.
///
/// Writes flush immediately. Scroll output is only useful if it reaches the
/// terminal as it happens, and interrupting messages must not sit in a
/// buffer while the scroll lock is held.
///
/// # Examples
///
/// ```
/// use scrollbreak_core::Console;
///
/// let console = Console::stdout();
/// console.write_line("transfer starting")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Console {
    label: &'static str,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    /// Creates a console backed by the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_label("stdout", io::stdout())
    }

    /// Creates a console backed by the process's standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_label("stderr", io::stderr())
    }

    /// Creates a console backed by an arbitrary writer.
    ///
    /// The writer must be `Send` because the interrupter worker writes
    /// queued records from its own thread.
    ///
    /// # Examples
    ///
    /// ```
    /// use scrollbreak_core::Console;
    ///
    /// let quiet = Console::from_writer(std::io::sink());
    /// quiet.write_line("discarded")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    #[must_use]
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_label("writer", writer)
    }

    fn with_label(label: &'static str, writer: impl Write + Send + 'static) -> Self {
        Self {
            label,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Writes `text` followed by a newline and flushes.
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        let mut writer = self.lock_writer();
        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Writes `text` exactly as given and flushes.
    ///
    /// Used for interruption blocks that carry their own padding newlines;
    /// the whole block lands under one lock acquisition.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let mut writer = self.lock_writer();
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }

    // A writer that panicked mid-write poisons the mutex; later emitters
    // still need the stream, so recover the guard instead of propagating.
    fn lock_writer(&self) -> std::sync::MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").field("label", &self.label).finish()
    }
}

/// A cloneable in-memory writer for inspecting console output in tests.
///
/// All clones share one buffer, so a capture handed to
/// [`Console::from_writer`] can still be read afterwards through the clone
/// the test kept.
///
/// Available to dependent crates through the `test-support` feature.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    data: Arc<Mutex<Vec<u8>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl CaptureBuffer {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Console`] writing into this buffer.
    #[must_use]
    pub fn console(&self) -> Console {
        Console::with_label("capture", self.clone())
    }

    /// Returns everything written so far as a string.
    #[must_use]
    pub fn contents(&self) -> String {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Returns the captured output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Returns `true` when nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.is_empty()
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.clear();
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // --- Console tests ---

    #[test]
    fn write_line_appends_newline() {
        let capture = CaptureBuffer::new();
        let console = capture.console();

        console.write_line("first").expect("write succeeds");
        console.write_line("second").expect("write succeeds");

        assert_eq!(capture.contents(), "first\nsecond\n");
    }

    #[test]
    fn write_str_emits_text_verbatim() {
        let capture = CaptureBuffer::new();
        let console = capture.console();

        console.write_str("\n\nblock\n").expect("write succeeds");

        assert_eq!(capture.contents(), "\n\nblock\n");
    }

    #[test]
    fn concurrent_lines_never_interleave() {
        let capture = CaptureBuffer::new();
        let console = std::sync::Arc::new(capture.console());

        let mut handles = Vec::new();
        for writer in 0..4 {
            let console = std::sync::Arc::clone(&console);
            handles.push(thread::spawn(move || {
                for n in 0..50 {
                    console
                        .write_line(&format!("writer-{writer} line-{n}"))
                        .expect("write succeeds");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        let lines = capture.lines();
        assert_eq!(lines.len(), 200);
        for line in &lines {
            let mut parts = line.split(' ');
            let writer = parts.next().expect("writer tag");
            let n = parts.next().expect("line tag");
            assert!(writer.starts_with("writer-"), "mangled line: {line}");
            assert!(n.starts_with("line-"), "mangled line: {line}");
            assert!(parts.next().is_none(), "mangled line: {line}");
        }
    }

    #[test]
    fn debug_shows_stream_label() {
        assert!(format!("{:?}", Console::stdout()).contains("stdout"));
        assert!(format!("{:?}", Console::stderr()).contains("stderr"));
        let capture = CaptureBuffer::new();
        assert!(format!("{:?}", capture.console()).contains("capture"));
    }

    // --- CaptureBuffer tests ---

    #[test]
    fn clones_share_one_buffer() {
        let capture = CaptureBuffer::new();
        let mut clone = capture.clone();

        clone.write_all(b"shared").expect("write succeeds");

        assert_eq!(capture.contents(), "shared");
        assert!(!capture.is_empty());
    }

    #[test]
    fn clear_discards_captured_output() {
        let capture = CaptureBuffer::new();
        capture.console().write_line("gone").expect("write succeeds");

        capture.clear();

        assert!(capture.is_empty());
        assert!(capture.lines().is_empty());
    }
}
