//! crates/scrollbreak-core/src/record.rs
//! The immutable message unit consumed by exactly one emission path.

use std::time::SystemTime;

use crate::severity::{Class, Severity};

/// A single log message together with its severity and creation time.
///
/// Records are created at the call site and handed to one emission path
/// (direct console write, scroll gate, or the interrupter's pending queue),
/// which consumes them. The timestamp is captured at construction so queued
/// records keep the time they were produced, not the time they were finally
/// written.
///
/// # Examples
///
/// ```
/// use scrollbreak_core::{Record, Severity};
///
/// let record = Record::warning("3 files vanished");
/// assert_eq!(record.severity(), Severity::Warning);
/// assert_eq!(record.message(), "3 files vanished");
/// ```
#[derive(Clone, Debug)]
pub struct Record {
    severity: Severity,
    message: String,
    timestamp: SystemTime,
}

impl Record {
    /// Creates a record with the given severity, stamped with the current time.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::with_timestamp(severity, message, SystemTime::now())
    }

    /// Creates a record with an explicit timestamp.
    ///
    /// Useful for tests and for replaying messages captured elsewhere.
    #[must_use]
    pub fn with_timestamp(
        severity: Severity,
        message: impl Into<String>,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            timestamp,
        }
    }

    /// Creates a scroll-class progress record.
    #[must_use]
    pub fn scroll(message: impl Into<String>) -> Self {
        Self::new(Severity::Scroll, message)
    }

    /// Creates a debug record.
    #[must_use]
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }

    /// Creates an informational record.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Creates a warning record.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates an error record.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Returns the record's severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the interruption class, shorthand for `severity().class()`.
    #[must_use]
    pub const fn class(&self) -> Class {
        self.severity.class()
    }

    /// Returns the message payload.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the time the record was created.
    #[must_use]
    pub const fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}
