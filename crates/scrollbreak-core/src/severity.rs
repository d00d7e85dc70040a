//! crates/scrollbreak-core/src/severity.rs
//! Severity ladder and the scroll/priority classification derived from it.

use std::fmt;

/// Severity of a [`Record`](crate::Record), ordered from least to most urgent.
///
/// The ladder deliberately places [`Severity::Scroll`] between debug and
/// informational output: scroll lines are more interesting than debug noise
/// but are the only severity the subsystem is allowed to drop on contention.
/// The numeric ranks leave gaps so additional severities can slot in without
/// renumbering.
///
/// # Examples
///
/// ```
/// use scrollbreak_core::Severity;
///
/// assert!(Severity::Debug < Severity::Scroll);
/// assert!(Severity::Scroll < Severity::Info);
/// assert!(Severity::Warning < Severity::Error);
/// ```
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Severity {
    /// Diagnostic detail, suppressed unless debug mode is enabled.
    Debug = 10,
    /// High-frequency progress output, droppable on contention.
    Scroll = 11,
    /// Routine informational messages.
    Info = 20,
    /// Conditions worth attention that do not abort work.
    Warning = 30,
    /// Failures; routed to the error console.
    Error = 40,
}

impl Severity {
    /// Returns the numeric rank used for threshold comparisons.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns the interruption class this severity belongs to.
    ///
    /// Only [`Severity::Scroll`] is droppable scroll output; everything else
    /// is priority traffic that must never be lost.
    #[must_use]
    pub const fn class(self) -> Class {
        match self {
            Self::Scroll => Class::Scroll,
            Self::Debug | Self::Info | Self::Warning | Self::Error => Class::Priority,
        }
    }

    /// Returns the upper-case level name used in log-file lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Scroll => "SCROLL",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Parses a level name into the corresponding severity.
    ///
    /// Names are matched case-insensitively. Returns `None` for unknown
    /// names.
    ///
    /// # Examples
    ///
    /// ```
    /// use scrollbreak_core::Severity;
    ///
    /// assert_eq!(Severity::from_name("warning"), Some(Severity::Warning));
    /// assert_eq!(Severity::from_name("SCROLL"), Some(Severity::Scroll));
    /// assert_eq!(Severity::from_name("fatal"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "scroll" => Some(Self::Scroll),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two-way split that drives interruption routing.
///
/// Scroll-class records go through the non-blocking scroll gate and may be
/// dropped; priority-class records go through the interrupt router and are
/// emitted exactly once.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Class {
    /// Droppable, high-frequency progress output.
    Scroll,
    /// Ordinary-or-higher output that must never be lost.
    Priority,
}

impl Class {
    /// Returns `true` for scroll-class output.
    #[must_use]
    pub const fn is_scroll(self) -> bool {
        matches!(self, Self::Scroll)
    }
}
