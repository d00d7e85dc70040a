#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scrollbreak_core` provides the shared vocabulary of the scrollbreak
//! workspace: the [`Record`] message unit, the [`Severity`] ladder that ranks
//! it, the two-way [`Class`] split driving interruption routing, and the
//! [`Console`] stream abstraction all emission paths write through.
//!
//! # Design
//!
//! A [`Record`] is immutable after construction and consumed by exactly one
//! emission path. [`Console`] owns its writer behind a mutex so concurrent
//! emitters never interleave partial lines; higher layers add their own
//! coordination on top (the scroll lock lives in `scrollbreak_interrupt`, not
//! here). Nothing in this crate blocks beyond a single short write.
//!
//! # Invariants
//!
//! - [`Severity`] ranks are totally ordered: `Debug < Scroll < Info <
//!   Warning < Error`.
//! - [`Severity::Scroll`] is the only severity classified as
//!   [`Class::Scroll`]; every other severity is [`Class::Priority`].
//! - A [`Console`] write emits the whole line (or padded block) under one
//!   lock acquisition, so lines from concurrent writers never interleave.
//!
//! # Errors
//!
//! Console writes surface [`std::io::Error`] from the underlying writer.
//! Record and severity construction is infallible.
//!
//! # Examples
//!
//! ```
//! use scrollbreak_core::{Class, Record, Severity};
//!
//! let progress = Record::scroll("copied 4/128 files");
//! assert_eq!(progress.class(), Class::Scroll);
//!
//! let alarm = Record::error("disk full");
//! assert_eq!(alarm.class(), Class::Priority);
//! assert!(alarm.severity() > progress.severity());
//! ```

mod console;
mod record;
mod severity;

pub use console::Console;
pub use record::Record;
pub use severity::{Class, Severity};

#[cfg(any(test, feature = "test-support"))]
pub use console::CaptureBuffer;
