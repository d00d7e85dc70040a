#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scrollbreak-logging` layers destination policy on top of the
//! [`scrollbreak-interrupt`](scrollbreak_interrupt) machinery. The
//! [`Dispatcher`] routes each [`Record`](scrollbreak_core::Record) by
//! severity: scroll lines go through the interrupter's gate, priority
//! records through its router, errors to the stderr console, and debug
//! records are discarded unless debug mode is on. A [`RollingFile`]
//! captures every surviving non-scroll record with a timestamp, rotating
//! by size when configured, and a [`Notifier`] pushes important events to
//! a growl-style desktop notification daemon.
//!
//! # Design
//!
//! The dispatcher is deliberately infallible at its surface: destination
//! failures are reported once on the fallback channel (stderr) and the
//! caller's flow continues, because a logging call must never take down a
//! transfer. The typed errors ([`NotifyError`], [`std::io::Error`]) stay
//! available on the lower-level types for embedders that route records
//! themselves.
//!
//! # Invariants
//!
//! - A record is rendered into the log file at most once and never when it
//!   is scroll-class.
//! - Rotation keeps at most `backups` numbered files; `<path>.1` is always
//!   the newest backup.
//! - The notifier blocks for at most a few multiples of its configured
//!   timeout.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use scrollbreak_core::{Console, Record};
//! use scrollbreak_interrupt::{Interrupter, InterrupterConfig};
//! use scrollbreak_logging::Dispatcher;
//!
//! let interrupter = Arc::new(Interrupter::spawn(InterrupterConfig::new())?);
//! let dispatcher = Dispatcher::new(interrupter, Console::stdout(), Console::stderr());
//!
//! let outcome = dispatcher.dispatch(Record::info("transfer complete"));
//! assert!(outcome.was_written());
//! dispatcher.interrupter().shutdown();
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - [`scrollbreak_interrupt`] for the gate, router, and worker the
//!   dispatcher routes through.
//! - The `scrollbreak` facade crate for the one-call setup most
//!   applications want.

mod config;
mod dispatch;
mod notify;
mod rolling;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{DEFAULT_NOTIFY_TIMEOUT, FileConfig, GrowlConfig, LoggingConfig};
pub use dispatch::{Dispatch, Dispatcher};
pub use notify::{Notification, Notifier, NotifyError};
pub use rolling::RollingFile;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ScrollbreakLayer, init_tracing, init_tracing_with_filter};
