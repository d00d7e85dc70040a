#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scrollbreak_interrupt` is the coordination core of the scrollbreak
//! workspace. It decides, for every emission, whether a scroll line is shown
//! or silently dropped, and it hands priority messages to a dedicated
//! background worker that pauses the scroll, prints them with visual
//! separation, and resumes the scroll only after a quiet interval.
//!
//! # Design
//!
//! Two synchronization primitives carry the whole subsystem:
//!
//! - the **scroll lock**, held either by a scroll emission for the instant
//!   of its own write or by the worker for a whole interruption episode
//!   (message burst plus grace period);
//! - the **pending monitor**, a mutex-and-condvar pair protecting the FIFO
//!   queue of records awaiting the worker.
//!
//! Producers never block: scroll emissions use a try-lock and drop the line
//! on contention, priority emissions only enqueue and signal. The worker is
//! the single consumer and the only party that ever blocks, cycling through
//! three phases: idle (no lock held), draining (writing a batch under the
//! lock), and grace (holding the lock while waiting out the debounce
//! window, by default [`DEFAULT_GRACE`]).
//!
//! # Invariants
//!
//! - A priority record emitted while a session is active appears exactly
//!   once, in enqueue order relative to other priority records.
//! - A scroll record offered while the worker holds the scroll lock never
//!   appears; the drop is counted, not reported as an error.
//! - The first interrupting message after scroll output is padded with
//!   leading blank lines; later messages in the same episode are not.
//!
//! # Errors
//!
//! Emission calls return [`EmitError`]: [`EmitError::ShutDown`] once
//! [`Interrupter::shutdown`] has run, or a wrapped [`std::io::Error`] when a
//! direct console write fails. Failures inside the worker are contained:
//! they are reported on standard error and the loop keeps running.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use scrollbreak_core::{Console, Record};
//! use scrollbreak_interrupt::{Interrupter, InterrupterConfig};
//!
//! let config = InterrupterConfig::new().with_grace(Duration::from_millis(50));
//! let interrupter = Interrupter::spawn(config)?;
//! let stdout = Arc::new(Console::stdout());
//!
//! interrupter.begin_session();
//! let outcome = interrupter.emit_scroll(Record::scroll("copied 1/10 files"), &stdout)?;
//! assert!(outcome.was_written());
//! interrupter.emit_priority(Record::warning("1 file vanished"), &stdout)?;
//! interrupter.end_session();
//! interrupter.shutdown();
//! # Ok::<(), scrollbreak_interrupt::EmitError>(())
//! ```

mod config;
mod gate;
mod interrupter;
mod router;
mod state;
mod worker;

pub use config::{DEFAULT_GRACE, DEFAULT_YIELD_SLACK, InterrupterConfig};
pub use gate::ScrollOutcome;
pub use interrupter::{EmitError, Interrupter};
