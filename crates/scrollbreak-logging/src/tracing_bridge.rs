//! crates/scrollbreak-logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the scroll-aware dispatcher.
//!
//! This module provides a tracing-subscriber layer that forwards tracing
//! events into a [`Dispatcher`], so applications can keep using the
//! standard tracing macros (`trace!`, `debug!`, `info!`, `warn!`,
//! `error!`) while their output participates in scroll interruption,
//! console splitting, and the log file.
//!
//! # Level mapping
//!
//! - `ERROR` → [`Severity::Error`]
//! - `WARN` → [`Severity::Warning`]
//! - `INFO` → [`Severity::Info`]
//! - `DEBUG` and `TRACE` → [`Severity::Debug`]
//!
//! Events never map to the scroll severity: scroll output is a deliberate
//! act of the owning application, not something a library emits.

use std::sync::Arc;

use scrollbreak_core::{Record, Severity};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::dispatch::Dispatcher;

/// A tracing layer that feeds events through a [`Dispatcher`].
pub struct ScrollbreakLayer {
    dispatcher: Arc<Dispatcher>,
}

impl ScrollbreakLayer {
    /// Creates a layer emitting through `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Map a tracing level to a record severity.
    fn level_to_severity(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warning,
            Level::INFO => Severity::Info,
            // DEBUG and TRACE both land on the debug rail.
            _ => Severity::Debug,
        }
    }
}

impl<S> Layer<S> for ScrollbreakLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let severity = Self::level_to_severity(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            let _ = self.dispatcher.dispatch(Record::new(severity, message));
        }
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber whose only layer is a [`ScrollbreakLayer`].
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Arc::new(Dispatcher::new(interrupter, out, err));
/// scrollbreak_logging::init_tracing(Arc::clone(&dispatcher));
///
/// tracing::info!("transfer complete");
/// ```
pub fn init_tracing(dispatcher: Arc<Dispatcher>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let layer = ScrollbreakLayer::new(dispatcher);

    tracing_subscriber::registry().with(layer).init();
}

/// Installs a global subscriber combining a [`ScrollbreakLayer`] with a
/// caller-supplied filter layer, typically an
/// [`EnvFilter`](tracing_subscriber::EnvFilter).
pub fn init_tracing_with_filter<F>(dispatcher: Arc<Dispatcher>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let layer = ScrollbreakLayer::new(dispatcher);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();
}
