//! Routes tracing events through the scroll-aware dispatcher.
//!
//! Run with:
//! `cargo run -p scrollbreak-logging --example tracing_demo --features tracing`

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use scrollbreak_core::{Console, Record};
use scrollbreak_interrupt::{Interrupter, InterrupterConfig};
use scrollbreak_logging::{Dispatcher, init_tracing};

fn main() -> std::io::Result<()> {
    let interrupter = Arc::new(Interrupter::spawn(
        InterrupterConfig::new().with_grace(Duration::from_millis(750)),
    )?);
    let dispatcher = Arc::new(
        Dispatcher::new(Arc::clone(&interrupter), Console::stdout(), Console::stderr())
            .with_debug_mode(true),
    );
    init_tracing(Arc::clone(&dispatcher));

    interrupter.begin_session();
    for n in 1..=40 {
        let _ = dispatcher.dispatch(Record::scroll(format!("segment {n:>2}/40")));
        if n % 13 == 0 {
            tracing::warn!("segment {n} needed a retry");
        }
        thread::sleep(Duration::from_millis(50));
    }
    interrupter.end_session();

    tracing::info!(
        "scroll finished, {} lines dropped during interruptions",
        interrupter.dropped_lines()
    );
    interrupter.shutdown();
    Ok(())
}
