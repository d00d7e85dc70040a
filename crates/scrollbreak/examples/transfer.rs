//! Simulates a transfer: a steady progress scroll interrupted by warnings,
//! with a summary at the end.
//!
//! Run with: `cargo run -p scrollbreak --example transfer`

use std::thread;
use std::time::Duration;

use scrollbreak::{InterrupterConfig, Logging, LoggingConfig};

fn main() -> Result<(), scrollbreak::InitError> {
    let config = LoggingConfig::new()
        .with_interrupter(InterrupterConfig::new().with_grace(Duration::from_secs(1)));
    let logging = Logging::init(config)?;

    if !scrollbreak::stdout_is_terminal() {
        logging.info("stdout is not a terminal; scrolling anyway for the demo");
    }

    logging.info("transfer starting");
    {
        let _session = logging.scroll_session();
        for n in 1..=30 {
            logging.scroll(format!("segment {n:>2}/30"));
            if n == 10 {
                logging.warn("WARN: segment 10 was slow");
            }
            if n == 11 {
                logging.warn("WARN: segment 11 retried");
            }
            thread::sleep(Duration::from_millis(80));
        }
    }
    logging.info(format!(
        "transfer complete, {} scroll lines dropped during interruptions",
        logging.dropped_scroll_lines()
    ));
    logging.shutdown();
    Ok(())
}
