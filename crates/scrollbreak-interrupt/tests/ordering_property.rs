//! Property test: every producer observes its own emission order in the
//! drained output, regardless of how arrivals interleave.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use scrollbreak_core::{CaptureBuffer, Record};
use scrollbreak_interrupt::{Interrupter, InterrupterConfig};

fn wait_until(what: &str, mut predicate: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if predicate() {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("timed out waiting for {what}");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 16,
        .. ProptestConfig::default()
    })]

    #[test]
    fn producers_keep_their_own_order(
        counts in proptest::collection::vec(1usize..8, 2..4),
    ) {
        let interrupter = Arc::new(
            Interrupter::spawn(
                InterrupterConfig::new()
                    .with_grace(Duration::from_millis(5))
                    .with_yield_slack(Duration::ZERO),
            )
            .expect("spawn worker"),
        );
        let capture = CaptureBuffer::new();
        let sink = Arc::new(capture.console());

        interrupter.begin_session();
        let mut producers = Vec::new();
        for (p, n) in counts.iter().copied().enumerate() {
            let interrupter = Arc::clone(&interrupter);
            let sink = Arc::clone(&sink);
            producers.push(thread::spawn(move || {
                for i in 0..n {
                    interrupter
                        .emit_priority(Record::info(format!("p{p}-{i}")), &sink)
                        .expect("enqueue");
                }
            }));
        }
        for producer in producers {
            producer.join().expect("producer thread");
        }

        wait_until("every message to drain", || {
            let contents = capture.contents();
            counts.iter().copied().enumerate().all(|(p, n)| {
                (0..n).all(|i| contents.contains(&format!("p{p}-{i}")))
            })
        });

        let contents = capture.contents();
        for (p, n) in counts.iter().copied().enumerate() {
            let mut previous = None;
            for i in 0..n {
                let needle = format!("p{p}-{i}");
                prop_assert_eq!(
                    contents.matches(&needle).count(),
                    1,
                    "{} must drain exactly once",
                    needle
                );
                let position = contents.find(&needle).expect("needle present");
                if let Some(previous) = previous {
                    prop_assert!(
                        position > previous,
                        "{} drained out of order",
                        needle
                    );
                }
                previous = Some(position);
            }
        }
        interrupter.shutdown();
    }
}
