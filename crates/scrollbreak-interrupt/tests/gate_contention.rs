//! Scroll gate behavior under contention and at volume.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use scrollbreak_core::{CaptureBuffer, Record};
use scrollbreak_interrupt::{Interrupter, InterrupterConfig, ScrollOutcome};

fn spawn_with_grace(grace: Duration) -> Interrupter {
    Interrupter::spawn(
        InterrupterConfig::new()
            .with_grace(grace)
            .with_yield_slack(Duration::ZERO),
    )
    .expect("spawn worker")
}

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

#[test]
fn hundred_scroll_lines_land_uncontended() {
    let interrupter = spawn_with_grace(Duration::from_millis(50));
    let capture = CaptureBuffer::new();
    let sink = Arc::new(capture.console());

    interrupter.begin_session();
    for n in 0..100 {
        let outcome = interrupter
            .emit_scroll(Record::scroll(format!("copied {n}/100")), &sink)
            .expect("scroll write");
        assert_eq!(outcome, ScrollOutcome::Written);
    }

    assert_eq!(capture.lines().len(), 100);
    assert_eq!(interrupter.dropped_lines(), 0);
    interrupter.shutdown();
}

#[test]
fn scroll_without_a_session_bypasses_the_gate() {
    let interrupter = spawn_with_grace(Duration::from_millis(50));
    let capture = CaptureBuffer::new();
    let sink = Arc::new(capture.console());

    for n in 0..3 {
        let outcome = interrupter
            .emit_scroll(Record::scroll(format!("line {n}")), &sink)
            .expect("ordinary write");
        assert_eq!(outcome, ScrollOutcome::Bypassed);
    }

    assert_eq!(capture.lines().len(), 3);
    assert_eq!(interrupter.dropped_lines(), 0);
    interrupter.shutdown();
}

#[test]
fn drops_accumulate_while_an_episode_holds_the_lock() {
    let interrupter = spawn_with_grace(Duration::from_millis(150));
    let capture = CaptureBuffer::new();
    let sink = Arc::new(capture.console());

    interrupter.begin_session();
    interrupter
        .emit_priority(Record::warning("hold the floor"), &sink)
        .expect("enqueue");
    wait_until("worker to take the lock", || {
        capture.contents().contains("hold the floor")
    });

    for n in 0..2 {
        let outcome = interrupter
            .emit_scroll(Record::scroll(format!("lost {n}")), &sink)
            .expect("drop is not an error");
        assert_eq!(outcome, ScrollOutcome::Dropped);
    }
    assert_eq!(interrupter.dropped_lines(), 2);

    // Outlast the grace window by a wide margin, then confirm the gate
    // reopened and the counter held steady.
    thread::sleep(Duration::from_secs(1));
    let outcome = interrupter
        .emit_scroll(Record::scroll("recovered"), &sink)
        .expect("scroll write");
    assert_eq!(outcome, ScrollOutcome::Written);
    assert_eq!(interrupter.dropped_lines(), 2);

    let contents = capture.contents();
    assert!(!contents.contains("lost 0"));
    assert!(!contents.contains("lost 1"));
    assert!(contents.contains("recovered\n"));
    interrupter.shutdown();
}
