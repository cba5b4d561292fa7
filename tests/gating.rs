//! End-to-end behaviour of gated channels and pumps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sluice::{
    Gate, Middleware, Options, StatsSnapshot, channel, forward, with_capacity, with_middleware,
    with_name,
};
use tokio::sync::mpsc;

fn is_even(n: &i32) -> bool { n % 2 == 0 }
fn is_positive(n: &i32) -> bool { *n > 0 }

/// Wraps `rule` so every call bumps `calls`.
fn counted(calls: &Arc<AtomicUsize>, rule: fn(&i32) -> bool) -> Middleware<i32> {
    let calls = Arc::clone(calls);
    Middleware::new(move |n: &i32| {
        calls.fetch_add(1, Ordering::SeqCst);
        rule(n)
    })
}

#[tokio::test]
async fn even_and_positive_short_circuit() {
    let even_calls = Arc::new(AtomicUsize::new(0));
    let positive_calls = Arc::new(AtomicUsize::new(0));

    let (tx, mut rx) = channel(Options::build([
        with_capacity(8),
        with_middleware([counted(&even_calls, is_even).named("is_even")]),
        with_middleware([counted(&positive_calls, is_positive).named("is_positive")]),
    ]));

    for n in [4, -4, 3] {
        tx.send(n).await.unwrap();
    }
    drop(tx);

    assert_eq!(rx.recv().await, Some(4));
    assert_eq!(rx.recv().await, None);

    // 3 is stopped by is_even, so is_positive only saw 4 and -4.
    assert_eq!(even_calls.load(Ordering::SeqCst), 3);
    assert_eq!(positive_calls.load(Ordering::SeqCst), 2);
    assert_eq!(rx.stats(), StatsSnapshot { passed: 1, rejected: 2, failed: 0 });
}

#[tokio::test]
async fn failures_are_dropped_but_reported_as_retryable() {
    let gate = Gate::new(Options::build([with_middleware([Middleware::fallible(
        |id: &u32| -> Result<bool, std::io::Error> {
            if *id == 0 {
                Err(std::io::Error::other("registry unavailable"))
            } else {
                Ok(*id < 100)
            }
        },
    )
    .named("registry")])]));

    assert!(gate.evaluate(&1).is_passed());

    let rejected = gate.evaluate(&500);
    assert!(!rejected.is_passed() && !rejected.is_retryable());

    let failed = gate.evaluate(&0);
    assert!(failed.is_retryable());
    assert_eq!(failed.name(), Some("registry"));
    assert!(failed.to_string().contains("registry unavailable"));

    assert_eq!(gate.stats(), StatsSnapshot { passed: 1, rejected: 1, failed: 1 });
}

#[tokio::test]
async fn one_gate_shared_by_a_pipeline_of_pumps() {
    let gate = Arc::new(Gate::new(Options::build([
        with_name("shared"),
        with_middleware([Middleware::new(is_positive)]),
    ])));

    let (src_tx, src_rx) = mpsc::channel(16);
    let (mid_tx, mid_rx) = mpsc::channel(16);
    let (out_tx, mut out_rx) = mpsc::channel(16);

    let first = tokio::spawn(forward(Arc::clone(&gate), src_rx, mid_tx, std::future::pending()));
    let second = tokio::spawn(forward(Arc::clone(&gate), mid_rx, out_tx, std::future::pending()));

    for n in [-2, 1, 0, 2, 3] {
        src_tx.send(n).await.unwrap();
    }
    drop(src_tx);

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let mut got = Vec::new();
    while let Some(n) = out_rx.recv().await {
        got.push(n);
    }
    assert_eq!(got, [1, 2, 3]);

    // Three values passed twice, two were stopped at the first hop.
    assert_eq!(gate.stats(), StatsSnapshot { passed: 6, rejected: 2, failed: 0 });
}

#[tokio::test]
async fn concurrent_producers_only_deliver_passing_values() {
    let (tx, mut rx) = channel(Options::build([
        with_capacity(4),
        with_middleware([Middleware::new(is_even)]),
    ]));

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let tx = tx.clone();
            tokio::spawn(async move {
                for n in 0..50 {
                    tx.send(p * 50 + n).await.unwrap();
                }
            })
        })
        .collect();
    drop(tx);

    let mut received = 0;
    while let Some(n) = rx.recv().await {
        assert!(is_even(&n));
        received += 1;
    }
    for producer in producers {
        producer.await.unwrap();
    }

    assert_eq!(received, 100);
    assert_eq!(rx.stats().dropped(), 100);
}
