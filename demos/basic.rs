//! Minimal sluice example: a gated channel and a gated pump.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic

use std::sync::Arc;

use sluice::{Gate, Middleware, Options, channel, forward, with_capacity, with_middleware, with_name};
use tokio::sync::mpsc;

struct Order {
    id: u32,
    quantity: i32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let valid = Middleware::new(|o: &Order| o.quantity > 0).named("positive_quantity");
    let small = Middleware::new(|o: &Order| o.quantity <= 100).named("within_limit");

    // Gated channel: rejected orders never reach the consumer.
    let (tx, mut rx) = channel(Options::build([
        with_name("orders"),
        with_capacity(16),
        with_middleware([valid.clone(), small.clone()]),
    ]));

    tokio::spawn(async move {
        for (id, quantity) in [(1, 5), (2, -3), (3, 250), (4, 42)] {
            if tx.send(Order { id, quantity }).await.is_err() {
                break;
            }
        }
    });

    while let Some(order) = rx.recv().await {
        println!("accepted order {} ({} units)", order.id, order.quantity);
    }
    println!("channel stats: {:?}", rx.stats());

    // Gated pump between two plain channels, stopped by Ctrl-C or upstream close.
    let gate = Arc::new(Gate::new(Options::build([
        with_name("audit"),
        with_middleware([valid, small]),
    ])));
    let (up_tx, up_rx) = mpsc::channel(16);
    let (down_tx, mut down_rx) = mpsc::channel(16);

    let pump = tokio::spawn(forward(gate, up_rx, down_tx, async {
        let _ = tokio::signal::ctrl_c().await;
    }));

    for (id, quantity) in [(10, 1), (11, 0), (12, 99)] {
        up_tx.send(Order { id, quantity }).await.expect("pump stopped early");
    }
    drop(up_tx);

    while let Some(order) = down_rx.recv().await {
        println!("forwarded order {} ({} units)", order.id, order.quantity);
    }

    match pump.await.expect("pump panicked") {
        Ok(done) => {
            println!("pump stats: {:?}", done.stats);
            if let Some(order) = done.undelivered {
                println!("order {} passed but was not delivered", order.id);
            }
        }
        Err(e) => eprintln!("pump error: {e}"),
    }
}
