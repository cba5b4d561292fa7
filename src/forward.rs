//! Gated pump between two channels.
//!
//! # Shutdown
//!
//! [`forward`] runs until one of three things happens:
//! 1. the `shutdown` future resolves: no further value is read from upstream;
//! 2. every upstream sender is dropped and the buffer is drained;
//! 3. the downstream receiver goes away, which is reported as
//!    [`Error::Closed`].
//!
//! Values still sitting in the upstream buffer when shutdown fires are
//! dropped together with the upstream receiver. A value that already passed
//! the gate but was still waiting for room downstream is not dropped: it is
//! handed back in [`Forwarded::undelivered`] and logged at `warn`.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::error::Error;
use crate::gate::{Gate, StatsSnapshot};

/// How a [`forward`] run ended.
#[derive(Debug)]
pub struct Forwarded<T> {
    /// The gate's counters at the time the pump stopped.
    pub stats: StatsSnapshot,
    /// A value that passed the gate but was never delivered because shutdown
    /// fired while downstream was full. It is counted in `stats.passed`.
    pub undelivered: Option<T>,
}

/// Moves every value that passes `gate` from `upstream` to `downstream`.
///
/// ```rust
/// use std::sync::Arc;
/// use sluice::{Gate, Middleware, Options, forward, with_middleware};
/// use tokio::sync::mpsc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let gate = Arc::new(Gate::new(Options::build([
///     with_middleware([Middleware::new(|s: &String| !s.is_empty())]),
/// ])));
/// let (up_tx, up_rx) = mpsc::channel(8);
/// let (down_tx, mut down_rx) = mpsc::channel(8);
///
/// up_tx.send(String::new()).await.unwrap();
/// up_tx.send("hello".to_owned()).await.unwrap();
/// drop(up_tx);
///
/// let done = forward(gate, up_rx, down_tx, std::future::pending()).await.unwrap();
/// assert_eq!(done.stats.passed, 1);
/// assert!(done.undelivered.is_none());
/// assert_eq!(down_rx.recv().await.as_deref(), Some("hello"));
/// # }
/// ```
pub async fn forward<T>(
    gate: Arc<Gate<T>>,
    mut upstream: mpsc::Receiver<T>,
    downstream: mpsc::Sender<T>,
    shutdown: impl Future<Output = ()>,
) -> Result<Forwarded<T>, Error> {
    info!(channel = %gate.name(), "forwarding started");

    tokio::pin!(shutdown);

    let mut undelivered = None;
    loop {
        tokio::select! {
            // Shutdown first, so a pending signal wins over a full upstream.
            biased;

            () = &mut shutdown => {
                info!(channel = %gate.name(), "shutdown requested, forwarding stopped");
                break;
            }

            received = upstream.recv() => {
                let Some(value) = received else {
                    info!(channel = %gate.name(), "upstream closed");
                    break;
                };

                if !gate.admit(&value) {
                    continue;
                }

                // A slow consumer parks the pump here; shutdown still wins,
                // and the value goes back to the caller.
                let permit = tokio::select! {
                    biased;

                    () = &mut shutdown => {
                        warn!(channel = %gate.name(), "shutdown requested while waiting on downstream, value not delivered");
                        undelivered = Some(value);
                        break;
                    }

                    permit = downstream.reserve() => permit?,
                };
                permit.send(value);
            }
        }
    }

    Ok(Forwarded { stats: gate.stats(), undelivered })
}
