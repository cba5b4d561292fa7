//! A bounded tokio channel whose receiving half is gated.
//!
//! Senders are plain [`tokio::sync::mpsc::Sender`]s. Every value is judged on
//! the way out: [`Receiver::recv`] only ever yields values that passed every
//! middleware and silently skips the rest.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::gate::{Gate, StatsSnapshot};
use crate::options::Options;

/// Creates a gated channel from `options`.
///
/// ```rust
/// use sluice::{Middleware, Options, channel, with_middleware};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut rx) = channel(Options::build([
///     with_middleware([Middleware::new(|n: &i32| n % 2 == 0)]),
/// ]));
///
/// tokio::spawn(async move {
///     for n in 1..=4 {
///         tx.send(n).await.unwrap();
///     }
/// });
///
/// assert_eq!(rx.recv().await, Some(2));
/// assert_eq!(rx.recv().await, Some(4));
/// assert_eq!(rx.recv().await, None);
/// # }
/// ```
pub fn channel<T>(options: Options<T>) -> (mpsc::Sender<T>, Receiver<T>) {
    let gate = Arc::new(Gate::new(options));
    let (tx, rx) = mpsc::channel(gate.capacity());
    (tx, Receiver { inner: rx, gate })
}

/// The receiving half of a gated channel.
pub struct Receiver<T> {
    inner: mpsc::Receiver<T>,
    gate: Arc<Gate<T>>,
}

impl<T> Receiver<T> {
    /// Waits for the next value that passes the gate.
    ///
    /// Returns `None` once every sender is gone and the buffer is drained.
    pub async fn recv(&mut self) -> Option<T> {
        while let Some(value) = self.inner.recv().await {
            if self.gate.admit(&value) {
                return Some(value);
            }
        }
        None
    }

    /// Takes the next passing value without waiting.
    ///
    /// Rejected values already in the buffer are consumed and skipped.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        loop {
            let value = self.inner.try_recv()?;
            if self.gate.admit(&value) {
                return Ok(value);
            }
        }
    }

    /// Stops new values from being sent. Buffered values can still be received.
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// The gate, shareable with other evaluators.
    pub fn gate(&self) -> &Arc<Gate<T>> {
        &self.gate
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.gate.stats()
    }
}
