//! # sluice
//!
//! Composable predicate middlewares that gate values flowing through a tokio
//! channel. Nothing more.
//!
//! ## The contract
//!
//! A [`Middleware`] is a predicate over `&T`. Middlewares are registered
//! through functional options into an [`Options`], which a component seals
//! exactly once at construction. From then on every value is checked against
//! the sealed [`Chain`]:
//!
//! - middlewares run in registration order;
//! - the first one that says no stops the value, and later ones never run;
//! - no middlewares at all means every value passes;
//! - stopped values are dropped, counted and logged.
//!
//! Transport, retries and persistence belong to the code around the gate.
//!
//! ## Quick start
//!
//! ```rust
//! use sluice::{Middleware, Options, channel, with_middleware};
//!
//! fn is_even(n: &i32) -> bool { n % 2 == 0 }
//! fn is_positive(n: &i32) -> bool { *n > 0 }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, mut rx) = channel(Options::build([with_middleware([
//!     Middleware::new(is_even).named("is_even"),
//!     Middleware::new(is_positive).named("is_positive"),
//! ])]));
//!
//! tokio::spawn(async move {
//!     for n in [4, -4, 3, 8] {
//!         tx.send(n).await.unwrap();
//!     }
//! });
//!
//! assert_eq!(rx.recv().await, Some(4));
//! assert_eq!(rx.recv().await, Some(8));
//! assert_eq!(rx.recv().await, None);
//! # }
//! ```

mod chain;
mod channel;
mod error;
mod forward;
mod gate;
mod options;
mod verdict;

pub mod middleware;

pub use chain::Chain;
pub use channel::{Receiver, channel};
pub use error::{BoxError, Error, EvalError};
pub use forward::{Forwarded, forward};
pub use gate::{Gate, StatsSnapshot};
pub use middleware::Middleware;
pub use options::{OptionFn, Options, with_capacity, with_middleware, with_name};
pub use verdict::Verdict;
