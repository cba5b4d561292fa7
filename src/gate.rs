//! The owning component: a sealed chain plus bookkeeping.
//!
//! Rejected values are dropped. The gate counts every outcome and logs each
//! drop; nothing is re-routed.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use crate::chain::Chain;
use crate::options::Options;
use crate::verdict::Verdict;

/// Outcome counters, safe to bump from many evaluators at once.
#[derive(Debug, Default)]
pub(crate) struct Stats {
    passed: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

/// A point-in-time copy of a gate's outcome counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatsSnapshot {
    pub passed: u64,
    pub rejected: u64,
    pub failed: u64,
}

impl StatsSnapshot {
    /// Values that were stopped, whatever the reason.
    pub fn dropped(&self) -> u64 {
        self.rejected + self.failed
    }
}

impl Stats {
    fn record(&self, verdict: &Verdict) {
        let counter = match verdict {
            Verdict::Passed => &self.passed,
            Verdict::Rejected { .. } => &self.rejected,
            Verdict::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            passed: self.passed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Evaluates values against a sealed middleware chain.
///
/// Construction seals the [`Options`]. After that the gate is read-only apart
/// from its counters, so share it behind an `Arc` between tasks.
///
/// ```rust
/// use sluice::{Gate, Middleware, Options, with_middleware, with_name};
///
/// let gate = Gate::new(Options::build([
///     with_name("numbers"),
///     with_middleware([Middleware::new(|n: &i32| *n > 0)]),
/// ]));
///
/// assert!(gate.admit(&1));
/// assert!(!gate.admit(&-1));
/// assert_eq!(gate.stats().dropped(), 1);
/// ```
pub struct Gate<T> {
    name: Cow<'static, str>,
    capacity: usize,
    chain: Chain<T>,
    stats: Stats,
}

impl<T> Gate<T> {
    pub fn new(options: Options<T>) -> Self {
        let (name, capacity, chain) = options.into_parts();
        debug!(channel = %name, middlewares = chain.len(), capacity, "gate sealed");
        Self { name, capacity, chain, stats: Stats::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn chain(&self) -> &Chain<T> {
        &self.chain
    }

    /// Runs `value` through the chain, records the outcome and logs drops.
    pub fn evaluate(&self, value: &T) -> Verdict {
        let verdict = self.chain.evaluate(value);
        self.stats.record(&verdict);

        match &verdict {
            Verdict::Passed => trace!(channel = %self.name, "value passed"),
            Verdict::Rejected { index, name } => debug!(
                channel = %self.name,
                index,
                middleware = name.as_deref().unwrap_or("-"),
                "value rejected"
            ),
            Verdict::Failed { index, name, error } => warn!(
                channel = %self.name,
                index,
                middleware = name.as_deref().unwrap_or("-"),
                "middleware failed: {error}"
            ),
        }
        verdict
    }

    /// Boolean form of [`evaluate`](Gate::evaluate).
    pub fn admit(&self, value: &T) -> bool {
        self.evaluate(value).is_passed()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
