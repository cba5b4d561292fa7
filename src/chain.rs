//! A sealed, ordered middleware sequence and its evaluation rule.
//!
//! Evaluation is a short-circuiting AND over the sequence: middlewares run in
//! registration order, the first one that does not return `Ok(true)` decides
//! the verdict, and nothing after it runs. An empty chain passes everything.

use std::sync::Arc;

use crate::middleware::Middleware;
use crate::verdict::Verdict;

/// The read-only form of [`Options`](crate::Options) middlewares.
///
/// Built once by [`Options::seal`](crate::Options::seal). Clones share the
/// same backing slice, so a chain can be handed to any number of concurrent
/// evaluators without locking.
pub struct Chain<T> {
    middlewares: Arc<[Middleware<T>]>,
}

impl<T> Chain<T> {
    pub(crate) fn new(middlewares: Vec<Middleware<T>>) -> Self {
        Self { middlewares: middlewares.into() }
    }

    pub fn middlewares(&self) -> &[Middleware<T>] {
        &self.middlewares
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Runs `value` through every middleware until one stops it.
    pub fn evaluate(&self, value: &T) -> Verdict {
        for (index, middleware) in self.middlewares.iter().enumerate() {
            match middleware.check(value) {
                Ok(true) => {}
                Ok(false) => {
                    return Verdict::Rejected { index, name: middleware.name.clone() };
                }
                Err(error) => {
                    return Verdict::Failed { index, name: middleware.name.clone(), error };
                }
            }
        }
        Verdict::Passed
    }

    /// Boolean form of [`evaluate`](Chain::evaluate). A middleware that fails
    /// to decide counts as a rejection.
    pub fn admit(&self, value: &T) -> bool {
        self.evaluate(value).is_passed()
    }
}

impl<T> Clone for Chain<T> {
    fn clone(&self) -> Self {
        Self { middlewares: Arc::clone(&self.middlewares) }
    }
}
