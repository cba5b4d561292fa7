//! Unified error types.

use std::fmt;

/// The boxed cause carried by an [`EvalError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by sluice's fallible operations.
///
/// A rejected value is not an error. Rejections surface as
/// [`Verdict`](crate::Verdict) values; this type covers the plumbing around
/// the gate, such as a downstream channel that has gone away.
#[derive(Debug)]
pub enum Error {
    /// The downstream receiver was dropped while values were still flowing.
    Closed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("downstream channel closed"),
        }
    }
}

impl std::error::Error for Error {}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for Error {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::Closed
    }
}

/// A middleware could not reach a decision.
///
/// Produced by middlewares built with
/// [`Middleware::fallible`](crate::Middleware::fallible). The owning component
/// treats it as a rejection for the value at hand, but callers may inspect
/// [`Verdict::is_retryable`](crate::Verdict::is_retryable) to try again later.
#[derive(Debug)]
pub struct EvalError(BoxError);

impl EvalError {
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self(cause.into())
    }

    /// Consumes the error and returns the underlying cause.
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evaluation failed: {}", self.0)
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}
