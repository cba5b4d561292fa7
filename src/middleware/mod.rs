//! Middleware: one gating rule over a value of type `T`.
//!
//! # How predicates are stored
//!
//! A chain holds predicates of *different* closure types in one ordered
//! sequence. Rust collections can only hold one concrete type, so every
//! predicate is erased behind `Arc<dyn Fn>` with a single common signature:
//!
//! ```text
//! |n: &i32| n % 2 == 0                     ← user writes this
//!        ↓ Middleware::new(..)
//! move |v| Ok(f(v))                        ← lifted into the fallible shape
//!        ↓ stored as Arc<dyn Fn(&T) -> Result<bool, EvalError>>
//! middleware.check(&value)                 ← one virtual call per value
//! ```
//!
//! Pure predicates and fallible ones therefore share one representation and
//! one evaluation path. Cloning a [`Middleware`] is one atomic increment.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, EvalError};

type CheckFn<T> = dyn Fn(&T) -> Result<bool, EvalError> + Send + Sync + 'static;

/// A single gating rule.
///
/// `true` lets the value continue, `false` rejects it. The predicate only ever
/// sees `&T`, so it cannot change the value it inspects. It may be called any
/// number of times and from several threads at once.
///
/// ```rust
/// use sluice::Middleware;
///
/// let is_even = Middleware::new(|n: &i32| n % 2 == 0).named("is_even");
/// assert!(is_even.check(&4).unwrap());
/// assert!(!is_even.check(&3).unwrap());
/// ```
pub struct Middleware<T> {
    check: Arc<CheckFn<T>>,
    pub(crate) name: Option<Cow<'static, str>>,
}

impl<T: 'static> Middleware<T> {
    /// Wraps a plain predicate. This is the common case.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_check(move |value: &T| Ok(predicate(value)))
    }

    /// Wraps a predicate that may fail to decide, e.g. because it consults a
    /// dependency that is unavailable.
    ///
    /// `Ok(false)` is a deliberate rejection; `Err(_)` means no decision could
    /// be made. Both stop the value, but they are reported differently.
    pub fn fallible<F, E>(predicate: F) -> Self
    where
        F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::from_check(move |value: &T| predicate(value).map_err(EvalError::new))
    }

    fn from_check<F>(check: F) -> Self
    where
        F: Fn(&T) -> Result<bool, EvalError> + Send + Sync + 'static,
    {
        Self { check: Arc::new(check), name: None }
    }
}

impl<T> Middleware<T> {
    /// Attaches a label that shows up in logs and verdicts.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Runs the rule against `value`.
    pub fn check(&self, value: &T) -> Result<bool, EvalError> {
        (self.check)(value)
    }
}

// Manual impl: a derive would demand `T: Clone`.
impl<T> Clone for Middleware<T> {
    fn clone(&self) -> Self {
        Self { check: Arc::clone(&self.check), name: self.name.clone() }
    }
}

impl<T> fmt::Debug for Middleware<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
