//! Functional options.
//!
//! An [`Options`] value is the *building* half of a gated component: option
//! functions append to it, one after another, and the component's constructor
//! consumes it with [`Options::seal`]. Sealing is the only way to get a
//! [`Chain`], and it takes `self` by value, so nothing can be registered once
//! the component exists.
//!
//! ```rust
//! use sluice::{Middleware, Options, with_capacity, with_middleware, with_name};
//!
//! let opts = Options::build([
//!     with_name("orders"),
//!     with_capacity(128),
//!     with_middleware([
//!         Middleware::new(|n: &i32| n % 2 == 0).named("is_even"),
//!         Middleware::new(|n: &i32| *n > 0).named("is_positive"),
//!     ]),
//! ]);
//!
//! assert_eq!(opts.middlewares().len(), 2);
//! assert_eq!(opts.capacity(), 128);
//! ```

use std::borrow::Cow;

use crate::chain::Chain;
use crate::middleware::Middleware;

const DEFAULT_CAPACITY: usize = 1;
const DEFAULT_NAME: &str = "sluice";

/// A configuration function, applied to an [`Options`] before construction.
///
/// `Fn`, not `FnOnce`: one option function may configure any number of
/// components.
pub type OptionFn<T> = Box<dyn Fn(&mut Options<T>) + Send + Sync + 'static>;

/// Accumulated configuration for a component over element type `T`.
pub struct Options<T> {
    middlewares: Vec<Middleware<T>>,
    capacity: usize,
    name: Cow<'static, str>,
}

impl<T> Options<T> {
    /// Empty middleware list, capacity 1, name `"sluice"`.
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            name: Cow::Borrowed(DEFAULT_NAME),
        }
    }

    /// Starts from [`Options::new`] and applies `opts` left to right.
    pub fn build(opts: impl IntoIterator<Item = OptionFn<T>>) -> Self {
        let mut options = Self::new();
        for opt in opts {
            options.apply(&opt);
        }
        options
    }

    /// Applies one option function. Returns `self` for chaining.
    pub fn apply(&mut self, opt: &OptionFn<T>) -> &mut Self {
        opt(self);
        self
    }

    pub fn middlewares(&self) -> &[Middleware<T>] {
        &self.middlewares
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ends the building phase. The returned chain is read-only.
    pub fn seal(self) -> Chain<T> {
        Chain::new(self.middlewares)
    }

    pub(crate) fn into_parts(self) -> (Cow<'static, str>, usize, Chain<T>) {
        (self.name, self.capacity, Chain::new(self.middlewares))
    }
}

impl<T> Default for Options<T> {
    fn default() -> Self { Self::new() }
}

/// Appends `middlewares`, in the given order, to the options it is applied to.
///
/// An empty list is a no-op. The same middleware may appear more than once and
/// is then evaluated once per appearance.
pub fn with_middleware<T: 'static>(
    middlewares: impl IntoIterator<Item = Middleware<T>>,
) -> OptionFn<T> {
    let middlewares: Vec<Middleware<T>> = middlewares.into_iter().collect();
    Box::new(move |o: &mut Options<T>| o.middlewares.extend(middlewares.iter().cloned()))
}

/// Sets the buffer size of the channel built from these options.
///
/// tokio's bounded channels need room for at least one value, so `0` is
/// raised to `1`.
pub fn with_capacity<T: 'static>(capacity: usize) -> OptionFn<T> {
    Box::new(move |o: &mut Options<T>| o.capacity = capacity.max(1))
}

/// Sets the name recorded as the `channel` field on every log line.
pub fn with_name<T: 'static>(name: impl Into<Cow<'static, str>>) -> OptionFn<T> {
    let name = name.into();
    Box::new(move |o: &mut Options<T>| o.name = name.clone())
}
