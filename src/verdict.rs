//! The outcome of running a value through a middleware chain.

use std::borrow::Cow;
use std::fmt;

use crate::error::EvalError;

/// What a [`Chain`](crate::Chain) decided about one value.
///
/// `index` is the position, in registration order, of the middleware that
/// stopped the value; `name` is its label if it was given one.
#[derive(Debug)]
pub enum Verdict {
    /// Every middleware returned `true` (or there were none).
    Passed,
    /// A middleware deliberately returned `false`. Final for this value.
    Rejected {
        index: usize,
        name: Option<Cow<'static, str>>,
    },
    /// A middleware could not decide. Trying the same value again later may
    /// succeed.
    Failed {
        index: usize,
        name: Option<Cow<'static, str>>,
        error: EvalError,
    },
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// `true` only for [`Verdict::Failed`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Index of the middleware that stopped the value, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Passed => None,
            Self::Rejected { index, .. } | Self::Failed { index, .. } => Some(*index),
        }
    }

    /// Label of the middleware that stopped the value, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Rejected { name, .. } | Self::Failed { name, .. } => name.as_deref(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Rejected { index, name } => {
                write!(f, "rejected by middleware #{index}")?;
                if let Some(name) = name {
                    write!(f, " ({name})")?;
                }
                Ok(())
            }
            Self::Failed { index, name, error } => {
                write!(f, "middleware #{index}")?;
                if let Some(name) = name {
                    write!(f, " ({name})")?;
                }
                write!(f, " failed: {error}")
            }
        }
    }
}

impl From<&Verdict> for bool {
    fn from(verdict: &Verdict) -> Self {
        verdict.is_passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed() {
        let v = Verdict::Passed;
        assert!(v.is_passed());
        assert!(!v.is_retryable());
        assert_eq!(v.index(), None);
        assert_eq!(v.to_string(), "passed");
    }

    #[test]
    fn rejected_is_terminal() {
        let v = Verdict::Rejected { index: 1, name: Some("is_positive".into()) };
        assert!(!v.is_passed());
        assert!(!v.is_retryable());
        assert_eq!(v.index(), Some(1));
        assert_eq!(v.name(), Some("is_positive"));
        assert_eq!(v.to_string(), "rejected by middleware #1 (is_positive)");
        assert!(!bool::from(&v));
    }

    #[test]
    fn failed_is_retryable() {
        let v = Verdict::Failed { index: 0, name: None, error: EvalError::new("timeout") };
        assert!(v.is_retryable());
        assert_eq!(v.name(), None);
        assert_eq!(v.to_string(), "middleware #0 failed: evaluation failed: timeout");
    }
}
