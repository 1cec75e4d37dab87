//! Core domain newtypes

use std::fmt;

/// Interpreter-assigned thread identifier.
///
/// Ordered so the cross-thread fallback can pick the numerically smallest
/// identifier when it has to guess which thread is the main one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(pub u64);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread:{}", self.0)
    }
}
