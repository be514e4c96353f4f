//! Implements support for [`Span`]s that mark locations in an expression.

use std::fmt;

/// A location in source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// The start offset of the location, inclusive.
    pub start: usize,
    /// The end offset of the location, exclusive.
    pub end: usize,
}

impl Span {
    /// Returns the smallest span covering both `self` and `other`.
    pub(crate) fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
