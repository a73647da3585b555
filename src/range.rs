use core::fmt;

/// A (position, length) span measured in codepoints.
///
/// Addresses the substring `[position, position + length)`. Operations that
/// take a `Range` fail with [`crate::RangeError`] when
/// `position + length` exceeds the string's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Index of the first codepoint in the span.
    pub position: usize,
    /// Number of codepoints in the span.
    pub length: usize,
}

impl Range {
    /// Creates a new range.
    #[inline]
    pub const fn new(position: usize, length: usize) -> Self {
        Self { position, length }
    }

    /// The index one past the last codepoint.
    #[inline]
    pub const fn end(&self) -> usize {
        self.position + self.length
    }

    /// Returns `true` if the span covers no codepoints.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.position, self.length)
    }
}

impl From<core::ops::Range<usize>> for Range {
    #[inline]
    fn from(r: core::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end.saturating_sub(r.start))
    }
}
