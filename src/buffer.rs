//! The shared, immutable codepoint store backing every [`crate::String`].

use std::sync::Arc;

use crate::Codepoint;

/// A reference-counted, immutable array of codepoints.
///
/// Cloning bumps the refcount; the array itself is never written after
/// construction, so concurrent readers need no synchronization beyond the
/// atomic count. The array is freed exactly once, when the last owner drops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StringCore {
    codepoints: Arc<[Codepoint]>,
}

impl StringCore {
    /// Builds a core that takes ownership of the given codepoints.
    #[inline]
    pub(crate) fn new(codepoints: Vec<Codepoint>) -> Self {
        Self {
            codepoints: codepoints.into(),
        }
    }

    /// The number of codepoints. Never a byte count.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.codepoints.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }

    /// Random-access read of one codepoint.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<Codepoint> {
        self.codepoints.get(index).copied()
    }

    /// The whole backing array.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[Codepoint] {
        &self.codepoints
    }

    /// Returns `true` if both cores share one backing array.
    #[cfg(test)]
    pub(crate) fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.codepoints, &other.codepoints)
    }
}

impl Default for StringCore {
    #[inline]
    fn default() -> Self {
        Self {
            codepoints: Arc::from([]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_counts_codepoints() {
        let core = StringCore::new(vec![0x61, 0x1F600, 0x62]);
        assert_eq!(core.len(), 3);
        assert_eq!(core.get(1), Some(0x1F600));
        assert_eq!(core.get(3), None);
    }

    #[test]
    fn clone_shares_the_array() {
        let a = StringCore::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.shares_with(&b));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn default_is_empty() {
        let core = StringCore::default();
        assert!(core.is_empty());
        assert_eq!(core.len(), 0);
    }
}
