//! Iterators over a string's codepoints.

use core::iter::FusedIterator;

use crate::Codepoint;

/// A forward iterator over the codepoints of a [`crate::String`].
///
/// Two iterators over the same string compare equal iff they stand at the
/// same logical position. Obtained from [`crate::String::chars`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chars<'a> {
    rest: &'a [Codepoint],
}

impl<'a> Chars<'a> {
    #[inline]
    pub(crate) fn new(slice: &'a [Codepoint]) -> Self {
        Self { rest: slice }
    }

    /// The codepoints not yet yielded.
    #[inline]
    pub fn as_slice(&self) -> &'a [Codepoint] {
        self.rest
    }
}

impl<'a> Iterator for Chars<'a> {
    type Item = Codepoint;

    #[inline]
    fn next(&mut self) -> Option<Codepoint> {
        let (&first, rest) = self.rest.split_first()?;
        self.rest = rest;
        Some(first)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len(), Some(self.rest.len()))
    }
}

impl DoubleEndedIterator for Chars<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Codepoint> {
        let (&last, rest) = self.rest.split_last()?;
        self.rest = rest;
        Some(last)
    }
}

impl ExactSizeIterator for Chars<'_> {}
impl FusedIterator for Chars<'_> {}

/// An iterator over codepoints and their codepoint indices.
///
/// Obtained from [`crate::String::char_indices`]. Unlike `str::char_indices`
/// the index counts codepoints, not bytes.
#[derive(Debug, Clone)]
pub struct CharIndices<'a> {
    front: usize,
    inner: Chars<'a>,
}

impl<'a> CharIndices<'a> {
    #[inline]
    pub(crate) fn new(slice: &'a [Codepoint]) -> Self {
        Self {
            front: 0,
            inner: Chars::new(slice),
        }
    }
}

impl Iterator for CharIndices<'_> {
    type Item = (usize, Codepoint);

    #[inline]
    fn next(&mut self) -> Option<(usize, Codepoint)> {
        let cp = self.inner.next()?;
        let index = self.front;
        self.front += 1;
        Some((index, cp))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for CharIndices<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<(usize, Codepoint)> {
        let cp = self.inner.next_back()?;
        Some((self.front + self.inner.as_slice().len(), cp))
    }
}

impl ExactSizeIterator for CharIndices<'_> {}
impl FusedIterator for CharIndices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_forward() {
        let data = [0x61, 0x62, 0x1F600];
        let collected: Vec<Codepoint> = Chars::new(&data).collect();
        assert_eq!(collected, data);
    }

    #[test]
    fn chars_equality_tracks_position() {
        let data = [1, 2, 3];
        let mut a = Chars::new(&data);
        let mut b = Chars::new(&data);
        assert_eq!(a, b);
        a.next();
        assert_ne!(a, b);
        b.next();
        assert_eq!(a, b);
    }

    #[test]
    fn chars_backward() {
        let data = [1, 2, 3];
        let collected: Vec<Codepoint> = Chars::new(&data).rev().collect();
        assert_eq!(collected, vec![3, 2, 1]);
    }

    #[test]
    fn char_indices_counts_codepoints() {
        let data = [0x1F600, 0x62];
        let collected: Vec<(usize, Codepoint)> = CharIndices::new(&data).collect();
        assert_eq!(collected, vec![(0, 0x1F600), (1, 0x62)]);
    }

    #[test]
    fn char_indices_back() {
        let data = [10, 20, 30];
        let mut it = CharIndices::new(&data);
        assert_eq!(it.next_back(), Some((2, 30)));
        assert_eq!(it.next(), Some((0, 10)));
        assert_eq!(it.next_back(), Some((1, 20)));
        assert_eq!(it.next(), None);
    }
}
