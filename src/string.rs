use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use std::borrow::Cow;

use crate::buffer::StringCore;
use crate::encoding::Encoding;
use crate::error::{BoundsError, DecodeError, EncodeError, RangeError};
use crate::iter::{CharIndices, Chars};
use crate::range::Range;
use crate::recognize::recognize;
use crate::{ascii, utf16, utf32, utf8, Codepoint};

/// A codepoint-addressed Unicode string.
///
/// Text is stored as a shared, immutable array of 32-bit codepoints, so
/// every index and length in this API counts codepoints, never bytes.
/// Cloning is O(1) (the backing array is refcounted), and every
/// "mutating" operation is a pure function returning a brand-new string;
/// the receiver is never changed.
///
/// Each string remembers its *natural* encoding — the one it was decoded
/// from (UTF-8 unless constructed otherwise) — which determines
/// [`byte_len`](Self::byte_len) and [`to_data`](Self::to_data).
pub struct String {
    core: StringCore,
    encoding: Encoding,
}

/// Anything usable as a search needle: [`String`], `&str`, or `char`.
///
/// This is the seam that lets the search, split, and replace algorithms
/// take either crate strings or ordinary Rust literals.
pub trait Needle {
    /// The needle's codepoints.
    fn to_codepoints(&self) -> Cow<'_, [Codepoint]>;
}

impl Needle for String {
    #[inline]
    fn to_codepoints(&self) -> Cow<'_, [Codepoint]> {
        Cow::Borrowed(self.as_codepoints())
    }
}

impl Needle for str {
    #[inline]
    fn to_codepoints(&self) -> Cow<'_, [Codepoint]> {
        Cow::Owned(self.chars().map(|c| c as Codepoint).collect())
    }
}

impl Needle for char {
    #[inline]
    fn to_codepoints(&self) -> Cow<'_, [Codepoint]> {
        Cow::Owned(vec![*self as Codepoint])
    }
}

impl<N: Needle + ?Sized> Needle for &N {
    #[inline]
    fn to_codepoints(&self) -> Cow<'_, [Codepoint]> {
        (**self).to_codepoints()
    }
}

impl String {
    // === Construction ===

    /// Creates an empty string.
    #[inline]
    pub fn new() -> Self {
        Self {
            core: StringCore::default(),
            encoding: Encoding::Utf8,
        }
    }

    /// Builds a string directly from codepoints; no decoding happens.
    ///
    /// The values are stored as given, without scalar-value validation.
    #[inline]
    pub fn from_codepoints(codepoints: Vec<Codepoint>) -> Self {
        Self {
            core: StringCore::new(codepoints),
            encoding: Encoding::Utf8,
        }
    }

    /// Decodes a byte buffer with an explicitly chosen encoding.
    ///
    /// The whole buffer decodes or the construction fails; a failed
    /// construction leaves nothing observable behind. The chosen encoding
    /// becomes the string's natural encoding.
    pub fn from_bytes(bytes: &[u8], encoding: Encoding) -> Result<Self, DecodeError> {
        Ok(Self {
            core: StringCore::new(encoding.decode(bytes)?),
            encoding,
        })
    }

    /// Decodes a byte buffer, guessing its encoding with the recognizer.
    ///
    /// With the current codec set the recognizer always produces an
    /// encoding (Windows-1252 accepts any byte sequence), so in practice
    /// only the subsequent decode can fail.
    pub fn from_bytes_auto(bytes: &[u8]) -> Result<Self, DecodeError> {
        let encoding = recognize(bytes).ok_or(DecodeError::new(0, None))?;
        Self::from_bytes(bytes, encoding)
    }

    /// Decodes a UTF-8 byte buffer.
    #[inline]
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes(bytes, Encoding::Utf8)
    }

    /// Decodes a byte buffer, replacing undecodable sequences with U+FFFD
    /// instead of failing.
    ///
    /// The BOM and byte order are resolved once, up front, so resuming
    /// after bad bytes keeps the established interpretation. Each reported
    /// error contributes one replacement codepoint; a sequence cut off by
    /// the end of the buffer becomes a single trailing replacement.
    pub fn from_bytes_lossy(bytes: &[u8], encoding: Encoding) -> Self {
        let codepoints = match encoding {
            Encoding::Utf8 => {
                let body = bytes.strip_prefix(&utf8::BOM).unwrap_or(bytes);
                decode_lossy(body, utf8::decode_body)
            }
            Encoding::Utf16 => {
                let (start, endian) = utf16::resolve(bytes);
                decode_lossy(&bytes[start..], |chunk| {
                    utf16::decode_body(chunk, endian, 0)
                })
            }
            Encoding::Utf32 => {
                let (start, endian) = utf32::resolve(bytes);
                decode_lossy(&bytes[start..], |chunk| {
                    utf32::decode_body(chunk, endian, 0)
                })
            }
            Encoding::Ascii | Encoding::Windows1252 => {
                decode_lossy(bytes, |chunk| encoding.decode(chunk))
            }
        };
        Self {
            core: StringCore::new(codepoints),
            encoding,
        }
    }

    /// Decodes a UTF-8 byte buffer, replacing invalid sequences with
    /// U+FFFD instead of failing.
    #[inline]
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        Self::from_bytes_lossy(bytes, Encoding::Utf8)
    }

    // === Inspection ===

    /// The number of codepoints. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if the string has no codepoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// The number of bytes this string occupies in its natural encoding,
    /// BOM excluded. Differs from [`len`](Self::len) whenever a codepoint
    /// is not a single byte there.
    pub fn byte_len(&self) -> usize {
        self.as_codepoints()
            .iter()
            .map(|&cp| self.encoding.encoded_len(cp))
            .sum()
    }

    /// The string's natural (construction) encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The backing codepoint array.
    #[inline]
    pub fn as_codepoints(&self) -> &[Codepoint] {
        self.core.as_slice()
    }

    /// The codepoint at the given index.
    ///
    /// Fails with a [`BoundsError`] if `index >= len()`.
    pub fn char_at(&self, index: usize) -> Result<Codepoint, BoundsError> {
        self.core
            .get(index)
            .ok_or(BoundsError::new(index, self.len()))
    }

    /// The codepoint at the given index, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Codepoint> {
        self.core.get(index)
    }

    /// Iterates over the codepoints.
    #[inline]
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(self.as_codepoints())
    }

    /// Iterates over (codepoint index, codepoint) pairs.
    #[inline]
    pub fn char_indices(&self) -> CharIndices<'_> {
        CharIndices::new(self.as_codepoints())
    }

    // === Search ===

    /// Returns `true` if the string begins with the needle's codepoints.
    pub fn starts_with<N: Needle + ?Sized>(&self, needle: &N) -> bool {
        self.as_codepoints().starts_with(&needle.to_codepoints())
    }

    /// Returns `true` if the string ends with the needle's codepoints.
    pub fn ends_with<N: Needle + ?Sized>(&self, needle: &N) -> bool {
        self.as_codepoints().ends_with(&needle.to_codepoints())
    }

    /// Returns `true` if the needle occurs anywhere in the string.
    pub fn contains<N: Needle + ?Sized>(&self, needle: &N) -> bool {
        let needle = needle.to_codepoints();
        find_from(self.as_codepoints(), &needle, 0).is_some()
    }

    /// Finds the first occurrence of the needle.
    ///
    /// Naive left-to-right codepoint search. An empty needle never matches.
    pub fn range_of<N: Needle + ?Sized>(&self, needle: &N) -> Option<Range> {
        let needle = needle.to_codepoints();
        if needle.is_empty() {
            return None;
        }
        find_from(self.as_codepoints(), &needle, 0).map(|pos| Range::new(pos, needle.len()))
    }

    /// Finds every non-overlapping occurrence of the needle, left to right.
    ///
    /// The search position advances past each match, so matches never
    /// overlap.
    pub fn ranges_of<N: Needle + ?Sized>(&self, needle: &N) -> Vec<Range> {
        let needle = needle.to_codepoints();
        let mut out = Vec::new();
        if needle.is_empty() {
            return out;
        }
        let mut from = 0;
        while let Some(pos) = find_from(self.as_codepoints(), &needle, from) {
            out.push(Range::new(pos, needle.len()));
            from = pos + needle.len();
        }
        out
    }

    // === Substrings ===

    /// The codepoints in `[range.position, range.position + range.length)`
    /// as a new string.
    ///
    /// Fails with a [`RangeError`] if the range does not fit.
    pub fn substring(&self, range: Range) -> Result<Self, RangeError> {
        let end = self.checked_end(range)?;
        Ok(Self::from_codepoints(
            self.as_codepoints()[range.position..end].to_vec(),
        ))
    }

    /// Everything from the given codepoint index to the end.
    ///
    /// `index == len()` yields the empty string; `index > len()` is a
    /// [`BoundsError`].
    pub fn substring_from(&self, index: usize) -> Result<Self, BoundsError> {
        if index > self.len() {
            return Err(BoundsError::new(index, self.len()));
        }
        Ok(Self::from_codepoints(self.as_codepoints()[index..].to_vec()))
    }

    /// Everything before the given codepoint index.
    ///
    /// `index == len()` yields a copy of the whole string; `index > len()`
    /// is a [`BoundsError`].
    pub fn substring_to(&self, index: usize) -> Result<Self, BoundsError> {
        if index > self.len() {
            return Err(BoundsError::new(index, self.len()));
        }
        Ok(Self::from_codepoints(self.as_codepoints()[..index].to_vec()))
    }

    // === Splitting ===

    /// The pieces of the string around every occurrence of the separator,
    /// in original order.
    ///
    /// Empty pieces are omitted: a separator at the very start or end, or
    /// two adjacent separators, contribute nothing to the result.
    pub fn split<N: Needle + ?Sized>(&self, separator: &N) -> Vec<Self> {
        let mut pieces = Vec::new();
        let mut last_end = 0;
        for range in self.ranges_of(separator) {
            self.push_piece(&mut pieces, last_end, range.position);
            last_end = range.end();
        }
        self.push_piece(&mut pieces, last_end, self.len());
        pieces
    }

    /// The pieces of the string outside the given range, in order.
    ///
    /// Empty pieces are omitted, so a range touching the start or end of
    /// the string yields a single piece.
    pub fn split_excluding_range(&self, range: Range) -> Result<Vec<Self>, RangeError> {
        let end = self.checked_end(range)?;
        let mut pieces = Vec::new();
        self.push_piece(&mut pieces, 0, range.position);
        self.push_piece(&mut pieces, end, self.len());
        Ok(pieces)
    }

    fn push_piece(&self, pieces: &mut Vec<Self>, start: usize, end: usize) {
        if start < end {
            pieces.push(Self::from_codepoints(
                self.as_codepoints()[start..end].to_vec(),
            ));
        }
    }

    // === Replacement ===

    /// Replaces every non-overlapping occurrence of the needle, scanning
    /// left to right and skipping past each replacement so inserted text is
    /// never rescanned.
    pub fn replace<N, R>(&self, needle: &N, replacement: &R) -> Self
    where
        N: Needle + ?Sized,
        R: Needle + ?Sized,
    {
        let replacement = replacement.to_codepoints();
        let mut out = Vec::with_capacity(self.len());
        let mut last_end = 0;
        for range in self.ranges_of(needle) {
            out.extend_from_slice(&self.as_codepoints()[last_end..range.position]);
            out.extend_from_slice(&replacement);
            last_end = range.end();
        }
        out.extend_from_slice(&self.as_codepoints()[last_end..]);
        Self::from_codepoints(out)
    }

    /// Splices the replacement into the given codepoint range.
    ///
    /// Fails with a [`RangeError`] if the range does not fit.
    pub fn replace_range<R: Needle + ?Sized>(
        &self,
        range: Range,
        replacement: &R,
    ) -> Result<Self, RangeError> {
        let end = self.checked_end(range)?;
        let replacement = replacement.to_codepoints();
        let mut out = Vec::with_capacity(self.len() - range.length + replacement.len());
        out.extend_from_slice(&self.as_codepoints()[..range.position]);
        out.extend_from_slice(&replacement);
        out.extend_from_slice(&self.as_codepoints()[end..]);
        Ok(Self::from_codepoints(out))
    }

    /// The receiver followed by `other`, as a new string.
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(self.as_codepoints());
        out.extend_from_slice(other.as_codepoints());
        Self::from_codepoints(out)
    }

    // === Case mapping ===

    /// Uppercases each codepoint with simple (1:1) case mapping.
    ///
    /// Mappings that would expand to multiple codepoints, and values that
    /// are not valid scalar values, are left unchanged.
    pub fn to_uppercase(&self) -> Self {
        Self::from_codepoints(
            self.chars()
                .map(|cp| map_simple_case(cp, CaseMapping::Upper))
                .collect(),
        )
    }

    /// Lowercases each codepoint with simple (1:1) case mapping.
    pub fn to_lowercase(&self) -> Self {
        Self::from_codepoints(
            self.chars()
                .map(|cp| map_simple_case(cp, CaseMapping::Lower))
                .collect(),
        )
    }

    /// Uppercases word-initial codepoints and lowercases the rest.
    ///
    /// Words are delimited by whitespace.
    pub fn capitalized(&self) -> Self {
        let mut at_word_start = true;
        let mapped = self
            .chars()
            .map(|cp| {
                let mapping = if at_word_start {
                    CaseMapping::Upper
                } else {
                    CaseMapping::Lower
                };
                at_word_start = is_whitespace(cp);
                map_simple_case(cp, mapping)
            })
            .collect();
        Self::from_codepoints(mapped)
    }

    // === Export ===

    /// Encodes the string with the given encoding.
    ///
    /// Only Windows-1252 can fail, for codepoints outside its table.
    pub fn to_bytes(&self, encoding: Encoding) -> Result<Vec<u8>, EncodeError> {
        encoding.encode(self.as_codepoints())
    }

    /// The string as BOM-prefixed UTF-8 bytes.
    #[inline]
    pub fn to_utf8_bytes(&self) -> Vec<u8> {
        utf8::encode(self.as_codepoints())
    }

    /// The string as BOM-prefixed little-endian UTF-16 bytes.
    #[inline]
    pub fn to_utf16_bytes(&self) -> Vec<u8> {
        utf16::encode(self.as_codepoints())
    }

    /// The string as BOM-prefixed little-endian UTF-32 bytes.
    #[inline]
    pub fn to_utf32_bytes(&self) -> Vec<u8> {
        utf32::encode(self.as_codepoints())
    }

    /// The string as 7-bit bytes, with `\:XXXXXX` escapes for codepoints
    /// at or above 0x80.
    #[inline]
    pub fn to_ascii_bytes(&self) -> Vec<u8> {
        ascii::encode(self.as_codepoints())
    }

    /// The string as Windows-1252 bytes.
    ///
    /// Fails with an [`EncodeError`] at the first unmappable codepoint.
    #[inline]
    pub fn to_windows1252_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        crate::windows1252::encode(self.as_codepoints())
    }

    /// Encodes the string at its natural encoding.
    #[inline]
    pub fn to_data(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_bytes(self.encoding)
    }

    /// Validates a range against this string, overflow included, and
    /// returns its exclusive end index.
    fn checked_end(&self, range: Range) -> Result<usize, RangeError> {
        match range.position.checked_add(range.length) {
            Some(end) if end <= self.len() => Ok(end),
            _ => Err(RangeError::new(range.position, range.length, self.len())),
        }
    }
}

/// Runs a decode function over the buffer, emitting U+FFFD for each error
/// and resuming after the reported bad bytes. The decode function must
/// carry no per-buffer state (BOMs, byte order) of its own.
fn decode_lossy<F>(bytes: &[u8], decode: F) -> Vec<Codepoint>
where
    F: Fn(&[u8]) -> Result<Vec<Codepoint>, DecodeError>,
{
    let mut remaining = bytes;
    let mut out = Vec::new();
    loop {
        match decode(remaining) {
            Ok(decoded) => {
                out.extend(decoded);
                break;
            }
            Err(e) => {
                // Everything before valid_up_to decodes cleanly.
                if let Ok(prefix) = decode(&remaining[..e.valid_up_to()]) {
                    out.extend(prefix);
                }
                out.push(0xFFFD);
                let Some(bad) = e.error_len() else {
                    break;
                };
                let skip = (e.valid_up_to() + bad).max(e.valid_up_to() + 1);
                if skip >= remaining.len() {
                    break;
                }
                remaining = &remaining[skip..];
            }
        }
    }
    out
}

/// Naive forward search for `needle` in `haystack` starting at `from`.
fn find_from(haystack: &[Codepoint], needle: &[Codepoint], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let last_start = haystack.len() - needle.len();
    (from..=last_start).find(|&i| &haystack[i..i + needle.len()] == needle)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CaseMapping {
    Upper,
    Lower,
}

/// Simple (1:1) case mapping of one codepoint.
///
/// Expanding mappings and non-scalar values map to themselves.
fn map_simple_case(cp: Codepoint, mapping: CaseMapping) -> Codepoint {
    let Some(c) = char::from_u32(cp) else {
        return cp;
    };
    let mapped = match mapping {
        CaseMapping::Upper => single_char(c.to_uppercase()),
        CaseMapping::Lower => single_char(c.to_lowercase()),
    };
    mapped.map_or(cp, |m| m as Codepoint)
}

/// The sole element of a case-mapping iterator, or `None` if it expands.
fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    if mapped.next().is_some() {
        return None;
    }
    Some(first)
}

fn is_whitespace(cp: Codepoint) -> bool {
    char::from_u32(cp).is_some_and(|c| c.is_whitespace())
}

// === Trait implementations ===

impl Default for String {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for String {
    /// O(1): the new handle shares the receiver's core.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            encoding: self.encoding,
        }
    }
}

impl fmt::Display for String {
    /// Renders codepoints as text; values that are not valid scalar values
    /// appear as U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for cp in self.chars() {
            f.write_char(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char('"')?;
        for cp in self.chars() {
            match char::from_u32(cp) {
                Some(c) => {
                    for escaped in c.escape_debug() {
                        f.write_char(escaped)?;
                    }
                }
                None => write!(f, "\\u{{{:x}}}", cp)?,
            }
        }
        f.write_char('"')
    }
}

impl PartialEq for String {
    /// Codepoint-by-codepoint; the natural encoding does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.as_codepoints() == other.as_codepoints()
    }
}

impl Eq for String {}

impl PartialEq<str> for String {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars().map(|c| c as Codepoint))
    }
}

impl PartialEq<&str> for String {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for str {
    fn eq(&self, other: &String) -> bool {
        other == self
    }
}

impl PartialOrd for String {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for String {
    /// Lexical comparison by codepoint numeric value, not locale collation.
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_codepoints().cmp(other.as_codepoints())
    }
}

impl Hash for String {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_codepoints().hash(state)
    }
}

impl From<&str> for String {
    fn from(s: &str) -> Self {
        Self::from_codepoints(s.chars().map(|c| c as Codepoint).collect())
    }
}

impl From<std::string::String> for String {
    fn from(s: std::string::String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<char> for String {
    fn from(c: char) -> Self {
        Self::from_codepoints(vec![c as Codepoint])
    }
}

impl FromIterator<Codepoint> for String {
    fn from_iter<I: IntoIterator<Item = Codepoint>>(iter: I) -> Self {
        Self::from_codepoints(iter.into_iter().collect())
    }
}

impl FromIterator<char> for String {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::from_codepoints(iter.into_iter().map(|c| c as Codepoint).collect())
    }
}

impl Extend<char> for String {
    /// Rebinds the receiver to a new core; other handles sharing the old
    /// core are untouched.
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let mut codepoints = self.as_codepoints().to_vec();
        codepoints.extend(iter.into_iter().map(|c| c as Codepoint));
        self.core = StringCore::new(codepoints);
    }
}

impl fmt::Write for String {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend(s.chars());
        Ok(())
    }
}

impl core::ops::Index<usize> for String {
    type Output = Codepoint;

    /// Panics on an out-of-range index; [`char_at`](String::char_at) is the
    /// fallible form.
    fn index(&self, index: usize) -> &Codepoint {
        &self.as_codepoints()[index]
    }
}

impl core::ops::Add<&String> for &String {
    type Output = String;

    fn add(self, other: &String) -> String {
        self.concat(other)
    }
}

impl<'a> IntoIterator for &'a String {
    type Item = Codepoint;
    type IntoIter = Chars<'a>;

    fn into_iter(self) -> Chars<'a> {
        self.chars()
    }
}
