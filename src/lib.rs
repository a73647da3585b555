//! Codepoint-addressed, reference-counted Unicode strings.
//!
//! The central type is [`String`]: an immutable sequence of 32-bit
//! codepoints behind a refcounted buffer, so clones are O(1) and every
//! operation addresses codepoints rather than bytes. Values are stored
//! as given, without scalar-value validation; text that arrives through
//! a decoder is well-formed, but raw codepoints (surrogates included)
//! can be carried and re-encoded mechanically.
//!
//! Byte buffers enter and leave through five codecs, selected by the
//! [`Encoding`] enum:
//!
//! - [`utf8`], [`utf16`], [`utf32`] — the Unicode encoding forms.
//!   Encoders always emit a BOM (little-endian for 16/32); decoders
//!   honor a BOM of either endianness.
//! - [`ascii`] — 7-bit text with `\:XXXXXX` escapes for everything else.
//! - [`windows1252`] — the single-byte Windows codepage.
//!
//! [`recognize`] guesses which of the five a buffer is in, and
//! [`String::from_bytes_auto`] decodes on top of that guess.
//!
//! Strings are built from bytes, Rust strings, codepoints, JSON
//! string-literal escapes ([`String::from_json_escaped`]), or
//! printf-style formatting:
//!
//! ```
//! use stringcore::{sprintf, Encoding, String};
//!
//! let label = sprintf!("%s #%04d", "item", 7)?;
//! assert_eq!(label, "item #0007");
//!
//! let bytes = label.to_bytes(Encoding::Utf16)?;
//! let back = String::from_bytes_auto(&bytes)?;
//! assert_eq!(back, label);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Search, split, replace, substring, and case operations live on
//! [`String`]; all of them are pure functions returning new strings, so
//! sharing a string across threads needs no locks.

pub mod ascii;
mod buffer;
mod encoding;
mod error;
mod format;
mod iter;
pub mod json;
mod range;
mod recognize;
mod string;
pub mod utf16;
pub mod utf32;
pub mod utf8;
pub mod windows1252;

pub use crate::encoding::Encoding;
pub use crate::error::{BoundsError, DecodeError, EncodeError, FormatError, RangeError};
pub use crate::format::Arg;
pub use crate::iter::{CharIndices, Chars};
pub use crate::range::Range;
pub use crate::recognize::recognize;
pub use crate::string::{Needle, String};

/// A raw 32-bit codepoint.
///
/// Deliberately not [`char`]: strings can carry any `u32`, including
/// surrogates and values past U+10FFFF, exactly as constructed.
pub type Codepoint = u32;
