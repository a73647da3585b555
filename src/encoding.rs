//! The closed set of supported text encodings.
//!
//! Codecs are stateless: [`Encoding`] is a plain enum and every operation
//! dispatches by `match` to the per-encoding module. There is no open-ended
//! registration mechanism; the encoding set is fixed and small.

use crate::error::{DecodeError, EncodeError};
use crate::{ascii, utf16, utf32, utf8, windows1252, Codepoint};

/// A text encoding supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8 (also covers pure 7-bit ASCII input).
    #[default]
    Utf8,
    /// UTF-16, either byte order; encode emits little-endian with a BOM.
    Utf16,
    /// UTF-32, either byte order; encode emits little-endian with a BOM.
    Utf32,
    /// 7-bit ASCII with `\:XXXXXX` escapes for codepoints at or above 0x80.
    Ascii,
    /// The Windows-1252 (Western European) code page.
    Windows1252,
}

impl Encoding {
    /// The human-readable name of this encoding.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf32 => "UTF-32",
            Self::Ascii => "ASCII",
            Self::Windows1252 => "Windows-1252",
        }
    }

    /// Returns `true` if this encoding can represent the given codepoint.
    ///
    /// Everything except Windows-1252 is universal (ASCII escapes its way
    /// out of the 7-bit range).
    pub fn can_encode(self, cp: Codepoint) -> bool {
        match self {
            Self::Windows1252 => windows1252::encode_codepoint(cp).is_some(),
            _ => true,
        }
    }

    /// Decodes a byte buffer into codepoints per this encoding's rules.
    ///
    /// BOMs are honored and stripped where the encoding defines one. The
    /// whole buffer decodes or the operation fails; there is no partial
    /// success.
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<Codepoint>, DecodeError> {
        match self {
            Self::Utf8 => utf8::decode(bytes),
            Self::Utf16 => utf16::decode(bytes),
            Self::Utf32 => utf32::decode(bytes),
            Self::Ascii => ascii::decode(bytes),
            Self::Windows1252 => Ok(windows1252::decode(bytes)),
        }
    }

    /// Encodes codepoints as bytes per this encoding's rules.
    ///
    /// UTF-8/16/32 always prepend a BOM. Only Windows-1252 can fail.
    pub fn encode(self, codepoints: &[Codepoint]) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::Utf8 => Ok(utf8::encode(codepoints)),
            Self::Utf16 => Ok(utf16::encode(codepoints)),
            Self::Utf32 => Ok(utf32::encode(codepoints)),
            Self::Ascii => Ok(ascii::encode(codepoints)),
            Self::Windows1252 => windows1252::encode(codepoints),
        }
    }

    /// Returns the number of bytes the codepoint occupies in this encoding,
    /// BOM excluded.
    pub(crate) fn encoded_len(self, cp: Codepoint) -> usize {
        match self {
            Self::Utf8 => utf8::encoded_len(cp),
            Self::Utf16 => utf16::encoded_len(cp),
            Self::Utf32 => utf32::encoded_len(cp),
            Self::Ascii => ascii::encoded_len(cp),
            Self::Windows1252 => windows1252::encoded_len(cp),
        }
    }
}

impl core::fmt::Display for Encoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Encoding::Utf8.name(), "UTF-8");
        assert_eq!(Encoding::Windows1252.name(), "Windows-1252");
    }

    #[test]
    fn default_is_utf8() {
        assert_eq!(Encoding::default(), Encoding::Utf8);
    }

    #[test]
    fn can_encode() {
        assert!(Encoding::Utf16.can_encode(0x1F600));
        assert!(Encoding::Ascii.can_encode(0x1F600));
        assert!(Encoding::Windows1252.can_encode(0x20AC));
        assert!(!Encoding::Windows1252.can_encode(0x1F600));
    }

    #[test]
    fn dispatch_roundtrip() {
        let cps = vec![0x61, 0xE9, 0x2387];
        for enc in [
            Encoding::Utf8,
            Encoding::Utf16,
            Encoding::Utf32,
            Encoding::Ascii,
        ] {
            let bytes = enc.encode(&cps).unwrap();
            assert_eq!(enc.decode(&bytes).unwrap(), cps, "{}", enc);
        }
    }
}
