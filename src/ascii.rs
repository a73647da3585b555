//! 7-bit ASCII codec with escape round-tripping.
//!
//! Codepoints below 0x80 are written as plain bytes. Everything else is
//! rendered as the escape token `\:` followed by six zero-padded hex digits,
//! so arbitrary Unicode survives a 7-bit-safe channel:
//! `[0x61, 0x2387]` encodes to `a\:002387`. Decode reverses the escape; any
//! unescaped byte at or above 0x80 is a decode error.
//!
//! A literal `\` immediately followed by `:` in the source text is
//! indistinguishable from the escape introducer; that ambiguity is inherent
//! to the format.

use crate::error::DecodeError;
use crate::Codepoint;

const ESCAPE: &[u8; 2] = b"\\:";
const ESCAPE_DIGITS: usize = 6;

/// Decodes a 7-bit buffer, interpreting `\:XXXXXX` escapes.
pub fn decode(bytes: &[u8]) -> Result<Vec<Codepoint>, DecodeError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut offset = 0;

    while offset < bytes.len() {
        let b = bytes[offset];
        if b >= 0x80 {
            return Err(DecodeError::new(offset, Some(1)));
        }
        if b == ESCAPE[0] && bytes.get(offset + 1) == Some(&ESCAPE[1]) {
            let digits_start = offset + ESCAPE.len();
            let digits_end = digits_start + ESCAPE_DIGITS;
            if digits_end > bytes.len() {
                return Err(DecodeError::new(offset, None));
            }
            let mut cp: Codepoint = 0;
            for (i, &d) in bytes[digits_start..digits_end].iter().enumerate() {
                let digit = (d as char)
                    .to_digit(16)
                    .ok_or(DecodeError::new(offset, Some(ESCAPE.len() + i + 1)))?;
                cp = (cp << 4) | digit;
            }
            out.push(cp);
            offset = digits_end;
        } else {
            out.push(b as Codepoint);
            offset += 1;
        }
    }

    Ok(out)
}

/// Encodes codepoints as 7-bit bytes, escaping everything at or above 0x80.
pub fn encode(codepoints: &[Codepoint]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codepoints.len());
    for &cp in codepoints {
        if cp < 0x80 {
            out.push(cp as u8);
        } else {
            out.extend_from_slice(ESCAPE);
            out.extend_from_slice(format!("{:06x}", cp).as_bytes());
        }
    }
    out
}

/// Returns the number of ASCII bytes the codepoint occupies.
#[inline]
pub fn encoded_len(cp: Codepoint) -> usize {
    if cp < 0x80 {
        1
    } else {
        ESCAPE.len() + ESCAPE_DIGITS
    }
}
