//! Encoding recognition for unlabeled byte buffers.
//!
//! The checks run in a fixed priority order, each a fast rejection test:
//! BOMs first (UTF-32 before UTF-16, since the UTF-32 LE mark begins with
//! the UTF-16 LE mark), then structural checks for UTF-32, UTF-16, and
//! UTF-8, then the Windows-1252 fallback.
//!
//! Pure ASCII input is always reported as UTF-8: ASCII is a UTF-8 subset,
//! and the UTF-16 structural check requires zero-byte evidence that plain
//! ASCII never produces.

use crate::encoding::Encoding;
use crate::utf16::Endian;
use crate::{utf16, utf32, utf8};

/// Guesses the encoding of a raw byte buffer.
///
/// The Windows-1252 fallback accepts every byte sequence, so with the
/// current codec set this always returns `Some`; the `Option` return
/// leaves room for a codec set without a total fallback.
pub fn recognize(bytes: &[u8]) -> Option<Encoding> {
    // UTF-32 BOMs must be tested before UTF-16's two-byte prefix.
    if bytes.starts_with(&utf8::BOM) {
        return Some(Encoding::Utf8);
    }
    if bytes.starts_with(&utf32::BOM_LE) || bytes.starts_with(&utf32::BOM_BE) {
        return Some(Encoding::Utf32);
    }
    if bytes.starts_with(&utf16::BOM_LE) || bytes.starts_with(&utf16::BOM_BE) {
        return Some(Encoding::Utf16);
    }

    if !bytes.is_empty()
        && bytes.len() % 4 == 0
        && (utf32::validate(bytes, Endian::Little) || utf32::validate(bytes, Endian::Big))
    {
        return Some(Encoding::Utf32);
    }

    if !bytes.is_empty() && bytes.len() % 2 == 0 && looks_like_utf16(bytes) {
        return Some(Encoding::Utf16);
    }

    if utf8::validate(bytes).is_ok() {
        return Some(Encoding::Utf8);
    }

    // Every byte decodes in Windows-1252, so this arm accepts whatever is
    // left.
    Some(Encoding::Windows1252)
}

/// Structural UTF-16 check without a BOM.
///
/// Real UTF-16 text betrays its byte order through zero bytes in the high
/// half of BMP code units; an endianness is only accepted when the buffer
/// shows that evidence on the matching side and every code unit (or
/// surrogate pair) is self-consistent.
fn looks_like_utf16(bytes: &[u8]) -> bool {
    let zero_odd = bytes.iter().skip(1).step_by(2).filter(|&&b| b == 0).count();
    let zero_even = bytes.iter().step_by(2).filter(|&&b| b == 0).count();

    (zero_odd > 0 && utf16::validate(bytes, Endian::Little))
        || (zero_even > 0 && utf16::validate(bytes, Endian::Big))
}
