use crate::error::DecodeError;
use crate::utf16::Endian;
use crate::Codepoint;

/// The UTF-32 little-endian byte-order mark.
pub const BOM_LE: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// The UTF-32 big-endian byte-order mark.
pub const BOM_BE: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

const MAX_CODEPOINT: u32 = 0x10FFFF;

#[inline]
fn read_word(bytes: &[u8], offset: usize, endian: Endian) -> u32 {
    let quad = [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ];
    match endian {
        Endian::Little => u32::from_le_bytes(quad),
        Endian::Big => u32::from_be_bytes(quad),
    }
}

/// Decodes a UTF-32 byte buffer into codepoints.
///
/// A BOM selects the byte order and is stripped. Without a BOM the buffer is
/// read little-endian first, falling back to big-endian if only that
/// interpretation keeps every word at or below U+10FFFF. A partial trailing
/// word or an out-of-range word is a decode error.
pub fn decode(bytes: &[u8]) -> Result<Vec<Codepoint>, DecodeError> {
    if let Some(body) = bytes.strip_prefix(&BOM_LE) {
        return decode_body(body, Endian::Little, BOM_LE.len());
    }
    if let Some(body) = bytes.strip_prefix(&BOM_BE) {
        return decode_body(body, Endian::Big, BOM_BE.len());
    }
    match decode_body(bytes, Endian::Little, 0) {
        Ok(cps) => Ok(cps),
        Err(le_err) => decode_body(bytes, Endian::Big, 0).map_err(|_| le_err),
    }
}

/// Resolves a buffer's byte order and the offset where its body starts,
/// mirroring [`decode`]'s BOM-then-fallback order.
pub(crate) fn resolve(bytes: &[u8]) -> (usize, Endian) {
    if bytes.starts_with(&BOM_LE) {
        (BOM_LE.len(), Endian::Little)
    } else if bytes.starts_with(&BOM_BE) {
        (BOM_BE.len(), Endian::Big)
    } else if validate(bytes, Endian::Little) || !validate(bytes, Endian::Big) {
        (0, Endian::Little)
    } else {
        (0, Endian::Big)
    }
}

pub(crate) fn decode_body(
    bytes: &[u8],
    endian: Endian,
    base: usize,
) -> Result<Vec<Codepoint>, DecodeError> {
    if bytes.len() % 4 != 0 {
        let valid = bytes.len() - bytes.len() % 4;
        return Err(DecodeError::new(base + valid, None));
    }

    let mut out = Vec::with_capacity(bytes.len() / 4);
    let mut offset = 0;
    while offset < bytes.len() {
        let word = read_word(bytes, offset, endian);
        if word > MAX_CODEPOINT {
            return Err(DecodeError::new(base + offset, Some(4)));
        }
        out.push(word);
        offset += 4;
    }
    Ok(out)
}

/// Checks whether every aligned word in the given byte order is a plausible
/// codepoint, without allocating.
pub(crate) fn validate(bytes: &[u8], endian: Endian) -> bool {
    if bytes.len() % 4 != 0 {
        return false;
    }
    (0..bytes.len())
        .step_by(4)
        .all(|offset| read_word(bytes, offset, endian) <= MAX_CODEPOINT)
}

/// Encodes codepoints as little-endian UTF-32, prepending the BOM.
pub fn encode(codepoints: &[Codepoint]) -> Vec<u8> {
    let mut out = Vec::with_capacity(BOM_LE.len() + codepoints.len() * 4);
    out.extend_from_slice(&BOM_LE);
    for &cp in codepoints {
        out.extend_from_slice(&cp.to_le_bytes());
    }
    out
}

/// Returns the number of UTF-32 bytes the codepoint occupies, BOM excluded.
#[inline]
pub fn encoded_len(_cp: Codepoint) -> usize {
    4
}
