use crate::error::DecodeError;
use crate::Codepoint;

/// The UTF-16 little-endian byte-order mark.
pub const BOM_LE: [u8; 2] = [0xFF, 0xFE];
/// The UTF-16 big-endian byte-order mark.
pub const BOM_BE: [u8; 2] = [0xFE, 0xFF];

const SURROGATE_HIGH_START: u16 = 0xD800;
const SURROGATE_HIGH_END: u16 = 0xDBFF;
const SURROGATE_LOW_START: u16 = 0xDC00;
const SURROGATE_LOW_END: u16 = 0xDFFF;

/// Byte order of a UTF-16 or UTF-32 buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endian {
    Little,
    Big,
}

#[inline]
fn read_unit(bytes: &[u8], offset: usize, endian: Endian) -> u16 {
    let pair = [bytes[offset], bytes[offset + 1]];
    match endian {
        Endian::Little => u16::from_le_bytes(pair),
        Endian::Big => u16::from_be_bytes(pair),
    }
}

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (SURROGATE_HIGH_START..=SURROGATE_HIGH_END).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (SURROGATE_LOW_START..=SURROGATE_LOW_END).contains(&unit)
}

/// Decodes a UTF-16 byte buffer into codepoints.
///
/// A BOM selects the byte order and is stripped. Without a BOM the buffer is
/// read little-endian first, falling back to big-endian if only that
/// interpretation is self-consistent. Odd lengths and lone or misordered
/// surrogates are decode errors.
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

/// Resolves a buffer's byte order and the offset where its body starts:
/// BOM first, then structural evidence, defaulting to little-endian like
/// [`decode`]'s no-BOM fallback.
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
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::new(base + bytes.len() - 1, Some(1)));
    }

    let mut out = Vec::with_capacity(bytes.len() / 2);
    let mut offset = 0;
    while offset < bytes.len() {
        let unit = read_unit(bytes, offset, endian);

        if is_high_surrogate(unit) {
            // High surrogate - must be followed by a low surrogate.
            if offset + 4 > bytes.len() {
                return Err(DecodeError::new(base + offset, None));
            }
            let low = read_unit(bytes, offset + 2, endian);
            if !is_low_surrogate(low) {
                return Err(DecodeError::new(base + offset, Some(2)));
            }
            let high = (unit - SURROGATE_HIGH_START) as Codepoint;
            let low = (low - SURROGATE_LOW_START) as Codepoint;
            out.push(0x10000 + (high << 10) + low);
            offset += 4;
        } else if is_low_surrogate(unit) {
            // Lone low surrogate is invalid.
            return Err(DecodeError::new(base + offset, Some(2)));
        } else {
            out.push(unit as Codepoint);
            offset += 2;
        }
    }

    Ok(out)
}

/// Checks whether the buffer is a self-consistent sequence of code units in
/// the given byte order, without allocating.
pub(crate) fn validate(bytes: &[u8], endian: Endian) -> bool {
    if bytes.len() % 2 != 0 {
        return false;
    }
    let mut offset = 0;
    while offset < bytes.len() {
        let unit = read_unit(bytes, offset, endian);
        if is_high_surrogate(unit) {
            if offset + 4 > bytes.len() || !is_low_surrogate(read_unit(bytes, offset + 2, endian)) {
                return false;
            }
            offset += 4;
        } else if is_low_surrogate(unit) {
            return false;
        } else {
            offset += 2;
        }
    }
    true
}

/// Encodes codepoints as little-endian UTF-16, prepending the BOM.
///
/// Codepoints at or above U+10000 are split into surrogate pairs; raw stored
/// surrogate values become single code units.
pub fn encode(codepoints: &[Codepoint]) -> Vec<u8> {
    let mut out = Vec::with_capacity(BOM_LE.len() + codepoints.len() * 2);
    out.extend_from_slice(&BOM_LE);
    for &cp in codepoints {
        if cp < 0x10000 {
            out.extend_from_slice(&(cp as u16).to_le_bytes());
        } else {
            let v = (cp - 0x10000) & 0xF_FFFF;
            let high = SURROGATE_HIGH_START + (v >> 10) as u16;
            let low = SURROGATE_LOW_START + (v & 0x3FF) as u16;
            out.extend_from_slice(&high.to_le_bytes());
            out.extend_from_slice(&low.to_le_bytes());
        }
    }
    out
}

/// Returns the number of UTF-16 bytes the codepoint occupies, BOM excluded.
#[inline]
pub fn encoded_len(cp: Codepoint) -> usize {
    if cp < 0x10000 {
        2
    } else {
        4
    }
}
