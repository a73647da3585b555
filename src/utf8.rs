use crate::error::DecodeError;
use crate::Codepoint;

/// The UTF-8 byte-order mark.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decodes a UTF-8 byte buffer into codepoints.
///
/// A leading BOM is stripped. Error offsets refer to the original buffer,
/// BOM included. Validation delegates to the standard library's UTF-8
/// machinery, which enforces the continuation-byte and overlong rules.
pub fn decode(bytes: &[u8]) -> Result<Vec<Codepoint>, DecodeError> {
    let (body, bom_len) = match bytes.strip_prefix(&BOM) {
        Some(rest) => (rest, BOM.len()),
        None => (bytes, 0),
    };
    decode_body(body).map_err(|e| DecodeError::new(bom_len + e.valid_up_to(), e.error_len()))
}

/// Decodes with no BOM handling; error offsets are relative to `bytes`.
pub(crate) fn decode_body(bytes: &[u8]) -> Result<Vec<Codepoint>, DecodeError> {
    match core::str::from_utf8(bytes) {
        Ok(s) => Ok(s.chars().map(|c| c as Codepoint).collect()),
        Err(e) => Err(DecodeError::new(e.valid_up_to(), e.error_len())),
    }
}

/// Encodes codepoints as UTF-8, prepending the BOM.
///
/// Codepoints are written mechanically by value range, so raw stored values
/// (including surrogates) encode to their obvious bit patterns.
pub fn encode(codepoints: &[Codepoint]) -> Vec<u8> {
    let mut out = Vec::with_capacity(BOM.len() + codepoints.len());
    out.extend_from_slice(&BOM);
    for &cp in codepoints {
        encode_codepoint(cp, &mut out);
    }
    out
}

/// Returns the number of UTF-8 bytes the codepoint occupies, BOM excluded.
#[inline]
pub fn encoded_len(cp: Codepoint) -> usize {
    match cp {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

fn encode_codepoint(cp: Codepoint, out: &mut Vec<u8>) {
    match encoded_len(cp) {
        1 => out.push(cp as u8),
        2 => {
            out.push(0xC0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
        3 => {
            out.push(0xE0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
        _ => {
            // Values above U+10FFFF are truncated to 21 bits.
            let cp = cp & 0x1F_FFFF;
            out.push(0xF0 | (cp >> 18) as u8);
            out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
    }
}

/// Validates the buffer as well-formed UTF-8 without decoding it.
pub fn validate(bytes: &[u8]) -> Result<(), DecodeError> {
    match core::str::from_utf8(bytes) {
        Ok(_) => Ok(()),
        Err(e) => Err(DecodeError::new(e.valid_up_to(), e.error_len())),
    }
}
