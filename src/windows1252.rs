//! Windows-1252 (Western European) codec.
//!
//! Bytes 0x00-0x7F and 0xA0-0xFF map to the identically numbered codepoint;
//! 0x80-0x9F use the table below. The five unassigned slots (0x81, 0x8D,
//! 0x8F, 0x90, 0x9D) map to their own byte value, so decode accepts every
//! byte. Encode is the table's inverse and fails for any codepoint with no
//! Windows-1252 representation.

use crate::error::EncodeError;
use crate::Codepoint;

/// Codepoints for bytes 0x80-0x9F, straight from the code page definition.
const HIGH_CONTROLS: [u16; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, // 0x80-0x87
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F, // 0x88-0x8F
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, // 0x90-0x97
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178, // 0x98-0x9F
];

/// Maps one Windows-1252 byte to its codepoint.
#[inline]
pub fn decode_byte(byte: u8) -> Codepoint {
    match byte {
        0x80..=0x9F => HIGH_CONTROLS[(byte - 0x80) as usize] as Codepoint,
        _ => byte as Codepoint,
    }
}

/// Maps one codepoint to its Windows-1252 byte, if it has one.
#[inline]
pub fn encode_codepoint(cp: Codepoint) -> Option<u8> {
    match cp {
        0x00..=0x7F | 0xA0..=0xFF => {
            // Codepoints shadowed by the 0x80-0x9F table are unreachable
            // here: none of the table entries fall in these ranges except
            // the unassigned slots, which map to themselves anyway.
            Some(cp as u8)
        }
        _ => HIGH_CONTROLS
            .iter()
            .position(|&mapped| mapped as Codepoint == cp)
            .map(|i| 0x80 + i as u8),
    }
}

/// Decodes a Windows-1252 byte buffer. Total: every byte maps to something.
pub fn decode(bytes: &[u8]) -> Vec<Codepoint> {
    bytes.iter().map(|&b| decode_byte(b)).collect()
}

/// Encodes codepoints as Windows-1252 bytes.
///
/// Fails with the first unmappable codepoint; this code page is not a
/// general-purpose export target for arbitrary Unicode.
pub fn encode(codepoints: &[Codepoint]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(codepoints.len());
    for (index, &cp) in codepoints.iter().enumerate() {
        match encode_codepoint(cp) {
            Some(b) => out.push(b),
            None => return Err(EncodeError::new(cp, index)),
        }
    }
    Ok(out)
}

/// Returns the number of Windows-1252 bytes the codepoint occupies.
///
/// Unmappable codepoints count as one byte; `encode` is where they fail.
#[inline]
pub fn encoded_len(_cp: Codepoint) -> usize {
    1
}
