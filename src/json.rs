//! Decoding of JSON string-literal escapes.
//!
//! This handles the escape grammar of a JSON string *body* (the text
//! between the quotes): the short escapes `\b \f \n \r \t \\ \/ \"` and
//! `\uXXXX`, including surrogate-pair combination. It is not a JSON
//! parser; unescaped characters pass through untouched.

use crate::error::DecodeError;
use crate::string::String;
use crate::Codepoint;

const HIGH_SURROGATE: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATE: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Decodes JSON string escapes into codepoints.
///
/// A high/low surrogate escape pair combines into one supplementary
/// codepoint. Errors carry the byte offset of the backslash that opened
/// the offending escape; an escape cut off by the end of input reports
/// `error_len` of `None`, every other failure a `Some` spanning the bad
/// escape.
pub fn decode_escaped(text: &str) -> Result<Vec<Codepoint>, DecodeError> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        if c != '\\' {
            out.push(c as Codepoint);
            i += 1;
            continue;
        }
        let Some(&(_, escape)) = chars.get(i + 1) else {
            return Err(DecodeError::new(offset, None));
        };
        match escape {
            '"' | '\\' | '/' => {
                out.push(escape as Codepoint);
                i += 2;
            }
            'b' => {
                out.push(0x08);
                i += 2;
            }
            'f' => {
                out.push(0x0C);
                i += 2;
            }
            'n' => {
                out.push(0x0A);
                i += 2;
            }
            'r' => {
                out.push(0x0D);
                i += 2;
            }
            't' => {
                out.push(0x09);
                i += 2;
            }
            'u' => {
                let unit = hex4(&chars, i + 2, offset)?;
                if LOW_SURROGATE.contains(&unit) {
                    return Err(DecodeError::new(offset, Some(6)));
                }
                if !HIGH_SURROGATE.contains(&unit) {
                    out.push(unit);
                    i += 6;
                    continue;
                }
                // A high surrogate must be followed by a low one.
                match (chars.get(i + 6), chars.get(i + 7)) {
                    (Some(&(low_offset, '\\')), Some(&(_, 'u'))) => {
                        let low = hex4(&chars, i + 8, low_offset)?;
                        if !LOW_SURROGATE.contains(&low) {
                            return Err(DecodeError::new(offset, Some(6)));
                        }
                        out.push(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00));
                        i += 12;
                    }
                    (None, _) => return Err(DecodeError::new(offset, None)),
                    _ => return Err(DecodeError::new(offset, Some(6))),
                }
            }
            _ => return Err(DecodeError::new(offset, Some(2))),
        }
    }

    Ok(out)
}

/// Four hex digits starting at `chars[start]`, or the error for the
/// escape that began at byte `escape_offset`.
fn hex4(
    chars: &[(usize, char)],
    start: usize,
    escape_offset: usize,
) -> Result<u32, DecodeError> {
    let mut value = 0;
    for k in 0..4 {
        let digit = match chars.get(start + k) {
            None => return Err(DecodeError::new(escape_offset, None)),
            Some(&(_, c)) => c
                .to_digit(16)
                .ok_or(DecodeError::new(escape_offset, Some(2 + k + 1)))?,
        };
        value = value * 16 + digit;
    }
    Ok(value)
}

impl String {
    /// Decodes the body of a JSON string literal (everything between the
    /// quotes) into a new string. See [`decode_escaped`].
    pub fn from_json_escaped(text: &str) -> Result<Self, DecodeError> {
        Ok(Self::from_codepoints(decode_escaped(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(decode_escaped("héllo").unwrap(), vec![
            0x68, 0xE9, 0x6C, 0x6C, 0x6F
        ]);
    }

    #[test]
    fn short_escapes() {
        assert_eq!(
            decode_escaped(r#"a\n\t\"\\\/b"#).unwrap(),
            vec![0x61, 0x0A, 0x09, 0x22, 0x5C, 0x2F, 0x62]
        );
        assert_eq!(decode_escaped(r"\b\f\r").unwrap(), vec![0x08, 0x0C, 0x0D]);
    }

    #[test]
    fn unicode_escape() {
        assert_eq!(decode_escaped(r"\u0041").unwrap(), vec![0x41]);
        assert_eq!(decode_escaped(r"\u2387").unwrap(), vec![0x2387]);
        // Hex digits decode case-insensitively.
        assert_eq!(decode_escaped(r"\u23Fb").unwrap(), vec![0x23FB]);
    }

    #[test]
    fn surrogate_pair_combines() {
        assert_eq!(decode_escaped(r"\uD83D\uDE00").unwrap(), vec![0x1F600]);
        assert_eq!(decode_escaped(r"a\uD800\uDC00b").unwrap(), vec![
            0x61, 0x10000, 0x62
        ]);
    }

    #[test]
    fn lone_low_surrogate_rejected() {
        let err = decode_escaped(r"ab\uDE00").unwrap_err();
        assert_eq!(err, DecodeError::new(2, Some(6)));
    }

    #[test]
    fn high_surrogate_needs_low() {
        // Followed by an ordinary escape.
        let err = decode_escaped(r"\uD83D\n").unwrap_err();
        assert_eq!(err, DecodeError::new(0, Some(6)));
        // Followed by a non-surrogate unicode escape.
        let err = decode_escaped(r"\uD83DA").unwrap_err();
        assert_eq!(err, DecodeError::new(0, Some(6)));
        // Cut off by end of input.
        let err = decode_escaped(r"\uD83D").unwrap_err();
        assert_eq!(err, DecodeError::new(0, None));
    }

    #[test]
    fn truncated_escapes() {
        assert_eq!(decode_escaped("\\").unwrap_err(), DecodeError::new(0, None));
        assert_eq!(
            decode_escaped(r"ab\u12").unwrap_err(),
            DecodeError::new(2, None)
        );
    }

    #[test]
    fn invalid_escapes() {
        let err = decode_escaped(r"a\q").unwrap_err();
        assert_eq!(err, DecodeError::new(1, Some(2)));
        let err = decode_escaped(r"\u12G4").unwrap_err();
        assert_eq!(err, DecodeError::new(0, Some(5)));
    }

    #[test]
    fn from_json_escaped_constructor() {
        let s = String::from_json_escaped(r#"say \"hi\" \uD83D\uDE00"#).unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(s.char_at(9).unwrap(), 0x1F600);
    }
}
