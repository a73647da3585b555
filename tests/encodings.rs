//! Cross-codec tests: round-trips, BOM handling, and recognition.

use paste::paste;
use similar_asserts::assert_eq;
use stringcore::{recognize, Encoding, String};

// =============================================================================
// Test macros
// =============================================================================

/// Tests that apply to every codec.
macro_rules! test_codec_basics {
    ($name:ident, $variant:expr) => {
        mod $name {
            use super::*;
            use similar_asserts::assert_eq;

            const ENCODING: Encoding = $variant;

            #[test]
            fn name_is_not_empty() {
                assert!(!ENCODING.name().is_empty());
            }

            #[test]
            fn empty_bytes_decode_to_empty() {
                let s = String::from_bytes(&[], ENCODING).unwrap();
                assert!(s.is_empty());
                assert_eq!(s.encoding(), ENCODING);
            }

            #[test]
            fn ascii_text_round_trips() {
                let original = String::from("Hello, world");
                let bytes = original.to_bytes(ENCODING).unwrap();
                let decoded = String::from_bytes(&bytes, ENCODING).unwrap();
                assert_eq!(decoded, original);
            }

            #[test]
            fn length_counts_codepoints_not_bytes() {
                let s = String::from_bytes(
                    &String::from("abc").to_bytes(ENCODING).unwrap(),
                    ENCODING,
                )
                .unwrap();
                assert_eq!(s.len(), 3);
            }
        }
    };
}

/// Extra tests for the Unicode forms, whose encoders emit a BOM.
macro_rules! test_bom_codec {
    ($name:ident, $variant:expr, $bom:expr) => {
        test_codec_basics!($name, $variant);

        paste! {
            mod [<$name _bom>] {
                use super::*;
            use similar_asserts::assert_eq;

                const ENCODING: Encoding = $variant;
                const BOM: &[u8] = &$bom;

                #[test]
                fn encode_prepends_bom() {
                    let bytes = String::from("x").to_bytes(ENCODING).unwrap();
                    assert_eq!(&bytes[..BOM.len()], BOM);
                }

                #[test]
                fn empty_string_encodes_to_bare_bom() {
                    let bytes = String::new().to_bytes(ENCODING).unwrap();
                    assert_eq!(bytes, BOM);
                    let back = String::from_bytes(&bytes, ENCODING).unwrap();
                    assert!(back.is_empty());
                }

                #[test]
                fn bom_is_recognized() {
                    let bytes = String::from("recognizable").to_bytes(ENCODING).unwrap();
                    assert_eq!(recognize(&bytes), Some(ENCODING));
                }

                #[test]
                fn bom_does_not_count_toward_byte_len() {
                    let s = String::from_bytes(
                        &String::from("abc").to_bytes(ENCODING).unwrap(),
                        ENCODING,
                    )
                    .unwrap();
                    let bytes = s.to_bytes(ENCODING).unwrap();
                    assert_eq!(s.byte_len(), bytes.len() - BOM.len());
                }

                #[test]
                fn supplementary_codepoint_round_trips() {
                    let original = String::from("a\u{1F600}b");
                    let bytes = original.to_bytes(ENCODING).unwrap();
                    let decoded = String::from_bytes(&bytes, ENCODING).unwrap();
                    assert_eq!(decoded, original);
                    assert_eq!(decoded.len(), 3);
                }
            }
        }
    };
}

test_bom_codec!(utf8, Encoding::Utf8, [0xEF, 0xBB, 0xBF]);
test_bom_codec!(utf16, Encoding::Utf16, [0xFF, 0xFE]);
test_bom_codec!(utf32, Encoding::Utf32, [0xFF, 0xFE, 0x00, 0x00]);
test_codec_basics!(ascii, Encoding::Ascii);
test_codec_basics!(windows1252, Encoding::Windows1252);

// =============================================================================
// BOM endianness
// =============================================================================

mod big_endian_boms {
    use super::*;
            use similar_asserts::assert_eq;

    #[test]
    fn utf16_be_decodes() {
        let bytes = [0xFE, 0xFF, 0x00, 0x68, 0x00, 0x69];
        let s = String::from_bytes(&bytes, Encoding::Utf16).unwrap();
        assert_eq!(s, "hi");
        assert_eq!(recognize(&bytes), Some(Encoding::Utf16));
    }

    #[test]
    fn utf32_be_decodes() {
        let bytes = [0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x23, 0x87];
        let s = String::from_bytes(&bytes, Encoding::Utf32).unwrap();
        assert_eq!(s.as_codepoints(), &[0x2387]);
        assert_eq!(recognize(&bytes), Some(Encoding::Utf32));
    }

    #[test]
    fn utf32_le_bom_wins_over_utf16_prefix() {
        // FF FE 00 00 is both a UTF-32LE BOM and a UTF-16LE BOM followed
        // by a NUL; the longer BOM is checked first.
        let bytes = [0xFF, 0xFE, 0x00, 0x00, 0x68, 0x00, 0x00, 0x00];
        assert_eq!(recognize(&bytes), Some(Encoding::Utf32));
        let s = String::from_bytes_auto(&bytes).unwrap();
        assert_eq!(s, "h");
    }
}

// =============================================================================
// Recognition without a BOM
// =============================================================================

mod recognition {
    use super::*;
            use similar_asserts::assert_eq;

    #[test]
    fn pure_ascii_is_utf8() {
        assert_eq!(recognize(b"plain ascii text"), Some(Encoding::Utf8));
    }

    #[test]
    fn multibyte_utf8_is_utf8() {
        assert_eq!(recognize("héllo ⎇".as_bytes()), Some(Encoding::Utf8));
    }

    #[test]
    fn bare_utf16_le_needs_zero_bytes() {
        let bytes = [0x68, 0x00, 0x69, 0x00];
        assert_eq!(recognize(&bytes), Some(Encoding::Utf16));
    }

    #[test]
    fn bare_utf32_le() {
        let bytes = [0x68, 0x00, 0x00, 0x00, 0x00, 0xF6, 0x01, 0x00];
        assert_eq!(recognize(&bytes), Some(Encoding::Utf32));
    }

    #[test]
    fn high_bytes_fall_back_to_windows1252() {
        // 0x93/0x94 are curly quotes in Windows-1252 and invalid UTF-8.
        let bytes = [0x93, 0x68, 0x69, 0x94];
        assert_eq!(recognize(&bytes), Some(Encoding::Windows1252));
        let s = String::from_bytes_auto(&bytes).unwrap();
        assert_eq!(s, "\u{201C}hi\u{201D}");
    }

    #[test]
    fn empty_buffer_is_utf8() {
        assert_eq!(recognize(&[]), Some(Encoding::Utf8));
    }
}

// =============================================================================
// Codec-specific behavior through the String layer
// =============================================================================

mod ascii_escapes {
    use super::*;
            use similar_asserts::assert_eq;

    #[test]
    fn escape_round_trip() {
        let original = String::from_codepoints(vec![0x61, 0x62, 0x63, 0x2387, 0x64, 0x65, 0x66]);
        let bytes = original.to_ascii_bytes();
        assert_eq!(bytes, b"abc\\:002387def");
        let decoded = String::from_bytes(&bytes, Encoding::Ascii).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.to_string(), "abc⎇def");
    }

    #[test]
    fn natural_encoding_byte_len_counts_escapes() {
        let s = String::from_bytes(b"abc\\:002387def", Encoding::Ascii).unwrap();
        assert_eq!(s.len(), 7);
        assert_eq!(s.byte_len(), 14);
    }
}

mod windows1252_table {
    use super::*;
            use similar_asserts::assert_eq;

    #[test]
    fn euro_sign_maps_to_0x80() {
        let s = String::from("€");
        assert_eq!(s.to_windows1252_bytes().unwrap(), [0x80]);
    }

    #[test]
    fn unmappable_codepoint_is_an_encode_error() {
        let err = String::from("⎇").to_windows1252_bytes().unwrap_err();
        assert_eq!(err.codepoint(), 0x2387);
        assert_eq!(err.index(), 0);
    }
}

// =============================================================================
// Transcoding
// =============================================================================

mod transcoding {
    use super::*;
            use similar_asserts::assert_eq;

    #[test]
    fn windows1252_to_utf16_and_back_to_utf8() {
        let s = String::from_bytes(&[0x80, 0x20, 0x93], Encoding::Windows1252).unwrap();
        let utf16 = String::from_bytes(&s.to_utf16_bytes(), Encoding::Utf16).unwrap();
        assert_eq!(utf16, s);
        assert_eq!(utf16.to_string(), "€ \u{201C}");
    }

    #[test]
    fn natural_encoding_follows_construction() {
        let s = String::from_bytes(b"hi", Encoding::Windows1252).unwrap();
        assert_eq!(s.encoding(), Encoding::Windows1252);
        assert_eq!(s.to_data().unwrap(), b"hi");

        let auto = String::from_bytes_auto(b"hi").unwrap();
        assert_eq!(auto.encoding(), Encoding::Utf8);
    }
}
