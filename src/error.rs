use core::fmt;

use crate::Codepoint;

/// An error indicating that a byte buffer is not valid for a given encoding.
///
/// Matches the shape of `std::str::Utf8Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl DecodeError {
    /// Creates a new decode error.
    #[inline]
    pub const fn new(valid_up_to: usize, error_len: Option<usize>) -> Self {
        Self {
            valid_up_to,
            error_len,
        }
    }

    /// Returns the byte index in the input up to which valid encoded data
    /// was verified.
    ///
    /// It is the maximum index such that `bytes[..index]` is valid.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Provides more information about the failure:
    ///
    /// * `None`: the end of the input was reached unexpectedly.
    /// * `Some(len)`: an unexpected byte was encountered. The length indicates
    ///   how many bytes starting at the index given by `valid_up_to()` are invalid.
    #[inline]
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error_len) = self.error_len {
            write!(
                f,
                "invalid byte sequence of {} bytes from index {}",
                error_len, self.valid_up_to
            )
        } else {
            write!(
                f,
                "incomplete byte sequence from index {}",
                self.valid_up_to
            )
        }
    }
}

impl std::error::Error for DecodeError {}

/// An error returned when a codepoint has no representation in the target
/// encoding.
///
/// Only limited encodings (Windows-1252) can produce this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    /// The codepoint that couldn't be encoded.
    pub codepoint: Codepoint,
    /// The index (in codepoints) where the error occurred.
    pub index: usize,
}

impl EncodeError {
    /// Creates a new encode error.
    #[inline]
    pub const fn new(codepoint: Codepoint, index: usize) -> Self {
        Self { codepoint, index }
    }

    /// Returns the codepoint that couldn't be encoded.
    #[inline]
    pub const fn codepoint(&self) -> Codepoint {
        self.codepoint
    }

    /// Returns the codepoint index where the error occurred.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "codepoint U+{:04X} at index {} cannot be represented in the target encoding",
            self.codepoint, self.index
        )
    }
}

impl std::error::Error for EncodeError {}

/// An error indicating a codepoint index outside `[0, len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsError {
    /// The offending index.
    pub index: usize,
    /// The string's length in codepoints.
    pub len: usize,
}

impl BoundsError {
    /// Creates a new bounds error.
    #[inline]
    pub const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "codepoint index {} out of bounds for string of length {}",
            self.index, self.len
        )
    }
}

impl std::error::Error for BoundsError {}

/// An error indicating a `Range` that does not fit inside a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError {
    /// The requested range's starting position.
    pub position: usize,
    /// The requested range's length.
    pub length: usize,
    /// The string's length in codepoints.
    pub len: usize,
}

impl RangeError {
    /// Creates a new range error.
    #[inline]
    pub const fn new(position: usize, length: usize, len: usize) -> Self {
        Self {
            position,
            length,
            len,
        }
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "range ({}, {}) out of bounds for string of length {}",
            self.position, self.length, self.len
        )
    }
}

impl std::error::Error for RangeError {}

/// An error produced while parsing a printf-style format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The format string ended in the middle of a conversion specifier.
    UnterminatedSpecifier {
        /// Byte offset of the `%` that began the specifier.
        offset: usize,
    },
    /// An unsupported conversion character was encountered.
    UnknownConversion {
        /// Byte offset of the conversion character.
        offset: usize,
        /// The unrecognized conversion character.
        found: char,
    },
    /// A specifier had no matching argument.
    MissingArgument {
        /// Byte offset of the specifier that ran out of arguments.
        offset: usize,
    },
    /// An argument's kind did not match its conversion.
    WrongArgument {
        /// Byte offset of the specifier.
        offset: usize,
        /// Human-readable name of the expected argument kind.
        expected: &'static str,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedSpecifier { offset } => {
                write!(f, "format string ends inside specifier at offset {}", offset)
            }
            Self::UnknownConversion { offset, found } => {
                write!(f, "unknown conversion {:?} at offset {}", found, offset)
            }
            Self::MissingArgument { offset } => {
                write!(f, "missing argument for specifier at offset {}", offset)
            }
            Self::WrongArgument { offset, expected } => {
                write!(
                    f,
                    "specifier at offset {} expects {} argument",
                    offset, expected
                )
            }
        }
    }
}

impl std::error::Error for FormatError {}
