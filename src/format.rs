//! printf-style string construction.
//!
//! The engine follows C `sprintf` for the conversions it supports, with
//! two departures: arguments are a typed [`Arg`] slice rather than
//! varargs, and `%@` inlines another [`String`]'s codepoints verbatim.

use crate::error::FormatError;
use crate::string::String;
use crate::Codepoint;

/// A typed argument for [`String::format`].
///
/// Usually built through `From` by the [`sprintf!`](crate::sprintf) macro
/// rather than by hand.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    /// A signed integer (`%d`, or reinterpreted for `%u`/`%o`/`%x`/`%X`).
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating-point number (`%f`, `%e`, `%g`).
    Float(f64),
    /// A single codepoint (`%c`).
    Char(Codepoint),
    /// Borrowed UTF-8 text (`%s`).
    Str(&'a str),
    /// A borrowed crate string (`%s`, `%S`, `%@`).
    String(&'a String),
}

macro_rules! arg_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg<'_> {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::Int(value as i64)
            }
        })*
    };
}

macro_rules! arg_from_uint {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg<'_> {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::Uint(value as u64)
            }
        })*
    };
}

arg_from_int!(i8, i16, i32, i64, isize);
arg_from_uint!(u8, u16, u32, u64, usize);

impl From<f32> for Arg<'_> {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<f64> for Arg<'_> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for Arg<'_> {
    #[inline]
    fn from(value: char) -> Self {
        Self::Char(value as Codepoint)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Self::String(value)
    }
}

/// Formats into a new [`String`], printf-style.
///
/// ```
/// let greeting = stringcore::sprintf!("%s, %04d!", "hello", 42).unwrap();
/// assert_eq!(greeting, "hello, 0042!");
/// ```
#[macro_export]
macro_rules! sprintf {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::String::format($fmt, &[$($crate::Arg::from($arg)),*])
    };
}

/// Integer width selected by a length modifier. Bare conversions are
/// 32-bit, as in C's default argument promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Length {
    Byte,
    Short,
    Default,
    Long,
}

#[derive(Debug, Clone, Copy)]
struct Spec {
    minus: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    length: Length,
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            minus: false,
            zero: false,
            width: 0,
            precision: None,
            length: Length::Default,
        }
    }
}

impl String {
    /// Builds a string from a printf-style format and a typed argument
    /// slice. See the crate docs for the supported conversions.
    ///
    /// Fails without producing anything if the format string is
    /// malformed or an argument is missing or of the wrong kind; every
    /// error names the byte offset of the offending specifier.
    pub fn format(fmt: &str, args: &[Arg<'_>]) -> Result<Self, FormatError> {
        let chars: Vec<(usize, char)> = fmt.char_indices().collect();
        let mut out: Vec<Codepoint> = Vec::new();
        let mut next_arg = 0usize;
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];
            if c != '%' {
                out.push(c as Codepoint);
                i += 1;
                continue;
            }

            i += 1;
            let mut spec = Spec::default();
            loop {
                match chars.get(i).map(|&(_, c)| c) {
                    Some('-') => spec.minus = true,
                    Some('0') => spec.zero = true,
                    _ => break,
                }
                i += 1;
            }
            while let Some(d) = chars.get(i).and_then(|&(_, c)| c.to_digit(10)) {
                spec.width = spec.width * 10 + d as usize;
                i += 1;
            }
            if chars.get(i).map(|&(_, c)| c) == Some('.') {
                i += 1;
                let mut precision = 0;
                while let Some(d) = chars.get(i).and_then(|&(_, c)| c.to_digit(10)) {
                    precision = precision * 10 + d as usize;
                    i += 1;
                }
                spec.precision = Some(precision);
            }
            match chars.get(i).map(|&(_, c)| c) {
                Some('h') => {
                    i += 1;
                    spec.length = if chars.get(i).map(|&(_, c)| c) == Some('h') {
                        i += 1;
                        Length::Byte
                    } else {
                        Length::Short
                    };
                }
                Some('l') => {
                    i += 1;
                    if chars.get(i).map(|&(_, c)| c) == Some('l') {
                        i += 1;
                    }
                    spec.length = Length::Long;
                }
                _ => {}
            }

            let Some(&(conv_offset, conv)) = chars.get(i) else {
                return Err(FormatError::UnterminatedSpecifier { offset });
            };
            i += 1;

            match conv {
                '%' => out.push('%' as Codepoint),
                'd' => {
                    let v = truncate_signed(int_arg(args, &mut next_arg, offset)?, spec.length);
                    // An explicit precision turns off the zero flag, as in C.
                    let spec = Spec {
                        zero: spec.zero && spec.precision.is_none(),
                        ..spec
                    };
                    emit_number(&mut out, render_signed(v, &spec), &spec);
                }
                'u' | 'U' | 'o' | 'x' | 'X' => {
                    let v = truncate_unsigned(int_arg(args, &mut next_arg, offset)?, spec.length);
                    let digits = match conv {
                        'o' => format!("{:o}", v),
                        'x' => format!("{:x}", v),
                        'X' => format!("{:X}", v),
                        _ => format!("{}", v),
                    };
                    let spec = Spec {
                        zero: spec.zero && spec.precision.is_none(),
                        ..spec
                    };
                    emit_number(&mut out, pad_digits(digits, v == 0, &spec), &spec);
                }
                'c' => {
                    let cp = match *take(args, &mut next_arg, offset)? {
                        Arg::Char(cp) => cp,
                        _ => {
                            return Err(FormatError::WrongArgument {
                                offset,
                                expected: "character",
                            })
                        }
                    };
                    emit_text(&mut out, vec![cp], &spec, false);
                }
                's' | 'S' => {
                    let content = string_arg(args, &mut next_arg, offset)?;
                    emit_text(&mut out, content, &spec, true);
                }
                '@' => {
                    let content = match *take(args, &mut next_arg, offset)? {
                        Arg::String(s) => s.as_codepoints().to_vec(),
                        _ => {
                            return Err(FormatError::WrongArgument {
                                offset,
                                expected: "string object",
                            })
                        }
                    };
                    emit_text(&mut out, content, &spec, false);
                }
                'f' | 'e' | 'g' => {
                    let v = float_arg(args, &mut next_arg, offset)?;
                    let precision = spec.precision.unwrap_or(6);
                    let body = match conv {
                        'f' => format!("{:.*}", precision, v),
                        'e' => format_e(v, precision),
                        _ => format_g(v, precision),
                    };
                    emit_number(&mut out, body, &spec);
                }
                _ => {
                    return Err(FormatError::UnknownConversion {
                        offset: conv_offset,
                        found: conv,
                    })
                }
            }
        }

        Ok(Self::from_codepoints(out))
    }
}

fn take<'s, 'a>(
    args: &'s [Arg<'a>],
    next: &mut usize,
    offset: usize,
) -> Result<&'s Arg<'a>, FormatError> {
    let arg = args
        .get(*next)
        .ok_or(FormatError::MissingArgument { offset })?;
    *next += 1;
    Ok(arg)
}

fn int_arg(args: &[Arg<'_>], next: &mut usize, offset: usize) -> Result<i64, FormatError> {
    match *take(args, next, offset)? {
        Arg::Int(v) => Ok(v),
        Arg::Uint(v) => Ok(v as i64),
        _ => Err(FormatError::WrongArgument {
            offset,
            expected: "integer",
        }),
    }
}

fn float_arg(args: &[Arg<'_>], next: &mut usize, offset: usize) -> Result<f64, FormatError> {
    match *take(args, next, offset)? {
        Arg::Float(v) => Ok(v),
        _ => Err(FormatError::WrongArgument {
            offset,
            expected: "float",
        }),
    }
}

fn string_arg(
    args: &[Arg<'_>],
    next: &mut usize,
    offset: usize,
) -> Result<Vec<Codepoint>, FormatError> {
    match *take(args, next, offset)? {
        Arg::Str(s) => Ok(s.chars().map(|c| c as Codepoint).collect()),
        Arg::String(s) => Ok(s.as_codepoints().to_vec()),
        _ => Err(FormatError::WrongArgument {
            offset,
            expected: "string",
        }),
    }
}

/// Truncates to the modifier's width and sign-extends back, as C does when
/// a narrow argument is printed signed.
fn truncate_signed(v: i64, length: Length) -> i64 {
    match length {
        Length::Byte => v as i8 as i64,
        Length::Short => v as i16 as i64,
        Length::Default => v as i32 as i64,
        Length::Long => v,
    }
}

fn truncate_unsigned(v: i64, length: Length) -> u64 {
    match length {
        Length::Byte => v as u8 as u64,
        Length::Short => v as u16 as u64,
        Length::Default => v as u32 as u64,
        Length::Long => v as u64,
    }
}

fn render_signed(v: i64, spec: &Spec) -> std::string::String {
    let digits = pad_digits(v.unsigned_abs().to_string(), v == 0, spec);
    if v < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Applies integer precision: minimum digit count, and `%.0d` of zero is
/// the empty string.
fn pad_digits(digits: std::string::String, is_zero: bool, spec: &Spec) -> std::string::String {
    match spec.precision {
        Some(0) if is_zero => std::string::String::new(),
        Some(p) if digits.len() < p => {
            let mut padded = "0".repeat(p - digits.len());
            padded.push_str(&digits);
            padded
        }
        _ => digits,
    }
}

/// `%e`: a sign and at least two digits in the exponent, as C requires.
fn format_e(v: f64, precision: usize) -> std::string::String {
    let rendered = format!("{:.*e}", precision, v);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, magnitude) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, magnitude)
        }
        // inf and NaN carry no exponent.
        None => rendered,
    }
}

/// `%g`: scientific iff the exponent is below -4 or at least the
/// precision, then trailing zeros stripped.
fn format_g(v: f64, precision: usize) -> std::string::String {
    if !v.is_finite() {
        return format!("{}", v);
    }
    let p = precision.max(1);
    let scientific = format_e(v, p - 1);
    let exponent: i32 = match scientific.split_once('e') {
        Some((_, e)) => e.parse().unwrap_or(0),
        None => 0,
    };
    if exponent >= -4 && exponent < p as i32 {
        let fixed_precision = (p as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(format!("{:.*}", fixed_precision, v))
    } else {
        match scientific.split_once('e') {
            Some((mantissa, e)) => {
                format!("{}e{}", strip_trailing_zeros(mantissa.to_string()), e)
            }
            None => scientific,
        }
    }
}

fn strip_trailing_zeros(s: std::string::String) -> std::string::String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Appends a rendered number, honoring width and the `0` flag. Zero
/// padding goes between the sign and the digits.
fn emit_number(out: &mut Vec<Codepoint>, body: std::string::String, spec: &Spec) {
    let content: Vec<Codepoint> = body.chars().map(|c| c as Codepoint).collect();
    let pad = spec.width.saturating_sub(content.len());
    if pad == 0 {
        out.extend(content);
        return;
    }
    if spec.minus {
        out.extend(content);
        out.extend(core::iter::repeat(' ' as Codepoint).take(pad));
    } else if spec.zero {
        let signed = content.first() == Some(&('-' as Codepoint));
        if signed {
            out.push('-' as Codepoint);
        }
        out.extend(core::iter::repeat('0' as Codepoint).take(pad));
        out.extend(&content[usize::from(signed)..]);
    } else {
        out.extend(core::iter::repeat(' ' as Codepoint).take(pad));
        out.extend(content);
    }
}

/// Appends text content, honoring width and (when `truncate` is set)
/// precision, both counted in codepoints.
fn emit_text(out: &mut Vec<Codepoint>, mut content: Vec<Codepoint>, spec: &Spec, truncate: bool) {
    if truncate {
        if let Some(p) = spec.precision {
            content.truncate(p);
        }
    }
    let pad = spec.width.saturating_sub(content.len());
    if spec.minus {
        out.extend(content);
        out.extend(core::iter::repeat(' ' as Codepoint).take(pad));
    } else {
        out.extend(core::iter::repeat(' ' as Codepoint).take(pad));
        out.extend(content);
    }
}
