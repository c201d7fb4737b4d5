//! UTF-8 decoding and validation.
//!
//! Text values are stored as raw bytes and are only *presumed* to be UTF-8.
//! This module decides, one unit at a time, whether the bytes really are:
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|-------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                 | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`        | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2    | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3    | U+10000 - U+10FFFF   |
//!
//! [`decode_unit`] is the single source of truth: [`validate_utf8`] uses it
//! to report the first malformed sequence with its position, and the
//! codepoint iterator in [`super::encoding`] uses it to split text into
//! units, treating each byte of a malformed sequence as a unit of its own.

use core::fmt;

/// Error information for UTF-8 validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8Error {
    /// The byte offset where the error occurred (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

impl std::error::Error for Utf8Error {}

/// The specific way a byte sequence fails to be UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8ErrorKind {
    /// A continuation byte (0x80-0xBF) or 0xF8-0xFF where a lead byte was expected.
    InvalidLeadByte,
    /// A byte outside 0x80-0xBF where a continuation byte was expected.
    InvalidContinuationByte,
    /// A code point encoded with more bytes than necessary.
    OverlongEncoding,
    /// A UTF-16 surrogate (U+D800-U+DFFF).
    SurrogateCodepoint,
    /// A code point above U+10FFFF.
    OutOfRangeCodepoint,
    /// A multi-byte sequence cut off at the end of input.
    TruncatedSequence,
}

impl fmt::Display for Utf8ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::OverlongEncoding => write!(f, "overlong UTF-8 encoding"),
            Self::SurrogateCodepoint => write!(f, "surrogate code point in UTF-8"),
            Self::OutOfRangeCodepoint => write!(f, "code point above U+10FFFF"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
        }
    }
}

/// A malformed sequence found by [`decode_unit`].
///
/// `at` is the offset of the offending byte relative to the start of the
/// sequence (non-zero only for bad continuation bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: Utf8ErrorKind,
    pub at: usize,
}

impl DecodeError {
    fn new(kind: Utf8ErrorKind) -> Self {
        DecodeError { kind, at: 0 }
    }
}

/// Check if a byte is a valid UTF-8 continuation byte (0x80-0xBF).
#[inline(always)]
fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Get the expected sequence length from a lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes or 0xF8+).
#[inline]
pub fn sequence_length(lead_byte: u8) -> usize {
    match lead_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

/// Decode the first well-formed code point of `input`.
///
/// On success returns the character and the number of bytes it occupies.
/// Overlong forms, surrogates and code points above U+10FFFF are rejected.
///
/// ```
/// use primitive_wrappers::text::utf8::{decode_unit, Utf8ErrorKind};
///
/// assert_eq!(decode_unit(b"A"), Ok(('A', 1)));
/// assert_eq!(decode_unit("日本".as_bytes()), Ok(('日', 3)));
/// assert_eq!(decode_unit(&[0x80]).unwrap_err().kind, Utf8ErrorKind::InvalidLeadByte);
/// ```
pub fn decode_unit(input: &[u8]) -> Result<(char, usize), DecodeError> {
    let Some(&lead) = input.first() else {
        return Err(DecodeError::new(Utf8ErrorKind::TruncatedSequence));
    };

    let len = sequence_length(lead);
    match len {
        0 => return Err(DecodeError::new(Utf8ErrorKind::InvalidLeadByte)),
        1 => return Ok((lead as char, 1)),
        _ => {}
    }

    if input.len() < len {
        return Err(DecodeError::new(Utf8ErrorKind::TruncatedSequence));
    }

    // Payload bits of the lead byte: 5, 4 or 3 for 2, 3 or 4 byte forms.
    let mut cp = lead as u32 & (0x7F >> len);
    for (at, &byte) in input[1..len].iter().enumerate() {
        if !is_continuation_byte(byte) {
            return Err(DecodeError {
                kind: Utf8ErrorKind::InvalidContinuationByte,
                at: at + 1,
            });
        }
        cp = (cp << 6) | (byte as u32 & 0x3F);
    }

    let min = match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x10000,
    };
    if cp < min {
        return Err(DecodeError::new(Utf8ErrorKind::OverlongEncoding));
    }
    if (0xD800..=0xDFFF).contains(&cp) {
        return Err(DecodeError::new(Utf8ErrorKind::SurrogateCodepoint));
    }

    char::from_u32(cp)
        .map(|ch| (ch, len))
        .ok_or(DecodeError::new(Utf8ErrorKind::OutOfRangeCodepoint))
}

/// Validate that the input is well-formed UTF-8.
///
/// Returns the first violation with its byte offset, line and column.
///
/// ```
/// use primitive_wrappers::text::utf8::validate_utf8;
///
/// assert!(validate_utf8("émoji: 🎉".as_bytes()).is_ok());
/// assert!(validate_utf8(&[0xC2]).is_err());
/// ```
pub fn validate_utf8(input: &[u8]) -> Result<(), Utf8Error> {
    let mut pos = 0;
    let mut line = 1;
    let mut line_start = 0;

    while pos < input.len() {
        let byte = input[pos];
        if byte < 0x80 {
            if byte == b'\n' {
                line += 1;
                line_start = pos + 1;
            }
            pos += 1;
            continue;
        }

        match decode_unit(&input[pos..]) {
            Ok((_, len)) => pos += len,
            Err(err) => {
                let offset = pos + err.at;
                return Err(Utf8Error {
                    offset,
                    line,
                    column: offset - line_start + 1,
                    kind: err.kind,
                });
            }
        }
    }

    Ok(())
}
