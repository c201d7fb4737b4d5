//! Encodings understood by [`Text`](super::Text) and the codepoint unit model.
//!
//! Length and positions are counted in *units*. Under UTF-8 a unit is one
//! well-formed sequence, or a single byte of a malformed one. Under ASCII and
//! ISO-8859-1 every byte is a unit.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::utf8::{decode_unit, validate_utf8};
use crate::error::{Error, Result};

/// Detection order used by [`Text::detect_encoding`](super::Text::detect_encoding).
pub const DEFAULT_DETECT_ORDER: &[Encoding] = &[Encoding::Ascii, Encoding::Utf8];

/// A supported character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// 7-bit ASCII.
    Ascii,
    /// UTF-8.
    Utf8,
    /// ISO-8859-1; accepts any byte sequence.
    Latin1,
}

impl Encoding {
    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ASCII",
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Whether `bytes` are valid in this encoding.
    pub fn accepts(self, bytes: &[u8]) -> bool {
        match self {
            Encoding::Ascii => bytes.is_ascii(),
            Encoding::Utf8 => validate_utf8(bytes).is_ok(),
            Encoding::Latin1 => true,
        }
    }

    /// Split `bytes` into units of this encoding.
    pub fn units(self, bytes: &[u8]) -> Units<'_> {
        Units {
            input: bytes,
            pos: 0,
            encoding: self,
        }
    }

    /// Number of units in `bytes`.
    pub fn unit_count(self, bytes: &[u8]) -> usize {
        match self {
            Encoding::Ascii | Encoding::Latin1 => bytes.len(),
            Encoding::Utf8 if bytes.is_ascii() => bytes.len(),
            Encoding::Utf8 => self.units(bytes).count(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "iso-8859-1" | "latin1" => Ok(Encoding::Latin1),
            _ => Err(Error::domain(format!("unsupported encoding '{}'", s))),
        }
    }
}

/// Pick the first encoding in `order` that accepts `bytes`.
///
/// When none matches, the error carries the UTF-8 validation failure as its
/// source so callers can see where the bytes went wrong.
pub fn detect(bytes: &[u8], order: &[Encoding]) -> Result<Encoding> {
    if let Some(found) = order.iter().copied().find(|enc| enc.accepts(bytes)) {
        log::trace!("detected {} for {} bytes", found, bytes.len());
        return Ok(found);
    }

    let err = Error::encoding("could not detect encoding");
    Err(match validate_utf8(bytes) {
        Err(cause) => err.with_source(cause),
        Ok(()) => err,
    })
}

/// One unit of text: its raw bytes and, when well-formed, the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    pub bytes: &'a [u8],
    pub ch: Option<char>,
}

/// Iterator over the units of a byte slice.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    input: &'a [u8],
    pos: usize,
    encoding: Encoding,
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Unit<'a>> {
        let rest = self.input.get(self.pos..).filter(|r| !r.is_empty())?;
        let (ch, len) = match self.encoding {
            Encoding::Ascii => (Some(rest[0]).filter(u8::is_ascii).map(char::from), 1),
            Encoding::Latin1 => (Some(char::from(rest[0])), 1),
            Encoding::Utf8 => match decode_unit(rest) {
                Ok((ch, len)) => (Some(ch), len),
                Err(_) => (None, 1),
            },
        };
        self.pos += len;
        Some(Unit {
            bytes: &rest[..len],
            ch,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.input.len() - self.pos;
        ((remaining + 3) / 4, Some(remaining))
    }
}
