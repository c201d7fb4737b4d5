//! Immutable text values.
//!
//! [`Text`] wraps a byte sequence that is *presumed* to be UTF-8. Nothing is
//! validated on construction; operations that need well-formed input
//! ([`Text::to_str`], [`Text::detect_encoding`], [`Text::to_json`]) report
//! problems as [`Error`]s, and everything else works on codepoint units as
//! described in [`encoding`].
//!
//! Every operation borrows the receiver and returns a fresh value:
//!
//! ```
//! use primitive_wrappers::Text;
//!
//! let title = Text::from("helloWorld");
//! let snake = title.to_snake_case();
//!
//! assert_eq!(snake, "hello_world");
//! assert_eq!(title, "helloWorld");
//! assert!(snake.is_snake_case());
//! ```
//!
//! ## Submodules
//!
//! - [`utf8`] - UTF-8 decoding and validation with positions
//! - [`encoding`] - encodings, detection and the unit iterator
//! - [`case`] - snake, kebab and camel case conversion
//! - [`markup`] - tag stripping and entity escaping

pub mod case;
pub mod encoding;
pub mod markup;
pub mod utf8;

use core::fmt;
use std::sync::{Arc, OnceLock};

use regex::bytes::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collection::{JsonOptions, Value};
use crate::error::{Error, Result};
use crate::util;
pub use encoding::{Encoding, Unit, Units, DEFAULT_DETECT_ORDER};
pub use utf8::{validate_utf8, Utf8Error, Utf8ErrorKind};

/// Characters removed by [`Text::trim`].
pub const DEFAULT_TRIM_CHARS: &str = " \n\r\t\x0B\0";

fn word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("static pattern"))
}

/// An immutable, cheaply clonable string value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    bytes: Arc<[u8]>,
}

impl Text {
    /// Wrap a copy of `bytes`. No validation is performed.
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Text {
            bytes: Arc::from(bytes.as_ref()),
        }
    }

    /// The raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Borrow as `&str`, failing on malformed UTF-8.
    pub fn to_str(&self) -> Result<&str> {
        core::str::from_utf8(&self.bytes).map_err(|std_err| {
            let err = Error::encoding("text is not valid UTF-8");
            match validate_utf8(&self.bytes) {
                Err(detail) => err.with_source(detail),
                Ok(()) => err.with_source(std_err),
            }
        })
    }

    /// Convert to a `String`, replacing malformed units with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Copy the bytes out.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Whether both values share the same storage.
    pub fn ptr_eq(&self, other: &Text) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    fn units(&self) -> Units<'_> {
        Encoding::Utf8.units(&self.bytes)
    }

    // =========================================================================
    // Length and encoding
    // =========================================================================

    /// Number of codepoint units.
    pub fn length(&self) -> usize {
        Encoding::Utf8.unit_count(&self.bytes)
    }

    /// Best-guess encoding, trying ASCII then UTF-8.
    pub fn detect_encoding(&self) -> Result<Encoding> {
        encoding::detect(&self.bytes, DEFAULT_DETECT_ORDER)
    }

    /// Best-guess encoding, trying each of `order` in turn.
    pub fn detect_encoding_in(&self, order: &[Encoding]) -> Result<Encoding> {
        encoding::detect(&self.bytes, order)
    }

    /// Whether some character takes more than one byte.
    pub fn is_multibyte(&self) -> Result<bool> {
        let encoding = self.detect_encoding()?;
        Ok(encoding.unit_count(&self.bytes) != self.bytes.len())
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Lowercase every character.
    pub fn to_lower(&self) -> Text {
        Text::from(case::to_lower(&self.bytes))
    }

    /// Uppercase every character.
    pub fn to_upper(&self) -> Text {
        Text::from(case::to_upper(&self.bytes))
    }

    /// Strip [`DEFAULT_TRIM_CHARS`] from both ends.
    pub fn trim(&self) -> Text {
        self.trim_chars(DEFAULT_TRIM_CHARS)
    }

    /// Strip every character of `charset` from both ends.
    pub fn trim_chars(&self, charset: &str) -> Text {
        let strip = |unit: &Unit<'_>| unit.ch.map_or(false, |c| charset.contains(c));
        let units: Vec<Unit<'_>> = self.units().collect();

        let Some(first) = units.iter().position(|u| !strip(u)) else {
            return Text::default();
        };
        let last = units.iter().rposition(|u| !strip(u)).unwrap_or(first);

        let start: usize = units[..first].iter().map(|u| u.bytes.len()).sum();
        let end: usize = start
            + units[first..=last]
                .iter()
                .map(|u| u.bytes.len())
                .sum::<usize>();
        Text::new(&self.bytes[start..end])
    }

    /// Uppercase the first character only.
    pub fn capitalize(&self) -> Text {
        Text::from(case::map_first(&self.bytes, |c| c.to_uppercase().collect()))
    }

    /// Replace every non-overlapping occurrence of `search`.
    ///
    /// Returns the new text and the number of replacements. An empty
    /// `search` replaces nothing.
    pub fn replace(&self, search: impl AsRef<[u8]>, replacement: impl AsRef<[u8]>) -> (Text, usize) {
        let search = search.as_ref();
        let replacement = replacement.as_ref();
        if search.is_empty() {
            return (self.clone(), 0);
        }

        let mut out = Vec::with_capacity(self.bytes.len());
        let mut rest: &[u8] = &self.bytes;
        let mut count = 0;
        while let Some(at) = find_bytes(rest, search) {
            out.extend_from_slice(&rest[..at]);
            out.extend_from_slice(replacement);
            rest = &rest[at + search.len()..];
            count += 1;
        }
        out.extend_from_slice(rest);
        (Text::from(out), count)
    }

    /// Concatenate `times` copies.
    ///
    /// Fails when `times` is negative or the result cannot be allocated.
    pub fn repeat(&self, times: i64) -> Result<Text> {
        let count = usize::try_from(times)
            .map_err(|_| Error::domain(format!("repeat count must not be negative, got {}", times)))?;
        if self.bytes.is_empty() || count == 0 {
            return Ok(Text::default());
        }

        let too_large = || {
            Error::domain(format!(
                "repeating {} bytes {} times is too large",
                self.bytes.len(),
                times
            ))
        };
        let size = self.bytes.len().checked_mul(count).ok_or_else(too_large)?;
        let mut out = Vec::new();
        out.try_reserve_exact(size)
            .map_err(|e| too_large().with_source(e))?;
        for _ in 0..count {
            out.extend_from_slice(&self.bytes);
        }
        Ok(Text::from(out))
    }

    /// Unit-indexed substring, counting UTF-8 units.
    ///
    /// A negative `start` counts from the end. A negative `length` stops
    /// that many units before the end.
    ///
    /// ```
    /// use primitive_wrappers::Text;
    ///
    /// let t = Text::from("Hello, world!");
    /// assert_eq!(t.substring(7, 5), "world");
    /// assert_eq!(t.substring(-6, 5), "world");
    /// assert_eq!(t.substring(0, -1), "Hello, world");
    /// ```
    pub fn substring(&self, start: i64, length: i64) -> Text {
        self.substring_in(start, length, Encoding::Utf8)
    }

    /// [`substring`](Text::substring) with units of the given encoding.
    pub fn substring_in(&self, start: i64, length: i64, encoding: Encoding) -> Text {
        let offsets = unit_offsets(&self.bytes, encoding);
        let (from, to) = util::window(offsets.len() - 1, start, length);
        Text::new(&self.bytes[offsets[from]..offsets[to]])
    }

    /// Text followed by `suffix`.
    pub fn append(&self, suffix: impl AsRef<[u8]>) -> Text {
        let suffix = suffix.as_ref();
        let mut out = Vec::with_capacity(self.bytes.len() + suffix.len());
        out.extend_from_slice(&self.bytes);
        out.extend_from_slice(suffix);
        Text::from(out)
    }

    /// `prefix` followed by the text.
    pub fn prepend(&self, prefix: impl AsRef<[u8]>) -> Text {
        Text::new(prefix).append(self)
    }

    /// Keep the first `max_length` units and append `ellipsis`.
    ///
    /// The ellipsis is appended even when nothing was cut.
    pub fn truncate(&self, max_length: usize, ellipsis: impl AsRef<[u8]>) -> Text {
        let length = i64::try_from(max_length).unwrap_or(i64::MAX);
        self.substring(0, length).append(ellipsis)
    }

    /// Reverse the order of units.
    pub fn reverse(&self) -> Text {
        let units: Vec<Unit<'_>> = self.units().collect();
        let mut out = Vec::with_capacity(self.bytes.len());
        for unit in units.iter().rev() {
            out.extend_from_slice(unit.bytes);
        }
        Text::from(out)
    }

    // =========================================================================
    // Case-boundary tokenization
    // =========================================================================

    /// `helloWorld` → `hello_world`; see [`case`] for the boundary rules.
    pub fn to_snake_case(&self) -> Text {
        Text::from(case::to_snake(&self.bytes))
    }

    /// `helloWorld` → `hello-world`.
    pub fn to_kebab_case(&self) -> Text {
        Text::from(case::to_kebab(&self.bytes))
    }

    /// `hello_world` → `helloWorld`.
    pub fn to_camel_case(&self) -> Text {
        Text::from(case::to_camel(&self.bytes))
    }

    /// Whether the text matches `^[a-z0-9]+(_[a-z0-9]+)*$`.
    pub fn is_snake_case(&self) -> bool {
        case::is_snake(&self.bytes)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Byte-wise prefix test.
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.bytes.starts_with(prefix.as_ref())
    }

    /// Byte-wise suffix test.
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        self.bytes.ends_with(suffix.as_ref())
    }

    /// Whether `needle` occurs anywhere. The empty needle always does.
    pub fn contains(&self, needle: impl AsRef<[u8]>) -> bool {
        let needle = needle.as_ref();
        needle.is_empty() || find_bytes(&self.bytes, needle).is_some()
    }

    /// [`contains`](Text::contains) after lowercasing both sides.
    pub fn contains_ignore_case(&self, needle: impl AsRef<[u8]>) -> bool {
        let needle = case::to_lower(needle.as_ref());
        self.to_lower().contains(needle)
    }

    /// Unit position of the first `needle` at or after unit `offset`.
    ///
    /// A negative `offset` counts from the end. Fails with
    /// [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) when there is no
    /// match and [`ErrorKind::Domain`](crate::ErrorKind::Domain) when
    /// `offset` lies outside the text.
    pub fn index_of(&self, needle: impl AsRef<[u8]>, offset: i64) -> Result<usize> {
        self.index_of_in(needle, offset, Encoding::Utf8)
    }

    /// [`index_of`](Text::index_of) with units of the given encoding.
    pub fn index_of_in(&self, needle: impl AsRef<[u8]>, offset: i64, encoding: Encoding) -> Result<usize> {
        let needle = needle.as_ref();
        let offsets = unit_offsets(&self.bytes, encoding);
        let count = offsets.len() - 1;
        let start = resolve_offset(count, offset)?;

        if needle.is_empty() {
            return Ok(start);
        }
        (start..count)
            .find(|&i| self.bytes[offsets[i]..].starts_with(needle))
            .ok_or_else(|| {
                Error::not_found(format!("'{}' not found", String::from_utf8_lossy(needle)))
            })
    }

    // =========================================================================
    // Splitting
    // =========================================================================

    /// Split into chunks of `chunk_size` units; the last may be shorter.
    pub fn split(&self, chunk_size: i64) -> Result<Vec<Text>> {
        let size = usize::try_from(chunk_size)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| Error::domain(format!("chunk size must be positive, got {}", chunk_size)))?;

        let offsets = unit_offsets(&self.bytes, Encoding::Utf8);
        let count = offsets.len() - 1;
        let chunks = (0..count)
            .step_by(size)
            .map(|from| {
                let to = (from + size).min(count);
                Text::new(&self.bytes[offsets[from]..offsets[to]])
            })
            .collect();
        Ok(chunks)
    }

    /// Split on `separator`.
    ///
    /// With `Some(limit)`: a positive limit caps the number of pieces, the
    /// last one holding the remainder; `0` acts as `1`; a negative limit
    /// drops that many pieces from the end.
    ///
    /// ```
    /// use primitive_wrappers::Text;
    ///
    /// let csv = Text::from("a,b,c");
    /// assert_eq!(csv.explode(",", None).unwrap(), ["a", "b", "c"]);
    /// assert_eq!(csv.explode(",", Some(2)).unwrap(), ["a", "b,c"]);
    /// assert_eq!(csv.explode(",", Some(-1)).unwrap(), ["a", "b"]);
    /// ```
    pub fn explode(&self, separator: impl AsRef<[u8]>, limit: Option<i64>) -> Result<Vec<Text>> {
        let separator = separator.as_ref();
        if separator.is_empty() {
            return Err(Error::domain("separator must not be empty"));
        }

        let cap = match limit {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            Some(0) => 1,
            _ => usize::MAX,
        };

        let mut pieces: Vec<&[u8]> = Vec::new();
        let mut rest: &[u8] = &self.bytes;
        while pieces.len() + 1 < cap {
            match find_bytes(rest, separator) {
                Some(at) => {
                    pieces.push(&rest[..at]);
                    rest = &rest[at + separator.len()..];
                }
                None => break,
            }
        }
        pieces.push(rest);

        if let Some(n) = limit.filter(|&n| n < 0) {
            let dropped = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
            pieces.truncate(pieces.len().saturating_sub(dropped));
        }
        Ok(pieces.into_iter().map(Text::new).collect())
    }

    /// Lazily yield maximal runs of word characters.
    pub fn words(&self) -> impl Iterator<Item = Text> + '_ {
        word_pattern()
            .find_iter(&self.bytes)
            .map(|m| Text::new(m.as_bytes()))
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Byte-wise equality.
    pub fn equals(&self, other: impl AsRef<[u8]>) -> bool {
        *self.bytes == *other.as_ref()
    }

    /// Equality after lowercasing both sides.
    pub fn equals_ignore_case(&self, other: impl AsRef<[u8]>) -> bool {
        case::to_lower(&self.bytes) == case::to_lower(other.as_ref())
    }

    /// Whether the regular expression `pattern` matches anywhere.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let re = Regex::new(pattern)
            .map_err(|e| Error::domain(format!("invalid pattern '{}'", pattern)).with_source(e))?;
        Ok(re.is_match(&self.bytes))
    }

    /// Whether there are no units at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether nothing but [`DEFAULT_TRIM_CHARS`] is present.
    pub fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    // =========================================================================
    // Markup and JSON
    // =========================================================================

    /// Remove tags, comments and processing instructions.
    pub fn strip_markup(&self) -> Text {
        Text::from(markup::strip_markup(&self.bytes))
    }

    /// Escape `& < > " '` as entities.
    pub fn escape_for_markup(&self) -> Text {
        Text::from(markup::escape_for_markup(&self.bytes))
    }

    /// Whether the text is exactly one JSON document.
    pub fn is_json(&self) -> bool {
        serde_json::from_slice::<serde::de::IgnoredAny>(&self.bytes).is_ok()
    }

    /// Encode as a JSON string literal.
    pub fn to_json(&self) -> Result<String> {
        let s = self
            .to_str()
            .map_err(|e| Error::serialization("cannot encode malformed text as JSON").with_source(e))?;
        serde_json::to_string(s)
            .map_err(|e| Error::serialization("JSON encoding failed").with_source(e))
    }

    /// Decode the text as one JSON document.
    pub fn decode_json(&self) -> Result<Value> {
        self.decode_json_with(&JsonOptions::default())
    }

    /// Decode the text as one JSON document under `options`.
    pub fn decode_json_with(&self, options: &JsonOptions) -> Result<Value> {
        let s = self
            .to_str()
            .map_err(|e| Error::serialization("cannot decode malformed text as JSON").with_source(e))?;
        Value::from_json_with(s, options)
    }
}

/// Byte offset of every unit start, followed by the total length.
fn unit_offsets(bytes: &[u8], encoding: Encoding) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(bytes.len() + 1);
    let mut pos = 0;
    for unit in encoding.units(bytes) {
        offsets.push(pos);
        pos += unit.bytes.len();
    }
    offsets.push(pos);
    offsets
}

fn resolve_offset(count: usize, offset: i64) -> Result<usize> {
    let resolved = if offset < 0 {
        i64::try_from(count).ok().and_then(|n| n.checked_add(offset))
    } else {
        Some(offset)
    };
    resolved
        .and_then(|at| usize::try_from(at).ok())
        .filter(|&at| at <= count)
        .ok_or_else(|| {
            Error::domain(format!(
                "offset {} is outside a text of length {}",
                offset, count
            ))
        })
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

impl Default for Text {
    fn default() -> Self {
        Text::new(b"")
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::from(s.into_bytes())
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        Text {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&[u8]> for Text {
    fn from(bytes: &[u8]) -> Self {
        Text::new(bytes)
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.bytes))
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Text::from)
    }
}
