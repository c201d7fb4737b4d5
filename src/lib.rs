//! # Primitive Wrappers
//!
//! Immutable value wrappers for text, ordered collections and integers.
//!
//! Every wrapper owns its data behind shared, read-only storage. Operations
//! never modify the receiver: they return a new value, or an [`Error`] that
//! says which contract was violated.
//!
//! ## Module Organization
//!
//! - [`text`] - [`Text`]: encoding detection, case conversion, search,
//!   splitting and markup helpers over codepoint units
//! - [`collection`] - [`Collection`]: insertion-ordered key/value mapping
//!   with list and map operations and JSON support
//! - [`integer`] - [`Integer`]: checked 64-bit arithmetic and comparisons
//! - [`error`] - the shared [`Error`] type and its [`ErrorKind`]s
//!
//! ## Quick Start
//!
//! ```
//! use primitive_wrappers::{Collection, Integer, Text, Value};
//!
//! let name = Text::from("Lorem ipsum dolor");
//! assert_eq!(name.to_kebab_case(), "lorem-ipsum-dolor");
//! assert_eq!(name.to_camel_case(), "loremIpsumDolor");
//!
//! let tags = Collection::from_values(["rust", "text"]).push("json").unwrap();
//! assert_eq!(tags.to_json().unwrap(), r#"["rust","text","json"]"#);
//! assert_eq!(tags.last().map(|(_, v)| v), Some(&Value::from("json")));
//!
//! let id = Integer::new(42).add_leading_zeroes(3).unwrap();
//! assert_eq!(id, "00042");
//! ```
//!
//! ## Features
//!
//! - `cli` - Build the `primwrap` command-line tool

// =============================================================================
// Value wrappers
// =============================================================================

/// Immutable text with codepoint-aware operations.
pub mod text;

/// Immutable ordered collections and dynamic values.
pub mod collection;

/// Immutable integers with checked arithmetic.
pub mod integer;

// =============================================================================
// Shared infrastructure
// =============================================================================

/// Error type shared by all wrappers.
pub mod error;

/// Internal utilities (not part of public API).
pub(crate) mod util;

// =============================================================================
// Public re-exports
// =============================================================================

pub use collection::{Collection, JsonOptions, Key, Value};
pub use error::{Error, ErrorKind, Result};
pub use integer::{Integer, Number};
pub use text::{Encoding, Text};
