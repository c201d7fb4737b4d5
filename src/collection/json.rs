//! JSON encoding and decoding for collections and values.
//!
//! Encoding goes through the [`Serialize`] impls below. A collection whose
//! keys are `0..n` in order becomes an array; any other collection becomes
//! an object with stringified keys. Decoding parses with `serde_json` and
//! converts into [`Value`], so object members named like canonical integers
//! come back as [`Key::Index`](super::Key::Index).
//!
//! Both directions enforce [`JsonOptions::depth`]: scalars have depth 0 and
//! every array or object adds one level.

use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use super::{Collection, Value};
use crate::error::{Error, Result};

/// Default maximum nesting depth.
pub const DEFAULT_DEPTH: usize = 512;

/// Options for JSON encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOptions {
    /// Maximum nesting depth (default: 512)
    pub depth: usize,
    /// Indent output (default: false)
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pretty: false,
        }
    }
}

impl JsonOptions {
    /// Single-line output.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Set the maximum nesting depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set whether output is indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.depth {
            return Err(Error::serialization(format!(
                "maximum depth {} exceeded by document of depth {}",
                self.depth, depth
            )));
        }
        Ok(())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) if !x.is_finite() => {
                Err(ser::Error::custom("Inf and NaN cannot be JSON encoded"))
            }
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Collection(c) => c.serialize(serializer),
        }
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if self.is_associative() {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        } else {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        }
    }
}

fn encode<T: Serialize>(value: &T, depth: usize, options: &JsonOptions) -> Result<String> {
    options.check_depth(depth)?;
    let out = if options.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| Error::serialization("JSON encoding failed").with_source(e))?;
    log::trace!("encoded {} bytes of JSON", out.len());
    Ok(out)
}

/// Depth of a parsed document, counted the same way as [`Value::depth`].
fn document_depth(doc: &serde_json::Value) -> usize {
    match doc {
        serde_json::Value::Array(items) => 1 + items.iter().map(document_depth).max().unwrap_or(0),
        serde_json::Value::Object(members) => {
            1 + members.values().map(document_depth).max().unwrap_or(0)
        }
        _ => 0,
    }
}

impl Value {
    /// Encode with default options.
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with(&JsonOptions::default())
    }

    /// Encode under `options`.
    pub fn to_json_with(&self, options: &JsonOptions) -> Result<String> {
        encode(self, self.depth(), options)
    }

    /// Decode one JSON document with default options.
    ///
    /// ```
    /// use primitive_wrappers::{ErrorKind, Value};
    ///
    /// let v = Value::from_json(r#"{"name": "Ada", "born": 1815}"#).unwrap();
    /// let c = v.as_collection().unwrap();
    /// assert_eq!(c.get("born"), Some(&Value::Int(1815)));
    ///
    /// assert_eq!(Value::from_json("null").unwrap_err().kind, ErrorKind::Serialization);
    /// ```
    pub fn from_json(json: &str) -> Result<Value> {
        Value::from_json_with(json, &JsonOptions::default())
    }

    /// Decode one JSON document under `options`.
    pub fn from_json_with(json: &str, options: &JsonOptions) -> Result<Value> {
        let doc: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::serialization("failed to decode JSON").with_source(e))?;
        if doc.is_null() {
            return Err(Error::serialization("JSON document is null"));
        }
        options.check_depth(document_depth(&doc))?;
        log::trace!("decoded {} bytes of JSON", json.len());
        Ok(Value::from(doc))
    }
}

impl Collection {
    /// Encode with default options.
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with(&JsonOptions::default())
    }

    /// Encode under `options`.
    pub fn to_json_with(&self, options: &JsonOptions) -> Result<String> {
        encode(self, self.depth(), options)
    }

    /// Decode a JSON array or object.
    pub fn from_json(json: &str) -> Result<Collection> {
        Collection::from_json_with(json, &JsonOptions::default())
    }

    /// Decode a JSON array or object under `options`.
    pub fn from_json_with(json: &str, options: &JsonOptions) -> Result<Collection> {
        match Value::from_json_with(json, options)? {
            Value::Collection(c) => Ok(c),
            other => Err(Error::serialization(format!(
                "expected a JSON array or object, found {}",
                other.type_name()
            ))),
        }
    }
}
