//! format::json
//!
//! Canonical JSON formatting.
//!
//! The canonical form of a JSON document is:
//! - object keys in sorted order
//! - `indent` spaces per nesting level, one member per line
//! - exactly one trailing newline
//!
//! Numbers keep the digits they were written with, so formatting never
//! rounds a value. A document with a repeated key in one object is
//! rejected rather than collapsed.
//!
//! # Example
//!
//! ```
//! use dirtyfmt::format::{Formatter, JsonFormatter};
//!
//! let formatter = JsonFormatter::default();
//! let out = formatter.format(br#"{"b":1,"a":[true]}"#).unwrap();
//! assert_eq!(out, b"{\n  \"a\": [\n    true\n  ],\n  \"b\": 1\n}\n");
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use super::{FormatError, Formatter};

/// Default indentation width.
pub const DEFAULT_INDENT: usize = 2;

/// Formatter for `.json` files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFormatter {
    indent: Vec<u8>,
}

impl JsonFormatter {
    /// Suffix handled by this formatter.
    pub const SUFFIX: &'static str = ".json";

    /// Create a formatter indenting by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self {
            indent: vec![b' '; indent],
        }
    }

    /// Indentation width in spaces.
    pub fn indent(&self) -> usize {
        self.indent.len()
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Formatter for JsonFormatter {
    fn suffix(&self) -> &str {
        Self::SUFFIX
    }

    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        serde_json::from_slice::<UniqueKeys>(source)
            .map_err(|e| FormatError::Syntax(e.to_string()))?;
        let value: Value =
            serde_json::from_slice(source).map_err(|e| FormatError::Syntax(e.to_string()))?;

        let mut out = Vec::with_capacity(source.len() + 1);
        let pretty = PrettyFormatter::with_indent(&self.indent);
        let mut ser = Serializer::with_formatter(&mut out, pretty);
        value
            .serialize(&mut ser)
            .map_err(|e| FormatError::Output(e.to_string()))?;
        out.push(b'\n');

        Ok(out)
    }
}

/// Structural pass over a document that fails on the first object holding
/// the same key twice. Scalars are accepted and dropped.
struct UniqueKeys;

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeys;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_unit<E: de::Error>(self) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<UniqueKeys, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<UniqueKeys>()?.is_some() {}
        Ok(UniqueKeys)
    }

    // Numbers kept as text arrive here as a one-entry map, which can never
    // hold a duplicate.
    fn visit_map<A>(self, mut map: A) -> Result<UniqueKeys, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                return Err(de::Error::custom(format!("duplicate key `{}`", key)));
            }
            map.next_value::<UniqueKeys>()?;
        }
        Ok(UniqueKeys)
    }
}
