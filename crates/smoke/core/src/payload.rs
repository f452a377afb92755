//! Decoded RPC payloads and a typed view over their fields.
//!
//! Node responses are loosely typed JSON. Every lookup through this module
//! returns a `Result`, so a missing or mistyped field turns into a
//! [`Violation`] instead of a panic.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Expected top-level shape of an endpoint's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// JSON string
    Text,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Object => write!(f, "object"),
            Shape::Array => write!(f, "array"),
            Shape::Text => write!(f, "string"),
        }
    }
}

/// A response body decoded according to its [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Keyed fields
    Object(Map<String, Value>),
    /// Ordered elements
    Array(Vec<Value>),
    /// Scalar string
    Text(String),
}

impl Payload {
    /// Decode `body` as JSON of the given shape.
    ///
    /// A JSON `null` decodes to the empty value of the expected shape so the
    /// caller reports it as an empty payload rather than a decode failure.
    pub fn decode(shape: Shape, body: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;

        match (shape, value) {
            (Shape::Object, Value::Object(map)) => Ok(Payload::Object(map)),
            (Shape::Object, Value::Null) => Ok(Payload::Object(Map::new())),
            (Shape::Array, Value::Array(items)) => Ok(Payload::Array(items)),
            (Shape::Array, Value::Null) => Ok(Payload::Array(Vec::new())),
            (Shape::Text, Value::String(s)) => Ok(Payload::Text(s)),
            (Shape::Text, Value::Null) => Ok(Payload::Text(String::new())),
            (shape, other) => Err(format!(
                "expected a JSON {}, got {}",
                shape,
                kind_of(&other)
            )),
        }
    }

    /// Shape this payload was decoded as.
    pub fn shape(&self) -> Shape {
        match self {
            Payload::Object(_) => Shape::Object,
            Payload::Array(_) => Shape::Array,
            Payload::Text(_) => Shape::Text,
        }
    }

    /// No keys, no elements, or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Object(map) => map.is_empty(),
            Payload::Array(items) => items.is_empty(),
            Payload::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Object(map) => write!(f, "{}", Value::Object(map.clone())),
            Payload::Array(items) => write!(f, "{}", Value::Array(items.clone())),
            Payload::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Why a payload failed a semantic predicate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// Field absent from the payload
    #[error("missing field `{field}`")]
    Missing { field: String },

    /// Field present with the wrong JSON type
    #[error("field `{field}` is not {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// Numeric field at or below zero
    #[error("expected {field} greater than 0 got {value}")]
    NotPositive { field: String, value: f64 },

    /// Counter field equal to zero
    #[error("{field}: {value} but expected non-zero")]
    Zero { field: String, value: String },

    /// String field with an unexpected value
    #[error("{field}: '{actual}' but expected '{expected}'")]
    Mismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Array predicate applied to an empty array
    #[error("no elements to inspect")]
    EmptySequence,

    /// Violation found inside the first array element
    #[error("first element: {0}")]
    InFirstElement(Box<Violation>),

    /// Predicate applied to a payload of another shape
    #[error("predicate needs a {expected} payload, got {actual}")]
    ShapeMismatch { expected: Shape, actual: Shape },
}

/// Resolve a dotted field path (`"status.phase"`) inside an object.
pub fn field<'a>(map: &'a Map<String, Value>, path: &str) -> Result<&'a Value, Violation> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();

    let mut current = map.get(first).ok_or_else(|| Violation::Missing {
        field: path.to_string(),
    })?;

    for segment in segments {
        let object = current.as_object().ok_or_else(|| Violation::WrongType {
            field: path.to_string(),
            expected: "reachable through objects",
        })?;
        current = object.get(segment).ok_or_else(|| Violation::Missing {
            field: path.to_string(),
        })?;
    }

    Ok(current)
}

/// Resolve a field that must be a JSON number.
pub fn number_field(map: &Map<String, Value>, path: &str) -> Result<f64, Violation> {
    field(map, path)?
        .as_f64()
        .ok_or_else(|| Violation::WrongType {
            field: path.to_string(),
            expected: "a number",
        })
}

/// Resolve a field that must be a JSON string.
pub fn str_field<'a>(map: &'a Map<String, Value>, path: &str) -> Result<&'a str, Violation> {
    field(map, path)?
        .as_str()
        .ok_or_else(|| Violation::WrongType {
            field: path.to_string(),
            expected: "a string",
        })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
