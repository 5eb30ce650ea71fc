// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Shared, read-only document model. Containers are reference counted so that
// projected output can point at the same nodes as the input.

mod loader;


use std::rc::Rc;

use hashlink::LinkedHashMap;

pub use loader::parse_yaml_str;

pub type Map = LinkedHashMap<String, Value>;

#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    // Integers above i64::MAX.
    Unsigned(u64),
    Real(f64),
    String(Rc<String>),
    Array(Rc<Vec<Value>>),
    // Fixed-size sequence. Kept apart from Array so templates can tell them apart.
    Tuple(Rc<Vec<Value>>),
    Hash(Rc<Map>),
}

impl Value {
    pub fn from_json_str(input: &str) -> Result<Value, serde_json::Error> {
        loader::parse_json_str(input)
    }

    pub fn tuple(values: Vec<Value>) -> Value {
        Value::Tuple(Rc::new(values))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Unsigned(_) => "integer",
            Value::Real(_) => "real",
            Value::String(_) => "string",
            Value::Array(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Hash(_) => "mapping",
        }
    }

    pub fn as_hash(&self) -> Option<&Map> {
        match self {
            Value::Hash(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Value::Integer(value),
            Err(_) => Value::Unsigned(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Rc::new(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Rc::new(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(values))
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Hash(Rc::new(map))
    }
}

/// Resolves `index` against a sequence of length `len`, counting negative
/// indices from the end. Returns `None` outside `[-len, len-1]`.
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { index + len } else { index };
    if (0..len).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}
