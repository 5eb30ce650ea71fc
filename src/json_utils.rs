use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Error};

use crate::value::Value;

pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(value) => serde_json::Value::Bool(*value),
        Value::Integer(value) => serde_json::Value::from(*value),
        Value::Unsigned(value) => serde_json::Value::from(*value),
        // JSON has no NaN or infinity.
        Value::Real(value) => serde_json::Number::from_f64(*value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(value) => serde_json::Value::String(value.to_string()),
        Value::Array(items) | Value::Tuple(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Hash(map) => {
            let mut object = serde_json::Map::new();
            for (key, value) in map.iter() {
                object.insert(key.clone(), to_json(value));
            }
            serde_json::Value::Object(object)
        }
    }
}

pub fn json_emit_to_string(value: &Value, pretty: bool) -> Result<String, Error> {
    let json = to_json(value);
    let mut out_str = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    out_str.push('\n');
    Ok(out_str)
}

pub fn json_emit_to_file(value: &Value, pretty: bool, filename: &Path) -> Result<(), Error> {
    let out = json_emit_to_string(value, pretty)?;
    fs::write(filename, out).with_context(|| format!("failed to write {}", filename.display()))?;
    Ok(())
}

/// Reads `filename`, or all of stdin when no file is given.
pub fn read_input(filename: Option<&Path>) -> Result<String, Error> {
    match filename {
        Some(filename) => {
            fs::read_to_string(filename).with_context(|| format!("failed to read {}", filename.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
            Ok(input)
        }
    }
}
