use std::rc::Rc;

use anyhow::{anyhow, Error};
use saphyr::{Yaml, YamlLoader};

use super::{Map, Value};

pub fn parse_json_str(input: &str) -> Result<Value, serde_json::Error> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(from_json(json))
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(value) => Value::Boolean(value),
        serde_json::Value::Number(number) => match (number.as_i64(), number.as_u64()) {
            (Some(value), _) => Value::Integer(value),
            (None, Some(value)) => Value::Unsigned(value),
            // Has a fraction or exponent.
            (None, None) => Value::Real(number.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(value) => Value::String(Rc::new(value)),
        serde_json::Value::Array(items) => {
            let values = items.into_iter().map(from_json).collect();
            Value::Array(Rc::new(values))
        }
        serde_json::Value::Object(object) => {
            let mut map = Map::new();
            for (key, value) in object {
                map.insert(key, from_json(value));
            }
            Value::Hash(Rc::new(map))
        }
    }
}

pub fn parse_yaml_str(input: &str) -> Result<Vec<Value>, Error> {
    let docs = YamlLoader::load_from_str(input)?;

    let mut values = Vec::new();
    for doc in &docs {
        let value = from_yaml(doc)?;
        values.push(value);
    }
    Ok(values)
}

fn from_yaml(yaml: &Yaml) -> Result<Value, Error> {
    match yaml {
        Yaml::Real(string) => match yaml.as_f64() {
            Some(value) => Ok(Value::Real(value)),
            None => Err(anyhow!("invalid real number '{}'", string)),
        },
        Yaml::Integer(value) => Ok(Value::Integer(*value)),
        Yaml::String(value) => Ok(Value::String(Rc::new(value.clone()))),
        Yaml::Boolean(value) => Ok(Value::Boolean(*value)),
        Yaml::Array(items) => {
            let mut values = Vec::new();
            for item in items {
                values.push(from_yaml(item)?);
            }
            Ok(Value::Array(Rc::new(values)))
        }
        Yaml::Hash(hash) => {
            let mut map = Map::new();
            for (key, value) in hash {
                let Yaml::String(key) = key else {
                    return Err(anyhow!("yaml mapping keys must be strings"));
                };
                map.insert(key.clone(), from_yaml(value)?);
            }
            Ok(Value::Hash(Rc::new(map)))
        }
        Yaml::Null => Ok(Value::Null),
        Yaml::Alias(_) => Err(anyhow!("yaml aliases not supported")),
        _ => Err(anyhow!("invalid yaml value")),
    }
}
