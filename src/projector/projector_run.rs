// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::rc::Rc;

use log::trace;

use crate::{
    error::FilterError,
    template::{Selector, Template},
    value::{normalize_index, Map, Value},
};

use super::ProjectorOptions;

pub struct ProjectorRun<'a> {
    base: &'a Value,
    max_depth: usize,
    depth: usize,
}

impl<'a> ProjectorRun<'a> {
    pub fn new(base: &'a Value, options: &ProjectorOptions) -> ProjectorRun<'a> {
        ProjectorRun {
            base,
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    pub fn project_map(&mut self, data: &Map, template: &Template) -> Result<Map, FilterError> {
        if self.depth >= self.max_depth {
            return Err(FilterError::DepthLimit { limit: self.max_depth });
        }

        self.depth += 1;
        let output = self.project_entries(data, template);
        self.depth -= 1;
        output
    }

    fn project_entries(&mut self, data: &Map, template: &Template) -> Result<Map, FilterError> {
        let mut output = Map::new();
        for (key, selector) in template.iter() {
            let value = match data.get(key) {
                Some(value) => self.project_value(key, value, selector)?,
                None => self.project_missing(key, selector)?,
            };

            if let Some(value) = value {
                output.insert(key.clone(), value);
            }
        }
        Ok(output)
    }

    fn project_missing(&mut self, key: &str, selector: &Selector) -> Result<Option<Value>, FilterError> {
        let value = match selector {
            Selector::Transform(transform) => transform.apply(&Value::Null, self.base)?,
            Selector::Directive(directive) => directive.resolve(&Value::Null, self.base)?,
            _ => {
                trace!("skipping '{}': key not in data", key);
                return Ok(None);
            }
        };
        Ok(Some(value))
    }

    fn project_value(&mut self, key: &str, value: &Value, selector: &Selector) -> Result<Option<Value>, FilterError> {
        let output = match (selector, value) {
            (Selector::PassThrough, _) => value.clone(),
            (Selector::Transform(transform), _) => transform.apply(value, self.base)?,
            (Selector::Directive(directive), _) => directive.resolve(value, self.base)?,

            (Selector::WholeArray, Value::Array(_))
            | (Selector::WholeTuple, Value::Tuple(_))
            | (Selector::WholeHash, Value::Hash(_)) => value.clone(),

            (Selector::IndexArray(indices), Value::Array(items)) => {
                let selected = select_indices(key, indices, items)?;
                Value::Array(Rc::new(selected))
            }
            (Selector::IndexTuple(indices), Value::Tuple(items)) => {
                let selected = select_indices(key, indices, items)?;
                Value::Tuple(Rc::new(selected))
            }

            (Selector::InvalidIndexArray, Value::Array(_)) => {
                return Err(FilterError::Structure {
                    key: key.to_string(),
                    kind: "list",
                })
            }
            (Selector::InvalidIndexTuple, Value::Tuple(_)) => {
                return Err(FilterError::Structure {
                    key: key.to_string(),
                    kind: "tuple",
                })
            }

            (Selector::Nested(nested), Value::Hash(_)) if nested.is_empty() => value.clone(),
            (Selector::Nested(nested), Value::Hash(map)) => {
                let submap = self.project_map(map, nested)?;
                Value::Hash(Rc::new(submap))
            }

            // Template and data disagree on shape. Leave the key out.
            _ => {
                trace!("skipping '{}': template does not match {} value", key, value.kind_name());
                return Ok(None);
            }
        };
        Ok(Some(output))
    }
}

fn select_indices(key: &str, indices: &[i64], items: &[Value]) -> Result<Vec<Value>, FilterError> {
    let mut selected = Vec::with_capacity(indices.len());
    for &index in indices {
        let Some(resolved) = normalize_index(index, items.len()) else {
            return Err(FilterError::Index {
                key: key.to_string(),
                index,
                len: items.len(),
            });
        };
        selected.push(items[resolved].clone());
    }
    Ok(selected)
}
