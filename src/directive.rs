// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::fmt;

use crate::{
    error::FilterError,
    value::{normalize_index, Value},
};

/// A pluggable template leaf. `element` is the value found under the
/// template key (`Value::Null` when the key is absent from the data) and
/// `base` is the whole document being filtered.
pub trait Directive: fmt::Debug {
    fn resolve(&self, element: &Value, base: &Value) -> Result<Value, FilterError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathStep {
    Key(String),
    Index(i64),
}

/// Pulls the value found by walking `steps` from the element under the key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChildPath {
    steps: Vec<PathStep>,
}

/// Pulls the value found by walking `steps` from the document root, so a key
/// can be filled from anywhere in the document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasePath {
    steps: Vec<PathStep>,
}

impl ChildPath {
    pub fn new<I, S>(steps: I) -> ChildPath
    where
        I: IntoIterator<Item = S>,
        S: Into<PathStep>,
    {
        let steps = steps.into_iter().map(Into::into).collect();
        ChildPath { steps }
    }

    pub fn then(mut self, step: impl Into<PathStep>) -> ChildPath {
        self.steps.push(step.into());
        self
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl BasePath {
    pub fn new<I, S>(steps: I) -> BasePath
    where
        I: IntoIterator<Item = S>,
        S: Into<PathStep>,
    {
        let steps = steps.into_iter().map(Into::into).collect();
        BasePath { steps }
    }

    pub fn then(mut self, step: impl Into<PathStep>) -> BasePath {
        self.steps.push(step.into());
        self
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl Directive for ChildPath {
    fn resolve(&self, element: &Value, _base: &Value) -> Result<Value, FilterError> {
        descend(element, "", &self.steps)
    }
}

impl Directive for BasePath {
    fn resolve(&self, _element: &Value, base: &Value) -> Result<Value, FilterError> {
        descend(base, "$", &self.steps)
    }
}

/// Walks `start` through `steps`. `root` only labels the path in errors.
pub fn descend(start: &Value, root: &str, steps: &[PathStep]) -> Result<Value, FilterError> {
    let mut node = start;
    for (position, step) in steps.iter().enumerate() {
        let fail = |reason: String| FilterError::Path {
            path: format_path(root, &steps[..=position]),
            reason,
        };

        node = match (step, node) {
            (PathStep::Key(key), Value::Hash(map)) => match map.get(key) {
                Some(child) => child,
                None => return Err(fail(format!("missing key '{}'", key))),
            },
            (PathStep::Index(index), Value::Array(items) | Value::Tuple(items)) => {
                match normalize_index(*index, items.len()) {
                    Some(resolved) => &items[resolved],
                    None => {
                        return Err(fail(format!(
                            "index {} out of range (length {})",
                            index,
                            items.len()
                        )))
                    }
                }
            }
            (PathStep::Key(_), other) => {
                return Err(fail(format!("cannot look up a key in a {}", other.kind_name())));
            }
            (PathStep::Index(_), other) => {
                return Err(fail(format!("cannot index into a {}", other.kind_name())));
            }
        };
    }
    Ok(node.clone())
}

fn format_path(root: &str, steps: &[PathStep]) -> String {
    let mut path = root.to_string();
    for step in steps {
        path.push_str(&step.to_string());
    }
    path
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathStep::Key(key) if is_plain_key(key) => write!(f, ".{}", key),
            PathStep::Key(key) => write!(f, "[{:?}]", key),
            PathStep::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<i64> for PathStep {
    fn from(index: i64) -> Self {
        PathStep::Index(index)
    }
}

impl From<i32> for PathStep {
    fn from(index: i32) -> Self {
        PathStep::Index(i64::from(index))
    }
}
