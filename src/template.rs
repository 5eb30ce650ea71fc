// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{fmt, rc::Rc};

use hashlink::LinkedHashMap;

use crate::{
    directive::{BasePath, ChildPath, Directive},
    error::FilterError,
    value::{Map, Value},
};

type TransformOneArg = dyn Fn(&Value) -> Result<Value, FilterError>;
type TransformTwoArg = dyn Fn(&Value, &Value) -> Result<Value, FilterError>;

/// A user function applied to the value under a template key.
#[derive(Clone)]
pub enum Transform {
    OneArg(Rc<TransformOneArg>),
    // Also receives the whole document.
    TwoArg(Rc<TransformTwoArg>),
}

/// What to produce for one template key.
#[derive(Clone, Debug)]
pub enum Selector {
    PassThrough,
    WholeArray,
    WholeTuple,
    WholeHash,
    IndexArray(Vec<i64>),
    IndexTuple(Vec<i64>),
    // Index lists holding something other than integers. Only an error
    // when the data under the key is a list (or tuple).
    InvalidIndexArray,
    InvalidIndexTuple,
    Nested(Template),
    Transform(Transform),
    Directive(Rc<dyn Directive>),
    // Template leaves that never select anything (non-null scalars).
    Ignore,
}

#[derive(Clone, Debug, Default)]
pub struct Template {
    entries: LinkedHashMap<String, Selector>,
}

impl Transform {
    pub fn apply(&self, value: &Value, base: &Value) -> Result<Value, FilterError> {
        match self {
            Transform::OneArg(f) => f(value),
            Transform::TwoArg(f) => f(value, base),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Transform::OneArg(_) => f.write_str("Transform::OneArg(..)"),
            Transform::TwoArg(_) => f.write_str("Transform::TwoArg(..)"),
        }
    }
}

impl Selector {
    pub fn transform<F>(f: F) -> Selector
    where
        F: Fn(&Value) -> Result<Value, FilterError> + 'static,
    {
        Selector::Transform(Transform::OneArg(Rc::new(f)))
    }

    pub fn transform_with_base<F>(f: F) -> Selector
    where
        F: Fn(&Value, &Value) -> Result<Value, FilterError> + 'static,
    {
        Selector::Transform(Transform::TwoArg(Rc::new(f)))
    }

    pub fn directive<D: Directive + 'static>(directive: D) -> Selector {
        Selector::Directive(Rc::new(directive))
    }

    /// Normalizes a plain template value.
    pub fn from_value(value: &Value) -> Selector {
        match value {
            Value::Null => Selector::PassThrough,
            Value::Array(items) if items.is_empty() => Selector::WholeArray,
            Value::Array(items) => match index_list(items) {
                Some(indices) => Selector::IndexArray(indices),
                None => Selector::InvalidIndexArray,
            },
            Value::Tuple(items) if items.is_empty() => Selector::WholeTuple,
            Value::Tuple(items) => match index_list(items) {
                Some(indices) => Selector::IndexTuple(indices),
                None => Selector::InvalidIndexTuple,
            },
            Value::Hash(map) if map.is_empty() => Selector::WholeHash,
            Value::Hash(map) => Selector::Nested(Template::from_map(map)),
            Value::Boolean(_) | Value::Integer(_) | Value::Unsigned(_) | Value::Real(_) | Value::String(_) => {
                Selector::Ignore
            }
        }
    }

    /// Whether the selector still produces a value when the key is absent from the data.
    pub fn resolves_missing(&self) -> bool {
        matches!(self, Selector::Transform(_) | Selector::Directive(_))
    }
}

fn index_list(items: &[Value]) -> Option<Vec<i64>> {
    items
        .iter()
        .map(|item| match item {
            Value::Integer(index) => Some(*index),
            // Past the end of any list; reported as out of range.
            Value::Unsigned(_) => Some(i64::MAX),
            _ => None,
        })
        .collect()
}

impl From<Template> for Selector {
    fn from(template: Template) -> Self {
        Selector::Nested(template)
    }
}

impl From<ChildPath> for Selector {
    fn from(path: ChildPath) -> Self {
        Selector::directive(path)
    }
}

impl From<BasePath> for Selector {
    fn from(path: BasePath) -> Self {
        Selector::directive(path)
    }
}

impl Template {
    pub fn new() -> Template {
        Template::default()
    }

    pub fn from_value(value: &Value) -> Result<Template, FilterError> {
        match value {
            Value::Hash(map) => Ok(Template::from_map(map)),
            other => Err(FilterError::Shape {
                found: other.kind_name(),
            }),
        }
    }

    pub fn from_map(map: &Map) -> Template {
        let mut template = Template::new();
        for (key, value) in map {
            template.insert(key.clone(), Selector::from_value(value));
        }
        template
    }

    pub fn with(mut self, key: impl Into<String>, selector: impl Into<Selector>) -> Template {
        self.insert(key, selector);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, selector: impl Into<Selector>) {
        self.entries.insert(key.into(), selector.into());
    }

    pub fn get(&self, key: &str) -> Option<&Selector> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Selector)> {
        self.entries.iter()
    }
}

impl TryFrom<&Value> for Template {
    type Error = FilterError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Template::from_value(value)
    }
}
