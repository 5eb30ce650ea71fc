// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

//! Select and reshape fields of a nested document using a shape template.
//!
//! A template mirrors the layout of the document. Each template value says
//! what to produce for its key: the value unchanged, chosen indices of a
//! list or tuple, a nested projection, the result of a transform, or a value
//! pulled from a path anywhere in the document.

pub mod ast;
pub mod directive;
pub mod error;
pub mod json_utils;
pub mod parser;
pub mod process_filter;
pub mod projector;
pub mod template;
pub mod value;


use log::debug;

pub use directive::{BasePath, ChildPath, Directive, PathStep};
pub use error::FilterError;
pub use projector::{project, project_with_options, ProjectorOptions, DEFAULT_MAX_DEPTH};
pub use template::{Selector, Template, Transform};
pub use value::{Map, Value};

/// What to filter: a document already in memory, or JSON text to decode.
#[derive(Clone, Copy, Debug)]
pub enum Input<'a> {
    Document(&'a Value),
    Text(&'a str),
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(value: &'a Value) -> Self {
        Input::Document(value)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

pub fn filter<'a>(input: impl Into<Input<'a>>, template: &Template) -> Result<Map, FilterError> {
    filter_with_options(input, template, &ProjectorOptions::default())
}

pub fn filter_with_options<'a>(
    input: impl Into<Input<'a>>,
    template: &Template,
    options: &ProjectorOptions,
) -> Result<Map, FilterError> {
    match input.into() {
        Input::Document(document) => filter_document(document, template, options),
        Input::Text(text) => {
            let document = Value::from_json_str(text)?;
            filter_document(&document, template, options)
        }
    }
}

fn filter_document(document: &Value, template: &Template, options: &ProjectorOptions) -> Result<Map, FilterError> {
    let Value::Hash(data) = document else {
        return Err(FilterError::Shape {
            found: document.kind_name(),
        });
    };

    debug!("filtering {} keys with a {} key template", data.len(), template.len());
    project_with_options(data, template, document, options)
}
