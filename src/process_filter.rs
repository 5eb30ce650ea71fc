// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::path::Path;

use anyhow::{anyhow, Error};
use log::debug;

use crate::{
    filter_with_options,
    json_utils::json_emit_to_string,
    parser::Parser,
    projector::ProjectorOptions,
    value::{parse_yaml_str, Map, Value},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks YAML for `.yaml`/`.yml` files and JSON for everything else.
    pub fn from_path(path: &Path) -> DocumentFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

pub fn process_filter_str(
    document_string: &str,
    format: DocumentFormat,
    template_filename: &str,
    template_string: &str,
    options: &ProjectorOptions,
    pretty: bool,
) -> Result<String, Error> {
    let output = process_filter(document_string, format, template_filename, template_string, options)?;
    let out_str = json_emit_to_string(&Value::from(output), pretty)?;
    Ok(out_str)
}

pub fn process_filter(
    document_string: &str,
    format: DocumentFormat,
    template_filename: &str,
    template_string: &str,
    options: &ProjectorOptions,
) -> Result<Map, Error> {
    let parser = Parser::new();
    let template = parser.parse(template_filename, template_string)?;
    debug!("parsed template {} ({} keys)", template_filename, template.len());

    let output = match format {
        DocumentFormat::Json => filter_with_options(document_string, &template, options)?,
        DocumentFormat::Yaml => {
            let docs = parse_yaml_str(document_string)?;
            let document = match &docs[..] {
                [document] => document,
                _ => return Err(anyhow!("document yaml must have exactly one document")),
            };
            filter_with_options(document, &template, options)?
        }
    };
    Ok(output)
}
