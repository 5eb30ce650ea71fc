// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod projector_run;

#[cfg(test)]
mod tests;

use crate::{
    error::FilterError,
    template::Template,
    value::{Map, Value},
};

use projector_run::ProjectorRun;

pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectorOptions {
    /// Maximum number of nested mapping levels a projection may descend,
    /// counting the top level.
    pub max_depth: usize,
}

impl Default for ProjectorOptions {
    fn default() -> Self {
        ProjectorOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builds the subset of `data` described by `template`. `base` is the whole
/// document and is what directives see as their root.
pub fn project(data: &Map, template: &Template, base: &Value) -> Result<Map, FilterError> {
    project_with_options(data, template, base, &ProjectorOptions::default())
}

pub fn project_with_options(
    data: &Map,
    template: &Template,
    base: &Value,
    options: &ProjectorOptions,
) -> Result<Map, FilterError> {
    let mut projector_run = ProjectorRun::new(base, options);
    let output = projector_run.project_map(data, template)?;
    Ok(output)
}
