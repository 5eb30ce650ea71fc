// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use crate::directive::PathStep;

/// Contents of a `${{ ... }}` template expression.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateExpr {
    Query(ExprQuery),
    Tuple(ExprTuple),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryRoot {
    // `.`: the value under the template key.
    Element,
    // `$`: the whole document.
    Base,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprQuery {
    pub root: QueryRoot,
    pub steps: Vec<PathStep>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprTuple {
    pub indices: Vec<i64>,
}
