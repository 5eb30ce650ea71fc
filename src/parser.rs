// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Reads YAML template files. Scalars of the form `${{ ... }}` become
// directives; every other value is normalized like an in-memory template.

mod template_expr;


use anyhow::{anyhow, Error};

use crate::{
    ast::{ExprQuery, QueryRoot, TemplateExpr},
    directive::{BasePath, ChildPath},
    template::{Selector, Template},
    value::{parse_yaml_str, Map, Value},
};

use template_expr::TemplateExprParser;

macro_rules! errwithloc {
    ($filename:expr, $keys:expr, $fmt:expr $(, $($arg:tt)*)?) => {
        anyhow!(concat!("{}: {}: ", $fmt), $filename, $keys.join("."), $($($arg)*)?)
    };
}

pub struct Parser {
    expr_parser: TemplateExprParser,
}

impl Parser {
    pub fn new() -> Parser {
        let expr_parser = TemplateExprParser::new();
        Parser { expr_parser }
    }

    pub fn parse(&self, filename: &str, input: &str) -> Result<Template, Error> {
        let run = ParserRun::new(self, filename);
        run.parse(input)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

struct ParserRun<'a> {
    expr_parser: &'a TemplateExprParser,
    filename: &'a str,
}

impl<'a> ParserRun<'a> {
    fn new(parser: &'a Parser, filename: &'a str) -> ParserRun<'a> {
        ParserRun {
            expr_parser: &parser.expr_parser,
            filename,
        }
    }

    fn parse(&self, input: &str) -> Result<Template, Error> {
        let docs = parse_yaml_str(input).map_err(|err| anyhow!("{}: {}", self.filename, err))?;
        let doc = match &docs[..] {
            [doc] => doc,
            [] => return Err(anyhow!("{}: template is empty", self.filename)),
            _ => return Err(anyhow!("{}: template yaml must only have a single document", self.filename)),
        };

        let Value::Hash(map) = doc else {
            return Err(anyhow!(
                "{}: template must be a mapping, found {}",
                self.filename,
                doc.kind_name()
            ));
        };

        let mut keys = Vec::new();
        self.parse_map(&mut keys, map)
    }

    fn parse_map(&self, keys: &mut Vec<String>, map: &Map) -> Result<Template, Error> {
        let mut template = Template::new();
        for (key, value) in map {
            keys.push(key.clone());
            let selector = self.parse_selector(keys, value)?;
            keys.pop();

            template.insert(key.clone(), selector);
        }
        Ok(template)
    }

    fn parse_selector(&self, keys: &mut Vec<String>, value: &Value) -> Result<Selector, Error> {
        match value {
            Value::String(string) if string.contains("${{") => self.parse_expr(keys, string),
            Value::Hash(map) if !map.is_empty() => {
                let nested = self.parse_map(keys, map)?;
                Ok(Selector::Nested(nested))
            }
            _ => Ok(Selector::from_value(value)),
        }
    }

    fn parse_expr(&self, keys: &[String], string: &str) -> Result<Selector, Error> {
        let expr_str = string.trim();
        let (expr, end) = self
            .expr_parser
            .parse(expr_str)
            .map_err(|err| errwithloc!(self.filename, keys, "{}", err))?;

        if end != expr_str.chars().count() {
            return Err(errwithloc!(
                self.filename,
                keys,
                "template expression must be the whole value"
            ));
        }

        let selector = match expr {
            TemplateExpr::Query(ExprQuery {
                root: QueryRoot::Element,
                steps,
            }) => Selector::directive(ChildPath::new(steps)),
            TemplateExpr::Query(ExprQuery {
                root: QueryRoot::Base,
                steps,
            }) => Selector::directive(BasePath::new(steps)),
            TemplateExpr::Tuple(tuple) if tuple.indices.is_empty() => Selector::WholeTuple,
            TemplateExpr::Tuple(tuple) => Selector::IndexTuple(tuple.indices),
        };
        Ok(selector)
    }
}
