// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::ops::Range;

use anyhow::{anyhow, Error};
use chumsky::{prelude::*, Stream};
use log::debug;

use crate::{
    ast::{ExprQuery, ExprTuple, QueryRoot, TemplateExpr},
    directive::PathStep,
};

use super::lexer::{gen_lexer, Token};

pub struct TemplateExprParser {
    lexer: Box<dyn Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>>>,
    parser: Box<dyn Parser<Token, (TemplateExpr, Range<usize>), Error = Simple<Token>>>,
}

impl TemplateExprParser {
    pub fn new() -> TemplateExprParser {
        let lexer = gen_lexer();
        let parser = gen_template_expression_parser();
        TemplateExprParser {
            lexer: Box::new(lexer),
            parser: Box::new(parser),
        }
    }

    /// Parses the `${{ ... }}` expression at the start of `expr_str`. Returns
    /// the expression and the char offset just past its closing `}}`.
    pub fn parse(&self, expr_str: &str) -> Result<(TemplateExpr, usize), Error> {
        let tokens = match self.lexer.parse(expr_str) {
            Ok(tokens) => tokens,
            Err(errs) => {
                for err in &errs {
                    debug!("expression lex error: {}", err);
                }
                return Err(anyhow!("expression parse errors (count={})", errs.len()));
            }
        };

        let expr_str_len = expr_str.chars().count();
        let eoi = expr_str_len..expr_str_len + 1;

        match self.parser.parse(Stream::from_iter(eoi, tokens.into_iter())) {
            Ok((expr, span)) => Ok((expr, span.end)),
            Err(errs) => {
                for err in &errs {
                    debug!("expression parse error: {}", err);
                }
                Err(anyhow!("expression parse errors (count={})", errs.len()))
            }
        }
    }
}

impl Default for TemplateExprParser {
    fn default() -> Self {
        TemplateExprParser::new()
    }
}

fn gen_template_expression_parser() -> impl Parser<Token, (TemplateExpr, Range<usize>), Error = Simple<Token>> {
    let key = select! { Token::Ident(name) => PathStep::Key(name) }.labelled("key");

    let index = select! {
        Token::Integer(index) => PathStep::Index(index),
        Token::String(key) => PathStep::Key(key),
    }
    .delimited_by(just(Token::LBracket), just(Token::RBracket))
    .labelled("index");

    let segment = just(Token::Dot).ignore_then(key.clone()).or(index.clone());

    // `.`, `.a`, `.[0]`, `.a.b[1]["c d"]`
    let child_steps = key
        .or(index)
        .then(segment.clone().repeated())
        .map(|(first, rest)| {
            let mut steps = vec![first];
            steps.extend(rest);
            steps
        });

    let child_query = just(Token::Dot)
        .ignore_then(child_steps.or_not())
        .map(|steps| ExprQuery {
            root: QueryRoot::Element,
            steps: steps.unwrap_or_default(),
        });

    // `$`, `$.a`, `$["a"][0]`
    let base_query = just(Token::Dollar)
        .ignore_then(segment.repeated())
        .map(|steps| ExprQuery {
            root: QueryRoot::Base,
            steps,
        });

    let query = child_query.or(base_query).map(TemplateExpr::Query);

    let tuple = select! { Token::Integer(index) => index }
        .labelled("integer")
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .map(|indices| TemplateExpr::Tuple(ExprTuple { indices }));

    let expr = query.or(tuple);

    just(Token::Start)
        .ignore_then(expr)
        .then_ignore(just(Token::End))
        .map_with_span(|expr, span| (expr, span))
}
