// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::ops::Range;

use chumsky::{
    error::Simple,
    primitive::{filter, just, one_of},
    text::{self, TextParser},
    Parser,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Start,
    End,
    String(String),
    Ident(String),
    Integer(i64),
    Dot,
    Dollar,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Start => f.write_str("${{"),
            Token::End => f.write_str("}}"),
            Token::String(value) => write!(f, "{:?}", value),
            Token::Ident(name) => f.write_str(name),
            Token::Integer(i) => write!(f, "{}", i),
            Token::Dot => f.write_str("."),
            Token::Dollar => f.write_str("$"),
            Token::Comma => f.write_str(","),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

pub fn gen_lexer() -> impl Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>> {
    let start = just("${{").map(|_| Token::Start);
    let end = just("}}").map(|_| Token::End);

    let integer = just('-')
        .or_not()
        .chain::<char, _, _>(text::int(10))
        .collect::<String>()
        .try_map(|string, span| {
            string
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| Simple::custom(span, format!("integer {} out of range", string)))
        })
        .labelled("integer");

    let escape = just('\\').ignore_then(
        just('\\')
            .or(just('/'))
            .or(just('"'))
            .or(just('b').to('\x08'))
            .or(just('f').to('\x0C'))
            .or(just('n').to('\n'))
            .or(just('r').to('\r'))
            .or(just('t').to('\t'))
            .or(just('u').ignore_then(
                filter(|c: &char| c.is_ascii_hexdigit())
                    .repeated()
                    .exactly(4)
                    .collect::<String>()
                    .validate(|digits, span, emit| {
                        u32::from_str_radix(&digits, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .unwrap_or_else(|| {
                                emit(Simple::custom(span, "invalid unicode character"));
                                '\u{FFFD}' // unicode replacement character
                            })
                    }),
            )),
    );

    let string = just('"')
        .ignore_then(filter(|c| *c != '\\' && *c != '"').or(escape).repeated())
        .then_ignore(just('"'))
        .collect::<String>()
        .map(Token::String)
        .labelled("string");

    let ident = text::ident().map(Token::Ident);

    let ctrl = one_of(".$,[]()").map(|c| match c {
        '.' => Token::Dot,
        '$' => Token::Dollar,
        ',' => Token::Comma,
        '[' => Token::LBracket,
        ']' => Token::RBracket,
        '(' => Token::LParen,
        ')' => Token::RParen,
        _ => unreachable!(),
    });

    let token = start.or(end).or(string).or(integer).or(ident).or(ctrl);

    token.map_with_span(|tok, span| (tok, span)).padded().repeated()
}
