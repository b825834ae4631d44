/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Reader trivia and lexical helpers.

use crate::ast::Span;
use nom::Parser;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{multispace1, not_line_ending},
    combinator::{map, value},
    multi::many0,
    sequence::pair,
};

use super::PResult;

/// Characters that terminate a symbol.
const DELIMITERS: &str = "()[]{};";

/// Returns whether a char can be part of a symbol.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !DELIMITERS.contains(c)
}

/// Parses a bare symbol token.
pub(super) fn symbol_text(input: Span<'_>) -> PResult<'_, String> {
    map(take_while1(is_symbol_char), |s: Span<'_>| {
        s.fragment().to_string()
    })
    .parse(input)
}

/// Skips zero-or-more whitespace/comments.
pub(super) fn ws0(input: Span<'_>) -> PResult<'_, ()> {
    value((), many0(alt((value((), multispace1), comment)))).parse(input)
}

/// Parses a `;` line comment.
fn comment(input: Span<'_>) -> PResult<'_, ()> {
    value((), pair(tag(";"), not_line_ending)).parse(input)
}
