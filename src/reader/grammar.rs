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

//! Term grammar.

use crate::ast::{SourceSpan, Span};
use nom::Parser;
use nom::{
    branch::alt,
    character::complete::char,
    combinator::cut,
    error::context,
    multi::many0,
    sequence::{preceded, terminated},
};

use super::utils::{symbol_text, ws0};
use super::{PResult, Term, TermKind};

/// Parses one term, skipping leading trivia.
pub(super) fn term(input: Span<'_>) -> PResult<'_, Term> {
    let (input, _) = ws0(input)?;
    alt((
        compound('(', ')', "')'", TermKind::List),
        compound('[', ']', "']'", TermKind::Array),
        compound('{', '}', "'}'", TermKind::Set),
        symbol,
    ))
    .parse(input)
}

/// Parses a bracketed sequence of terms.
///
/// Once the opening bracket is seen the parser commits, so an unclosed
/// bracket is reported where the closing one was expected.
fn compound<'a>(
    open: char,
    close: char,
    label: &'static str,
    build: fn(Vec<Term>) -> TermKind,
) -> impl FnMut(Span<'a>) -> PResult<'a, Term> {
    move |input: Span<'a>| {
        let start = input;
        let (input, items) = preceded(
            char(open),
            cut(terminated(
                many0(term),
                preceded(ws0, context(label, char(close))),
            )),
        )
        .parse(input)?;
        let span = SourceSpan::from_bounds(start, input);
        Ok((
            input,
            Term {
                kind: build(items),
                span,
            },
        ))
    }
}

/// Parses a symbol term.
fn symbol(input: Span<'_>) -> PResult<'_, Term> {
    let start = input;
    let (input, text) = symbol_text(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Term {
            kind: TermKind::Symbol(text),
            span,
        },
    ))
}
