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

//! `nom` reader turning source text into a forest of symbolic terms.
//!
//! The reader knows nothing about declarations. It recognises:
//! - symbols (any run of characters other than whitespace, `;` and brackets)
//! - lists `( ... )`
//! - arrays `[ ... ]`
//! - sets `{ ... }`
//! - `;` line comments
//!
//! Every term carries the [`SourceSpan`] it was read from.

mod grammar;
mod utils;

use crate::ast::{SourceSpan, Span};
use crate::diagnostics::SyntaxError;
use nom::{
    IResult,
    combinator::all_consuming,
    error::{ErrorKind, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::terminated,
};
use std::fmt;

use self::grammar::term;
use self::utils::ws0;

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Term payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    Symbol(String),
    List(Vec<Term>),
    Array(Vec<Term>),
    Set(Vec<Term>),
}

/// One symbolic term with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub kind: TermKind,
    pub span: SourceSpan,
}

impl Term {
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            TermKind::Symbol(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Term]> {
        match &self.kind {
            TermKind::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Term]> {
        match &self.kind {
            TermKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&[Term]> {
        match &self.kind {
            TermKind::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Leading symbol of a non-empty list.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list()?.first()?.as_symbol()
    }

    /// Whether this is a list headed by `keyword`.
    pub fn is_form(&self, keyword: &str) -> bool {
        self.head_symbol() == Some(keyword)
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: char, items: &[Term], close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TermKind::Symbol(text) => write!(f, "{text}"),
            TermKind::List(items) => write_items(f, '(', items, ')'),
            TermKind::Array(items) => write_items(f, '[', items, ']'),
            TermKind::Set(items) => write_items(f, '{', items, '}'),
        }
    }
}

/// Reads every top-level term of `source`.
///
/// Reading stops at the first malformed term: the result is a single fatal
/// error anchored at the deepest failure point.
pub fn read_terms(source: &str, source_name: &str) -> Result<Vec<Term>, SyntaxError> {
    let input = Span::new(source);
    match all_consuming(terminated(many0(term), ws0))(input) {
        Ok((_, terms)) => Ok(terms),
        Err(err) => Err(read_error_to_syntax_error(err, source_name, source)),
    }
}

/// Converts a `nom` verbose error to a crate-level syntax error.
fn read_error_to_syntax_error(
    err: nom::Err<VerboseError<Span<'_>>>,
    source_name: &str,
    source: &str,
) -> SyntaxError {
    match err {
        nom::Err::Incomplete(_) => SyntaxError::message_in_file("Incomplete input", source_name),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            // The deepest recorded error is the most precise anchor.
            let Some((span, kind)) = e.errors.first() else {
                return SyntaxError::message_in_file("Syntax error", source_name);
            };
            let anchor = SourceSpan::from_bounds(*span, *span);
            let detail = match kind {
                VerboseErrorKind::Context(ctx) => format!("Syntax error: expected {ctx}"),
                VerboseErrorKind::Char(c) => format!("Syntax error: expected '{c}'"),
                VerboseErrorKind::Nom(ErrorKind::Eof) => {
                    "Syntax error: unexpected closing bracket".to_string()
                }
                VerboseErrorKind::Nom(kind) => format!("Syntax error near {kind:?}"),
            };
            SyntaxError::from_span_in_source(detail, source_name, source, &anchor)
        }
    }
}
