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

//! Front end for a Lisp-syntaxed arithmetic-constraint DSL.
//!
//! This crate provides:
//! - An s-expression reader (symbols, `(lists)`, `[arrays]`, `{sets}`) with
//!   line/column spans.
//! - Translation of top-level forms (`defcolumns`, `defconstraint`,
//!   `deflookup`, `defun`, ...) into a typed declaration AST.
//! - Expression translation (`+ - * ~ ^ if shift begin for let reduce`, array
//!   access and function invocation).
//! - Qualified names (`name`, `p/name`, `m.name`, `m.p/name`) parsed into
//!   unresolved [`Path`]s.
//! - A [`SourceMap`] from every constructed node back to its source span.
//! - Multi-file merging into one [`Circuit`] with deterministic module order.
//!
//! Name resolution, type checking and lowering are left to downstream
//! consumers; symbols carry an empty binding slot for them to fill.
//!
//! # Pipeline
//!
//! 1. Read each file into a term forest ([`read_terms`]).
//! 2. Split it at `(module NAME)` markers and translate every declaration.
//! 3. Merge fragments across files by module name ([`parse_source_files`]).
//!
//! # Example
//!
//! ```
//! use circuit_dsl::{Options, SourceFile, parse_source_files};
//!
//! let source = "(defcolumns (X :i16) Y)\n(defconstraint c () (- X Y))";
//! let file = SourceFile::new("counter.lisp", source);
//! let parsed = parse_source_files(&[file], &Options::new().stdlib(false));
//! let (circuit, source_map) = parsed.into_result().expect("valid source");
//! assert_eq!(circuit.declarations.len(), 2);
//! assert!(!source_map.is_empty());
//! ```

pub mod ast;
mod diagnostics;
pub mod field;
mod project;
pub mod reader;
mod source_map;
pub mod stdlib;
mod translator;

pub use ast::{
    Binding, Circuit, Decl, DeclKind, Expr, ExprKind, FileId, Module, NodeId, Path, Semantics,
    SourceSpan, Symbol, SymbolKind, Type,
};
pub use diagnostics::SyntaxError;
pub use field::FieldElement;
pub use project::{Options, ParsedCircuit, SourceFile, parse_source_file, parse_source_files};
pub use reader::{Term, TermKind, read_terms};
pub use source_map::SourceMap;

/// Failure to produce a circuit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source file could not be read from disk.
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// One or more files failed to parse.
    #[error("{}", render_errors(.0))]
    Syntax(Vec<SyntaxError>),
}

impl Error {
    /// Syntax errors carried by this failure, if any.
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        match self {
            Error::Syntax(errors) => errors,
            Error::Io { .. } => &[],
        }
    }
}

fn render_errors(errors: &[SyntaxError]) -> String {
    match errors {
        [single] => single.to_string(),
        _ => {
            let mut out = format!("{} syntax errors", errors.len());
            for err in errors {
                out.push_str("\n\n");
                out.push_str(&err.to_string());
            }
            out
        }
    }
}

/// Parses one in-memory source into a circuit, without the standard library.
pub fn parse_source(name: &str, contents: &str) -> Result<(Circuit, SourceMap), Error> {
    let file = SourceFile::new(name, contents);
    parse_source_files(&[file], &Options::new().stdlib(false)).into_result()
}

/// Reads files from disk and parses them together.
pub fn parse_paths<P>(paths: &[P], options: &Options) -> Result<(Circuit, SourceMap), Error>
where
    P: AsRef<std::path::Path>,
{
    let files = paths
        .iter()
        .map(|path| SourceFile::read(path))
        .collect::<Result<Vec<_>, _>>()?;
    parse_source_files(&files, options).into_result()
}

#[cfg(test)]
mod tests;
