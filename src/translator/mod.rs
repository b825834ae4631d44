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

//! Translation of reader terms into the declaration/expression AST.
//!
//! One [`Translator`] holds the private state of one file: its node counter,
//! the spans registered by the declaration dispatcher and those registered by
//! the expression rules. A file is split into a prelude (declarations before
//! the first `(module NAME)` marker) followed by one run per marker.
//!
//! Errors are collected rather than returned early wherever sibling items are
//! independent; a file with any error contributes no declarations.

mod columns;
mod decls;
mod names;
mod rules;
mod types;

use crate::ast::{Circuit, Decl, FileId, Module, NodeId, Path, SourceSpan, Symbol, SymbolKind};
use crate::diagnostics::SyntaxError;
use crate::project::SourceFile;
use crate::reader::Term;
use crate::source_map::SourceMap;

pub(crate) use self::names::{is_identifier, parse_qualified_name};
pub(crate) use self::types::{is_decimal, parse_integer, parse_interval, parse_type};

type Errors = Vec<SyntaxError>;

/// Which translation stage registers a node's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Declaration,
    Expression,
}

/// Per-file translation state.
pub(crate) struct Translator<'a> {
    file: FileId,
    doc: &'a SourceFile,
    next_index: u32,
    decl_spans: SourceMap,
    expr_spans: SourceMap,
}

/// Outcome of translating one file.
#[derive(Debug)]
pub(crate) struct FileTranslation {
    pub(crate) circuit: Circuit,
    pub(crate) source_map: SourceMap,
    pub(crate) errors: Vec<SyntaxError>,
}

impl<'a> Translator<'a> {
    pub(crate) fn new(file: FileId, doc: &'a SourceFile) -> Self {
        Self {
            file,
            doc,
            next_index: 0,
            decl_spans: SourceMap::new(),
            expr_spans: SourceMap::new(),
        }
    }

    /// Allocates the next node identity and registers its span.
    fn register(&mut self, span: &SourceSpan, origin: Origin) -> NodeId {
        let id = NodeId {
            file: self.file,
            index: self.next_index,
        };
        self.next_index += 1;
        let spans = match origin {
            Origin::Declaration => &mut self.decl_spans,
            Origin::Expression => &mut self.expr_spans,
        };
        spans.put(id, span.clone());
        id
    }

    fn symbol(&mut self, term: &Term, kind: SymbolKind, path: Path, origin: Origin) -> Symbol {
        let id = self.register(&term.span, origin);
        Symbol::new(id, kind, path)
    }

    /// Creates a source-mapped error for `term`.
    fn error_at(&self, term: &Term, message: impl Into<String>) -> SyntaxError {
        SyntaxError::from_span_in_source(message, &self.doc.name, &self.doc.contents, &term.span)
    }

    fn errors_at(&self, term: &Term, message: impl Into<String>) -> Errors {
        vec![self.error_at(term, message)]
    }

    /// Checks that `term` is an identifier symbol, naming `what` on failure.
    fn identifier(&self, term: &Term, what: &str) -> Result<String, SyntaxError> {
        match term.as_symbol() {
            Some(name) if is_identifier(name) => Ok(name.to_string()),
            _ => Err(self.error_at(term, format!("invalid {what}"))),
        }
    }

    /// Concatenated symbols of a bracket term, e.g. `[ 3 : 7 ]` -> `3:7`.
    fn bracket_contents(term: &Term) -> Option<String> {
        term.as_array()?
            .iter()
            .map(Term::as_symbol)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat())
    }

    /// Combines both span registries into the file's source map.
    fn into_source_map(self) -> SourceMap {
        let mut map = self.decl_spans;
        map.register_file(self.file, self.doc.name.clone());
        map.join(self.expr_spans);
        map
    }

    /// Parses declarations until a `(module ...)` marker or end of input.
    ///
    /// Returns the declarations parsed, the unconsumed terms (starting at the
    /// marker) and every error met on the way.
    fn parse_module_contents<'t>(
        &mut self,
        context: &Path,
        terms: &'t [Term],
    ) -> (Vec<Decl>, &'t [Term], Errors) {
        let mut decls = Vec::new();
        let mut errors = Vec::new();
        for (i, term) in terms.iter().enumerate() {
            if term.as_list().is_none() {
                errors.push(self.error_at(term, "unexpected or malformed declaration"));
            } else if term.is_form("module") {
                return (decls, &terms[i..], errors);
            } else {
                match self.parse_declaration(context, term) {
                    Ok(decl) => decls.push(decl),
                    Err(errs) => errors.extend(errs),
                }
            }
        }
        (decls, &[], errors)
    }

    /// Validates a `(module NAME)` marker and returns the module name.
    fn parse_module_start(&self, term: &Term) -> Result<String, SyntaxError> {
        match term.as_list() {
            Some([_, name]) => match name.as_symbol() {
                Some(name) if is_identifier(name) => Ok(name.to_string()),
                _ => Err(self.error_at(name, "invalid module name")),
            },
            _ => Err(self.error_at(term, "invalid module declaration")),
        }
    }
}

/// Translates the terms of one file into a circuit fragment.
pub(crate) fn translate_terms(file: FileId, doc: &SourceFile, terms: &[Term]) -> FileTranslation {
    let mut translator = Translator::new(file, doc);
    let mut circuit = Circuit::default();

    let (decls, mut rest, mut errors) = translator.parse_module_contents(&Path::root(), terms);
    circuit.declarations = decls;

    while let Some((marker, tail)) = rest.split_first() {
        // A bad marker is reported, but its declarations are still checked.
        let name = match translator.parse_module_start(marker) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.push(err);
                None
            }
        };
        let context = name.as_deref().map_or_else(Path::root, Path::absolute);
        let (decls, remaining, errs) = translator.parse_module_contents(&context, tail);
        errors.extend(errs);
        if let Some(name) = name {
            circuit.modules.push(Module {
                name,
                declarations: decls,
            });
        }
        rest = remaining;
    }

    if !errors.is_empty() {
        return FileTranslation {
            circuit: Circuit::default(),
            source_map: SourceMap::new(),
            errors,
        };
    }
    FileTranslation {
        circuit,
        source_map: translator.into_source_map(),
        errors,
    }
}
