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

//! AST definitions for the constraint DSL with stable node identities.
//!
//! The translator builds this AST from reader terms. Nodes that diagnostics may
//! point at (declarations, expressions, symbols, declared columns) carry a
//! [`NodeId`]; the matching source span lives in a [`crate::SourceMap`].

mod binding;
mod decl;
mod expr;
mod path;
mod types;

pub use binding::{Binding, ColumnBinding, ConstantBinding, FunctionBinding, LocalBinding};
pub use decl::{
    Decl, DeclKind, DefAlias, DefAliases, DefColumn, DefColumns, DefComputed, DefComputedColumn,
    DefConst, DefConstraint, DefFun, DefInRange, DefInterleaved, DefLookup, DefPermutation,
    DefPerspective, DefProperty, DisplayHint, InterleaveSource, PermutationSource, SortDirection,
};
pub use expr::{Expr, ExprKind, Symbol, SymbolKind};
pub use path::Path;
pub use types::{Semantics, Type};

use nom_locate::LocatedSpan;
use serde::Serialize;
use std::fmt;

/// Reader input span type carrying byte offsets and line/column info.
pub type Span<'a> = LocatedSpan<&'a str>;

/// Source range and anchor position for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based UTF-8 column.
    pub column: usize,
}

impl SourceSpan {
    /// Creates a source span from reader start/end positions.
    pub fn from_bounds(start: Span<'_>, end: Span<'_>) -> Self {
        Self {
            start: start.location_offset(),
            end: end.location_offset(),
            line: start.location_line() as usize,
            column: start.get_utf8_column(),
        }
    }

    /// Returns span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identifies one source file within a multi-file parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FileId(pub u32);

/// Identity of a constructed AST node.
///
/// Indices increase monotonically in construction order within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId {
    /// File the node was translated from.
    pub file: FileId,
    /// Construction index within that file.
    pub index: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.file.0, self.index)
    }
}

/// Named grouping of declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    /// Module name as written in `(module NAME)`.
    pub name: String,
    /// Declarations in source order.
    pub declarations: Vec<Decl>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }
}

/// Top-level parse result: prelude declarations plus named modules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Circuit {
    /// Declarations appearing before any `(module ...)` marker.
    pub declarations: Vec<Decl>,
    /// Named modules, unique by name.
    pub modules: Vec<Module>,
}

impl Circuit {
    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Iterates every declaration, prelude first, then module by module.
    pub fn all_declarations(&self) -> impl Iterator<Item = &Decl> {
        self.declarations
            .iter()
            .chain(self.modules.iter().flat_map(|m| m.declarations.iter()))
    }
}
