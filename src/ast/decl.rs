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

//! Top-level declaration forms.

use super::{ColumnBinding, ConstantBinding, Expr, FunctionBinding, NodeId, Path, Symbol};
use crate::field::FieldElement;
use serde::Serialize;

/// Display hint given with `:display` (validated, not interpreted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayHint {
    Hex,
    Dec,
    Bytes,
    Opcode,
}

impl DisplayHint {
    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            ":hex" => Some(DisplayHint::Hex),
            ":dec" => Some(DisplayHint::Dec),
            ":bytes" => Some(DisplayHint::Bytes),
            ":opcode" => Some(DisplayHint::Opcode),
            _ => None,
        }
    }
}

/// One declared column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefColumn {
    pub id: NodeId,
    pub name: String,
    pub binding: ColumnBinding,
    pub display: Option<DisplayHint>,
}

/// `(defcolumns ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefColumns {
    pub columns: Vec<DefColumn>,
}

/// One `alias target` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefAlias {
    pub name: String,
    /// Path the alias introduces.
    pub path: Path,
    pub target: Symbol,
}

/// `(defalias ...)` or `(defunalias ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefAliases {
    /// Aliases name functions rather than columns/constants.
    pub functions: bool,
    pub aliases: Vec<DefAlias>,
}

/// `(defconst ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefConst {
    pub constants: Vec<ConstantBinding>,
}

/// `(defconstraint handle (attrs...) expr)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefConstraint {
    pub handle: String,
    /// Single row the constraint is restricted to, from `:domain {n}`.
    pub domain: Option<i64>,
    pub guard: Option<Expr>,
    pub perspective: Option<Symbol>,
    pub constraint: Expr,
}

/// `(defcomputed (targets...) (function sources...))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefComputed {
    pub targets: Vec<DefColumn>,
    pub function: Symbol,
    pub sources: Vec<Symbol>,
}

/// `(defcomputedcolumn (name attrs...) expr)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefComputedColumn {
    pub target: DefColumn,
    pub computation: Expr,
}

/// Source of an interleaving: a column or one element of an array column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterleaveSource {
    pub column: Symbol,
    pub index: Option<usize>,
}

/// `(definterleaved target (sources...))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefInterleaved {
    pub target: DefColumn,
    pub sources: Vec<InterleaveSource>,
}

/// `(deflookup handle (targets...) (sources...))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefLookup {
    pub handle: String,
    pub targets: Vec<Expr>,
    pub sources: Vec<Expr>,
}

/// Sort direction of a permutation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    /// `+` or `↓`.
    Ascending,
    /// `-` or `↑`.
    Descending,
}

impl SortDirection {
    pub(crate) fn from_sign(sign: &str) -> Option<Self> {
        match sign {
            "+" | "↓" => Some(SortDirection::Ascending),
            "-" | "↑" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermutationSource {
    pub column: Symbol,
    /// `None` only for an unsigned first source.
    pub direction: Option<SortDirection>,
}

/// `(defpermutation (targets...) (sources...))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefPermutation {
    pub targets: Vec<DefColumn>,
    pub sources: Vec<PermutationSource>,
}

/// `(defperspective name selector (columns...))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefPerspective {
    pub name: String,
    pub path: Path,
    pub selector: Expr,
    pub columns: Vec<DefColumn>,
}

/// `(defproperty handle expr)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefProperty {
    pub handle: String,
    pub assertion: Expr,
}

/// `(defun ...)` / `(defpurefun ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefFun {
    pub name: String,
    pub binding: FunctionBinding,
    pub body: Expr,
}

/// `(definrange expr bound)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefInRange {
    pub expr: Expr,
    pub bound: FieldElement,
}

/// Declaration variants, one per DSL form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclKind {
    Columns(DefColumns),
    Aliases(DefAliases),
    Const(DefConst),
    Constraint(DefConstraint),
    Computed(DefComputed),
    ComputedColumn(DefComputedColumn),
    Interleaved(DefInterleaved),
    Lookup(DefLookup),
    Permutation(DefPermutation),
    Perspective(DefPerspective),
    Property(DefProperty),
    Fun(DefFun),
    InRange(DefInRange),
}

/// Identified declaration node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decl {
    pub id: NodeId,
    pub kind: DeclKind,
}

impl Decl {
    pub fn new(id: NodeId, kind: DeclKind) -> Self {
        Self { id, kind }
    }

    /// Keyword of the form this declaration was written with.
    pub fn keyword(&self) -> &'static str {
        match &self.kind {
            DeclKind::Columns(_) => "defcolumns",
            DeclKind::Aliases(d) if d.functions => "defunalias",
            DeclKind::Aliases(_) => "defalias",
            DeclKind::Const(_) => "defconst",
            DeclKind::Constraint(_) => "defconstraint",
            DeclKind::Computed(_) => "defcomputed",
            DeclKind::ComputedColumn(_) => "defcomputedcolumn",
            DeclKind::Interleaved(_) => "definterleaved",
            DeclKind::Lookup(_) => "deflookup",
            DeclKind::Permutation(_) => "defpermutation",
            DeclKind::Perspective(_) => "defperspective",
            DeclKind::Property(_) => "defproperty",
            DeclKind::Fun(d) if d.binding.pure => "defpurefun",
            DeclKind::Fun(_) => "defun",
            DeclKind::InRange(_) => "definrange",
        }
    }

    /// Paths introduced by this declaration.
    pub fn definitions(&self) -> Vec<&Path> {
        fn columns(columns: &[DefColumn]) -> impl Iterator<Item = &Path> {
            columns.iter().map(|c| &c.binding.path)
        }
        match &self.kind {
            DeclKind::Columns(d) => columns(&d.columns).collect(),
            DeclKind::Aliases(d) => d.aliases.iter().map(|a| &a.path).collect(),
            DeclKind::Const(d) => d.constants.iter().map(|c| &c.path).collect(),
            DeclKind::Computed(d) => columns(&d.targets).collect(),
            DeclKind::ComputedColumn(d) => vec![&d.target.binding.path],
            DeclKind::Interleaved(d) => vec![&d.target.binding.path],
            DeclKind::Permutation(d) => columns(&d.targets).collect(),
            DeclKind::Perspective(d) => std::iter::once(&d.path)
                .chain(columns(&d.columns))
                .collect(),
            DeclKind::Fun(d) => vec![&d.binding.path],
            DeclKind::Constraint(_)
            | DeclKind::Lookup(_)
            | DeclKind::Property(_)
            | DeclKind::InRange(_) => Vec::new(),
        }
    }

    /// Pending references made anywhere in this declaration.
    pub fn dependencies(&self) -> Vec<&Symbol> {
        match &self.kind {
            DeclKind::Columns(_) => Vec::new(),
            DeclKind::Aliases(d) => d.aliases.iter().map(|a| &a.target).collect(),
            DeclKind::Const(d) => d
                .constants
                .iter()
                .flat_map(|c| c.value.dependencies())
                .collect(),
            DeclKind::Constraint(d) => {
                let mut symbols: Vec<&Symbol> = d.perspective.iter().collect();
                if let Some(guard) = &d.guard {
                    symbols.extend(guard.dependencies());
                }
                symbols.extend(d.constraint.dependencies());
                symbols
            }
            DeclKind::Computed(d) => std::iter::once(&d.function)
                .chain(d.sources.iter())
                .collect(),
            DeclKind::ComputedColumn(d) => d.computation.dependencies(),
            DeclKind::Interleaved(d) => d.sources.iter().map(|s| &s.column).collect(),
            DeclKind::Lookup(d) => d
                .targets
                .iter()
                .chain(d.sources.iter())
                .flat_map(Expr::dependencies)
                .collect(),
            DeclKind::Permutation(d) => d.sources.iter().map(|s| &s.column).collect(),
            DeclKind::Perspective(d) => d.selector.dependencies(),
            DeclKind::Property(d) => d.assertion.dependencies(),
            DeclKind::Fun(d) => d.body.dependencies(),
            DeclKind::InRange(d) => d.expr.dependencies(),
        }
    }
}
