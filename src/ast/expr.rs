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

//! Expression tree and pending symbolic references.

use super::{Binding, NodeId, Path};
use num_bigint::BigInt;
use serde::Serialize;
use std::fmt;

/// Shape of a pending reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    /// Bare name used as a value.
    VariableAccess,
    /// Name indexed as `[name index]`.
    ArrayAccess,
    /// Callee of an invocation, `reduce` function or function alias target.
    FunctionInvocation,
    /// Perspective named by a constraint's `:perspective` attribute.
    Perspective,
    /// Column named in an alias, interleave, permutation or computed form.
    Column,
}

/// Pending reference to something declared elsewhere.
///
/// The translator only records the path; `binding` stays empty until a
/// downstream resolver fills it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub id: NodeId,
    pub kind: SymbolKind,
    pub path: Path,
    /// Whether the reference denotes a function.
    pub function: bool,
    pub binding: Option<Box<Binding>>,
}

impl Symbol {
    pub fn new(id: NodeId, kind: SymbolKind, path: Path) -> Self {
        Self {
            id,
            kind,
            path,
            function: matches!(kind, SymbolKind::FunctionInvocation),
            binding: None,
        }
    }

    /// Leaf name of the referenced item.
    pub fn name(&self) -> &str {
        self.path.tail().unwrap_or_default()
    }

    pub fn is_resolved(&self) -> bool {
        self.binding.is_some()
    }

    /// Fills the binding slot; returns `false` if it was already filled.
    pub fn resolve(&mut self, binding: Binding) -> bool {
        if self.binding.is_some() {
            return false;
        }
        self.binding = Some(Box::new(binding));
        true
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Qualified names print back in their surface form.
        let segments = self.path.segments();
        match (self.path.is_absolute(), segments) {
            (true, [module, perspective, name]) => write!(f, "{module}.{perspective}/{name}"),
            (true, [module, name]) => write!(f, "{module}.{name}"),
            (_, [perspective, name]) => write!(f, "{perspective}/{name}"),
            _ => write!(f, "{}", segments.join("/")),
        }
    }
}

/// Expression node variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// Integer literal.
    Constant(BigInt),
    /// Variable or column access.
    VariableAccess(Symbol),
    /// Indexed access `[array index]`.
    ArrayAccess { array: Symbol, index: Box<Expr> },
    /// N-ary `+`.
    Add(Vec<Expr>),
    /// N-ary `-`.
    Sub(Vec<Expr>),
    /// N-ary `*`.
    Mul(Vec<Expr>),
    /// `(~ x)`: zero stays zero, anything else becomes one.
    Normalise(Box<Expr>),
    /// `(^ base power)`.
    Exp { base: Box<Expr>, power: Box<Expr> },
    /// `(shift arg rows)`.
    Shift { arg: Box<Expr>, shift: Box<Expr> },
    /// `(if cond then [else])`.
    If {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Option<Box<Expr>>,
    },
    /// `(begin e...)`.
    Sequence(Vec<Expr>),
    /// `(debug e)`.
    Debug(Box<Expr>),
    /// `(for i [start:end] body)`, bounds inclusive.
    For {
        index: String,
        start: usize,
        end: usize,
        body: Box<Expr>,
    },
    /// `(let ((name expr)...) body)`.
    Let {
        bindings: Vec<(String, Expr)>,
        body: Box<Expr>,
    },
    /// `(reduce f body)`.
    Reduce { function: Symbol, body: Box<Expr> },
    /// `(f args...)`.
    Invoke { function: Symbol, args: Vec<Expr> },
}

/// Identified expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(id: NodeId, kind: ExprKind) -> Self {
        Self { id, kind }
    }

    /// Returns the integer value when this is a literal.
    pub fn as_constant(&self) -> Option<&BigInt> {
        match &self.kind {
            ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// Direct sub-expressions in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Constant(_) | ExprKind::VariableAccess(_) => Vec::new(),
            ExprKind::ArrayAccess { index, .. } => vec![index.as_ref()],
            ExprKind::Add(args)
            | ExprKind::Sub(args)
            | ExprKind::Mul(args)
            | ExprKind::Sequence(args)
            | ExprKind::Invoke { args, .. } => args.iter().collect(),
            ExprKind::Normalise(arg) | ExprKind::Debug(arg) => vec![arg.as_ref()],
            ExprKind::Exp { base, power } => vec![base.as_ref(), power.as_ref()],
            ExprKind::Shift { arg, shift } => vec![arg.as_ref(), shift.as_ref()],
            ExprKind::If {
                condition,
                then,
                otherwise,
            } => {
                let mut children = vec![condition.as_ref(), then.as_ref()];
                children.extend(otherwise.as_deref());
                children
            }
            ExprKind::For { body, .. } | ExprKind::Reduce { body, .. } => vec![body.as_ref()],
            ExprKind::Let { bindings, body } => {
                let mut children: Vec<&Expr> = bindings.iter().map(|(_, e)| e).collect();
                children.push(body.as_ref());
                children
            }
        }
    }

    /// Pending references made by this expression, outermost first.
    pub fn dependencies(&self) -> Vec<&Symbol> {
        let mut symbols = Vec::new();
        self.collect_dependencies(&mut symbols);
        symbols
    }

    fn collect_dependencies<'a>(&'a self, symbols: &mut Vec<&'a Symbol>) {
        match &self.kind {
            ExprKind::VariableAccess(symbol)
            | ExprKind::ArrayAccess { array: symbol, .. }
            | ExprKind::Reduce {
                function: symbol, ..
            }
            | ExprKind::Invoke {
                function: symbol, ..
            } => symbols.push(symbol),
            _ => {}
        }
        for child in self.children() {
            child.collect_dependencies(symbols);
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, args: &[&Expr]) -> fmt::Result {
    write!(f, "({head}")?;
    for arg in args {
        write!(f, " {arg}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Constant(value) => write!(f, "{value}"),
            ExprKind::VariableAccess(symbol) => write!(f, "{symbol}"),
            ExprKind::ArrayAccess { array, index } => write!(f, "[{array} {index}]"),
            ExprKind::Add(_) => write_list(f, "+", &self.children()),
            ExprKind::Sub(_) => write_list(f, "-", &self.children()),
            ExprKind::Mul(_) => write_list(f, "*", &self.children()),
            ExprKind::Normalise(_) => write_list(f, "~", &self.children()),
            ExprKind::Exp { .. } => write_list(f, "^", &self.children()),
            ExprKind::Shift { .. } => write_list(f, "shift", &self.children()),
            ExprKind::If { .. } => write_list(f, "if", &self.children()),
            ExprKind::Sequence(_) => write_list(f, "begin", &self.children()),
            ExprKind::Debug(_) => write_list(f, "debug", &self.children()),
            ExprKind::For {
                index,
                start,
                end,
                body,
            } => write!(f, "(for {index} [{start}:{end}] {body})"),
            ExprKind::Let { bindings, body } => {
                write!(f, "(let (")?;
                for (i, (name, value)) in bindings.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "({name} {value})")?;
                }
                write!(f, ") {body})")
            }
            ExprKind::Reduce { function, body } => write!(f, "(reduce {function} {body})"),
            ExprKind::Invoke { function, args } => {
                write_list(f, &function.to_string(), &args.iter().collect::<Vec<_>>())
            }
        }
    }
}
