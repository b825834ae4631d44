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

//! Declared identities and the resolver's binding slot.
//!
//! Bindings created by declarations are purely syntactic: a path, a type and
//! a few flags. Nothing here looks anything up.

use super::{Expr, Path, Type};
use serde::Serialize;

/// Declared identity of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBinding {
    /// Module (lexical context) the column was declared in.
    pub context: Path,
    /// Full declared path (module, optional perspective, name).
    pub path: Path,
    /// Computed column rather than an input column.
    pub computed: bool,
    /// Values must be proven to lie within the declared type.
    pub must_prove: bool,
    /// Register multiplier; `1` for inputs, `0` for computed columns.
    pub multiplier: usize,
    /// Declared type.
    pub datatype: Type,
    /// Padding value requested with `:padding`.
    pub padding: Option<i64>,
}

impl ColumnBinding {
    /// Binding for an input column declared via `defcolumns`/`defperspective`.
    pub fn input(context: Path, path: Path, datatype: Type, must_prove: bool) -> Self {
        Self {
            context,
            path,
            computed: false,
            must_prove,
            multiplier: 1,
            datatype,
            padding: None,
        }
    }

    /// Binding for a column whose values are produced by the compiler.
    pub fn computed(context: Path, path: Path, datatype: Type, must_prove: bool) -> Self {
        Self {
            context,
            path,
            computed: true,
            must_prove,
            multiplier: 0,
            datatype,
            padding: None,
        }
    }
}

/// A named constant and its defining expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantBinding {
    pub path: Path,
    /// Explicit type from `(NAME :type)`, if given.
    pub datatype: Option<Type>,
    pub value: Expr,
}

/// A function parameter, `let` variable or `for` index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalBinding {
    pub name: String,
    pub datatype: Type,
}

impl LocalBinding {
    pub fn new(name: impl Into<String>, datatype: Type) -> Self {
        Self {
            name: name.into(),
            datatype,
        }
    }
}

/// Signature of a declared function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionBinding {
    pub path: Path,
    pub pure: bool,
    pub params: Vec<LocalBinding>,
    /// Declared return type, if any.
    pub returns: Option<Type>,
    /// `:force` on the return type.
    pub forced: bool,
}

/// Resolved meaning of a pending reference.
///
/// Filled in by a downstream resolver through [`super::Symbol::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Binding {
    Column(ColumnBinding),
    Constant(ConstantBinding),
    Local(LocalBinding),
    Function(FunctionBinding),
    Perspective(Path),
}
