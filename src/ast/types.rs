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

//! Declared value types and their semantic modifiers.

use serde::Serialize;
use std::fmt;

/// Boolean interpretation attached to a type by `@loob` / `@bool`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Semantics {
    /// No boolean interpretation.
    #[default]
    Plain,
    /// Zero is true, any nonzero value is false.
    Loobean,
    /// Canonical `0`/`1` booleans.
    Boolean,
}

/// Declared type of a column, constant, parameter or function result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    /// Native field element.
    Field { semantics: Semantics },
    /// Unsigned integer of a fixed bit-width.
    Uint { bits: usize, semantics: Semantics },
    /// Array of an element type with inclusive index bounds.
    Array {
        element: Box<Type>,
        min: usize,
        max: usize,
    },
}

impl Type {
    /// Plain field element type.
    pub fn field() -> Self {
        Type::Field {
            semantics: Semantics::Plain,
        }
    }

    /// Plain unsigned integer type.
    pub fn uint(bits: usize) -> Self {
        Type::Uint {
            bits,
            semantics: Semantics::Plain,
        }
    }

    /// Wraps an element type into an array type.
    pub fn array(element: Type, min: usize, max: usize) -> Self {
        Type::Array {
            element: Box::new(element),
            min,
            max,
        }
    }

    /// Returns this type with its boolean interpretation replaced.
    ///
    /// Arrays forward the modifier to their element type.
    pub fn with_semantics(self, semantics: Semantics) -> Self {
        match self {
            Type::Field { .. } => Type::Field { semantics },
            Type::Uint { bits, .. } => Type::Uint { bits, semantics },
            Type::Array { element, min, max } => Type::Array {
                element: Box::new(element.with_semantics(semantics)),
                min,
                max,
            },
        }
    }

    pub fn semantics(&self) -> Semantics {
        match self {
            Type::Field { semantics } | Type::Uint { semantics, .. } => *semantics,
            Type::Array { element, .. } => element.semantics(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let semantics = match self {
            Type::Field { .. } => {
                write!(f, "𝔽")?;
                self.semantics()
            }
            Type::Uint { bits, .. } => {
                write!(f, "u{bits}")?;
                self.semantics()
            }
            Type::Array { element, min, max } => {
                return write!(f, "({element})[{min}:{max}]");
            }
        };
        match semantics {
            Semantics::Plain => Ok(()),
            Semantics::Loobean => write!(f, "@loob"),
            Semantics::Boolean => write!(f, "@bool"),
        }
    }
}
