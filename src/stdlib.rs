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

//! Embedded standard library.
//!
//! The library is ordinary DSL text, parsed by the same pipeline as user
//! files and included by [`crate::parse_source_files`] unless disabled with
//! [`crate::Options::stdlib`].

use crate::project::SourceFile;

/// Name under which the standard library is merged.
pub const STDLIB_NAME: &str = "stdlib.lisp";

/// Embedded source text of the standard library.
pub const STDLIB_SOURCE: &str = include_str!("../stdlib/stdlib.lisp");

/// Returns the standard library as a source file.
pub fn source_file() -> SourceFile {
    SourceFile::new(STDLIB_NAME, STDLIB_SOURCE)
}
