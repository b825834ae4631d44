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

//! Parse options.

/// Settings for [`crate::parse_source_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    stdlib: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { stdlib: true }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes the embedded standard library as `stdlib.lisp`.
    pub fn stdlib(mut self, enabled: bool) -> Self {
        self.stdlib = enabled;
        self
    }

    pub fn includes_stdlib(&self) -> bool {
        self.stdlib
    }
}
