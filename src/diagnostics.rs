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

//! Syntax diagnostics with source snippets and caret pointers.

use crate::ast::SourceSpan;
use std::fmt;

/// A syntax error reported by the reader or the translator.
///
/// Every error kind (structural, identifier, attribute, literal) shares this
/// one shape: a message anchored at a source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message.
    pub message: String,
    /// Source file label (`""` when unavailable).
    pub file: String,
    /// Offending source range (`None` for file-level errors).
    pub span: Option<SourceSpan>,
    /// Source line snippet where the error occurred.
    pub snippet: String,
    /// Caret pointer aligned to `snippet`.
    pub pointer: String,
}

impl SyntaxError {
    /// Creates an error with a source-file label but no location.
    pub fn message_in_file(message: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            span: None,
            snippet: String::new(),
            pointer: String::new(),
        }
    }

    /// Creates a source-mapped diagnostic from a [`SourceSpan`] and source label.
    pub fn from_span_in_source(
        message: impl Into<String>,
        file: impl Into<String>,
        source: &str,
        span: &SourceSpan,
    ) -> Self {
        let snippet = source
            .lines()
            .nth(span.line.saturating_sub(1))
            .unwrap_or("")
            .to_string();
        // Clamp the caret run to the reported line; list terms often span several.
        let line_len = snippet.chars().count();
        let pointer_column = span.column.saturating_sub(1).min(line_len);
        let requested_len = span.len().max(1);
        let max_len = line_len.saturating_sub(pointer_column).max(1);
        let pointer_len = requested_len.min(max_len);
        let pointer = format!("{}{}", " ".repeat(pointer_column), "^".repeat(pointer_len));

        Self {
            message: message.into(),
            file: file.into(),
            span: Some(span.clone()),
            snippet,
            pointer,
        }
    }

    /// 1-based line, or `0` when unavailable.
    pub fn line(&self) -> usize {
        self.span.as_ref().map_or(0, |s| s.line)
    }

    /// 1-based column, or `0` when unavailable.
    pub fn column(&self) -> usize {
        self.span.as_ref().map_or(0, |s| s.column)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(span) = &self.span else {
            if self.file.is_empty() {
                return write!(f, "{}", self.message);
            }
            return write!(f, "{} ({})", self.message, self.file);
        };

        let location = if self.file.is_empty() {
            format!("line {}, column {}", span.line, span.column)
        } else {
            format!("{}:{}:{}", self.file, span.line, span.column)
        };

        write!(
            f,
            "{}\n --> {}\n  |\n{:>3} | {}\n  | {}",
            self.message, location, span.line, self.snippet, self.pointer
        )
    }
}

impl std::error::Error for SyntaxError {}
