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

//! Loading and parsing a single source file.

use super::ParsedCircuit;
use crate::Error;
use crate::ast::{Circuit, FileId};
use crate::reader::read_terms;
use crate::source_map::SourceMap;
use crate::translator::translate_terms;
use std::path::Path;
use tracing::debug;

/// One named unit of DSL source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Name used for ordering, duplicate detection and diagnostics.
    pub name: String,
    /// Full DSL content.
    pub contents: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Reads a file from disk, naming it by its path.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.to_string_lossy(), contents))
    }
}

/// Reads and translates one file under the given identity.
///
/// A reader failure is the file's only error; otherwise every translation
/// error is reported and the fragment is empty if there was any.
pub fn parse_source_file(file: &SourceFile, id: FileId) -> ParsedCircuit {
    let terms = match read_terms(&file.contents, &file.name) {
        Ok(terms) => terms,
        Err(err) => {
            debug!(file = %file.name, "source file could not be read");
            return ParsedCircuit {
                circuit: Circuit::default(),
                source_map: SourceMap::new(),
                errors: vec![err],
            };
        }
    };
    let translation = translate_terms(id, file, &terms);
    debug!(
        file = %file.name,
        declarations = translation.circuit.all_declarations().count(),
        errors = translation.errors.len(),
        "parsed source file"
    );
    ParsedCircuit {
        circuit: translation.circuit,
        source_map: translation.source_map,
        errors: translation.errors,
    }
}
