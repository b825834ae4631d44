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

//! Multi-file parse and merge.
//!
//! Files are ordered by normalized name and numbered in that order, so the
//! merged [`Circuit`] and [`SourceMap`] do not depend on the order in which
//! the caller supplied them.

mod loader;
mod options;
mod paths;

pub use loader::{SourceFile, parse_source_file};
pub use options::Options;
pub(crate) use paths::normalize_source_name;

use crate::Error;
use crate::ast::{Circuit, FileId, Module};
use crate::diagnostics::SyntaxError;
use crate::source_map::SourceMap;
use crate::stdlib;
use std::collections::BTreeMap;
use tracing::debug;

/// Result of parsing one or more files.
///
/// `circuit` holds the fragments of every file that parsed cleanly; callers
/// should not compile further when `errors` is non-empty.
#[derive(Debug, Default)]
pub struct ParsedCircuit {
    pub circuit: Circuit,
    pub source_map: SourceMap,
    pub errors: Vec<SyntaxError>,
}

impl ParsedCircuit {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into a `Result`, discarding partial output on error.
    pub fn into_result(self) -> Result<(Circuit, SourceMap), Error> {
        if self.errors.is_empty() {
            Ok((self.circuit, self.source_map))
        } else {
            Err(Error::Syntax(self.errors))
        }
    }
}

/// Parses and merges a set of files into one circuit.
pub fn parse_source_files(files: &[SourceFile], options: &Options) -> ParsedCircuit {
    let mut units: Vec<(String, &SourceFile)> = files
        .iter()
        .map(|file| (normalize_source_name(&file.name), file))
        .collect();

    let library = stdlib::source_file();
    if options.includes_stdlib() {
        let name = normalize_source_name(&library.name);
        // A user file of the same name replaces the embedded one.
        if units.iter().all(|(existing, _)| *existing != name) {
            debug!(file = %name, "including standard library");
            units.push((name, &library));
        }
    }
    // Ties between colliding names are broken on the file itself, so the
    // surviving duplicate does not depend on input order.
    units.sort_by(|(a_key, a), (b_key, b)| {
        a_key
            .cmp(b_key)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.contents.cmp(&b.contents))
    });

    let mut parsed = ParsedCircuit::default();
    let mut modules: BTreeMap<String, Module> = BTreeMap::new();
    let mut previous: Option<&str> = None;
    let mut next_file = 0u32;
    for (name, file) in &units {
        if previous == Some(name.as_str()) {
            parsed.errors.push(SyntaxError::message_in_file(
                format!("duplicate source file '{name}'"),
                name.as_str(),
            ));
            continue;
        }
        previous = Some(name.as_str());

        let id = FileId(next_file);
        next_file += 1;
        let fragment = parse_source_file(file, id);
        if !fragment.errors.is_empty() {
            parsed.errors.extend(fragment.errors);
            continue;
        }
        parsed
            .circuit
            .declarations
            .extend(fragment.circuit.declarations);
        for module in fragment.circuit.modules {
            debug!(module = %module.name, file = %name, "merging module fragment");
            modules
                .entry(module.name.clone())
                .or_insert_with(|| Module::new(module.name.as_str()))
                .declarations
                .extend(module.declarations);
        }
        parsed.source_map.join(fragment.source_map);
    }
    parsed.circuit.modules = modules.into_values().collect();
    parsed
}
