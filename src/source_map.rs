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

//! Append-only map from AST node identities to source spans.

use crate::ast::{FileId, NodeId, SourceSpan};
use std::collections::BTreeMap;

/// Maps constructed AST nodes back to the source text they were built from.
///
/// Entries are never overwritten: the first span registered for a node is
/// the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    spans: BTreeMap<NodeId, SourceSpan>,
    files: BTreeMap<FileId, String>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the name of a source file.
    pub fn register_file(&mut self, file: FileId, name: impl Into<String>) {
        self.files.entry(file).or_insert_with(|| name.into());
    }

    /// Registers `span` for `node`; returns `false` if the node already had one.
    pub fn put(&mut self, node: NodeId, span: SourceSpan) -> bool {
        if self.spans.contains_key(&node) {
            return false;
        }
        self.spans.insert(node, span);
        true
    }

    pub fn get(&self, node: NodeId) -> Option<&SourceSpan> {
        self.spans.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.spans.contains_key(&node)
    }

    /// Name of the file a node was translated from.
    pub fn file_name(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(String::as_str)
    }

    /// Looks up both the file name and span of a node.
    pub fn locate(&self, node: NodeId) -> Option<(&str, &SourceSpan)> {
        let span = self.get(node)?;
        Some((self.file_name(node.file).unwrap_or_default(), span))
    }

    /// Merges every entry of `other` into this map without overwriting.
    pub fn join(&mut self, other: SourceMap) {
        for (node, span) in other.spans {
            self.spans.entry(node).or_insert(span);
        }
        for (file, name) in other.files {
            self.files.entry(file).or_insert(name);
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Iterates entries in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SourceSpan)> {
        self.spans.iter().map(|(node, span)| (*node, span))
    }
}
