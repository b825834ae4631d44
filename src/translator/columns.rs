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

//! Column declarations and their attributes.

use super::{Errors, Origin, Translator, is_identifier, parse_integer, parse_interval, parse_type};
use crate::ast::{ColumnBinding, DefColumn, DefColumns, DisplayHint, Path, Type};
use crate::reader::Term;

/// Whether declared columns are inputs or produced by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ColumnRole {
    Input,
    Computed,
}

/// Attributes gathered from `(name attr...)`.
struct ColumnAttributes {
    datatype: Type,
    must_prove: bool,
    display: Option<DisplayHint>,
    padding: Option<i64>,
}

impl Translator<'_> {
    /// `(defcolumns decl...)`
    pub(super) fn parse_def_columns(
        &mut self,
        context: &Path,
        args: &[Term],
    ) -> Result<DefColumns, Errors> {
        let columns = self.parse_column_declarations(context, context, args, ColumnRole::Input)?;
        Ok(DefColumns { columns })
    }

    /// Parses every declaration in `terms`, reporting all failures.
    pub(super) fn parse_column_declarations(
        &mut self,
        context: &Path,
        scope: &Path,
        terms: &[Term],
        role: ColumnRole,
    ) -> Result<Vec<DefColumn>, Errors> {
        let mut columns = Vec::with_capacity(terms.len());
        let mut errors = Vec::new();
        for term in terms {
            match self.parse_column_declaration(context, scope, term, role) {
                Ok(column) => columns.push(column),
                Err(errs) => errors.extend(errs),
            }
        }
        if errors.is_empty() {
            Ok(columns)
        } else {
            Err(errors)
        }
    }

    /// Parses `name` or `(name attr...)` declared under `scope`.
    ///
    /// `context` is the enclosing module; `scope` additionally includes the
    /// perspective when there is one.
    pub(super) fn parse_column_declaration(
        &mut self,
        context: &Path,
        scope: &Path,
        term: &Term,
        role: ColumnRole,
    ) -> Result<DefColumn, Errors> {
        let (name_term, attributes) = match term.as_list() {
            Some([name, attrs @ ..]) => (name, attrs),
            Some([]) => return Err(self.errors_at(term, "empty column declaration")),
            None => (term, &[][..]),
        };
        let name = match name_term.as_symbol() {
            Some(name) if is_identifier(name) => name.to_string(),
            _ => return Err(self.errors_at(name_term, "invalid column name")),
        };
        let attrs = self.parse_column_attributes(attributes)?;
        let path = scope.extend(name.as_str());
        let mut binding = match role {
            ColumnRole::Input => {
                ColumnBinding::input(context.clone(), path, attrs.datatype, attrs.must_prove)
            }
            ColumnRole::Computed => {
                ColumnBinding::computed(context.clone(), path, attrs.datatype, attrs.must_prove)
            }
        };
        binding.padding = attrs.padding;
        let id = self.register(&term.span, Origin::Declaration);
        Ok(DefColumn {
            id,
            name,
            binding,
            display: attrs.display,
        })
    }

    fn parse_column_attributes(&self, attrs: &[Term]) -> Result<ColumnAttributes, Errors> {
        let mut parsed = ColumnAttributes {
            datatype: Type::field(),
            must_prove: false,
            display: None,
            padding: None,
        };
        let mut array = None;
        let mut errors = Vec::new();
        let mut i = 0;
        while i < attrs.len() {
            let attr = &attrs[i];
            let value = attrs.get(i + 1);
            let Some(keyword) = attr.as_symbol() else {
                errors.push(self.error_at(attr, "unknown column attribute"));
                i += 1;
                continue;
            };
            match (keyword, value) {
                (":display" | ":array" | ":padding", None) => {
                    errors.push(self.error_at(attr, format!("incomplete {keyword} attribute")));
                }
                (":display", Some(value)) => {
                    match value.as_symbol().and_then(DisplayHint::from_keyword) {
                        Some(hint) => parsed.display = Some(hint),
                        None => errors.push(self.error_at(value, "unknown display definition")),
                    }
                }
                (":array", Some(value)) => {
                    match Self::bracket_contents(value).map(|text| parse_interval(&text)) {
                        Some(Ok(bounds)) => array = Some(bounds),
                        Some(Err(_)) | None => {
                            errors.push(self.error_at(value, "invalid array dimension"));
                        }
                    }
                }
                (":padding", Some(value)) => {
                    match value.as_symbol().and_then(parse_integer::<i64>) {
                        Some(padding) => parsed.padding = Some(padding),
                        _ => errors.push(self.error_at(value, "invalid padding value")),
                    }
                }
                _ if keyword.starts_with(':') => {
                    match parse_type(keyword) {
                        Ok((datatype, must_prove)) => {
                            parsed.datatype = datatype;
                            parsed.must_prove = must_prove;
                        }
                        Err(message) => errors.push(self.error_at(attr, message)),
                    }
                    i += 1;
                    continue;
                }
                _ => {
                    let message = format!("unknown column attribute '{keyword}'");
                    errors.push(self.error_at(attr, message));
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some((min, max)) = array {
            parsed.datatype = Type::array(parsed.datatype, min, max);
        }
        Ok(parsed)
    }
}
