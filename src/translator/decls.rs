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

//! Declaration dispatcher.
//!
//! A top-level list is matched on its keyword and term count. A list that
//! matches no known form, including a known keyword with the wrong number of
//! terms, is a single "malformed declaration" error.

use super::columns::ColumnRole;
use super::rules::collect_errors;
use super::{
    Errors, Origin, Translator, is_identifier, names::is_function_identifier, parse_integer,
    parse_qualified_name, parse_type,
};
use crate::ast::{
    ConstantBinding, Decl, DeclKind, DefAlias, DefAliases, DefComputed, DefComputedColumn,
    DefConst, DefConstraint, DefFun, DefInRange, DefInterleaved, DefLookup, DefPermutation,
    DefPerspective, DefProperty, Expr, FunctionBinding, InterleaveSource, LocalBinding, Path,
    PermutationSource, SortDirection, Symbol, SymbolKind, Type,
};
use crate::diagnostics::SyntaxError;
use crate::field::FieldElement;
use crate::reader::Term;
use tracing::trace;

/// Number of terms (keyword included) a form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

/// Every declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclForm {
    Alias,
    FunAlias,
    Columns,
    Const,
    Constraint,
    Computed,
    ComputedColumn,
    Interleaved,
    Lookup,
    Permutation,
    Perspective,
    Property,
    Fun,
    PureFun,
    InRange,
}

impl DeclForm {
    fn from_keyword(keyword: &str) -> Option<Self> {
        let form = match keyword {
            "defalias" => DeclForm::Alias,
            "defunalias" => DeclForm::FunAlias,
            "defcolumns" => DeclForm::Columns,
            "defconst" => DeclForm::Const,
            "defconstraint" => DeclForm::Constraint,
            "defcomputed" => DeclForm::Computed,
            "defcomputedcolumn" => DeclForm::ComputedColumn,
            "definterleaved" => DeclForm::Interleaved,
            "deflookup" => DeclForm::Lookup,
            "defpermutation" => DeclForm::Permutation,
            "defperspective" => DeclForm::Perspective,
            "defproperty" => DeclForm::Property,
            "defun" => DeclForm::Fun,
            "defpurefun" => DeclForm::PureFun,
            "definrange" => DeclForm::InRange,
            _ => return None,
        };
        Some(form)
    }

    fn arity(self) -> Arity {
        match self {
            DeclForm::Alias | DeclForm::FunAlias | DeclForm::Columns => Arity::AtLeast(1),
            DeclForm::Const => Arity::AtLeast(3),
            DeclForm::Constraint | DeclForm::Lookup | DeclForm::Perspective => Arity::Exactly(4),
            DeclForm::Computed
            | DeclForm::ComputedColumn
            | DeclForm::Interleaved
            | DeclForm::Permutation
            | DeclForm::Property
            | DeclForm::Fun
            | DeclForm::PureFun
            | DeclForm::InRange => Arity::Exactly(3),
        }
    }

    fn accepts(self, len: usize) -> bool {
        match self.arity() {
            Arity::Exactly(n) => len == n,
            Arity::AtLeast(n) => len >= n,
        }
    }
}

/// Splits a slice known to have `N` elements.
fn split_args<const N: usize>(args: &[Term]) -> Option<&[Term; N]> {
    args.try_into().ok()
}

/// Merges two independently parsed parts.
fn both<A, B>(a: Result<A, Errors>, b: Result<B, Errors>) -> Result<(A, B), Errors> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (a, b) => Err(collect_errors([a.err(), b.err()])),
    }
}

/// Merges three independently parsed parts.
fn all3<A, B, C>(
    a: Result<A, Errors>,
    b: Result<B, Errors>,
    c: Result<C, Errors>,
) -> Result<(A, B, C), Errors> {
    match (a, b, c) {
        (Ok(a), Ok(b), Ok(c)) => Ok((a, b, c)),
        (a, b, c) => Err(collect_errors([a.err(), b.err(), c.err()])),
    }
}

impl Translator<'_> {
    /// Parses one top-level list into a declaration.
    pub(super) fn parse_declaration(
        &mut self,
        context: &Path,
        term: &Term,
    ) -> Result<Decl, Errors> {
        let items = term.as_list().unwrap_or_default();
        let form = term
            .head_symbol()
            .and_then(DeclForm::from_keyword)
            .filter(|form| form.accepts(items.len()));
        let Some(form) = form else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        trace!(
            file = %self.doc.name,
            ?form,
            line = term.span.line,
            "dispatching declaration"
        );
        let args = &items[1..];
        let kind = match form {
            DeclForm::Alias => self
                .parse_def_aliases(context, term, args, false)
                .map(DeclKind::Aliases),
            DeclForm::FunAlias => self
                .parse_def_aliases(context, term, args, true)
                .map(DeclKind::Aliases),
            DeclForm::Columns => self.parse_def_columns(context, args).map(DeclKind::Columns),
            DeclForm::Const => self
                .parse_def_const(context, term, args)
                .map(DeclKind::Const),
            DeclForm::Constraint => self
                .parse_def_constraint(term, args)
                .map(DeclKind::Constraint),
            DeclForm::Computed => self
                .parse_def_computed(context, term, args)
                .map(DeclKind::Computed),
            DeclForm::ComputedColumn => self
                .parse_def_computed_column(context, term, args)
                .map(DeclKind::ComputedColumn),
            DeclForm::Interleaved => self
                .parse_def_interleaved(context, term, args)
                .map(DeclKind::Interleaved),
            DeclForm::Lookup => self.parse_def_lookup(term, args).map(DeclKind::Lookup),
            DeclForm::Permutation => self
                .parse_def_permutation(context, term, args)
                .map(DeclKind::Permutation),
            DeclForm::Perspective => self
                .parse_def_perspective(context, term, args)
                .map(DeclKind::Perspective),
            DeclForm::Property => self.parse_def_property(term, args).map(DeclKind::Property),
            DeclForm::Fun => self
                .parse_def_fun(context, term, args, false)
                .map(DeclKind::Fun),
            DeclForm::PureFun => self
                .parse_def_fun(context, term, args, true)
                .map(DeclKind::Fun),
            DeclForm::InRange => self.parse_def_in_range(term, args).map(DeclKind::InRange),
        }?;
        let id = self.register(&term.span, Origin::Declaration);
        Ok(Decl::new(id, kind))
    }

    fn handle(&self, term: &Term, what: &str) -> Result<String, Errors> {
        self.identifier(term, what).map_err(|err| vec![err])
    }

    /// Parses a (possibly qualified) column reference.
    fn column_symbol(&mut self, term: &Term) -> Result<Symbol, Errors> {
        let Some(name) = term.as_symbol() else {
            return Err(self.errors_at(term, "invalid column name"));
        };
        let path = parse_qualified_name(name, false).map_err(|m| self.errors_at(term, m))?;
        Ok(self.symbol(term, SymbolKind::Column, path, Origin::Declaration))
    }

    /// `(defalias a b ...)` / `(defunalias f g ...)`
    fn parse_def_aliases(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
        functions: bool,
    ) -> Result<DefAliases, Errors> {
        if args.len() % 2 != 0 {
            return Err(self.errors_at(term, "odd number of arguments"));
        }
        let mut aliases = Vec::with_capacity(args.len() / 2);
        let mut errors = Vec::new();
        for pair in args.chunks_exact(2) {
            let [alias, target] = pair else {
                continue;
            };
            let (Some(name), Some(target_name)) = (alias.as_symbol(), target.as_symbol()) else {
                errors.push(self.error_at(alias, "invalid alias definition"));
                continue;
            };
            let valid = if functions {
                is_function_identifier(name)
            } else {
                is_identifier(name)
            };
            if !valid {
                errors.push(self.error_at(alias, format!("invalid alias name '{name}'")));
                continue;
            }
            let path = match parse_qualified_name(target_name, functions) {
                Ok(path) => path,
                Err(message) => {
                    errors.push(self.error_at(target, message));
                    continue;
                }
            };
            let kind = if functions {
                SymbolKind::FunctionInvocation
            } else {
                SymbolKind::Column
            };
            let target = self.symbol(target, kind, path, Origin::Declaration);
            aliases.push(DefAlias {
                name: name.to_string(),
                path: context.extend(name),
                target,
            });
        }
        if errors.is_empty() {
            Ok(DefAliases { functions, aliases })
        } else {
            Err(errors)
        }
    }

    /// `(defconst NAME expr ...)`, where `NAME` may be `(NAME :type)`.
    fn parse_def_const(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
    ) -> Result<DefConst, Errors> {
        if args.len() % 2 != 0 {
            return Err(self.errors_at(term, "odd number of arguments"));
        }
        let mut constants = Vec::with_capacity(args.len() / 2);
        let mut errors = Vec::new();
        for pair in args.chunks_exact(2) {
            let [name, value] = pair else {
                continue;
            };
            let name = self.parse_constant_name(name);
            let value = self.translate(value);
            match both(name, value) {
                Ok(((name, datatype), value)) => constants.push(ConstantBinding {
                    path: context.extend(name),
                    datatype,
                    value,
                }),
                Err(errs) => errors.extend(errs),
            }
        }
        if errors.is_empty() {
            Ok(DefConst { constants })
        } else {
            Err(errors)
        }
    }

    fn parse_constant_name(&self, term: &Term) -> Result<(String, Option<Type>), Errors> {
        let Some([name, annotation]) = term.as_list() else {
            return Ok((self.handle(term, "constant name")?, None));
        };
        let name = self.handle(name, "constant name")?;
        let Some(annotation_text) = annotation.as_symbol() else {
            return Err(self.errors_at(annotation, "invalid constant type"));
        };
        match parse_type(annotation_text) {
            Ok((_, true)) => Err(self.errors_at(annotation, "constant types cannot be proven")),
            Ok((datatype, false)) => Ok((name, Some(datatype))),
            Err(message) => Err(self.errors_at(annotation, message)),
        }
    }

    /// `(defconstraint handle (attrs...) expr)`
    fn parse_def_constraint(
        &mut self,
        term: &Term,
        args: &[Term],
    ) -> Result<DefConstraint, Errors> {
        let Some([handle, attributes, body]) = split_args::<3>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let handle = self.handle(handle, "constraint handle");
        let attributes = match attributes.as_list() {
            Some(items) => self.parse_constraint_attributes(items),
            None => Err(self.errors_at(attributes, "expected list of constraint attributes")),
        };
        let body = self.translate(body);
        let (handle, (domain, guard, perspective), constraint) = all3(handle, attributes, body)?;
        Ok(DefConstraint {
            handle,
            domain,
            guard,
            perspective,
            constraint,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_constraint_attributes(
        &mut self,
        items: &[Term],
    ) -> Result<(Option<i64>, Option<Expr>, Option<Symbol>), Errors> {
        let mut domain = None;
        let mut guard = None;
        let mut perspective = None;
        let mut errors = Vec::new();
        let mut i = 0;
        while i < items.len() {
            let attr = &items[i];
            let Some(keyword) = attr.as_symbol() else {
                errors.push(self.error_at(attr, "invalid constraint attribute"));
                i += 1;
                continue;
            };
            let Some(value) = items.get(i + 1) else {
                let message = match keyword {
                    ":domain" | ":guard" | ":perspective" => {
                        format!("incomplete attribute '{keyword}'")
                    }
                    _ => format!("unknown constraint attribute '{keyword}'"),
                };
                errors.push(self.error_at(attr, message));
                break;
            };
            match keyword {
                ":domain" => match self.parse_domain(value) {
                    Ok(row) => domain = Some(row),
                    Err(err) => errors.push(err),
                },
                ":guard" => match self.translate(value) {
                    Ok(expr) => guard = Some(expr),
                    Err(errs) => errors.extend(errs),
                },
                ":perspective" => match value.as_symbol() {
                    Some(name) if is_identifier(name) => {
                        let path = Path::relative().extend(name);
                        let kind = SymbolKind::Perspective;
                        perspective = Some(self.symbol(value, kind, path, Origin::Declaration));
                    }
                    _ => errors.push(self.error_at(value, "invalid perspective name")),
                },
                _ => {
                    let message = format!("unknown constraint attribute '{keyword}'");
                    errors.push(self.error_at(attr, message));
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }
        if errors.is_empty() {
            Ok((domain, guard, perspective))
        } else {
            Err(errors)
        }
    }

    /// Parses `{n}`; domains of more than one row are rejected.
    fn parse_domain(&self, term: &Term) -> Result<i64, SyntaxError> {
        match term.as_set() {
            Some([row]) => row
                .as_symbol()
                .and_then(parse_integer::<i64>)
                .ok_or_else(|| self.error_at(row, "invalid domain row")),
            Some([]) => Err(self.error_at(term, "empty domain")),
            Some(_) => Err(self.error_at(term, "multiple-row domains are not supported")),
            None => Err(self.error_at(term, "invalid domain, expected {row}")),
        }
    }

    /// `(defcomputed (targets...) (function sources...))`
    fn parse_def_computed(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
    ) -> Result<DefComputed, Errors> {
        let Some([targets, call]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let Some(targets) = targets.as_list() else {
            return Err(self.errors_at(targets, "expected list of target columns"));
        };
        let Some([function, sources @ ..]) = call.as_list() else {
            return Err(self.errors_at(call, "expected function application"));
        };
        let targets =
            self.parse_column_declarations(context, context, targets, ColumnRole::Computed);
        let function = match function.as_symbol() {
            Some(name) => match parse_qualified_name(name, true) {
                Ok(path) => Ok(self.symbol(
                    function,
                    SymbolKind::FunctionInvocation,
                    path,
                    Origin::Declaration,
                )),
                Err(message) => Err(self.errors_at(function, message)),
            },
            None => Err(self.errors_at(function, "invalid function name")),
        };
        let sources = self.column_symbols(sources);
        let (targets, function, sources) = all3(targets, function, sources)?;
        Ok(DefComputed {
            targets,
            function,
            sources,
        })
    }

    fn column_symbols(&mut self, terms: &[Term]) -> Result<Vec<Symbol>, Errors> {
        let mut symbols = Vec::with_capacity(terms.len());
        let mut errors = Vec::new();
        for term in terms {
            match self.column_symbol(term) {
                Ok(symbol) => symbols.push(symbol),
                Err(errs) => errors.extend(errs),
            }
        }
        if errors.is_empty() {
            Ok(symbols)
        } else {
            Err(errors)
        }
    }

    /// `(defcomputedcolumn (name attrs...) expr)`
    fn parse_def_computed_column(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
    ) -> Result<DefComputedColumn, Errors> {
        let Some([target, computation]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let target = self.parse_column_declaration(context, context, target, ColumnRole::Computed);
        let computation = self.translate(computation);
        let (target, computation) = both(target, computation)?;
        Ok(DefComputedColumn {
            target,
            computation,
        })
    }

    /// `(definterleaved target (sources...))`
    fn parse_def_interleaved(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
    ) -> Result<DefInterleaved, Errors> {
        let Some([target, sources]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let Some(sources) = sources.as_list() else {
            return Err(self.errors_at(sources, "expected list of source columns"));
        };
        let target = self.parse_column_declaration(context, context, target, ColumnRole::Computed);
        let mut parsed = Vec::with_capacity(sources.len());
        let mut errors = Vec::new();
        for source in sources {
            match self.parse_interleave_source(source) {
                Ok(source) => parsed.push(source),
                Err(errs) => errors.extend(errs),
            }
        }
        let sources = if errors.is_empty() { Ok(parsed) } else { Err(errors) };
        let (target, sources) = both(target, sources)?;
        Ok(DefInterleaved { target, sources })
    }

    /// `X` or `[X i]`.
    fn parse_interleave_source(&mut self, term: &Term) -> Result<InterleaveSource, Errors> {
        if term.as_symbol().is_some() {
            let column = self.column_symbol(term)?;
            return Ok(InterleaveSource {
                column,
                index: None,
            });
        }
        let Some([name, index]) = term.as_array() else {
            return Err(self.errors_at(term, "invalid interleaved source"));
        };
        let Some(index) = index.as_symbol().and_then(parse_integer::<usize>) else {
            return Err(self.errors_at(index, "invalid array index"));
        };
        let column = self.column_symbol(name)?;
        Ok(InterleaveSource {
            column,
            index: Some(index),
        })
    }

    /// `(deflookup handle (targets...) (sources...))`
    fn parse_def_lookup(&mut self, term: &Term, args: &[Term]) -> Result<DefLookup, Errors> {
        let Some([handle, targets, sources]) = split_args::<3>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let Some(target_terms) = targets.as_list() else {
            return Err(self.errors_at(targets, "expected list of target columns"));
        };
        let Some(source_terms) = sources.as_list() else {
            return Err(self.errors_at(sources, "expected list of source columns"));
        };
        if target_terms.len() != source_terms.len() {
            return Err(self.errors_at(
                term,
                format!(
                    "mismatched number of target ({}) and source ({}) columns",
                    target_terms.len(),
                    source_terms.len()
                ),
            ));
        }
        let handle = self.handle(handle, "lookup handle");
        let targets = self.translate_all(target_terms);
        let sources = self.translate_all(source_terms);
        let (handle, targets, sources) = all3(handle, targets, sources)?;
        Ok(DefLookup {
            handle,
            targets,
            sources,
        })
    }

    /// `(defpermutation (targets...) (sources...))`
    fn parse_def_permutation(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
    ) -> Result<DefPermutation, Errors> {
        let Some([targets, sources]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let Some(target_terms) = targets.as_list() else {
            return Err(self.errors_at(targets, "expected list of target columns"));
        };
        let Some(source_terms) = sources.as_list() else {
            return Err(self.errors_at(sources, "expected list of source columns"));
        };
        if target_terms.len() != source_terms.len() {
            return Err(self.errors_at(
                term,
                format!(
                    "mismatched number of target ({}) and source ({}) columns",
                    target_terms.len(),
                    source_terms.len()
                ),
            ));
        }
        let targets =
            self.parse_column_declarations(context, context, target_terms, ColumnRole::Computed);
        let mut parsed = Vec::with_capacity(source_terms.len());
        let mut errors = Vec::new();
        for (index, source) in source_terms.iter().enumerate() {
            match self.parse_permutation_source(index, source) {
                Ok(source) => parsed.push(source),
                Err(errs) => errors.extend(errs),
            }
        }
        let sources = if errors.is_empty() { Ok(parsed) } else { Err(errors) };
        let (targets, sources) = both(targets, sources)?;
        Ok(DefPermutation { targets, sources })
    }

    /// `(+ X)`, `(- X)`, or a bare `X` in first position.
    fn parse_permutation_source(
        &mut self,
        index: usize,
        term: &Term,
    ) -> Result<PermutationSource, Errors> {
        if term.as_symbol().is_some() {
            if index > 0 {
                return Err(self.errors_at(term, "missing sort direction"));
            }
            let column = self.column_symbol(term)?;
            return Ok(PermutationSource {
                column,
                direction: None,
            });
        }
        let Some([sign, name]) = term.as_list() else {
            return Err(self.errors_at(term, "sorted columns must be of the form (+ X) or (- X)"));
        };
        let Some(direction) = sign.as_symbol().and_then(SortDirection::from_sign) else {
            return Err(self.errors_at(sign, "invalid sort direction"));
        };
        let column = self.column_symbol(name)?;
        Ok(PermutationSource {
            column,
            direction: Some(direction),
        })
    }

    /// `(defperspective name selector (columns...))`
    fn parse_def_perspective(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
    ) -> Result<DefPerspective, Errors> {
        let Some([name, selector, columns]) = split_args::<3>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let Some(column_terms) = columns.as_list() else {
            return Err(self.errors_at(columns, "expected list of perspective columns"));
        };
        let name = self.handle(name, "perspective name")?;
        let path = context.extend(name.as_str());
        let selector = self.translate(selector);
        let columns =
            self.parse_column_declarations(context, &path, column_terms, ColumnRole::Input);
        let (selector, columns) = both(selector, columns)?;
        Ok(DefPerspective {
            name,
            path,
            selector,
            columns,
        })
    }

    /// `(defproperty handle expr)`
    fn parse_def_property(&mut self, term: &Term, args: &[Term]) -> Result<DefProperty, Errors> {
        let Some([handle, assertion]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let handle = self.handle(handle, "property handle");
        let assertion = self.translate(assertion);
        let (handle, assertion) = both(handle, assertion)?;
        Ok(DefProperty { handle, assertion })
    }

    /// `(defun (name params...) body)` / `(defpurefun ...)`
    fn parse_def_fun(
        &mut self,
        context: &Path,
        term: &Term,
        args: &[Term],
        pure: bool,
    ) -> Result<DefFun, Errors> {
        let Some([signature, body]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let Some([name_term, param_terms @ ..]) = signature.as_list() else {
            return Err(self.errors_at(signature, "invalid function signature"));
        };
        let head = self.parse_function_name(name_term);
        let mut params = Vec::with_capacity(param_terms.len());
        let mut errors = Vec::new();
        for param in param_terms {
            match self.parse_function_parameter(param) {
                Ok(param) => params.push(param),
                Err(err) => errors.push(err),
            }
        }
        let params = if errors.is_empty() { Ok(params) } else { Err(errors) };
        let body = self.translate(body);
        let ((name, returns, forced), params, body) = all3(head, params, body)?;
        Ok(DefFun {
            binding: FunctionBinding {
                path: context.extend(name.as_str()),
                pure,
                params,
                returns,
                forced,
            },
            name,
            body,
        })
    }

    /// Parses `name` or `(name type? :force?)`.
    fn parse_function_name(&self, term: &Term) -> Result<(String, Option<Type>, bool), Errors> {
        if let Some(name) = term.as_symbol() {
            if !is_function_identifier(name) {
                return Err(self.errors_at(term, format!("invalid function name '{name}'")));
            }
            return Ok((name.to_string(), None, false));
        }
        let Some([name, modifiers @ ..]) = term.as_list() else {
            return Err(self.errors_at(term, "invalid function name"));
        };
        let name = match name.as_symbol() {
            Some(name) if is_function_identifier(name) => name.to_string(),
            _ => return Err(self.errors_at(name, "invalid function name")),
        };
        if modifiers.is_empty() || modifiers.len() > 2 {
            return Err(self.errors_at(term, "invalid function name"));
        }
        let mut returns = None;
        let mut forced = false;
        let mut errors = Vec::new();
        for modifier in modifiers {
            match modifier.as_symbol() {
                Some(":force") => forced = true,
                Some(annotation) if returns.is_none() => match parse_type(annotation) {
                    Ok((_, true)) => {
                        errors.push(self.error_at(modifier, "return types cannot be proven"))
                    }
                    Ok((datatype, false)) => returns = Some(datatype),
                    Err(message) => errors.push(self.error_at(modifier, message)),
                },
                _ => errors.push(self.error_at(modifier, "invalid return type")),
            }
        }
        if errors.is_empty() {
            Ok((name, returns, forced))
        } else {
            Err(errors)
        }
    }

    /// Parses `name` (field typed) or `(name type)`.
    fn parse_function_parameter(&self, term: &Term) -> Result<LocalBinding, SyntaxError> {
        if let Some(name) = term.as_symbol() {
            if !is_identifier(name) {
                return Err(self.error_at(term, format!("invalid parameter name '{name}'")));
            }
            return Ok(LocalBinding::new(name, Type::field()));
        }
        let Some([name, annotation]) = term.as_list() else {
            return Err(self.error_at(term, "invalid parameter declaration"));
        };
        let name = self.identifier(name, "parameter name")?;
        let Some(annotation_text) = annotation.as_symbol() else {
            return Err(self.error_at(annotation, "invalid parameter type"));
        };
        match parse_type(annotation_text) {
            Ok((_, true)) => Err(self.error_at(annotation, "parameter types cannot be proven")),
            Ok((datatype, false)) => Ok(LocalBinding::new(name, datatype)),
            Err(message) => Err(self.error_at(annotation, message)),
        }
    }

    /// `(definrange expr bound)`
    fn parse_def_in_range(&mut self, term: &Term, args: &[Term]) -> Result<DefInRange, Errors> {
        let Some([expr, bound]) = split_args::<2>(args) else {
            return Err(self.errors_at(term, "malformed declaration"));
        };
        let expr = self.translate(expr);
        let bound = match bound.as_symbol() {
            Some(text) => {
                FieldElement::parse(text).map_err(|message| self.errors_at(bound, message))
            }
            None => Err(self.errors_at(bound, "invalid range bound")),
        };
        let (expr, bound) = both(expr, bound)?;
        Ok(DefInRange { expr, bound })
    }
}
