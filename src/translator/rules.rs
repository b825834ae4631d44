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

//! Expression rules.
//!
//! Each grammar form has exactly one handler, chosen by matching on closed
//! rule enums:
//! - symbol rules, tried in priority order against bare atoms (numeric
//!   literals before variable accesses);
//! - recursive list rules, which translate every argument first and then
//!   apply a constructor (`+ - * ~ ^ if shift begin debug`);
//! - structural list rules, which take the raw terms (`for let reduce`);
//! - the default list rule (function invocation) and default array rule
//!   (`[array index]`).
//!
//! A symbol rule that does not apply yields `None`; one that applies but finds
//! a malformed literal is an error, not a reason to try the next rule.

use super::{
    Errors, Origin, Translator, is_decimal, is_identifier, parse_interval, parse_qualified_name,
};
use crate::ast::{Expr, ExprKind, Path, Symbol, SymbolKind};
use crate::reader::{Term, TermKind};
use num_bigint::BigInt;
use num_traits::Num;
use std::collections::HashSet;

/// What a symbol rule recognised.
enum SymbolMatch {
    Constant(BigInt),
    Variable(Path),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolRule {
    Constant,
    VariableAccess,
}

/// Symbol rules in priority order.
const SYMBOL_RULES: [SymbolRule; 2] = [SymbolRule::Constant, SymbolRule::VariableAccess];

impl SymbolRule {
    /// Returns `None` when the rule does not claim `text`.
    fn apply(self, text: &str) -> Option<Result<SymbolMatch, String>> {
        let first = text.chars().next()?;
        match self {
            SymbolRule::Constant => {
                if let Some(hex) = text.strip_prefix("0x") {
                    let value = (!hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()))
                        .then(|| BigInt::from_str_radix(hex, 16).ok())
                        .flatten();
                    return Some(
                        value
                            .map(SymbolMatch::Constant)
                            .ok_or_else(|| format!("invalid hexadecimal constant '{text}'")),
                    );
                }
                if !(first.is_ascii_digit() || first == '-') {
                    return None;
                }
                let value = is_decimal(text)
                    .then(|| BigInt::from_str_radix(text, 10).ok())
                    .flatten();
                Some(
                    value
                        .map(SymbolMatch::Constant)
                        .ok_or_else(|| format!("invalid decimal constant '{text}'")),
                )
            }
            SymbolRule::VariableAccess => {
                if !(first.is_alphabetic() || first == '_') {
                    return None;
                }
                Some(parse_qualified_name(text, false).map(SymbolMatch::Variable))
            }
        }
    }
}

/// Forms whose arguments are all translated before construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecursiveForm {
    Add,
    Sub,
    Mul,
    Normalise,
    Exp,
    If,
    Shift,
    Begin,
    Debug,
}

/// Forms that parse their own raw terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StructuralForm {
    For,
    Let,
    Reduce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListRule {
    Recursive(RecursiveForm),
    Structural(StructuralForm),
}

impl ListRule {
    fn lookup(head: &str) -> Option<Self> {
        let rule = match head {
            "+" => ListRule::Recursive(RecursiveForm::Add),
            "-" => ListRule::Recursive(RecursiveForm::Sub),
            "*" => ListRule::Recursive(RecursiveForm::Mul),
            "~" => ListRule::Recursive(RecursiveForm::Normalise),
            "^" => ListRule::Recursive(RecursiveForm::Exp),
            "if" => ListRule::Recursive(RecursiveForm::If),
            "shift" => ListRule::Recursive(RecursiveForm::Shift),
            "begin" => ListRule::Recursive(RecursiveForm::Begin),
            "debug" => ListRule::Recursive(RecursiveForm::Debug),
            "for" => ListRule::Structural(StructuralForm::For),
            "let" => ListRule::Structural(StructuralForm::Let),
            "reduce" => ListRule::Structural(StructuralForm::Reduce),
            _ => return None,
        };
        Some(rule)
    }
}

/// Takes exactly `N` arguments.
fn exactly<const N: usize>(args: Vec<Expr>) -> Result<[Expr; N], String> {
    let found = args.len();
    args.try_into()
        .map_err(|_| format!("incorrect number of arguments (expected {N}, found {found})"))
}

impl RecursiveForm {
    /// Builds the node from already translated arguments.
    fn construct(self, args: Vec<Expr>) -> Result<ExprKind, String> {
        Ok(match self {
            RecursiveForm::Add => ExprKind::Add(args),
            RecursiveForm::Sub => ExprKind::Sub(args),
            RecursiveForm::Mul => ExprKind::Mul(args),
            RecursiveForm::Begin => ExprKind::Sequence(args),
            RecursiveForm::Normalise => {
                let [arg] = exactly::<1>(args)?;
                ExprKind::Normalise(Box::new(arg))
            }
            RecursiveForm::Debug => {
                let [arg] = exactly::<1>(args)?;
                ExprKind::Debug(Box::new(arg))
            }
            RecursiveForm::Exp => {
                let [base, power] = exactly::<2>(args)?;
                ExprKind::Exp {
                    base: Box::new(base),
                    power: Box::new(power),
                }
            }
            RecursiveForm::Shift => {
                let [arg, shift] = exactly::<2>(args)?;
                ExprKind::Shift {
                    arg: Box::new(arg),
                    shift: Box::new(shift),
                }
            }
            RecursiveForm::If => {
                let found = args.len();
                let (condition, then, otherwise) = match <[Expr; 3]>::try_from(args) {
                    Ok([condition, then, otherwise]) => (condition, then, Some(otherwise)),
                    Err(args) => {
                        let [condition, then] = exactly::<2>(args).map_err(|_| {
                            format!(
                                "incorrect number of arguments (expected 2 or 3, found {found})"
                            )
                        })?;
                        (condition, then, None)
                    }
                };
                ExprKind::If {
                    condition: Box::new(condition),
                    then: Box::new(then),
                    otherwise: otherwise.map(Box::new),
                }
            }
        })
    }
}

impl Translator<'_> {
    fn expr(&mut self, term: &Term, kind: ExprKind) -> Expr {
        let id = self.register(&term.span, Origin::Expression);
        Expr::new(id, kind)
    }

    /// Translates one term into an expression.
    pub(super) fn translate(&mut self, term: &Term) -> Result<Expr, Errors> {
        match &term.kind {
            TermKind::Symbol(text) => self.translate_symbol(term, text),
            TermKind::List(items) => self.translate_list(term, items),
            TermKind::Array(items) => self.translate_array_access(term, items),
            TermKind::Set(_) => Err(self.errors_at(term, "unexpected set in expression")),
        }
    }

    /// Translates every term, reporting the errors of all of them.
    pub(super) fn translate_all(&mut self, terms: &[Term]) -> Result<Vec<Expr>, Errors> {
        let mut exprs = Vec::with_capacity(terms.len());
        let mut errors = Vec::new();
        for term in terms {
            match self.translate(term) {
                Ok(expr) => exprs.push(expr),
                Err(errs) => errors.extend(errs),
            }
        }
        if errors.is_empty() {
            Ok(exprs)
        } else {
            Err(errors)
        }
    }

    fn translate_symbol(&mut self, term: &Term, text: &str) -> Result<Expr, Errors> {
        for rule in SYMBOL_RULES {
            let Some(result) = rule.apply(text) else {
                continue;
            };
            let kind = match result.map_err(|message| self.errors_at(term, message))? {
                SymbolMatch::Constant(value) => ExprKind::Constant(value),
                SymbolMatch::Variable(path) => ExprKind::VariableAccess(self.symbol(
                    term,
                    SymbolKind::VariableAccess,
                    path,
                    Origin::Expression,
                )),
            };
            return Ok(self.expr(term, kind));
        }
        Err(self.errors_at(term, format!("unknown symbol '{text}'")))
    }

    fn translate_list(&mut self, term: &Term, items: &[Term]) -> Result<Expr, Errors> {
        let Some((head, args)) = items.split_first() else {
            return Err(self.errors_at(term, "empty list in expression"));
        };
        match head.as_symbol().and_then(ListRule::lookup) {
            Some(ListRule::Recursive(form)) => {
                let args = self.translate_all(args)?;
                let kind = form
                    .construct(args)
                    .map_err(|message| self.errors_at(term, message))?;
                Ok(self.expr(term, kind))
            }
            Some(ListRule::Structural(StructuralForm::For)) => self.translate_for(term, args),
            Some(ListRule::Structural(StructuralForm::Let)) => self.translate_let(term, args),
            Some(ListRule::Structural(StructuralForm::Reduce)) => {
                self.translate_reduce(term, args)
            }
            None => self.translate_invocation(term, head, args),
        }
    }

    /// Resolves a callee term into a function reference.
    fn function_symbol(&mut self, term: &Term) -> Result<Symbol, Errors> {
        let Some(name) = term.as_symbol() else {
            return Err(self.errors_at(term, "invalid function name"));
        };
        let path = parse_qualified_name(name, true).map_err(|m| self.errors_at(term, m))?;
        Ok(self.symbol(term, SymbolKind::FunctionInvocation, path, Origin::Expression))
    }

    /// Default list rule: `(f args...)`.
    fn translate_invocation(
        &mut self,
        term: &Term,
        head: &Term,
        args: &[Term],
    ) -> Result<Expr, Errors> {
        let function = self.function_symbol(head);
        let args = self.translate_all(args);
        match (function, args) {
            (Ok(function), Ok(args)) => Ok(self.expr(term, ExprKind::Invoke { function, args })),
            (function, args) => Err(collect_errors([function.err(), args.err()])),
        }
    }

    /// Default array rule: `[array index]`.
    fn translate_array_access(&mut self, term: &Term, items: &[Term]) -> Result<Expr, Errors> {
        let [array, index] = items else {
            return Err(self.errors_at(term, "invalid array access"));
        };
        let Some(name) = array.as_symbol() else {
            return Err(self.errors_at(array, "invalid array name"));
        };
        let path = parse_qualified_name(name, false).map_err(|m| self.errors_at(array, m))?;
        let index = self.translate(index)?;
        let array = self.symbol(array, SymbolKind::ArrayAccess, path, Origin::Expression);
        Ok(self.expr(
            term,
            ExprKind::ArrayAccess {
                array,
                index: Box::new(index),
            },
        ))
    }

    /// `(for i [start:end] body)`
    fn translate_for(&mut self, term: &Term, args: &[Term]) -> Result<Expr, Errors> {
        let [index, interval, body] = args else {
            return Err(self.errors_at(term, "expected 3 arguments to 'for'"));
        };
        let mut errors = Vec::new();
        let index = match index.as_symbol() {
            Some(name) if is_identifier(name) => Some(name.to_string()),
            _ => {
                errors.push(self.error_at(index, "invalid index variable"));
                None
            }
        };
        let bounds = match Self::bracket_contents(interval) {
            Some(text) => match parse_interval(&text) {
                Ok(bounds) => Some(bounds),
                Err(message) => {
                    errors.push(self.error_at(interval, message));
                    None
                }
            },
            None => {
                errors.push(self.error_at(interval, "expected interval such as [1:4]"));
                None
            }
        };
        let body = match self.translate(body) {
            Ok(body) => Some(body),
            Err(errs) => {
                errors.extend(errs);
                None
            }
        };
        match (index, bounds, body) {
            (Some(index), Some((start, end)), Some(body)) if errors.is_empty() => Ok(self.expr(
                term,
                ExprKind::For {
                    index,
                    start,
                    end,
                    body: Box::new(body),
                },
            )),
            _ => Err(errors),
        }
    }

    /// `(let ((name expr)...) body)`
    fn translate_let(&mut self, term: &Term, args: &[Term]) -> Result<Expr, Errors> {
        let [bindings, body] = args else {
            return Err(self.errors_at(term, "expected 2 arguments to 'let'"));
        };
        let Some(pairs) = bindings.as_list() else {
            return Err(self.errors_at(bindings, "expected list of bindings"));
        };
        let mut errors = Vec::new();
        let mut names = HashSet::new();
        let mut translated = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let Some([name, value]) = pair.as_list() else {
                errors.push(self.error_at(pair, "invalid let binding"));
                continue;
            };
            let name = match name.as_symbol() {
                Some(text) if !is_identifier(text) => {
                    errors.push(self.error_at(name, format!("invalid variable name '{text}'")));
                    None
                }
                Some(text) if !names.insert(text.to_string()) => {
                    errors.push(self.error_at(name, format!("name '{text}' already defined")));
                    None
                }
                Some(text) => Some(text.to_string()),
                None => {
                    errors.push(self.error_at(name, "invalid variable name"));
                    None
                }
            };
            match (name, self.translate(value)) {
                (Some(name), Ok(value)) => translated.push((name, value)),
                (_, Ok(_)) => {}
                (_, Err(errs)) => errors.extend(errs),
            }
        }
        let body = self.translate(body);
        match body {
            Ok(body) if errors.is_empty() => Ok(self.expr(
                term,
                ExprKind::Let {
                    bindings: translated,
                    body: Box::new(body),
                },
            )),
            Ok(_) => Err(errors),
            Err(errs) => {
                errors.extend(errs);
                Err(errors)
            }
        }
    }

    /// `(reduce f body)`
    fn translate_reduce(&mut self, term: &Term, args: &[Term]) -> Result<Expr, Errors> {
        let [function, body] = args else {
            return Err(self.errors_at(term, "expected 2 arguments to 'reduce'"));
        };
        let function = self.function_symbol(function);
        let body = self.translate(body);
        match (function, body) {
            (Ok(function), Ok(body)) => Ok(self.expr(
                term,
                ExprKind::Reduce {
                    function,
                    body: Box::new(body),
                },
            )),
            (function, body) => Err(collect_errors([function.err(), body.err()])),
        }
    }
}

/// Flattens the error lists of independently parsed parts.
pub(super) fn collect_errors<const N: usize>(parts: [Option<Errors>; N]) -> Errors {
    parts.into_iter().flatten().flatten().collect()
}
