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

//! Crate unit tests.

use super::*;
use crate::ast::{DisplayHint, SortDirection};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> (Circuit, SourceMap) {
    match parse_source("test.lisp", source) {
        Ok(parsed) => parsed,
        Err(err) => panic!("source should parse:\n{err}"),
    }
}

fn parse_errors(source: &str) -> Vec<SyntaxError> {
    match parse_source("test.lisp", source) {
        Ok(_) => panic!("source should not parse"),
        Err(err) => err.syntax_errors().to_vec(),
    }
}

fn only_error(source: &str) -> SyntaxError {
    let mut errors = parse_errors(source);
    assert_eq!(errors.len(), 1, "expected a single error, got {errors:?}");
    errors.remove(0)
}

fn first_caret_column(pointer: &str) -> Option<usize> {
    pointer.chars().position(|ch| ch == '^').map(|idx| idx + 1)
}

fn files(sources: &[(&str, &str)]) -> Vec<SourceFile> {
    sources
        .iter()
        .map(|(name, contents)| SourceFile::new(*name, *contents))
        .collect()
}

fn no_stdlib() -> Options {
    Options::new().stdlib(false)
}

fn single_constraint(source: &str) -> ast::DefConstraint {
    let (circuit, _) = parse(source);
    match circuit.declarations.into_iter().next().map(|d| d.kind) {
        Some(DeclKind::Constraint(constraint)) => constraint,
        other => panic!("expected a constraint, got {other:?}"),
    }
}

fn columns_of(decl: &Decl) -> &[ast::DefColumn] {
    match &decl.kind {
        DeclKind::Columns(d) => &d.columns,
        DeclKind::Perspective(d) => &d.columns,
        other => panic!("expected columns, got {other:?}"),
    }
}

fn module_names(circuit: &Circuit) -> Vec<&str> {
    circuit.modules.iter().map(|m| m.name.as_str()).collect()
}

fn column_names(decls: &[Decl]) -> Vec<String> {
    decls
        .iter()
        .flat_map(|d| d.definitions())
        .map(ToString::to_string)
        .collect()
}

#[test]
fn column_declarations_and_attributes() {
    let (circuit, _) = parse(
        "(defcolumns X (Y :i16) (Z :binary@prove) (W :byte :array [4])\n\
         (V :i8 :array [2:5] :display :hex :padding 3))",
    );
    assert_eq!(circuit.declarations.len(), 1);
    let columns = columns_of(&circuit.declarations[0]);
    let types: Vec<String> = columns
        .iter()
        .map(|c| c.binding.datatype.to_string())
        .collect();
    assert_eq!(types, ["𝔽", "u16", "u1", "(u8)[1:4]", "(u8)[2:5]"]);

    assert_eq!(columns[0].binding.path, Path::from_segments(true, ["X"]));
    assert!(columns[2].binding.must_prove);
    assert!(!columns[1].binding.must_prove);
    assert!(columns.iter().all(|c| !c.binding.computed && c.binding.multiplier == 1));
    assert_eq!(columns[4].display, Some(DisplayHint::Hex));
    assert_eq!(columns[4].binding.padding, Some(3));
}

#[test]
fn type_modifiers_compose_on_columns() {
    let (circuit, _) = parse("(defcolumns (A :i16@loob@prove) (B :@bool) (C :i4@loob@bool))");
    let columns = columns_of(&circuit.declarations[0]);
    assert_eq!(
        columns[0].binding.datatype,
        Type::uint(16).with_semantics(Semantics::Loobean)
    );
    assert!(columns[0].binding.must_prove);
    assert_eq!(
        columns[1].binding.datatype,
        Type::field().with_semantics(Semantics::Boolean)
    );
    // Conflicting semantics: the last modifier wins.
    assert_eq!(columns[2].binding.datatype.semantics(), Semantics::Boolean);
}

#[test]
fn column_errors_are_aggregated() {
    let errors = parse_errors("(defcolumns 1x (Y :u8) (Z :i8 :foo) OK)");
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "invalid column name",
            "unknown type ':u8'",
            "unknown type ':foo'"
        ]
    );
}

#[test]
fn errors_are_collected_across_declarations() {
    let errors = parse_errors(
        "(defcolumns (A :i8 :array))\n(defconstraint c () (shift A))\n(defwidget x)",
    );
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "incomplete :array attribute",
            "incorrect number of arguments (expected 2, found 1)",
            "malformed declaration"
        ]
    );
    assert_eq!(errors.iter().map(SyntaxError::line).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn constraint_arity_mismatch_is_one_generic_error() {
    let err = only_error("(defconstraint c (- X Y))");
    assert_eq!(err.message, "malformed declaration");
    assert_eq!((err.line(), err.column()), (1, 1));

    let err = only_error("(defproperty p X Y)");
    assert_eq!(err.message, "malformed declaration");

    let err = only_error("X");
    assert_eq!(err.message, "unexpected or malformed declaration");
}

#[test]
fn constraint_attributes() {
    let constraint =
        single_constraint("(defconstraint c (:domain {-1} :guard G :perspective p) X)");
    assert_eq!(constraint.handle, "c");
    assert_eq!(constraint.domain, Some(-1));
    assert_eq!(constraint.guard.map(|g| g.to_string()), Some("G".to_string()));
    let perspective = constraint.perspective.expect("perspective");
    assert_eq!(perspective.kind, SymbolKind::Perspective);
    assert_eq!(perspective.name(), "p");
    assert_eq!(constraint.constraint.to_string(), "X");
}

#[test]
fn multi_row_domains_are_rejected() {
    let err = only_error("(defconstraint c (:domain {0 1}) X)");
    assert!(err.message.contains("multiple-row"), "{}", err.message);

    let err = only_error("(defconstraint c (:domain) X)");
    assert_eq!(err.message, "incomplete attribute ':domain'");
}

#[test]
fn expressions_render_in_lisp_form() {
    let constraint = single_constraint(
        "(defconstraint c () (begin (if (~ X) (* X 0x10) (^ Y 2)) (shift Z -1) [ARR 3] (vanishes! (debug W))))",
    );
    assert_eq!(
        constraint.constraint.to_string(),
        "(begin (if (~ X) (* X 16) (^ Y 2)) (shift Z -1) [ARR 3] (vanishes! (debug W)))"
    );
}

#[test]
fn recursive_forms_check_argument_counts() {
    let err = only_error("(defconstraint c () (if X))");
    assert_eq!(err.message, "incorrect number of arguments (expected 2 or 3, found 1)");
    let err = only_error("(defconstraint c () (~ X Y))");
    assert_eq!(err.message, "incorrect number of arguments (expected 1, found 2)");
    let err = only_error("(defconstraint c () ())");
    assert_eq!(err.message, "empty list in expression");
    let err = only_error("(defconstraint c () {X})");
    assert_eq!(err.message, "unexpected set in expression");
}

#[test]
fn malformed_constants_are_hard_errors() {
    for literal in ["0xZZ", "0x", "0x-5", "0x1_0"] {
        let err = only_error(&format!("(defconstraint c () (+ X {literal}))"));
        assert_eq!(err.message, format!("invalid hexadecimal constant '{literal}'"));
    }
    for literal in ["12a", "1_000", "-", "-x", "3-"] {
        let err = only_error(&format!("(defconstraint c () (+ X {literal}))"));
        assert_eq!(err.message, format!("invalid decimal constant '{literal}'"));
    }
    let constraint = single_constraint("(defconstraint c () (+ 0xAb -12 007))");
    assert_eq!(constraint.constraint.to_string(), "(+ 171 -12 7)");
}

#[test]
fn integer_attributes_reject_signs_and_separators() {
    let err = only_error("(definrange X 1_0)");
    assert_eq!(err.message, "invalid field element '1_0'");
    let err = only_error("(definrange X +7)");
    assert_eq!(err.message, "invalid field element '+7'");
    let err = only_error("(defconstraint c () (for i [+3:7] X))");
    assert_eq!(err.message, "invalid interval '[+3:7]'");
    let err = only_error("(defcolumns (A :padding +3))");
    assert_eq!(err.message, "invalid padding value");
    let err = only_error("(defcolumns (A :i+8))");
    assert_eq!(err.message, "invalid bit-width in type ':i+8'");
    let err = only_error("(defconstraint c (:domain {1_0}) X)");
    assert_eq!(err.message, "invalid domain row");
    let err = only_error("(definterleaved I (A [B +2]))");
    assert_eq!(err.message, "invalid array index");
}

#[test]
fn qualified_names_in_expressions() {
    let constraint = single_constraint("(defconstraint c () (+ X p/Y m.Z m.p/W))");
    let symbols = constraint.constraint.dependencies();
    let paths: Vec<(bool, Vec<&str>)> = symbols
        .iter()
        .map(|s| {
            let segments = s.path.segments().iter().map(String::as_str).collect();
            (s.path.is_absolute(), segments)
        })
        .collect();
    assert_eq!(
        paths,
        [
            (false, vec!["X"]),
            (false, vec!["p", "Y"]),
            (true, vec!["m", "Z"]),
            (true, vec!["m", "p", "W"]),
        ]
    );
    let rendered: Vec<String> = symbols.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["X", "p/Y", "m.Z", "m.p/W"]);
    assert!(symbols.iter().all(|s| !s.is_resolved()));
}

#[test]
fn malformed_qualified_names() {
    for name in ["a.b.c", "a/b/c", "m.p/q/x"] {
        let err = only_error(&format!("(defconstraint c () {name})"));
        assert_eq!(err.message, format!("malformed qualified name '{name}'"));
    }
}

#[test]
fn let_rejects_duplicate_names_at_the_second_binding() {
    let source = "(defconstraint c () (let ((x 1) (x 2)) x))";
    let err = only_error(source);
    assert_eq!(err.message, "name 'x' already defined");
    let second = source.find("(x 2)").expect("second binding") + 2;
    assert_eq!(err.column(), second);
    assert_eq!(first_caret_column(&err.pointer), Some(second));
}

#[test]
fn let_and_reduce() {
    let constraint =
        single_constraint("(defconstraint c () (let ((a X) (b (+ Y 1))) (reduce f [A b])))");
    assert_eq!(
        constraint.constraint.to_string(),
        "(let ((a X) (b (+ Y 1))) (reduce f [A b]))"
    );
}

#[test]
fn for_intervals() {
    let bounds = |source: &str| match single_constraint(source).constraint.kind {
        ExprKind::For { start, end, .. } => (start, end),
        other => panic!("expected for, got {other:?}"),
    };
    assert_eq!(bounds("(defconstraint c () (for i [3:7] [A i]))"), (3, 7));
    assert_eq!(bounds("(defconstraint c () (for i [7] [A i]))"), (1, 7));
    assert_eq!(bounds("(defconstraint c () (for i [ 3 : 7 ] [A i]))"), (3, 7));
    // Reversed bounds are passed through unchanged.
    assert_eq!(bounds("(defconstraint c () (for i [7:3] [A i]))"), (7, 3));

    let err = only_error("(defconstraint c () (for i 7 X))");
    assert_eq!(err.message, "expected interval such as [1:4]");
}

#[test]
fn constants_and_typed_constants() {
    let (circuit, _) = parse("(defconst ONE 1 (TWO :i8) 2 NEG -5)");
    let DeclKind::Const(def) = &circuit.declarations[0].kind else {
        panic!("expected defconst");
    };
    let summary: Vec<(String, Option<Type>, Option<BigInt>)> = def
        .constants
        .iter()
        .map(|c| (c.path.to_string(), c.datatype.clone(), c.value.as_constant().cloned()))
        .collect();
    assert_eq!(
        summary,
        [
            ("/ONE".to_string(), None, Some(BigInt::from(1))),
            ("/TWO".to_string(), Some(Type::uint(8)), Some(BigInt::from(2))),
            ("/NEG".to_string(), None, Some(BigInt::from(-5))),
        ]
    );

    let err = only_error("(defconst (X :i8@prove) 1)");
    assert_eq!(err.message, "constant types cannot be proven");
    let err = only_error("(defconst X 1 Y)");
    assert_eq!(err.message, "odd number of arguments");
}

#[test]
fn aliases() {
    let (circuit, _) = parse("(module m)\n(defalias A B C p/D)\n(defunalias is-zero vanishes!)");
    let decls = &circuit.modules[0].declarations;
    assert_eq!(decls[0].keyword(), "defalias");
    assert_eq!(decls[1].keyword(), "defunalias");
    assert_eq!(column_names(decls), ["/m/A", "/m/C", "/m/is-zero"]);
    let targets: Vec<(SymbolKind, String)> = decls
        .iter()
        .flat_map(|d| d.dependencies())
        .map(|s| (s.kind, s.to_string()))
        .collect();
    assert_eq!(
        targets,
        [
            (SymbolKind::Column, "B".to_string()),
            (SymbolKind::Column, "p/D".to_string()),
            (SymbolKind::FunctionInvocation, "vanishes!".to_string()),
        ]
    );

    let errors = parse_errors("(defalias 1A B (C) D)");
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["invalid alias name '1A'", "invalid alias definition"]);
}

#[test]
fn perspective_columns_live_under_the_perspective() {
    let (circuit, _) = parse("(module m)\n(defperspective p S (A (B :i8)))");
    let decl = &circuit.modules[0].declarations[0];
    let DeclKind::Perspective(def) = &decl.kind else {
        panic!("expected defperspective");
    };
    assert_eq!(def.path, Path::from_segments(true, ["m", "p"]));
    assert_eq!(def.selector.to_string(), "S");
    for column in &def.columns {
        assert_eq!(column.binding.context, Path::absolute("m"));
        assert!(!column.binding.computed);
    }
    assert_eq!(column_names(std::slice::from_ref(decl)), ["/m/p", "/m/p/A", "/m/p/B"]);
}

#[test]
fn computed_columns() {
    let (circuit, _) = parse(
        "(defcomputed ((R :i8) S) (m.hash A p/B))\n(defcomputedcolumn (T :i16) (+ A 1))\n\
         (definterleaved I (A [B 2]))",
    );
    let decls = &circuit.declarations;
    let DeclKind::Computed(computed) = &decls[0].kind else {
        panic!("expected defcomputed");
    };
    assert!(computed.targets.iter().all(|t| t.binding.computed && t.binding.multiplier == 0));
    assert_eq!(computed.function.kind, SymbolKind::FunctionInvocation);
    assert_eq!(computed.function.to_string(), "m.hash");
    let sources: Vec<String> = computed.sources.iter().map(ToString::to_string).collect();
    assert_eq!(sources, ["A", "p/B"]);

    let DeclKind::ComputedColumn(column) = &decls[1].kind else {
        panic!("expected defcomputedcolumn");
    };
    assert_eq!(column.target.binding.datatype, Type::uint(16));
    assert!(column.target.binding.computed);
    assert_eq!(column.computation.to_string(), "(+ A 1)");

    let DeclKind::Interleaved(interleaved) = &decls[2].kind else {
        panic!("expected definterleaved");
    };
    let indices: Vec<Option<usize>> = interleaved.sources.iter().map(|s| s.index).collect();
    assert_eq!(indices, [None, Some(2)]);
}

#[test]
fn permutation_signs() {
    let (circuit, _) = parse("(defpermutation (T1 T2 T3 T4) (S1 (+ S2) (↓ S3) (- S4)))");
    let DeclKind::Permutation(def) = &circuit.declarations[0].kind else {
        panic!("expected defpermutation");
    };
    let directions: Vec<Option<SortDirection>> = def.sources.iter().map(|s| s.direction).collect();
    assert_eq!(
        directions,
        [
            None,
            Some(SortDirection::Ascending),
            Some(SortDirection::Ascending),
            Some(SortDirection::Descending)
        ]
    );
    assert!(def.targets.iter().all(|t| t.binding.computed));

    let err = only_error("(defpermutation (T1 T2) ((+ S1) S2))");
    assert_eq!(err.message, "missing sort direction");
    let err = only_error("(defpermutation (T1 T2) ((+ S1) (* S2)))");
    assert_eq!(err.message, "invalid sort direction");
    let err = only_error("(defpermutation (T1 T2) (S1))");
    assert!(err.message.starts_with("mismatched number"), "{}", err.message);
}

#[test]
fn lookup_lengths_must_match() {
    let (circuit, _) = parse("(deflookup l (A (+ B 1)) (C D))");
    let DeclKind::Lookup(def) = &circuit.declarations[0].kind else {
        panic!("expected deflookup");
    };
    assert_eq!(def.handle, "l");
    assert_eq!((def.targets.len(), def.sources.len()), (2, 2));

    let err = only_error("(deflookup l (A B) (C))");
    assert_eq!(
        err.message,
        "mismatched number of target (2) and source (1) columns"
    );
}

#[test]
fn function_signatures() {
    let (circuit, _) = parse(
        "(defun (f x (y :i8)) (+ x y))\n(defpurefun ((g :binary@loob :force) z) z)",
    );
    let funs: Vec<&ast::DefFun> = circuit
        .declarations
        .iter()
        .map(|d| match &d.kind {
            DeclKind::Fun(f) => f,
            other => panic!("expected function, got {other:?}"),
        })
        .collect();
    assert_eq!(funs[0].name, "f");
    assert!(!funs[0].binding.pure);
    assert_eq!(funs[0].binding.params[0].datatype, Type::field());
    assert_eq!(funs[0].binding.params[1].datatype, Type::uint(8));
    assert_eq!(funs[0].binding.returns, None);

    assert!(funs[1].binding.pure);
    assert!(funs[1].binding.forced);
    assert_eq!(
        funs[1].binding.returns,
        Some(Type::uint(1).with_semantics(Semantics::Loobean))
    );
    assert_eq!(circuit.declarations[1].keyword(), "defpurefun");

    let err = only_error("(defun (f (x :i8@prove)) x)");
    assert_eq!(err.message, "parameter types cannot be proven");
}

#[test]
fn range_bounds_are_field_elements() {
    let (circuit, _) = parse("(definrange X 256)\n(definrange Y 0xff)");
    let bounds: Vec<String> = circuit
        .declarations
        .iter()
        .map(|d| match &d.kind {
            DeclKind::InRange(r) => r.bound.to_string(),
            other => panic!("expected definrange, got {other:?}"),
        })
        .collect();
    assert_eq!(bounds, ["256", "255"]);

    let modulus = field::modulus().to_string();
    let err = only_error(&format!("(definrange X {modulus})"));
    assert!(err.message.contains("exceeds the field modulus"), "{}", err.message);
}

#[test]
fn modules_split_a_file() {
    let (circuit, _) =
        parse("(defcolumns P)\n(module b)\n(defcolumns B)\n(module a)\n(defcolumns A)");
    assert_eq!(column_names(&circuit.declarations), ["/P"]);
    assert_eq!(module_names(&circuit), ["a", "b"]);
    assert_eq!(column_names(&circuit.module("a").expect("a").declarations), ["/a/A"]);

    let err = only_error("(module 1a)\n(defcolumns X)");
    assert_eq!(err.message, "invalid module name");
}

#[test]
fn fragments_of_a_module_are_concatenated_in_file_order() {
    let sources = files(&[
        ("y.lisp", "(module a)\n(defcolumns A2)\n(module b)\n(defcolumns B1)"),
        ("x.lisp", "(module a)\n(defcolumns A1)"),
        ("z.lisp", "(defcolumns P)"),
    ]);
    let (circuit, source_map) = parse_source_files(&sources, &no_stdlib())
        .into_result()
        .expect("files should parse");
    assert_eq!(module_names(&circuit), ["a", "b"]);
    let module = circuit.module("a").expect("module a");
    assert_eq!(column_names(&module.declarations), ["/a/A1", "/a/A2"]);
    let origins: Vec<FileId> = module.declarations.iter().map(|d| d.id.file).collect();
    assert_eq!(origins, [FileId(0), FileId(1)]);
    assert_eq!(source_map.file_name(FileId(0)), Some("x.lisp"));
    assert_eq!(source_map.file_name(FileId(2)), Some("z.lisp"));
    assert_eq!(column_names(&circuit.declarations), ["/P"]);
}

#[test]
fn merge_is_independent_of_input_order() {
    let a = ("a.lisp", "(module zeta)\n(defcolumns Z)\n(module alpha)\n(defcolumns X)");
    let b = ("b.lisp", "(module alpha)\n(defcolumns Y)\n(defconstraint c () (- X Y))");
    let c = ("c.lisp", "(defcolumns P)\n(module mid)\n(defcolumns M)");
    let forward = parse_source_files(&files(&[a, b, c]), &Options::new());
    let backward = parse_source_files(&files(&[c, b, a]), &Options::new());
    assert!(forward.is_ok() && backward.is_ok());
    assert_eq!(module_names(&forward.circuit), ["alpha", "mid", "zeta"]);

    let json = |circuit: &Circuit| serde_json::to_string(circuit).expect("serializable");
    assert_eq!(json(&forward.circuit), json(&backward.circuit));
    assert_eq!(forward.source_map, backward.source_map);
}

#[test]
fn failing_file_contributes_nothing() {
    let sources = files(&[
        ("good.lisp", "(module m)\n(defcolumns A)"),
        ("bad.lisp", "(module m)\n(defcolumns B)\n(defconstraint c (X))"),
    ]);
    let parsed = parse_source_files(&sources, &no_stdlib());
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].file, "bad.lisp");
    assert_eq!(column_names(&parsed.circuit.modules[0].declarations), ["/m/A"]);
    // bad.lisp sorts first and its nodes are absent.
    assert_eq!(parsed.source_map.file_name(FileId(0)), None);
    assert!(parsed.source_map.iter().all(|(node, _)| node.file == FileId(1)));
    assert!(matches!(parsed.into_result(), Err(Error::Syntax(errors)) if errors.len() == 1));
}

#[test]
fn duplicate_file_names_are_rejected() {
    let sources = files(&[("a.lisp", "(defcolumns X)"), ("./a.lisp", "(defcolumns Y)")]);
    let parsed = parse_source_files(&sources, &no_stdlib());
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message, "duplicate source file 'a.lisp'");
}

#[test]
fn surviving_duplicate_is_independent_of_input_order() {
    let a = ("a.lisp", "(defcolumns X)");
    let b = ("./a.lisp", "(defcolumns Y)");
    let c = ("a.lisp", "(defcolumns W)");
    let forward = parse_source_files(&files(&[a, b, c]), &no_stdlib());
    let backward = parse_source_files(&files(&[c, b, a]), &no_stdlib());
    assert_eq!(forward.errors.len(), 2);
    assert_eq!(column_names(&forward.circuit.declarations), ["/Y"]);
    assert_eq!(forward.circuit, backward.circuit);
    assert_eq!(forward.source_map, backward.source_map);
    assert_eq!(forward.errors, backward.errors);
}

#[test]
fn standard_library_parses_cleanly() {
    let parsed = parse_source_files(&[], &Options::new());
    assert!(parsed.is_ok(), "{:?}", parsed.errors);
    let expected = stdlib::STDLIB_SOURCE.matches("(defpurefun").count();
    assert_eq!(parsed.circuit.declarations.len(), expected);
    assert!(parsed.circuit.declarations.iter().all(|d| d.keyword() == "defpurefun"));
    assert_eq!(parsed.source_map.file_name(FileId(0)), Some(stdlib::STDLIB_NAME));

    let names: Vec<String> = parsed
        .circuit
        .declarations
        .iter()
        .flat_map(|d| d.definitions())
        .filter_map(|p| p.tail().map(str::to_string))
        .collect();
    for name in ["vanishes!", "if-not-zero", "will-eq!", "prev"] {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }
}

#[test]
fn user_file_replaces_standard_library() {
    let sources = files(&[("stdlib.lisp", "(defcolumns X)")]);
    let parsed = parse_source_files(&sources, &Options::new());
    assert_eq!(column_names(&parsed.circuit.declarations), ["/X"]);
    assert!(Options::default().includes_stdlib());
    assert!(!no_stdlib().includes_stdlib());
}

#[test]
fn source_map_covers_declarations_and_expressions() {
    let (circuit, source_map) = parse("(defcolumns X)\n(defconstraint c () (+ X 1))");
    let decl = &circuit.declarations[1];
    let DeclKind::Constraint(constraint) = &decl.kind else {
        panic!("expected defconstraint");
    };
    let expr = &constraint.constraint;

    let (file, span) = source_map.locate(decl.id).expect("declaration span");
    assert_eq!(file, "test.lisp");
    assert_eq!((span.line, span.column), (2, 1));
    let span = source_map.get(expr.id).expect("expression span");
    assert_eq!((span.line, span.column), (2, 21));
    for child in expr.children() {
        assert!(source_map.contains(child.id));
    }
    for column in columns_of(&circuit.declarations[0]) {
        assert!(source_map.contains(column.id));
    }
    // Children are registered before their parents.
    assert!(expr.id.index < decl.id.index);
    assert!(circuit.declarations[0].id.index < expr.id.index);
}

#[test]
fn symbols_resolve_once() {
    let mut constraint = single_constraint("(defconstraint c () X)");
    let ExprKind::VariableAccess(symbol) = &mut constraint.constraint.kind else {
        panic!("expected variable access");
    };
    let binding = Binding::Local(ast::LocalBinding::new("X", Type::field()));
    assert!(symbol.resolve(binding.clone()));
    assert!(symbol.is_resolved());
    assert!(!symbol.resolve(binding));
}

#[test]
fn symbols_resolve_to_constants_defined_by_expressions() {
    let (circuit, _) = parse("(defconst K (+ J 1))\n(defconstraint c () (- X K))");
    let DeclKind::Const(def) = &circuit.declarations[0].kind else {
        panic!("expected defconst");
    };
    let constant = def.constants[0].clone();
    let mut constraint = match circuit.declarations[1].kind.clone() {
        DeclKind::Constraint(constraint) => constraint,
        other => panic!("expected a constraint, got {other:?}"),
    };
    let ExprKind::Sub(args) = &mut constraint.constraint.kind else {
        panic!("expected subtraction");
    };
    let ExprKind::VariableAccess(symbol) = &mut args[1].kind else {
        panic!("expected variable access");
    };
    assert!(symbol.resolve(Binding::Constant(constant)));
    let Some(Binding::Constant(bound)) = symbol.binding.as_deref() else {
        panic!("expected constant binding");
    };
    assert_eq!(bound.value.to_string(), "(+ J 1)");
}

#[test]
fn reader_errors_point_at_the_failure() {
    let source = "(defcolumns X))";
    let err = only_error(source);
    assert_eq!(err.message, "Syntax error: unexpected closing bracket");
    assert_eq!((err.line(), err.column()), (1, 15));
    assert_eq!(err.snippet, source);
    assert_eq!(first_caret_column(&err.pointer), Some(15));

    let err = only_error("(defcolumns X)\n(defconstraint c ()\n  (+ X 1)");
    assert_eq!(err.message, "Syntax error: expected ')'");
    assert_eq!(err.line(), 3);
    assert!(err.to_string().contains("test.lisp:3:"));
}

#[test]
fn reader_terms_and_comments() {
    let terms = read_terms("; header\n(a [b c] {1}) ; trailing\nsym", "t.lisp").expect("readable");
    assert_eq!(terms.len(), 2);
    assert_eq!(terms[0].to_string(), "(a [b c] {1})");
    assert_eq!(terms[0].span.line, 2);
    assert_eq!(terms[1].as_symbol(), Some("sym"));
    assert_eq!(terms[1].span.line, 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = parse_paths(&["/nonexistent/circuit.lisp"], &no_stdlib()).expect_err("no such file");
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.syntax_errors().is_empty());
    assert!(err.to_string().contains("/nonexistent/circuit.lisp"));
}
