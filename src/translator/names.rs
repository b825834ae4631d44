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

//! Identifier rules and qualified-name splitting.
//!
//! A qualified name has at most one `.` (module qualification) and at most
//! one `/` (perspective qualification):
//! `name`, `perspective/name`, `module.name`, `module.perspective/name`.
//! Nothing here looks a name up; the result is only a [`Path`].

use crate::ast::Path;

/// Returns whether `name` is a plain identifier (columns, constants, handles).
pub(crate) fn is_identifier(name: &str) -> bool {
    is_either_identifier(name, false)
}

/// Returns whether `name` is a function identifier (`vanishes!`, `if-zero`).
pub(crate) fn is_function_identifier(name: &str) -> bool {
    is_either_identifier(name, true)
}

fn is_either_identifier(name: &str, function: bool) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| {
        c.is_alphanumeric()
            || matches!(c, '_' | '\'' | '$')
            || (function && matches!(c, '-' | '!' | '?' | '='))
    })
}

/// Splits a possibly qualified name into a path.
///
/// `module.` prefixes yield an absolute path; unqualified and
/// perspective-only names stay relative. Every segment must be an identifier,
/// the leaf a function identifier when `function` is set.
pub(crate) fn parse_qualified_name(name: &str, function: bool) -> Result<Path, String> {
    let (mut path, rest) = match name.split('.').collect::<Vec<_>>().as_slice() {
        [leaf] => (Path::relative(), *leaf),
        [module, leaf] => {
            check_segment(module, name)?;
            (Path::absolute(*module), *leaf)
        }
        _ => return Err(format!("malformed qualified name '{name}'")),
    };
    let leaf = match rest.split('/').collect::<Vec<_>>().as_slice() {
        [leaf] => *leaf,
        [perspective, leaf] => {
            check_segment(perspective, name)?;
            path.push(*perspective);
            *leaf
        }
        _ => return Err(format!("malformed qualified name '{name}'")),
    };
    let valid = if function {
        is_function_identifier(leaf)
    } else {
        is_identifier(leaf)
    };
    if !valid {
        return Err(format!("invalid identifier '{leaf}' in '{name}'"));
    }
    path.push(leaf);
    Ok(path)
}

fn check_segment(segment: &str, name: &str) -> Result<(), String> {
    if is_identifier(segment) {
        Ok(())
    } else {
        Err(format!("malformed qualified name '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_follow_first_char_rule() {
        assert!(is_identifier("BYTE_1"));
        assert!(is_identifier("_x"));
        assert!(is_identifier("A'"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("if-zero"));
        assert!(is_function_identifier("if-zero"));
        assert!(is_function_identifier("vanishes!"));
        assert!(!is_function_identifier("-x"));
    }

    #[test]
    fn qualification_shapes() {
        assert_eq!(
            parse_qualified_name("foo", false),
            Ok(Path::from_segments(false, ["foo"]))
        );
        assert_eq!(
            parse_qualified_name("p/foo", false),
            Ok(Path::from_segments(false, ["p", "foo"]))
        );
        assert_eq!(
            parse_qualified_name("m.foo", false),
            Ok(Path::from_segments(true, ["m", "foo"]))
        );
        assert_eq!(
            parse_qualified_name("m.p/foo", false),
            Ok(Path::from_segments(true, ["m", "p", "foo"]))
        );
    }

    #[test]
    fn repeated_separators_are_malformed() {
        for name in ["m.p.foo", "a/b/foo", "m.a/b/foo", "a.b.c/d"] {
            let err = parse_qualified_name(name, false).expect_err(name);
            assert!(err.contains("malformed qualified name"), "{name}: {err}");
        }
    }

    #[test]
    fn function_leaves_admit_punctuation() {
        assert_eq!(
            parse_qualified_name("std.eq!", true),
            Ok(Path::from_segments(true, ["std", "eq!"]))
        );
        assert!(parse_qualified_name("std.eq!", false).is_err());
    }
}
