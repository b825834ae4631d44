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

//! Type annotations, array dimensions and loop intervals.

use crate::ast::{Semantics, Type};
use std::str::FromStr;

/// Whether `text` is an optional `-` followed by one or more ASCII digits.
pub(crate) fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a plain decimal integer, rejecting `+` signs and `_` separators.
pub(crate) fn parse_integer<T: FromStr>(text: &str) -> Option<T> {
    if is_decimal(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Parses a `:base@modifier...` annotation into its type and must-prove flag.
///
/// Semantic modifiers overwrite each other in order, so with both `@loob`
/// and `@bool` present the last one wins.
pub(crate) fn parse_type(annotation: &str) -> Result<(Type, bool), String> {
    let mut parts = annotation.split('@');
    let base = parts.next().unwrap_or_default();
    let modifiers: Vec<&str> = parts.collect();

    let mut datatype = match base {
        ":binary" => Type::uint(1),
        ":byte" => Type::uint(8),
        ":" if !modifiers.is_empty() => Type::field(),
        _ => match base.strip_prefix(":i") {
            Some(width) if !width.is_empty() => {
                let bits = parse_integer::<usize>(width)
                    .ok_or_else(|| format!("invalid bit-width in type '{annotation}'"))?;
                Type::uint(bits)
            }
            _ => return Err(format!("unknown type '{base}'")),
        },
    };

    let mut must_prove = false;
    for modifier in modifiers {
        match modifier {
            "prove" => must_prove = true,
            "loob" => datatype = datatype.with_semantics(Semantics::Loobean),
            "bool" => datatype = datatype.with_semantics(Semantics::Boolean),
            _ => return Err(format!("unknown type modifier '{modifier}'")),
        }
    }
    Ok((datatype, must_prove))
}

/// Parses the inside of `[m]` or `[m:n]` into inclusive bounds.
///
/// `[m]` is shorthand for `[1:m]`. Bounds are not checked for order.
pub(crate) fn parse_interval(text: &str) -> Result<(usize, usize), String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let invalid = || format!("invalid interval '[{compact}]'");
    let bound = |s: &str| parse_integer::<usize>(s).ok_or_else(invalid);
    match compact.split(':').collect::<Vec<_>>().as_slice() {
        [end] => Ok((1, bound(end)?)),
        [start, end] => Ok((bound(start)?, bound(end)?)),
        _ => Err(format!("invalid interval '[{compact}]'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_types() {
        assert_eq!(parse_type(":binary"), Ok((Type::uint(1), false)));
        assert_eq!(parse_type(":byte"), Ok((Type::uint(8), false)));
        assert_eq!(parse_type(":i128"), Ok((Type::uint(128), false)));
        assert_eq!(parse_type(":@prove"), Ok((Type::field(), true)));
    }

    #[test]
    fn modifiers_compose() {
        let (datatype, prove) = parse_type(":i16@loob@prove").expect("type");
        assert_eq!(datatype, Type::uint(16).with_semantics(Semantics::Loobean));
        assert!(prove);
        let (datatype, prove) = parse_type(":byte@bool").expect("type");
        assert_eq!(datatype.semantics(), Semantics::Boolean);
        assert!(!prove);
    }

    #[test]
    fn last_semantic_modifier_wins() {
        let (datatype, _) = parse_type(":i16@loob@bool").expect("type");
        assert_eq!(datatype, Type::uint(16).with_semantics(Semantics::Boolean));
        let (datatype, _) = parse_type(":i16@bool@loob").expect("type");
        assert_eq!(datatype.semantics(), Semantics::Loobean);
    }

    #[test]
    fn rejects_unknown_base_and_modifier() {
        assert!(parse_type(":").unwrap_err().contains("unknown type"));
        assert!(parse_type(":u8").unwrap_err().contains("unknown type ':u8'"));
        assert!(parse_type(":i").unwrap_err().contains("unknown type"));
        assert!(parse_type(":ix").unwrap_err().contains("invalid bit-width"));
        assert!(parse_type(":i+8").unwrap_err().contains("invalid bit-width"));
        assert!(
            parse_type(":i8@signed")
                .unwrap_err()
                .contains("unknown type modifier 'signed'")
        );
    }

    #[test]
    fn integers_are_plain_decimal() {
        assert_eq!(parse_integer::<i64>("-12"), Some(-12));
        assert_eq!(parse_integer::<usize>("007"), Some(7));
        assert_eq!(parse_integer::<i64>("+7"), None);
        assert_eq!(parse_integer::<i64>("1_000"), None);
        assert_eq!(parse_integer::<i64>("-"), None);
        assert_eq!(parse_integer::<usize>("-1"), None);
    }

    #[test]
    fn intervals() {
        assert_eq!(parse_interval("3:7"), Ok((3, 7)));
        assert_eq!(parse_interval("7"), Ok((1, 7)));
        assert_eq!(parse_interval(" 3 : 7 "), Ok((3, 7)));
        assert_eq!(parse_interval("7:3"), Ok((7, 3)));
        assert!(parse_interval("-1:3").is_err());
        assert!(parse_interval("1:2:3").is_err());
        assert!(parse_interval("").is_err());
        assert!(parse_interval("a:b").is_err());
        assert!(parse_interval("+3:7").is_err());
        assert!(parse_interval("1_0").is_err());
    }
}
