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

//! Field-element literals.
//!
//! A literal is accepted when it denotes an integer strictly below the scalar
//! modulus of BLS12-377; the value is held as an `ark_bls12_377::Fr`.

use ark_bls12_377::Fr;
use ark_ff::PrimeField;
use num_bigint::BigUint;
use num_traits::Num;
use serde::{Serialize, Serializer};
use std::fmt;

/// Returns the field modulus.
pub fn modulus() -> BigUint {
    Fr::MODULUS.into()
}

/// Canonical field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// Parses a decimal or `0x`-prefixed hexadecimal literal.
    ///
    /// Only plain digits are accepted: no sign, no `_` separators.
    pub fn parse(literal: &str) -> Result<Self, String> {
        let (digits, radix) = match literal.strip_prefix("0x") {
            Some(hex) => (hex, 16),
            None => (literal, 10),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(format!("invalid field element '{literal}'"));
        }
        let value = BigUint::from_str_radix(digits, radix)
            .map_err(|_| format!("invalid field element '{literal}'"))?;
        let exceeds = || format!("field element '{literal}' exceeds the field modulus");
        let repr = <Fr as PrimeField>::BigInt::try_from(value).map_err(|_| exceeds())?;
        Fr::from_bigint(repr).map(Self).ok_or_else(exceeds)
    }

    /// The element as an integer in `[0, modulus)`.
    pub fn value(&self) -> BigUint {
        self.0.into_bigint().into()
    }

    pub fn inner(&self) -> Fr {
        self.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_decimal_and_hex() {
        assert_eq!(FieldElement::parse("256"), Ok(FieldElement::from(256)));
        assert_eq!(FieldElement::parse("0xff"), Ok(FieldElement::from(255)));
        let largest = (modulus() - 1u8).to_string();
        assert_eq!(FieldElement::parse(&largest).map(|e| e.value().to_string()), Ok(largest));
    }

    #[test]
    fn rejects_malformed_and_out_of_range() {
        for literal in ["", "0x", "+7", "-1", "1_0", "0x-5", "0x1_0", "12a", "0xZZ"] {
            assert_eq!(
                FieldElement::parse(literal),
                Err(format!("invalid field element '{literal}'")),
            );
        }
        let modulus = modulus().to_string();
        assert!(FieldElement::parse(&modulus).unwrap_err().contains("exceeds"));
    }
}
