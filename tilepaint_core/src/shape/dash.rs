// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dash pattern parsing.
//!
//! Dash text uses the `stroke-dasharray` form: numbers separated by commas
//! and/or whitespace, e.g. `"5,3"` or `"10 5, 2"`. Parsing produces a
//! [`DashPattern`] that style records cache next to the raw text.

use alloc::vec::Vec;
use core::fmt;
use core::num::ParseFloatError;

/// A parsed dash sequence (alternating dash and gap lengths).
///
/// An empty pattern means a solid line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashPattern(Vec<f64>);

impl DashPattern {
    /// A solid (undashed) pattern.
    #[must_use]
    pub const fn solid() -> Self {
        Self(Vec::new())
    }

    /// Parses dash text.
    ///
    /// Empty or whitespace-only text yields a solid pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`DashParseError`] naming the first token that is not a
    /// finite, non-negative number.
    pub fn parse(text: &str) -> Result<Self, DashParseError> {
        let mut values = Vec::new();
        let tokens = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());
        for (index, token) in tokens.enumerate() {
            let value: f64 = token.parse().map_err(|source| DashParseError {
                index,
                kind: DashParseErrorKind::NotANumber(source),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(DashParseError {
                    index,
                    kind: DashParseErrorKind::OutOfRange(value),
                });
            }
            values.push(value);
        }
        Ok(Self(values))
    }

    /// Returns `true` for a solid pattern.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the dash and gap lengths.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Why a dash token was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum DashParseErrorKind {
    /// The token is not a number.
    NotANumber(ParseFloatError),
    /// The token is negative, infinite or NaN.
    OutOfRange(f64),
}

/// Error returned by [`DashPattern::parse`].
#[derive(Clone, Debug, PartialEq)]
pub struct DashParseError {
    /// Zero-based position of the offending token.
    pub index: usize,
    /// What was wrong with it.
    pub kind: DashParseErrorKind,
}

impl fmt::Display for DashParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DashParseErrorKind::NotANumber(source) => {
                write!(f, "dash token {} is not a number: {source}", self.index)
            }
            DashParseErrorKind::OutOfRange(value) => {
                write!(f, "dash token {} is out of range: {value}", self.index)
            }
        }
    }
}

impl core::error::Error for DashParseError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            DashParseErrorKind::NotANumber(source) => Some(source),
            DashParseErrorKind::OutOfRange(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_numbers() {
        let dash = DashPattern::parse("5,3,2").unwrap();
        assert_eq!(dash.as_slice(), &[5.0, 3.0, 2.0]);
    }

    #[test]
    fn accepts_spaces_and_fractions() {
        let dash = DashPattern::parse(" 10 5, 2.5 ").unwrap();
        assert_eq!(dash.as_slice(), &[10.0, 5.0, 2.5]);
    }

    #[test]
    fn empty_text_is_solid() {
        assert!(DashPattern::parse("").unwrap().is_solid());
        assert!(DashPattern::parse("  ").unwrap().is_solid());
    }

    #[test]
    fn rejects_garbage_with_token_index() {
        let err = DashPattern::parse("4,x,2").unwrap_err();
        assert_eq!(err.index, 1, "second token is the bad one");
        assert!(matches!(err.kind, DashParseErrorKind::NotANumber(_)));
    }

    #[test]
    fn rejects_negative_lengths() {
        let err = DashPattern::parse("4,-1").unwrap_err();
        assert_eq!(err.kind, DashParseErrorKind::OutOfRange(-1.0));
    }
}
