// ABOUTME: Parses free-text quantity strings into a numeric value and optional unit
// ABOUTME: Handles integers, decimals and simple fractions; unparseable text is a normal outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Quantity Parser
//!
//! Converts a free-text amount ("2 tbsp", "1/2 cup", "250g") into a
//! [`Quantity`]. Text that carries no parseable number ("to taste",
//! "a pinch", "as required") yields a quantity with no value; that is an
//! expected outcome, not an error, and downstream weight estimation applies
//! a fixed default for it.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Quantity;

/// An optional fraction or decimal/integer, optionally followed by a unit
/// word (letters only)
static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"^(\d+/\d+|\d+\.?\d*|\.\d+)\s*([a-zA-Z]+)?$").unwrap()
});

/// Parse a free-text quantity
///
/// Empty text and anything containing "to taste" (case-insensitive) signal a
/// non-quantifiable ingredient. A fraction with a zero denominator evaluates
/// to infinity rather than failing.
#[must_use]
pub fn parse(text: &str) -> Quantity {
    if text.is_empty() || text.to_lowercase().contains("to taste") {
        return Quantity::unparsed(text);
    }

    let trimmed = text.trim();
    let Some(captures) = QUANTITY_PATTERN.captures(trimmed) else {
        return Quantity::unparsed(text);
    };

    let number = &captures[1];
    let value = if let Some((numerator, denominator)) = number.split_once('/') {
        evaluate_fraction(numerator, denominator)
    } else {
        number.parse().ok()
    };

    let Some(value) = value else {
        return Quantity::unparsed(text);
    };

    Quantity {
        value: Some(value),
        unit: captures.get(2).map(|m| m.as_str().to_lowercase()),
        raw: text.to_owned(),
    }
}

/// Evaluate a simple `a/b` fraction; a zero denominator yields infinity
fn evaluate_fraction(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return Some(f64::INFINITY);
    }
    Some(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_with_unit() {
        let quantity = parse("2 tbsp");
        assert_eq!(quantity.value, Some(2.0));
        assert_eq!(quantity.unit.as_deref(), Some("tbsp"));
        assert_eq!(quantity.raw, "2 tbsp");
    }

    #[test]
    fn parses_fraction_with_unit() {
        let quantity = parse("1/2 cup");
        assert_eq!(quantity.value, Some(0.5));
        assert_eq!(quantity.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn parses_attached_unit_and_lowercases_it() {
        let quantity = parse("250G");
        assert_eq!(quantity.value, Some(250.0));
        assert_eq!(quantity.unit.as_deref(), Some("g"));
    }

    #[test]
    fn parses_decimal_without_unit() {
        let quantity = parse("1.5");
        assert_eq!(quantity.value, Some(1.5));
        assert_eq!(quantity.unit, None);
    }

    #[test]
    fn parses_bare_leading_decimal() {
        let quantity = parse(".5 tsp");
        assert_eq!(quantity.value, Some(0.5));
        assert_eq!(quantity.unit.as_deref(), Some("tsp"));
    }

    #[test]
    fn to_taste_is_unparsed() {
        let quantity = parse("to taste");
        assert_eq!(quantity.value, None);
        assert_eq!(quantity.unit, None);
        assert_eq!(quantity.raw, "to taste");
    }

    #[test]
    fn to_taste_is_case_insensitive_and_matches_inside_text() {
        assert_eq!(parse("Salt To Taste").value, None);
    }

    #[test]
    fn empty_text_is_unparsed() {
        let quantity = parse("");
        assert_eq!(quantity.value, None);
        assert_eq!(quantity.unit, None);
    }

    #[test]
    fn prose_quantities_are_unparsed() {
        assert_eq!(parse("a pinch").value, None);
        assert_eq!(parse("as required").value, None);
    }

    #[test]
    fn zero_denominator_yields_infinity_without_panicking() {
        let quantity = parse("1/0 cup");
        assert_eq!(quantity.value, Some(f64::INFINITY));
        assert_eq!(quantity.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let quantity = parse("  3 tsp  ");
        assert_eq!(quantity.value, Some(3.0));
        assert_eq!(quantity.unit.as_deref(), Some("tsp"));
    }
}
