//! Classification of bare (unquoted) tokens.
//!
//! A literal is collected character by character until a separator ends it,
//! then classified as a whole. There is no prefix acceptance: `12abc` is not
//! `12` followed by garbage, it is an unrecognized literal.

use alloc::string::ToString;

use crate::{error::SyntaxError, value::Value};

/// Keywords accepted in addition to numbers.
const KEYWORDS: &[(&str, Value)] = &[
    ("true", Value::Boolean(true)),
    ("false", Value::Boolean(false)),
    ("null", Value::Null),
    ("NaN", Value::Number(f64::NAN)),
    ("Infinity", Value::Number(f64::INFINITY)),
    ("-Infinity", Value::Number(f64::NEG_INFINITY)),
];

/// Classifies a complete literal token.
pub(crate) fn parse_literal(token: &str) -> Result<Value, SyntaxError> {
    if let Some((_, value)) = KEYWORDS.iter().find(|(word, _)| *word == token) {
        return Ok(value.clone());
    }

    if is_decimal_number(token) {
        // The grammar check above guarantees the standard parser accepts it.
        if let Ok(n) = token.parse::<f64>() {
            return Ok(Value::Number(n));
        }
    }

    Err(SyntaxError::UnrecognizedLiteral(token.to_string()))
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_decimal_number(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    // integer part
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += count_digits(&bytes[i..]),
        _ => return false,
    }

    // fraction
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let n = count_digits(&bytes[i..]);
        if n == 0 {
            return false;
        }
        i += n;
    }

    // exponent
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = count_digits(&bytes[i..]);
        if n == 0 {
            return false;
        }
        i += n;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", 0.0)]
    #[case("3.14", 3.14)]
    #[case("-12", -12.0)]
    #[case("1e10", 1e10)]
    #[case("1E+2", 100.0)]
    #[case("2.5e-3", 2.5e-3)]
    #[case("Infinity", f64::INFINITY)]
    #[case("-Infinity", f64::NEG_INFINITY)]
    fn numbers(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(parse_literal(token), Ok(Value::Number(expected)));
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        let Ok(Value::Number(n)) = parse_literal("-0") else {
            panic!("expected a number");
        };
        assert!(n == 0.0 && n.is_sign_negative());
    }

    #[test]
    fn nan_keyword() {
        let Ok(Value::Number(n)) = parse_literal("NaN") else {
            panic!("expected a number");
        };
        assert!(n.is_nan());
    }

    #[rstest]
    #[case("true", Value::Boolean(true))]
    #[case("false", Value::Boolean(false))]
    #[case("null", Value::Null)]
    fn keywords(#[case] token: &str, #[case] expected: Value) {
        assert_eq!(parse_literal(token), Ok(expected));
    }

    #[rstest]
    #[case("12abc")]
    #[case("tru")]
    #[case("nul")]
    #[case("01")]
    #[case("1.")]
    #[case(".5")]
    #[case("+1")]
    #[case("1e")]
    #[case("-")]
    #[case("inf")]
    #[case("nan")]
    #[case("True")]
    fn rejects(#[case] token: &str) {
        assert_eq!(
            parse_literal(token),
            Err(SyntaxError::UnrecognizedLiteral(token.to_string()))
        );
    }
}
