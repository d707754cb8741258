use crate::error::QuoteError;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

/// Currency-looking tokens: a symbol-prefixed amount, a USD-prefixed
/// amount, a comma-grouped number, or a number with exactly two decimals.
/// Bare integers are left alone (policy numbers, years, form codes).
static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\bus)?[$€£]\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|\busd\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\b|\b\d+\.\d{2}\b",
    )
    .expect("currency pattern is valid")
});

/// Non-numeric limit wording accepted in coverage schedules.
static LIMIT_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:included|excluded|statutory|n/a)(?:\b|$)")
        .expect("limit word pattern is valid")
});

/// Byte range of the first currency token at or after `from`.
pub fn find_amount(line: &str, from: usize) -> Option<(usize, usize)> {
    if from > line.len() {
        return None;
    }
    CURRENCY.find_at(line, from).map(|m| (m.start(), m.end()))
}

/// Start of the first limit-shaped token (amount or limit wording) at or
/// after `from`.
pub fn find_limit_token(line: &str, from: usize) -> Option<usize> {
    if from > line.len() {
        return None;
    }
    let amount = CURRENCY.find_at(line, from).map(|m| m.start());
    let word = LIMIT_WORD.find_at(line, from).map(|m| m.start());
    match (amount, word) {
        (Some(a), Some(w)) => Some(a.min(w)),
        (a, w) => a.or(w),
    }
}

/// Parse a currency string into a non-negative amount with exactly two
/// decimal places.
///
/// Handles formats like:
/// - "$12,345.00" -> 12345.00
/// - "USD 1,200" -> 1200.00
/// - "  850.5 " -> 850.50
/// - "$1,234.567" -> 1234.57 (rounded half away from zero)
///
/// Fails with `InvalidAmount` when no digits are present or the remainder
/// is not a plain number.
pub fn parse_amount(s: &str) -> Result<Decimal, QuoteError> {
    let invalid = || QuoteError::InvalidAmount(s.trim().to_string());

    if !s.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut body = s.trim();
    for prefix in ["USD", "usd", "US$", "us$", "$", "€", "£"] {
        if let Some(rest) = body.strip_prefix(prefix) {
            body = rest.trim_start();
        }
    }
    let body = body.trim_end_matches(|c: char| c == '.' || c == ',' || c.is_whitespace());
    let digits: String = body.chars().filter(|c| *c != ',' && *c != ' ').collect();

    let value = Decimal::from_str(&digits).map_err(|_| invalid())?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid());
    }

    let mut value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    Ok(value)
}

/// Display form with thousands separators: 12345.5 -> "$12,345.50".
pub fn format_currency(amount: Decimal) -> String {
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    let text = amount.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_symbol_and_separators() {
        let v = parse_amount("$12,345.00").unwrap();
        assert_eq!(v, dec!(12345.00));
        assert_eq!(v.to_string(), "12345.00");
    }

    #[test]
    fn test_integer_gets_two_places() {
        assert_eq!(parse_amount("1200").unwrap().to_string(), "1200.00");
        assert_eq!(parse_amount("USD 1,200").unwrap().to_string(), "1200.00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(parse_amount("$1,234.565").unwrap().to_string(), "1234.57");
        assert_eq!(parse_amount("850.5").unwrap().to_string(), "850.50");
    }

    #[test]
    fn test_trailing_punctuation() {
        assert_eq!(parse_amount("$5,000.").unwrap().to_string(), "5000.00");
    }

    #[test]
    fn test_no_digits_is_invalid() {
        assert!(matches!(
            parse_amount("$ TBD"),
            Err(QuoteError::InvalidAmount(_))
        ));
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(parse_amount("12ab34").is_err());
        assert!(parse_amount("1.234.567").is_err());
        assert!(parse_amount("-500").is_err());
    }

    #[test]
    fn test_find_amount_skips_bare_integers() {
        let line = "Policy 2025 Total Premium: $12,345.00";
        let (s, e) = find_amount(line, 0).unwrap();
        assert_eq!(&line[s..e], "$12,345.00");
        assert!(find_amount("Form CG 0001 edition 2024", 0).is_none());
    }

    #[test]
    fn test_find_amount_without_symbol() {
        let line = "Annual Premium    4,250";
        let (s, e) = find_amount(line, 0).unwrap();
        assert_eq!(&line[s..e], "4,250");
    }

    #[test]
    fn test_find_limit_token() {
        let line = "Hired and Non-Owned Auto   Included";
        let start = find_limit_token(line, 24).unwrap();
        assert_eq!(&line[start..], "Included");
        assert_eq!(find_limit_token("Crime   N/A", 0), Some(8));
        assert!(find_limit_token("General Liability coverage applies", 0).is_none());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(12345)), "$12,345.00");
        assert_eq!(format_currency(dec!(999.5)), "$999.50");
        assert_eq!(format_currency(dec!(1000000.00)), "$1,000,000.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }
}
