//! Monetary helpers
//!
//! Amounts are kept as `f64` and aggregated at full precision. Rounding to
//! cents happens only when a figure is placed into an output structure.

use std::fmt;

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid printing "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Whole number of cents, used for equality checks between amounts
pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Parse an amount typed by a user
///
/// Accepts "10.50", "-10.50", "R$ 10.50", "$10.50", "10" and the comma
/// decimal form "10,50".
pub fn parse_amount(s: &str) -> Result<f64, AmountParseError> {
    let trimmed = s.trim();

    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, trimmed),
    };

    let rest = rest
        .trim_start_matches("R$")
        .trim_start_matches('$')
        .trim();

    let normalized = if rest.contains(',') && !rest.contains('.') {
        rest.replace(',', ".")
    } else {
        rest.replace(',', "")
    };

    let value: f64 = normalized
        .parse()
        .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;

    if !value.is_finite() {
        return Err(AmountParseError::InvalidFormat(s.to_string()));
    }

    Ok(if negative { -value } else { value })
}

/// Format an amount with a currency symbol, e.g. `R$ 1250.00` / `-R$ 3.10`
pub fn format_money(value: f64, symbol: &str) -> String {
    let value = round_cents(value);
    if value < 0.0 {
        format!("-{} {:.2}", symbol, value.abs())
    } else {
        format!("{} {:.2}", symbol, value)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.006), 10.01);
        assert_eq!(round_cents(2799.999), 2800.0);
        assert_eq!(round_cents(-0.001), 0.0);
        assert!(round_cents(-0.001).is_sign_positive());
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(10.5), 1050);
        assert_eq!(to_cents(0.1 + 0.2), 30);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10.50").unwrap(), 10.5);
        assert_eq!(parse_amount("R$ 10.50").unwrap(), 10.5);
        assert_eq!(parse_amount("$3").unwrap(), 3.0);
        assert_eq!(parse_amount("10,50").unwrap(), 10.5);
        assert_eq!(parse_amount("1,250.75").unwrap(), 1250.75);
        assert_eq!(parse_amount("-4.2").unwrap(), -4.2);
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1250.0, "R$"), "R$ 1250.00");
        assert_eq!(format_money(-3.1, "R$"), "-R$ 3.10");
        assert_eq!(format_money(0.004, "$"), "$ 0.00");
    }
}
