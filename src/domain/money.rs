use std::fmt;

/// An amount extracted from the free text a user typed into the ledger.
/// Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAmount {
    pub value: f64,
    /// Currency symbol ("$", "€") or code ("USD", "ARS").
    pub currency: String,
}

impl fmt::Display for ParsedAmount {
    /// Render back into a form `parse_amount` accepts.
    /// Codes get a separating space ("USD 123.45"), symbols don't ("$123.45").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.currency.chars().count() > 1 {
            write!(f, "{} {:.2}", self.currency, self.value)
        } else {
            write!(f, "{}{:.2}", self.currency, self.value)
        }
    }
}

/// Parse a free-form monetary string into an amount and currency marker.
///
/// Accepted shapes:
/// - "USD 123.45" (code, space, amount)
/// - "$123.45" (one-character symbol glued to the amount)
/// - European separators: "€99,99", "ARS 1.234,56"
pub fn parse_amount(raw: &str) -> Result<ParsedAmount, ParseMoneyError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseMoneyError::EmptyInput);
    }

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let (currency, amount_str) = if tokens.len() == 2 {
        // "USD 123.45"
        (tokens[0].to_string(), tokens[1].to_string())
    } else {
        // "$123.45" or "€99,99"
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) if !first.is_ascii_digit() => {
                (first.to_string(), chars.as_str().trim().to_string())
            }
            _ => return Err(ParseMoneyError::MissingCurrencyMarker),
        }
    };

    let normalized = normalize_separators(&amount_str);
    let value: f64 = normalized
        .parse()
        .map_err(|_| ParseMoneyError::InvalidNumber)?;

    Ok(ParsedAmount { value, currency })
}

/// Normalize decimal and thousands separators to a plain "1234.56" form.
///
/// A single comma with no dot is always read as a decimal comma, never as a
/// thousands marker ("1,234" -> 1.234). Known ambiguity in the source format;
/// downstream behavior depends on it, so don't "fix" it here.
fn normalize_separators(s: &str) -> String {
    if s.contains(',') && s.contains('.') {
        // European grouping: "1.234,56"
        s.replace('.', "").replace(',', ".")
    } else if s.matches(',').count() == 1 {
        // Decimal comma: "99,99"
        s.replace(',', ".")
    } else if s.contains(',') {
        // Thousands separators: "1,234,567"
        s.replace(',', "")
    } else {
        s.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    EmptyInput,
    MissingCurrencyMarker,
    InvalidNumber,
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoneyError::EmptyInput => write!(f, "empty money string"),
            ParseMoneyError::MissingCurrencyMarker => {
                write!(f, "invalid format: missing currency symbol or code")
            }
            ParseMoneyError::InvalidNumber => write!(f, "invalid number"),
        }
    }
}

impl std::error::Error for ParseMoneyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_prefix() {
        let parsed = parse_amount("$123.45").unwrap();
        assert_eq!(parsed.value, 123.45);
        assert_eq!(parsed.currency, "$");
    }

    #[test]
    fn test_parse_currency_code() {
        let parsed = parse_amount("USD 123.45").unwrap();
        assert_eq!(parsed.value, 123.45);
        assert_eq!(parsed.currency, "USD");
    }

    #[test]
    fn test_parse_decimal_comma() {
        let parsed = parse_amount("€99,99").unwrap();
        assert_eq!(parsed.value, 99.99);
        assert_eq!(parsed.currency, "€");
    }

    #[test]
    fn test_parse_european_grouping() {
        let parsed = parse_amount("ARS 1.234,56").unwrap();
        assert_eq!(parsed.value, 1234.56);
        assert_eq!(parsed.currency, "ARS");
    }

    #[test]
    fn test_parse_thousands_commas() {
        // Multiple commas and no dot read as thousands separators.
        let parsed = parse_amount("USD 1,234,567").unwrap();
        assert_eq!(parsed.value, 1234567.0);
    }

    #[test]
    fn test_single_comma_is_decimal_even_for_thousands() {
        // "1,234" could mean one thousand; the format reads it as 1.234.
        let parsed = parse_amount("$1,234").unwrap();
        assert_eq!(parsed.value, 1.234);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_amount(""), Err(ParseMoneyError::EmptyInput));
        assert_eq!(parse_amount("   "), Err(ParseMoneyError::EmptyInput));
    }

    #[test]
    fn test_parse_missing_marker() {
        assert_eq!(
            parse_amount("123.45"),
            Err(ParseMoneyError::MissingCurrencyMarker)
        );
    }

    #[test]
    fn test_parse_invalid_number() {
        assert_eq!(parse_amount("$abc"), Err(ParseMoneyError::InvalidNumber));
        assert_eq!(
            parse_amount("USD 12.34.56.78"),
            Err(ParseMoneyError::InvalidNumber)
        );
    }

    #[test]
    fn test_roundtrip_is_idempotent() {
        for raw in ["$123.45", "USD 123.45", "€99,99", "ARS 1.234,56"] {
            let first = parse_amount(raw).unwrap();
            let second = parse_amount(&first.to_string()).unwrap();
            assert_eq!(first.value, second.value, "round-trip of {}", raw);
            assert_eq!(first.currency, second.currency);
        }
    }
}
