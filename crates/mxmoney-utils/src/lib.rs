//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Group the digits of an integer string with a thousands separator
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a monetary amount with two decimal places and grouped thousands
///
/// The sign is kept in front of the digits: `-1234.5` with `.`/`,`
/// becomes `-1.234,50`.
pub fn format_amount(value: Decimal, thousands_separator: &str, decimal_separator: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole, thousands_separator));
    out.push_str(decimal_separator);
    out.push_str(fraction);
    out
}

/// Format an amount prefixed with a currency symbol, e.g. `R$ 1.234,50`
pub fn format_currency(
    value: Decimal,
    symbol: &str,
    thousands_separator: &str,
    decimal_separator: &str,
) -> String {
    format!("{} {}", symbol, format_amount(value, thousands_separator, decimal_separator))
}

/// Escape text for safe embedding in HTML fragments
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567", ","), "1,234,567");
        assert_eq!(group_thousands("123", ","), "123");
        assert_eq!(group_thousands("", ","), "");
    }

    #[test]
    fn test_format_amount_brazilian() {
        let value = Decimal::from_str("1234.5").unwrap();
        assert_eq!(format_amount(value, ".", ","), "1.234,50");
    }

    #[test]
    fn test_format_amount_negative_and_rounding() {
        let value = Decimal::from_str("-9876543.215").unwrap();
        assert_eq!(format_amount(value, ",", "."), "-9,876,543.22");
        assert_eq!(format_amount(Decimal::ZERO, ",", "."), "0.00");
    }

    #[test]
    fn test_format_currency() {
        let value = Decimal::from_str("40").unwrap();
        assert_eq!(format_currency(value, "R$", ".", ","), "R$ 40,00");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }
}
