//! Amount parsing and formatting in Indian digit grouping.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a comma-grouped amount (e.g. "1,23,456.00" or "123456.00").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Format an amount with Indian grouping (1,23,45,678.90).
pub fn format_indian_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    // Last three digits form one group, everything before groups by two
    let head_len = digits.len().saturating_sub(3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i <= head_len && (head_len - i) % 2 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, formatted, decimal_part)
}
