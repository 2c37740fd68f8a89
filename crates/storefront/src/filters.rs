//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a count with Indian digit grouping (`125000` -> `1,25,000`).
///
/// Usage in templates: `{{ product.review_count|grouped }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn grouped(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(group_indian(&value.to_string()))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    let lead = head.len() % 2;
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (i + 2 - lead) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::group_indian;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("7"), "7");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1250"), "1,250");
        assert_eq!(group_indian("50000"), "50,000");
        assert_eq!(group_indian("125000"), "1,25,000");
        assert_eq!(group_indian("12345678"), "1,23,45,678");
        assert_eq!(group_indian("4.8"), "4.8");
    }
}
