use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Largest absolute amount accepted from a statement (one quadrillion).
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Parse a German-formatted amount such as `1.234,56` or `-100,00`.
///
/// Every `.` is treated as a thousands separator and dropped, then the
/// decimal comma becomes a point. Returns `None` when the remainder is not
/// a number or lies beyond `MAX_AMOUNT`; callers skip the row in that case.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().replace('.', "").replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    let amount = Decimal::from_str(&cleaned).ok()?.round_dp(2);
    (amount.abs() <= Decimal::from(MAX_AMOUNT)).then_some(amount)
}

/// Parse a `dd.mm.yyyy` date. Anything else, including impossible calendar
/// dates like `31.04.2025`, yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let widths = [2, 2, 4];
    for (part, width) in parts.iter().zip(widths) {
        if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    let d: u32 = parts[0].parse().ok()?;
    let m: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_german_format() {
        assert_eq!(parse_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("-100,00"), Some(dec("-100")));
        assert_eq!(parse_amount("0,00"), Some(Decimal::ZERO));
        assert_eq!(parse_amount("1.000.000,99"), Some(dec("1000000.99")));
        assert_eq!(parse_amount("  42,5  "), Some(dec("42.50")));
    }

    #[test]
    fn test_parse_amount_without_decimals() {
        assert_eq!(parse_amount("250"), Some(dec("250")));
        assert_eq!(parse_amount("-7"), Some(dec("-7")));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("EUR"), None);
        assert_eq!(parse_amount("12,34,56"), None);
    }

    #[test]
    fn test_parse_amount_rejects_out_of_range() {
        assert_eq!(parse_amount("79.228.162.514.264.337.593.543.950.335"), None);
        assert_eq!(parse_amount("-1.000.000.000.000.000,01"), None);
        assert_eq!(
            parse_amount("1.000.000.000.000.000,00"),
            Some(dec("1000000000000000"))
        );
    }

    #[test]
    fn test_parse_amount_rounds_to_cents() {
        assert_eq!(parse_amount("0,125"), Some(dec("0.12")));
        assert_eq!(parse_amount("1,999"), Some(dec("2.00")));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("30.12.2025"), NaiveDate::from_ymd_opt(2025, 12, 30));
        assert_eq!(parse_date("01.01.2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_date(" 15.01.2025 "), NaiveDate::from_ymd_opt(2025, 1, 15));
    }

    #[test]
    fn test_parse_date_rejects_invalid_dates() {
        assert_eq!(parse_date("31.04.2025"), None); // April has 30 days
        assert_eq!(parse_date("29.02.2025"), None);
        assert_eq!(parse_date("01.13.2025"), None);
        assert_eq!(parse_date("00.01.2025"), None);
    }

    #[test]
    fn test_parse_date_rejects_other_patterns() {
        assert_eq!(parse_date("2025-12-30"), None);
        assert_eq!(parse_date("12/30/2025"), None);
        assert_eq!(parse_date("1.2.2025"), None);
        assert_eq!(parse_date("30.12.25"), None);
        assert_eq!(parse_date("Buchung"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date), "07.03.2025");
    }
}
