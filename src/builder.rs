use crate::extractor::{RawRow, AMOUNT, BOOKING_DATE, CURRENCY, DESCRIPTION, RECEIVER, VALUTA_DATE};
use crate::models::Transaction;
use crate::normalize::{parse_amount, parse_date};

/// Turn one extracted row into a transaction, or `None` when the booking
/// date or amount is malformed. The value date falls back to the booking
/// date when its column is missing or unparseable.
pub fn build_transaction(row: &RawRow, default_currency: &str) -> Option<Transaction> {
    let Some(date) = row.get(BOOKING_DATE).and_then(parse_date) else {
        log::debug!("line {}: bad booking date, skipped", row.line());
        return None;
    };
    let Some(amount) = row.get(AMOUNT).and_then(parse_amount) else {
        log::debug!("line {}: bad amount, skipped", row.line());
        return None;
    };
    let valuta_date = row.get(VALUTA_DATE).and_then(parse_date).unwrap_or(date);
    let currency = match row.get(CURRENCY).map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => default_currency,
    };

    Some(Transaction::new(
        date,
        valuta_date,
        row.get(RECEIVER).unwrap_or_default().trim(),
        row.get(DESCRIPTION).unwrap_or_default().trim(),
        amount,
        currency,
    ))
}

/// Build transactions from rows in file order, dropping malformed rows.
pub fn build_transactions<I>(rows: I, default_currency: &str) -> Vec<Transaction>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut seen = 0usize;
    let transactions: Vec<Transaction> = rows
        .into_iter()
        .inspect(|_| seen += 1)
        .filter_map(|row| build_transaction(&row, default_currency))
        .collect();
    if transactions.len() < seen {
        log::info!(
            "{} of {seen} rows skipped as malformed",
            seen - transactions.len()
        );
    }
    transactions
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::extractor::{extract, CsvFormat};

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        let fields: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawRow::new(1, fields)
    }

    #[test]
    fn test_build_transaction() {
        let r = row(&[
            (BOOKING_DATE, "30.12.2025"),
            (VALUTA_DATE, "29.12.2025"),
            (RECEIVER, "  Sender A "),
            (DESCRIPTION, "Zweck A"),
            (AMOUNT, "-100,00"),
            (CURRENCY, "EUR"),
        ]);
        let t = build_transaction(&r, "EUR").unwrap();
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2025, 12, 30).unwrap());
        assert_eq!(t.valuta_date(), NaiveDate::from_ymd_opt(2025, 12, 29).unwrap());
        assert_eq!(t.recipient(), "Sender A");
        assert_eq!(t.description(), "Zweck A");
        assert_eq!(t.amount(), Decimal::from_str("-100.00").unwrap());
        assert_eq!(t.currency(), "EUR");
    }

    #[test]
    fn test_build_transaction_skips_bad_date() {
        let r = row(&[(BOOKING_DATE, "31.04.2025"), (AMOUNT, "1,00")]);
        assert!(build_transaction(&r, "EUR").is_none());
        let r = row(&[(AMOUNT, "1,00")]);
        assert!(build_transaction(&r, "EUR").is_none());
    }

    #[test]
    fn test_build_transaction_skips_bad_amount() {
        let r = row(&[(BOOKING_DATE, "01.04.2025"), (AMOUNT, "n/a")]);
        assert!(build_transaction(&r, "EUR").is_none());
        let r = row(&[(BOOKING_DATE, "01.04.2025"), (AMOUNT, "")]);
        assert!(build_transaction(&r, "EUR").is_none());
    }

    #[test]
    fn test_valuta_falls_back_to_booking_date() {
        let r = row(&[(BOOKING_DATE, "01.04.2025"), (AMOUNT, "5,00")]);
        let t = build_transaction(&r, "EUR").unwrap();
        assert_eq!(t.valuta_date(), t.date());

        let r = row(&[(BOOKING_DATE, "01.04.2025"), (VALUTA_DATE, "garbage"), (AMOUNT, "5,00")]);
        let t = build_transaction(&r, "EUR").unwrap();
        assert_eq!(t.valuta_date(), t.date());
    }

    #[test]
    fn test_empty_currency_uses_default() {
        let r = row(&[(BOOKING_DATE, "01.04.2025"), (AMOUNT, "5,00"), (CURRENCY, " ")]);
        let t = build_transaction(&r, "CHF").unwrap();
        assert_eq!(t.currency(), "CHF");
    }

    #[test]
    fn test_statement_with_preamble_yields_single_transaction() {
        let text = "\
Umsatzanzeige;Datei erstellt am: 07.01.2026

IBAN;DE07 1234
Buchung;Wertstellung;Auftraggeber;Buchungstext;Notiz;Verwendungszweck;Saldo;Währung;Betrag;Währung
30.12.2025;29.12.2025;Sender A;;;Zweck A;1000,00;EUR;-100,00;EUR
";
        let format = CsvFormat::default();
        let txns = build_transactions(extract(text, &format), "EUR");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].date(), NaiveDate::from_ymd_opt(2025, 12, 30).unwrap());
        assert_eq!(txns[0].amount(), Decimal::from_str("-100.00").unwrap());
        assert_eq!(txns[0].recipient(), "Sender A");
    }

    #[test]
    fn test_build_transactions_counts_only_wellformed_rows() {
        let text = "\
Buchung;Wertstellung;Auftraggeber;Buchungstext;Notiz;Verwendungszweck;Saldo;Währung;Betrag;Währung
30.12.2025;29.12.2025;A;;;Zweck;1000,00;EUR;-100,00;EUR
31.11.2025;29.12.2025;B;;;Zweck;1000,00;EUR;-100,00;EUR
01.12.2025;01.12.2025;C;;;Zweck;1000,00;EUR;abc;EUR
02.12.2025;02.12.2025;D;;;Zweck;1000,00;EUR
03.12.2025;03.12.2025;E;;;Zweck;1000,00;EUR;7,00;EUR
";
        let format = CsvFormat::default();
        let txns = build_transactions(extract(text, &format), "EUR");
        let names: Vec<&str> = txns.iter().map(|t| t.recipient()).collect();
        assert_eq!(names, vec!["A", "E"]);
    }

    #[test]
    fn test_latin1_text_survives_round_trip() {
        let text = "\
Buchung;Wertstellung;Auftraggeber;Buchungstext;Notiz;Verwendungszweck;Saldo;Währung;Betrag;Währung
15.01.2025;15.01.2025;Empfänger B;;;Miete Straße 5 – Öl;2000,00;EUR;1.234,56;EUR
";
        let format = CsvFormat::default();
        let txns = build_transactions(extract(text, &format), "EUR");
        assert_eq!(txns[0].recipient(), "Empfänger B");
        assert_eq!(txns[0].description(), "Miete Straße 5 – Öl");
        assert_eq!(txns[0].amount(), Decimal::from_str("1234.56").unwrap());
    }
}
