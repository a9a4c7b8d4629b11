use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AnalyzerError, Result};
use crate::extractor::{RawRow, AMOUNT, BOOKING_DATE, CURRENCY, RECEIVER};
use crate::fmt::money;
use crate::normalize::{parse_amount, parse_date};
use crate::sorting::{sort_rows, SortDirection};

/// Derived field: booking date as Unix seconds (midnight UTC), as text.
pub const BOOKING_TIMESTAMP: &str = "bookingTimestamp";

/// A sorted set of raw rows ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub rows: Vec<RawRow>,
    pub sort_by: String,
    /// Direction the rows are in.
    pub sort_dir: SortDirection,
    /// Direction to request on the next click.
    pub next_sort_dir: SortDirection,
    pub sum: Decimal,
    pub sum_display: String,
}

/// Rows with a `bookingTimestamp` field added. Rows whose booking date does
/// not parse are dropped.
pub fn with_timestamps(rows: &[RawRow]) -> Vec<RawRow> {
    rows.iter()
        .filter_map(|row| {
            let date = row.get(BOOKING_DATE).and_then(parse_date)?;
            let ts = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
            Some(row.with_field(BOOKING_TIMESTAMP, ts.to_string()))
        })
        .collect()
}

/// Sum of every parseable amount; other rows count as zero, and so does an
/// amount that would overflow the sum.
pub fn sum_amounts(rows: &[RawRow]) -> Decimal {
    rows.iter()
        .filter_map(|row| row.get(AMOUNT).and_then(parse_amount))
        .fold(Decimal::ZERO, |sum, amount| {
            sum.checked_add(amount).unwrap_or_else(|| {
                log::warn!("amount {amount} overflows the listing sum, skipped");
                sum
            })
        })
}

fn listing_currency<'a>(rows: &'a [RawRow], default_currency: &'a str) -> &'a str {
    rows.iter()
        .filter_map(|row| row.get(CURRENCY).map(str::trim))
        .find(|c| !c.is_empty())
        .unwrap_or(default_currency)
}

fn build_listing(
    rows: Vec<RawRow>,
    sort_by: &str,
    direction: SortDirection,
    default_currency: &str,
) -> Listing {
    let rows = sort_rows(rows, sort_by, direction);
    let sum = sum_amounts(&rows);
    let sum_display = money(sum, listing_currency(&rows, default_currency));
    Listing {
        rows,
        sort_by: sort_by.to_string(),
        sort_dir: direction,
        next_sort_dir: direction.toggled(),
        sum,
        sum_display,
    }
}

/// All rows sorted by `sort_by`.
pub fn analyze(
    rows: &[RawRow],
    sort_by: &str,
    direction: SortDirection,
    default_currency: &str,
) -> Listing {
    build_listing(with_timestamps(rows), sort_by, direction, default_currency)
}

/// Rows keyed by booking month (1-12). Months without rows are absent.
pub fn group_by_month(rows: &[RawRow]) -> BTreeMap<u32, Vec<RawRow>> {
    let mut months: BTreeMap<u32, Vec<RawRow>> = BTreeMap::new();
    for row in with_timestamps(rows) {
        if let Some(date) = row.get(BOOKING_DATE).and_then(parse_date) {
            months.entry(date.month()).or_default().push(row);
        }
    }
    months
}

/// Rows of one month sorted ascending by receiver.
pub fn month(rows: &[RawRow], month: u32, default_currency: &str) -> Result<Listing> {
    if !(1..=12).contains(&month) {
        return Err(AnalyzerError::InvalidMonth(month));
    }
    let rows = group_by_month(rows).remove(&month).unwrap_or_default();
    Ok(build_listing(rows, RECEIVER, SortDirection::Asc, default_currency))
}
