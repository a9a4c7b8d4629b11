use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// German month name, or the number itself outside 1..=12.
pub fn month_name(month: u32) -> Cow<'static, str> {
    match month {
        1..=12 => Cow::Borrowed(MONTH_NAMES[(month - 1) as usize]),
        _ => Cow::Owned(month.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Running sums. `expense` stays negative; `diff` is `income + expense`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub diff: Decimal,
}

impl Totals {
    /// Totals with `amount` added, or `None` if any sum would overflow.
    fn checked_add(self, amount: Decimal) -> Option<Self> {
        let (income, expense) = if amount >= Decimal::ZERO {
            (self.income.checked_add(amount)?, self.expense)
        } else {
            (self.income, self.expense.checked_add(amount)?)
        };
        Some(Self {
            income,
            expense,
            diff: self.diff.checked_add(amount)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub month_number: u32,
    pub month_name: String,
    #[serde(flatten)]
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
}

impl MonthlyBucket {
    fn empty(month: u32) -> Self {
        Self {
            month_number: month,
            month_name: month_name(month).into_owned(),
            totals: Totals::default(),
            transactions: Vec::new(),
        }
    }

    pub fn income(&self) -> Decimal {
        self.totals.income
    }

    pub fn expense(&self) -> Decimal {
        self.totals.expense
    }

    pub fn diff(&self) -> Decimal {
        self.totals.diff
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: Totals,
    /// Always holds months 1 through 12.
    pub months: BTreeMap<u32, MonthlyBucket>,
}

impl Report {
    pub fn month(&self, month: u32) -> Option<&MonthlyBucket> {
        self.months.get(&month)
    }

    pub fn transaction_count(&self) -> usize {
        self.months.values().map(|m| m.transactions.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Bucket transactions by calendar month (year is ignored) and sum them.
///
/// Each month's list ends up in ascending date order; transactions on the
/// same day keep their input order. A transaction that would overflow a sum
/// is left out of the report.
pub fn generate_report(transactions: &[Transaction]) -> Report {
    let mut total = Totals::default();
    let mut months: BTreeMap<u32, MonthlyBucket> =
        (1..=12).map(|m| (m, MonthlyBucket::empty(m))).collect();

    for txn in transactions {
        let bucket = months
            .entry(txn.date().month())
            .or_insert_with_key(|&m| MonthlyBucket::empty(m));
        let (Some(month_totals), Some(new_total)) = (
            bucket.totals.checked_add(txn.amount()),
            total.checked_add(txn.amount()),
        ) else {
            log::warn!("amount {} on {} overflows the totals, skipped", txn.amount(), txn.date());
            continue;
        };
        bucket.totals = month_totals;
        total = new_total;
        bucket.transactions.push(txn.clone());
    }

    for bucket in months.values_mut() {
        bucket.transactions.sort_by_key(|t| t.date());
    }

    Report { total, months }
}
