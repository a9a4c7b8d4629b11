use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// A booked statement line. Built once by the builder, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    date: NaiveDate,
    valuta_date: NaiveDate,
    recipient: String,
    description: String,
    amount: Decimal,
    currency: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        valuta_date: NaiveDate,
        recipient: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            valuta_date,
            recipient: recipient.into(),
            description: description.into(),
            amount,
            currency: currency.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn valuta_date(&self) -> NaiveDate {
        self.valuta_date
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}
