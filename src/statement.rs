use std::path::Path;

use crate::builder::build_transactions;
use crate::error::Result;
use crate::extractor::{extract_bytes, CsvFormat, RawRow};
use crate::models::Transaction;
use crate::reports::{generate_report, Report};
use crate::settings::Settings;
use crate::upload::{consume, UploadStore};

/// Parses statement bytes with one fixed format. Holds no state between
/// calls, so parsing the same bytes twice gives the same result.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    format: CsvFormat,
    default_currency: String,
}

impl StatementParser {
    pub fn new(format: CsvFormat, default_currency: impl Into<String>) -> Self {
        Self {
            format,
            default_currency: default_currency.into(),
        }
    }

    /// ING layout with the user's default currency.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(CsvFormat::default(), settings.default_currency.clone())
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    pub fn rows(&self, bytes: &[u8]) -> Vec<RawRow> {
        extract_bytes(bytes, &self.format)
    }

    pub fn transactions(&self, bytes: &[u8]) -> Vec<Transaction> {
        build_transactions(self.rows(bytes), &self.default_currency)
    }

    pub fn report(&self, bytes: &[u8]) -> Report {
        let transactions = self.transactions(bytes);
        log::debug!("{} transactions parsed", transactions.len());
        generate_report(&transactions)
    }

    /// Read an upload from `store`, build the report and delete the upload.
    pub fn report_upload<S: UploadStore + ?Sized>(&self, store: &S, path: &Path) -> Result<Report> {
        consume(store, path, |bytes| Ok(self.report(bytes)))
    }
}
