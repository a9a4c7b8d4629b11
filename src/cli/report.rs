use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt::money;
use crate::normalize::format_date;
use crate::reports::{MonthlyBucket, Report};
use crate::settings::load_settings;
use crate::statement::StatementParser;
use crate::upload::{FsStore, UploadStore};

fn signed(val: Decimal, currency: &str) -> String {
    let s = money(val, currency);
    if val < Decimal::ZERO {
        s.red().to_string()
    } else {
        s.green().to_string()
    }
}

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn run(file: &str, details: bool, json: bool, consume: bool) -> Result<()> {
    let parser = StatementParser::from_settings(&load_settings());
    let path = Path::new(file);
    let report = if consume {
        parser.report_upload(&FsStore, path)?
    } else {
        parser.report(&FsStore.read(path)?)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let currency = parser.default_currency();
    println!("{}", summary_table(&report, currency));
    if details {
        for bucket in report.months.values().filter(|m| !m.is_empty()) {
            println!("\n{}\n{}", bucket.month_name.bold(), month_table(bucket));
        }
    }
    Ok(())
}

fn summary_table(report: &Report, currency: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expense", "Diff", "Count"]);
    for bucket in (1..=12).filter_map(|m| report.month(m)) {
        table.add_row(vec![
            Cell::new(&bucket.month_name),
            amount_cell(money(bucket.income(), currency)),
            amount_cell(money(bucket.expense(), currency)),
            amount_cell(signed(bucket.diff(), currency)),
            amount_cell(bucket.transactions.len().to_string()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        amount_cell(money(report.total.income, currency)),
        amount_cell(money(report.total.expense, currency)),
        amount_cell(signed(report.total.diff, currency)),
        amount_cell(report.transaction_count().to_string()),
    ]);
    table
}

fn month_table(bucket: &MonthlyBucket) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Valuta", "Recipient", "Description", "Amount"]);
    for t in &bucket.transactions {
        table.add_row(vec![
            Cell::new(format_date(t.date())),
            Cell::new(format_date(t.valuta_date())),
            Cell::new(t.recipient()),
            Cell::new(t.description()),
            amount_cell(signed(t.amount(), t.currency())),
        ]);
    }
    table
}
