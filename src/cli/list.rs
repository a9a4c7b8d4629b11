use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::load_rows;
use crate::error::Result;
use crate::extractor::{AMOUNT, BOOKING_DATE, CURRENCY, DESCRIPTION, RECEIVER};
use crate::fmt::money;
use crate::listing::{self, Listing};
use crate::reports::month_name;
use crate::sorting::SortDirection;

fn rows_table(listing: &Listing) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Recipient", "Description", "Amount", "Currency"]);
    for row in &listing.rows {
        let field = |name| row.get(name).unwrap_or_default().trim();
        table.add_row(vec![
            Cell::new(field(BOOKING_DATE)),
            Cell::new(field(RECEIVER)),
            Cell::new(field(DESCRIPTION)),
            Cell::new(field(AMOUNT)).set_alignment(CellAlignment::Right),
            Cell::new(field(CURRENCY)),
        ]);
    }
    table
}

fn print_listing(title: &str, listing: &Listing, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }
    println!("{}\n{}", title.bold(), rows_table(listing));
    println!("Sum:       {}", listing.sum_display);
    println!("Sorted by: {} {}", listing.sort_by, listing.sort_dir);
    println!("sortDir:   {}", listing.next_sort_dir);
    Ok(())
}

pub fn all(file: &str, sort_by: &str, dir: &str, json: bool) -> Result<()> {
    let direction: SortDirection = dir.parse()?;
    let (parser, rows) = load_rows(file)?;
    let data = listing::analyze(&rows, sort_by, direction, parser.default_currency());
    print_listing("All transactions", &data, json)
}

pub fn month(file: &str, month: u32, json: bool) -> Result<()> {
    let (parser, rows) = load_rows(file)?;
    let data = listing::month(&rows, month, parser.default_currency())?;
    print_listing(&month_name(month), &data, json)
}

pub fn year(file: &str) -> Result<()> {
    let (parser, rows) = load_rows(file)?;
    let currency = parser.default_currency();
    let grouped = listing::group_by_month(&rows);

    let mut table = Table::new();
    table.set_header(vec!["#", "Month", "Rows", "Sum"]);
    for m in 1..=12 {
        let month_rows = grouped.get(&m).map(Vec::as_slice).unwrap_or_default();
        table.add_row(vec![
            Cell::new(m),
            Cell::new(month_name(m)),
            Cell::new(month_rows.len()).set_alignment(CellAlignment::Right),
            Cell::new(money(listing::sum_amounts(month_rows), currency))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}
