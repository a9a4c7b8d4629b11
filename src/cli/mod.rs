pub mod config;
pub mod list;
pub mod report;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::extractor::RawRow;
use crate::statement::StatementParser;
use crate::upload::{FsStore, UploadStore};

/// Extracted rows of the statement at `file`, using the saved settings.
pub(crate) fn load_rows(file: &str) -> Result<(StatementParser, Vec<RawRow>)> {
    let parser = StatementParser::from_settings(&crate::settings::load_settings());
    let bytes = FsStore.read(Path::new(file))?;
    let rows = parser.rows(&bytes);
    Ok((parser, rows))
}

#[derive(Parser)]
#[command(
    name = "account-analyzer",
    version,
    about = "Monthly income/expense reports from German bank CSV exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Income, expense and difference per month for one statement.
    Report {
        /// Path to the exported CSV statement
        file: String,
        /// List each month's transactions below the summary
        #[arg(long)]
        details: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Delete the file once it has been parsed
        #[arg(long)]
        consume: bool,
    },
    /// List all rows, sorted by one column.
    List {
        /// Path to the exported CSV statement
        file: String,
        /// Column to sort by: bookingDate, bookingTimestamp, receiver, description, amount, ...
        #[arg(long = "sort-by", default_value = "bookingTimestamp")]
        sort_by: String,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        dir: String,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the rows of one month, sorted by receiver.
    Month {
        /// Path to the exported CSV statement
        file: String,
        /// Month number, 1-12
        #[arg(long)]
        month: u32,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Row count and sum for each month of the year.
    Year {
        /// Path to the exported CSV statement
        file: String,
    },
    /// Show or create the settings file.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings.
    Show,
    /// Write the default settings file.
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
