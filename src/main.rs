mod builder;
mod cli;
mod encoding;
mod error;
mod extractor;
mod fmt;
mod listing;
mod models;
mod normalize;
mod reports;
mod settings;
mod sorting;
mod statement;
mod upload;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            file,
            details,
            json,
            consume,
        } => cli::report::run(&file, details, json, consume),
        Commands::List {
            file,
            sort_by,
            dir,
            json,
        } => cli::list::all(&file, &sort_by, &dir, json),
        Commands::Month { file, month, json } => cli::list::month(&file, month, json),
        Commands::Year { file } => cli::list::year(&file),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Init { force } => cli::config::init(force),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
