//! gameid CLI
//!
//! Command-line interface for extracting PlayStation Game IDs from disc
//! images.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_set_root, run_config_show};
use commands::extract::run_extract;
use commands::scan::run_scan;
use error::CliError;

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Extract { paths, output } => run_extract(paths, output.json, cli.quiet),
        Commands::Scan { layout, output } => run_scan(cli.root, layout, output.json, cli.quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                run_config_show(cli.root);
                Ok(())
            }
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::SetRoot { path, clear } => run_config_set_root(path, cli.root, clear),
        },
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
