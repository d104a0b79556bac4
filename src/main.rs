mod cli;
mod config;
mod form;
mod logging;
mod model;
mod notify;
mod registry;
mod selection;
mod submit;
mod tui;
mod validate;

use std::process;

use clap::Parser;

use cli::Cli;
use config::CatalogSource;
use logging::LogTarget;

fn main() {
    let cli = Cli::parse();

    let log_target = if cli.command.is_some() {
        Some(LogTarget::Stderr)
    } else {
        LogTarget::default_file()
    };
    if let Some(target) = &log_target
        && let Err(e) = logging::init(target)
    {
        eprintln!("Warning: logging disabled: {e}");
    }

    let registry = match CatalogSource::resolve(cli.catalog.as_deref()).load() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load channel catalog: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Some(command) => cli::run(command, &registry),
        None => tui::run(&registry).map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
