pub mod handlers;

use std::process::ExitCode;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use cumret_core::error::Result;

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let overrides = cli.overrides;
    match cli.command {
        Commands::Chart {
            file,
            config,
            json,
            uploads_dir,
        } => handlers::handle_chart(file, config, &overrides, json, uploads_dir),
        Commands::Check { file, config } => handlers::handle_check(file, config, &overrides),
        Commands::Series { file, config } => handlers::handle_series(file, config, &overrides),
    }
}
