mod advice;
mod calc;
mod cli;
mod commands;
mod config;
mod error;
mod history;
mod report;
mod telemetry;
mod types;
mod validate;

use crate::error::CompassError;
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, CompassError> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet)?;

    let cwd = std::env::current_dir()?;
    let session = commands::Session::open(&cwd, cli.history_file.clone())?;

    match &cli.command {
        cli::Commands::Finance(cmd) => commands::finance(&session, cmd)?,
        cli::Commands::Rank(cmd) => commands::rank(&session, cmd)?,
        cli::Commands::Advise(cmd) => commands::advise(&session, cmd)?,
        cli::Commands::Decide(cmd) => commands::decide(&session, cmd)?,
        cli::Commands::History(cmd) => commands::history(&session, cmd)?,
    }
    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_input_error() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
