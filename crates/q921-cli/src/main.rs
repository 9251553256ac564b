//! q921 CLI entry point.

use std::{io, process::ExitCode};

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;

use cli::{Cli, Command};
use commands::SimulateArgs;
use error::CliResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Decode { frame, header_space } => commands::decode(&frame, header_space, &mut out),
        Command::Simulate { frames, replies, loss, seed, idle_ms, start } => {
            let args = SimulateArgs { frames, replies, loss, seed, idle_ms, start: start.into() };
            commands::simulate(&args, &mut out)
        },
    }
}
