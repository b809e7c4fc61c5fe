mod cli;
mod ops;
mod reports;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("coremodel: {err}");
        return ExitCode::FAILURE;
    }

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            let args: Vec<String> = std::env::args().skip(1).collect();
            eprintln!("coremodel: the generator does not accept any arguments, got {args:?}");
            return ExitCode::FAILURE;
        }
    };

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("coremodel: {}", one_line(&format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

/// Collapse a multi-line error chain so the diagnostic stays on one line.
fn one_line(msg: &str) -> String {
    msg.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
