mod args;
mod commands;

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use commands::Commands;
use tracing::debug;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LogFormat {
    #[default]
    Human,
    Json,
}

impl From<LogFormat> for logutil::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Human => logutil::LogFormat::HumanReadable,
            LogFormat::Json => logutil::LogFormat::Json,
        }
    }
}

#[derive(Parser)]
#[clap(name = "sqltype")]
#[clap(version)]
#[clap(about = "Type check SQL expressions", long_about = None)]
struct Cli {
    /// Log verbosity.
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Format of log lines written to stderr.
    #[clap(long, global = true, value_enum, default_value_t)]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logutil::init_stderr(cli.verbose, cli.log_format.into());

    debug!(version = env!("CARGO_PKG_VERSION"), "starting");

    match cli.command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
