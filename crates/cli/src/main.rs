use std::process::ExitCode;

use clap::Parser;

mod commands;

use commands::Command;
use efulist_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "efulist", version, about = "Everything File List (EFU) generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => commands::scan::run(args),
        Command::SampleConfig => commands::sample_config::run(),
    }
}
