use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use vgram_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "vgram",
    version,
    about = "Variable-length gram extraction and statistics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Frequent(args) => commands::frequent::run(args),
        Command::Extract(args) => commands::extract::run(args),
        Command::Analyze(args) => commands::analyze::run(args),
    }
}
