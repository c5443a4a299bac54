//! lexindex CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use lexindex::cli::args::*;
use lexindex::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = LexIndexArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: LexIndexArgs) -> anyhow::Result<()> {
    let command = command_name(&args.command);
    execute_command(args).with_context(|| format!("lexindex {command} failed"))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Index(_) => "index",
        Command::Query(_) => "query",
        Command::Shell(_) => "shell",
    }
}
