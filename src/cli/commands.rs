//! Command implementations for the lexindex CLI.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LexIndexError, Result};
use crate::parallel_index::{FailurePolicy, IndexerConfig};
use crate::service::IndexService;

/// Execute a CLI command.
pub fn execute_command(args: LexIndexArgs) -> Result<()> {
    let config = load_config(&args)?;
    debug!("using configuration {config:?}");
    let service = IndexService::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Index(index_args) => run_index(&service, index_args, &args, &mut out),
        Command::Query(query_args) => run_query(&service, query_args, &args, &mut out),
        Command::Shell(shell_args) => {
            if let Some(workers) = shell_args.build_on_start {
                service.build_index(Some(workers))?;
            }
            let stdin = io::stdin();
            run_shell(&service, stdin.lock(), &mut out, args.output_format, args.pretty)
        }
    }
}

/// Resolve the indexer configuration from the file and flag overrides.
pub fn load_config(args: &LexIndexArgs) -> Result<IndexerConfig> {
    let mut config = match &args.config {
        Some(path) => IndexerConfig::from_json_file(path)?,
        None => IndexerConfig::default(),
    };

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if args.skip_unreadable {
        config.failure_policy = FailurePolicy::SkipUnreadable;
    }

    config.validate()?;
    Ok(config)
}

fn run_index(
    service: &IndexService,
    index_args: &IndexArgs,
    args: &LexIndexArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let report = service.build_index_with_report(index_args.workers)?;
    let output = IndexOutput::from_report(report, index_args.detailed);
    write_output(out, &output, args.output_format, args.pretty)
}

fn run_query(
    service: &IndexService,
    query_args: &QueryArgs,
    args: &LexIndexArgs,
    out: &mut dyn Write,
) -> Result<()> {
    service.build_index(query_args.workers)?;
    let output = QueryOutput {
        word: query_args.word.clone(),
        documents: service.query(&query_args.word)?,
    };
    write_output(out, &output, args.output_format, args.pretty)
}

/// Read shell commands from `input` until it ends or `quit` is read.
///
/// Recognized commands: `is-indexed`, `index [WORKERS]`, `query WORD`,
/// `stats`, `help` and `quit`/`exit`. Errors from a command are printed and
/// the shell keeps going.
pub fn run_shell<R: BufRead>(
    service: &IndexService,
    input: R,
    out: &mut dyn Write,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    for line in input.lines() {
        let line = line.map_err(|e| LexIndexError::other(format!("Failed to read input: {e}")))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let result = match command {
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "commands: is-indexed | index [WORKERS] | query WORD | stats | quit")
                    .map_err(|e| LexIndexError::other(format!("Failed to write output: {e}")))
            }
            "is-indexed" => write_output(out, &IndexedStatus(service.is_indexed()), format, pretty),
            "index" => shell_index(service, rest)
                .and_then(|output| write_output(out, &output, format, pretty)),
            "query" => service.query(rest).and_then(|documents| {
                let output = QueryOutput {
                    word: rest.to_string(),
                    documents,
                };
                write_output(out, &output, format, pretty)
            }),
            "stats" => write_output(out, &service.stats(), format, pretty),
            other => Err(LexIndexError::invalid_argument(format!(
                "unknown command '{other}'"
            ))),
        };

        if let Err(e) = result {
            write_output(out, &ErrorOutput::from(&e), format, pretty)?;
        }
    }
    Ok(())
}

fn shell_index(service: &IndexService, rest: &str) -> Result<IndexOutput> {
    let workers = if rest.is_empty() {
        None
    } else {
        let workers = rest.parse::<usize>().map_err(|_| {
            LexIndexError::invalid_argument(format!("'{rest}' is not a worker count"))
        })?;
        Some(workers)
    };
    let report = service.build_index_with_report(workers)?;
    Ok(IndexOutput::from_report(report, false))
}
