//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::fs;
use std::io::{self, Read, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatsift::ChatsiftError;
use chatsift::cli::{Args, OutputFormat};
use chatsift::core::{ConversationStats, apply_filters, to_csv, to_json, to_jsonl};
use chatsift::pipeline::import_source;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), ChatsiftError> {
    let start = Instant::now();
    let filter_config = args.filter_config()?;

    let raw = read_input(&args.input)?;
    log::info!("Read {} bytes from {}", raw.len(), args.input);

    let messages = import_source(&raw, args.source, &args.import_config())?;
    let imported = messages.len();
    let messages = apply_filters(messages, &filter_config);

    if args.stats {
        let stats = ConversationStats::from_messages(&messages);
        return emit("-", &format!("{stats}\n"));
    }

    let output_config = args.output_config();
    let rendered = match args.format {
        OutputFormat::Csv => to_csv(&messages, &output_config)?,
        OutputFormat::Json => to_json(&messages, &output_config)? + "\n",
        OutputFormat::Jsonl => to_jsonl(&messages, &output_config)?,
    };
    emit(&args.output, &rendered)?;

    if args.output != "-" {
        eprintln!(
            "{} of {} messages written to {} as {} ({:.2}s)",
            messages.len(),
            imported,
            args.output,
            args.format,
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Reads the whole input as UTF-8, from stdin when `path` is `-`.
fn read_input(path: &str) -> Result<String, ChatsiftError> {
    let bytes = if path == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        fs::read(path)?
    };
    Ok(String::from_utf8(bytes)?)
}

/// Writes `content` to `path`, or to stdout when `path` is `-`.
fn emit(path: &str, content: &str) -> Result<(), ChatsiftError> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    } else {
        fs::write(path, content)?;
    }
    Ok(())
}
