//! # talkpack CLI
//!
//! Command-line interface for the talkpack library.

use std::io::{self, Read, Write};
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use talkpack::TalkpackError;
use talkpack::cli::Args;
use talkpack::core::summary::ChatSummary;
use talkpack::format::{to_format_string, write_to_format};
use talkpack::parser::TranscriptParser;

/// How many participant names the summary lists before "+K more".
const SUMMARY_PARTICIPANTS: usize = 5;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), TalkpackError> {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    let config = args.extract_config()?;
    let parser = TranscriptParser::with_config(config);

    let extraction = match args.input_path() {
        Some(path) => parser.extract_file(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            parser.extract(&text)
        }
    };
    let messages = &extraction.messages;
    let output_config = args.output_config();

    match args.output {
        Some(ref path) => {
            write_to_format(messages, path, args.format, &output_config)?;
            eprintln!(
                "Wrote {} messages ({}) to {}",
                messages.len(),
                args.format,
                path.display()
            );
        }
        None => {
            let rendered = to_format_string(messages, args.format, &output_config)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.is_empty() && !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    if args.summary {
        print_summary(&parser.get_chat_summary(messages), &parser);
    }

    Ok(())
}

fn print_summary(summary: &ChatSummary, parser: &TranscriptParser) {
    eprintln!("{}", summary.status_line(&parser.config().policy));
    if summary.is_empty() {
        eprintln!("  {}", summary.preview);
        return;
    }
    eprintln!("  participants: {}", summary.participant_label(SUMMARY_PARTICIPANTS));
    if let Some(ref last) = summary.last_sender {
        eprintln!("  last sender:  {}", last);
    }
    eprintln!("  time range:   {}", summary.time_range_label());
    for line in summary.preview.lines() {
        eprintln!("  > {}", line);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "talkpack=debug" } else { "talkpack=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
