//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser as ClapParser;

use chatsift::Result;
use chatsift::cli::{Args, unescape_newlines};
use chatsift::core::{ParseResult, ParseStatus};
use chatsift::format::InputFormat;
use chatsift::logging::init_logging;
use chatsift::pipeline::ParsePipeline;

/// Worst outcome seen across all inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Outcome {
    Success,
    ClientError,
    Failure,
}

impl Outcome {
    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::ClientError => ExitCode::from(2),
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    let args = <Args as ClapParser>::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let pipeline = ParsePipeline::with_config(args.parser_config());
    let format = InputFormat::from(args.format);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut worst = Outcome::Success;

    for input in &args.inputs {
        let content = match read_input(input) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: cannot read {input}: {e}");
                worst = worst.max(Outcome::Failure);
                continue;
            }
        };
        let content = if args.unescape_newlines {
            unescape_newlines(&content)
        } else {
            content
        };

        let result = pipeline.parse_with(&content, format, args.use_cache());
        write_result(&mut out, &result, args.records_only)?;

        worst = worst.max(match result.status() {
            ParseStatus::Success => Outcome::Success,
            ParseStatus::ClientError => Outcome::ClientError,
            ParseStatus::ServerError => Outcome::Failure,
        });
    }
    out.flush()?;

    if args.cache_stats {
        eprintln!("cache: {}", serde_json::to_string(&pipeline.cache_stats())?);
    }

    Ok(worst)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_result(out: &mut impl Write, result: &ParseResult, records_only: bool) -> Result<()> {
    if records_only {
        for record in result.records() {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        }
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(&result.to_envelope())?)?;
    }
    Ok(())
}
