//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - Input format selector
//! - [`LogLevel`] - Default log verbosity

use clap::{Parser, ValueEnum};

use crate::config::{DEFAULT_CACHE_CAPACITY, ParserConfig};
use crate::format::InputFormat;

/// Parse, clean and deduplicate exported chat logs.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift -f txt wechat_export.txt
    chatsift -f xml chat.xml --records-only
    cat chat.txt | chatsift -f txt -
    chatsift -f txt a.txt b.txt --cache-stats

EXIT STATUS:
    0  every input parsed
    1  a server error or an unreadable input
    2  a client error (empty input, unrecognized format)")]
pub struct Args {
    /// Input files, `-` reads stdin
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Input format
    #[arg(short, long, value_enum)]
    pub format: FormatArg,

    /// Parse every input from scratch
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum number of cached parse results
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Turn literal `\n` sequences into line breaks before parsing
    #[arg(long)]
    pub unescape_newlines: bool,

    /// Print records as JSON Lines instead of the response envelope
    #[arg(long)]
    pub records_only: bool,

    /// Print cache statistics to stderr when done
    #[arg(long)]
    pub cache_stats: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Args {
    /// Pipeline configuration derived from the flags.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_cache_capacity(self.cache_capacity)
    }

    /// Whether the cache is consulted.
    pub fn use_cache(&self) -> bool {
        !self.no_cache
    }
}

/// Input format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plaintext export (timestamped or plain, auto-detected)
    Txt,
    /// XML export
    Xml,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => InputFormat::Txt,
            FormatArg::Xml => InputFormat::Xml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Replaces literal `\n` escape sequences with line breaks.
pub fn unescape_newlines(content: &str) -> String {
    content.replace("\\n", "\n")
}
