//! Command line argument parsing for the uniword CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// uniword - Unicode-aware word tokenizer for full-text search
#[derive(Parser, Debug, Clone)]
#[command(name = "uniword")]
#[command(about = "Segment, normalize, and transliterate text into search tokens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct UniwordArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl UniwordArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text from a file or standard input
    Tokenize(TokenizeArgs),

    /// List the locale rule-sets
    Rules(RulesArgs),
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Input file (reads standard input when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Locale the segmenter and rule-set are chosen for
    #[arg(short, long, env = "UNIWORD_LOCALE")]
    pub locale: Option<String>,

    /// Explicit transform rule-set, e.g. "NFKD; Lower; NFKC"
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Registry configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Tokenizer name to use from the registry
    #[arg(short, long, default_value = "uniword")]
    pub name: String,

    /// Replace malformed UTF-8 with U+FFFD instead of failing
    #[arg(long)]
    pub replace_malformed: bool,

    /// Stop after this many tokens
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for listing rule-sets
#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Registry configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Show the rule-set a single locale resolves to
    #[arg(short, long)]
    pub locale: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
