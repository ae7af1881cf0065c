//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::TokenizeStats;
use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, UniwordArgs};

/// Result of the tokenize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeReport {
    pub tokenizer: String,
    pub rules: String,
    pub tokens: Vec<Token>,
    /// Counters; absent when the run was stopped by `--limit`
    pub stats: Option<TokenizeStats>,
}

/// One entry of the rules command.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleSetEntry {
    pub locale: String,
    pub rules: String,
}

/// Result of the rules command.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleSetListing {
    pub root: String,
    pub locales: Vec<RuleSetEntry>,
}

/// Write the tokenize report in the requested format.
pub fn output_tokens<W: Write>(out: &mut W, report: &TokenizeReport, args: &UniwordArgs) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(out, report, args),
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "tokenizer: {} ({})", report.tokenizer, report.rules)?;
            }
            for token in &report.tokens {
                writeln!(
                    out,
                    "{}\t{}..{}\t{}",
                    token.position, token.start_offset, token.end_offset, token.text
                )?;
            }
            if let (Some(stats), true) = (&report.stats, args.verbosity() > 1) {
                writeln!(
                    out,
                    "{} tokens from {} code units ({} non-word segments skipped)",
                    stats.tokens, stats.code_units, stats.skipped_non_word
                )?;
            }
            Ok(())
        }
    }
}

/// Write the rule-set listing in the requested format.
pub fn output_rules<W: Write>(out: &mut W, listing: &RuleSetListing, args: &UniwordArgs) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(out, listing, args),
        OutputFormat::Human => {
            writeln!(out, "{:<8} {}", "root", listing.root)?;
            for entry in &listing.locales {
                writeln!(out, "{:<8} {}", entry.locale, entry.rules)?;
            }
            Ok(())
        }
    }
}

fn output_json<W: Write, T: Serialize>(out: &mut W, value: &T, args: &UniwordArgs) -> anyhow::Result<()> {
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
