//! Command implementations for the uniword CLI.

use std::fs;
use std::io::{self, Read, Write};
use std::sync::Arc;

use anyhow::Context;
use log::{debug, info};

use crate::analysis::codec::MalformedInputPolicy;
use crate::analysis::engine::BuiltinCapabilities;
use crate::analysis::token::{TokenCollector, TokenizeFlags};
use crate::analysis::tokenizer::{SegmentingTokenizer, Tokenizer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{LocaleRuleSets, RegistryConfig, TokenizerConfig};
use crate::error::TokenizerError;
use crate::fts::TokenizerRegistry;

/// Execute a CLI command.
pub fn execute_command(args: UniwordArgs) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args, &mut out),
        Command::Rules(rules_args) => list_rules(rules_args, &args, &mut out),
    }
}

/// Build the tokenizer selected by the arguments.
fn build_tokenizer(args: &TokenizeArgs) -> anyhow::Result<SegmentingTokenizer> {
    let policy = if args.replace_malformed {
        MalformedInputPolicy::Replace
    } else {
        MalformedInputPolicy::Reject
    };

    if let Some(path) = &args.config {
        let mut registry_config = RegistryConfig::from_file(path)
            .with_context(|| format!("loading registry config {}", path.display()))?;
        if args.replace_malformed {
            for tokenizer in &mut registry_config.tokenizers {
                tokenizer.malformed_input = policy;
            }
        }
        let registry = TokenizerRegistry::from_config(&registry_config, Arc::new(BuiltinCapabilities))?;
        let module = registry
            .get(&args.name)
            .with_context(|| format!("no tokenizer named '{}' in {}", args.name, path.display()))?;
        debug!("using tokenizer '{}' from {}", module.name(), path.display());
        return Ok(SegmentingTokenizer::create(module.config(), &BuiltinCapabilities)?);
    }

    let locale = args.locale.clone().unwrap_or_default();
    let mut config = if locale.is_empty() {
        TokenizerConfig::new(args.name.clone())
    } else {
        TokenizerConfig::for_locale(&locale)
    };
    if let Some(rules) = &args.rules {
        config = config.with_rules(rules.clone());
    }
    let config = config
        .with_malformed_input(policy)
        .resolve(&LocaleRuleSets::builtin());
    Ok(SegmentingTokenizer::create(&config, &BuiltinCapabilities)?)
}

fn read_input(args: &TokenizeArgs) -> anyhow::Result<Vec<u8>> {
    match &args.input {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("reading standard input")?;
            Ok(buffer)
        }
    }
}

/// Tokenize the input and print the tokens.
fn tokenize<W: Write>(args: &TokenizeArgs, cli_args: &UniwordArgs, out: &mut W) -> anyhow::Result<()> {
    let mut tokenizer = build_tokenizer(args)?;
    let input = read_input(args)?;
    info!("tokenizing {} bytes with '{}'", input.len(), tokenizer.name());

    let mut collector = match args.limit {
        Some(limit) => TokenCollector::with_limit(limit),
        None => TokenCollector::new(),
    };
    let stats = match tokenizer.tokenize(TokenizeFlags::DOCUMENT, &input, None, &mut collector) {
        Ok(stats) => Some(stats),
        Err(TokenizerError::CallbackAbort { .. }) => None,
        Err(err) => return Err(err).context("tokenization failed"),
    };

    let report = TokenizeReport {
        tokenizer: tokenizer.name().to_string(),
        rules: tokenizer.rules().to_string(),
        tokens: collector.into_tokens(),
        stats,
    };
    tokenizer.destroy();
    output_tokens(out, &report, cli_args)
}

/// Print the locale rule-set table.
fn list_rules<W: Write>(args: &RulesArgs, cli_args: &UniwordArgs, out: &mut W) -> anyhow::Result<()> {
    let table = match &args.config {
        Some(path) => {
            RegistryConfig::from_file(path)
                .with_context(|| format!("loading registry config {}", path.display()))?
                .locale_rules
        }
        None => LocaleRuleSets::builtin(),
    };

    let listing = match &args.locale {
        Some(locale) => RuleSetListing {
            root: table.root.clone(),
            locales: vec![RuleSetEntry {
                locale: locale.clone(),
                rules: table.resolve(locale).to_string(),
            }],
        },
        None => RuleSetListing {
            root: table.root.clone(),
            locales: table
                .locales()
                .map(|(locale, rules)| RuleSetEntry {
                    locale: locale.to_string(),
                    rules: rules.to_string(),
                })
                .collect(),
        },
    };
    output_rules(out, &listing, cli_args)
}
