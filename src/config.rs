//! Tokenizer configuration.
//!
//! The locale and rule-set of a tokenizer are fixed when it is registered.
//! [`LocaleRuleSets`] maps locale tags to rule-set strings so that one process
//! can host a tokenizer per locale; [`RegistryConfig`] lists the tokenizers to
//! register and can be loaded from JSON.
//!
//! ```json
//! {
//!   "tokenizers": [
//!     { "name": "uniword" },
//!     { "name": "uniword_ja", "locale": "ja" },
//!     { "name": "lenient", "malformed_input": "replace" }
//!   ],
//!   "locale_rules": {
//!     "root": "NFKD; Lower; NFKC",
//!     "locales": { "ja": "NFKD; Katakana-Hiragana; Lower; NFKC" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::codec::MalformedInputPolicy;
use crate::error::{Result, TokenizerError};

/// Name of the tokenizer bound to the root locale.
pub const DEFAULT_TOKENIZER_NAME: &str = "uniword";

/// Rule-set for text of mixed or unknown language.
pub const ROOT_RULES: &str = "NFKD; Arabic-Latin; Cyrillic-Latin; Hebrew-Latin; Greek-Latin; Latin-ASCII; \
     Lower; NFKC; Traditional-Simplified; Katakana-Hiragana";

const BUILTIN_LOCALE_RULES: &[(&str, &str)] = &[
    ("ar", "NFKD; Arabic-Latin; Lower; NFKC"),
    ("el", "NFKD; Greek-Latin; Lower; NFKC"),
    ("he", "NFKD; Hebrew-Latin; Lower; NFKC"),
    ("ja", "NFKD; Katakana-Hiragana; Lower; NFKC"),
    ("ko", "NFKD; Lower; NFKC"),
    ("ru", "NFKD; Cyrillic-Latin; Lower; NFKC"),
    ("th", "NFKD; Lower; NFKC"),
    ("zh", "NFKD; Traditional-Simplified; Lower; NFKC"),
];

/// Mapping from locale tag to transform rule-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleRuleSets {
    /// Rules used when no locale entry matches
    pub root: String,
    /// Rules per locale tag
    pub locales: BTreeMap<String, String>,
}

impl Default for LocaleRuleSets {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocaleRuleSets {
    /// The presets shipped with the crate.
    pub fn builtin() -> Self {
        LocaleRuleSets {
            root: ROOT_RULES.to_string(),
            locales: BUILTIN_LOCALE_RULES
                .iter()
                .map(|(locale, rules)| (locale.to_string(), rules.to_string()))
                .collect(),
        }
    }

    /// A table with only root rules.
    pub fn with_root<S: Into<String>>(root: S) -> Self {
        LocaleRuleSets {
            root: root.into(),
            locales: BTreeMap::new(),
        }
    }

    /// Add or replace the rules for `locale`.
    pub fn insert<L: AsRef<str>, R: Into<String>>(&mut self, locale: L, rules: R) {
        self.locales.insert(canonical_locale(locale.as_ref()), rules.into());
    }

    /// Rules for `locale`, falling back from `xx-YY` to `xx` and then to root.
    pub fn resolve(&self, locale: &str) -> &str {
        let mut tag = canonical_locale(locale);
        loop {
            if let Some(rules) = self.locales.get(&tag) {
                return rules;
            }
            match tag.rfind('-') {
                Some(cut) => tag.truncate(cut),
                None => return &self.root,
            }
        }
    }

    /// Locale tags with their own entry, in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = (&str, &str)> {
        self.locales.iter().map(|(l, r)| (l.as_str(), r.as_str()))
    }
}

/// Lowercase tag with `-` separators: `zh_Hant_TW` → `zh-hant-tw`.
pub fn canonical_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

/// Configuration of one tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Name the tokenizer is registered under
    pub name: String,
    /// Locale passed to the segmenter; empty for root
    pub locale: String,
    /// Explicit rule-set; when absent it is resolved from the locale table
    pub rules: Option<String>,
    /// What to do with input that is not valid UTF-8
    pub malformed_input: MalformedInputPolicy,
    /// Initial transform scratch capacity, in code units
    pub initial_scratch_units: usize,
    /// Initial output buffer capacity, in bytes
    pub initial_output_bytes: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            name: DEFAULT_TOKENIZER_NAME.to_string(),
            locale: String::new(),
            rules: None,
            malformed_input: MalformedInputPolicy::Reject,
            initial_scratch_units: 0,
            initial_output_bytes: 0,
        }
    }
}

impl TokenizerConfig {
    /// Create a root-locale configuration with the given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        TokenizerConfig {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Configuration named `uniword_<locale>` for the given locale.
    pub fn for_locale(locale: &str) -> Self {
        let tag = canonical_locale(locale).replace('-', "_");
        TokenizerConfig {
            name: format!("{DEFAULT_TOKENIZER_NAME}_{tag}"),
            locale: locale.to_string(),
            ..Default::default()
        }
    }

    pub fn with_locale<S: Into<String>>(mut self, locale: S) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_rules<S: Into<String>>(mut self, rules: S) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn with_malformed_input(mut self, policy: MalformedInputPolicy) -> Self {
        self.malformed_input = policy;
        self
    }

    pub fn with_initial_scratch_units(mut self, units: usize) -> Self {
        self.initial_scratch_units = units;
        self
    }

    pub fn with_initial_output_bytes(mut self, bytes: usize) -> Self {
        self.initial_output_bytes = bytes;
        self
    }

    /// The rule-set this tokenizer uses, given a locale table.
    pub fn resolved_rules(&self, table: &LocaleRuleSets) -> String {
        match &self.rules {
            Some(rules) => rules.clone(),
            None => table.resolve(&self.locale).to_string(),
        }
    }

    /// Pin the rule-set so later lookups no longer depend on a table.
    pub fn resolve(mut self, table: &LocaleRuleSets) -> Self {
        self.rules = Some(self.resolved_rules(table));
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TokenizerError::config("tokenizer name must not be empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(TokenizerError::config(format!(
                "tokenizer name '{}' contains whitespace",
                self.name
            )));
        }
        Ok(())
    }
}

/// The set of tokenizers to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub tokenizers: Vec<TokenizerConfig>,
    pub locale_rules: LocaleRuleSets,
}

impl Default for RegistryConfig {
    /// `uniword` for the root locale plus `uniword_<lang>` for every preset.
    fn default() -> Self {
        let locale_rules = LocaleRuleSets::builtin();
        let mut tokenizers = vec![TokenizerConfig::default()];
        tokenizers.extend(
            locale_rules
                .locales()
                .map(|(locale, _)| TokenizerConfig::for_locale(locale)),
        );
        RegistryConfig {
            tokenizers,
            locale_rules,
        }
    }
}

impl RegistryConfig {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check that every tokenizer is valid and names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = AHashSet::new();
        for tokenizer in &self.tokenizers {
            tokenizer.validate()?;
            if !seen.insert(tokenizer.name.as_str()) {
                return Err(TokenizerError::config(format!(
                    "duplicate tokenizer name '{}'",
                    tokenizer.name
                )));
            }
        }
        Ok(())
    }
}
