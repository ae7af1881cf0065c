//! Tokenizer instances.
//!
//! A [`SegmentingTokenizer`] owns one segmenter handle and one transliterator
//! handle for its whole life. Each tokenize call converts the input to UTF-16,
//! walks the word boundaries, and pushes every transformed token to a sink
//! with the byte range it covers in the original input.
//!
//! # Examples
//!
//! ```
//! use uniword::analysis::engine::BuiltinCapabilities;
//! use uniword::analysis::tokenizer::{SegmentingTokenizer, Tokenizer};
//! use uniword::config::TokenizerConfig;
//!
//! let mut tokenizer =
//!     SegmentingTokenizer::create(&TokenizerConfig::default(), &BuiltinCapabilities).unwrap();
//! let tokens = tokenizer.tokenize_str("Hello, Wörld!").unwrap();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 13));
//! ```

use std::fmt;

use log::{debug, trace, warn};

use crate::analysis::codec::{MalformedInputPolicy, Utf16Text};
use crate::analysis::engine::{CapabilityProvider, SegmenterHandle, TransliteratorHandle};
use crate::analysis::pipeline::{TokenPipeline, TokenizeStats};
use crate::analysis::segmenter::WordBoundaries;
use crate::analysis::token::{Token, TokenCollector, TokenSink, TokenizeFlags};
use crate::config::{LocaleRuleSets, TokenizerConfig};
use crate::error::Result;

/// Trait for tokenizers that push tokens to a sink.
///
/// Tokenizing mutates the instance's capability handles, so one instance
/// serves one call at a time; different instances are independent.
pub trait Tokenizer {
    /// Tokenize `text`, emitting every token to `sink` in boundary order.
    ///
    /// `locale` is a per-call hint from the host. Instances are bound to a
    /// locale at creation, so the hint does not change segmentation.
    fn tokenize(
        &mut self,
        flags: TokenizeFlags,
        text: &[u8],
        locale: Option<&str>,
        sink: &mut dyn TokenSink,
    ) -> Result<TokenizeStats>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &str;

    /// Tokenize a string into a vector of tokens.
    fn tokenize_str(&mut self, text: &str) -> Result<Vec<Token>> {
        let mut collector = TokenCollector::new();
        self.tokenize(TokenizeFlags::DOCUMENT, text.as_bytes(), None, &mut collector)?;
        Ok(collector.into_tokens())
    }
}

/// Tokenizer backed by a word segmenter and a transliterator.
pub struct SegmentingTokenizer {
    name: String,
    locale: String,
    rules: String,
    malformed_input: MalformedInputPolicy,
    initial_scratch_units: usize,
    initial_output_bytes: usize,
    // Fields drop in declaration order: the transliterator is closed before the segmenter.
    transliterator: TransliteratorHandle,
    segmenter: SegmenterHandle,
}

impl SegmentingTokenizer {
    /// Open both capability handles for `config`.
    ///
    /// If the transliterator cannot be opened the segmenter already opened is
    /// closed again before the error is returned.
    pub fn create(config: &TokenizerConfig, provider: &dyn CapabilityProvider) -> Result<Self> {
        config.validate()?;
        let rules = match &config.rules {
            Some(rules) => rules.clone(),
            None => LocaleRuleSets::builtin().resolve(&config.locale).to_string(),
        };

        let segmenter = provider.open_segmenter(&config.locale)?;
        let transliterator = match provider.open_transliterator(&rules) {
            Ok(transliterator) => transliterator,
            Err(err) => {
                debug!(
                    "closing segmenter for '{}': transliterator failed: {err}",
                    config.name
                );
                drop(segmenter);
                return Err(err);
            }
        };

        debug!(
            "created tokenizer '{}' (locale '{}', rules '{rules}', provider {})",
            config.name,
            config.locale,
            provider.name()
        );
        Ok(SegmentingTokenizer {
            name: config.name.clone(),
            locale: config.locale.clone(),
            rules,
            malformed_input: config.malformed_input,
            initial_scratch_units: config.initial_scratch_units,
            initial_output_bytes: config.initial_output_bytes,
            transliterator,
            segmenter,
        })
    }

    /// Release both handles, in reverse order of acquisition.
    pub fn destroy(self) {
        debug!("destroying tokenizer '{}'", self.name);
        let SegmentingTokenizer {
            transliterator,
            segmenter,
            ..
        } = self;
        drop(transliterator);
        drop(segmenter);
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn rules(&self) -> &str {
        &self.rules
    }

    pub fn malformed_input(&self) -> MalformedInputPolicy {
        self.malformed_input
    }
}

impl Tokenizer for SegmentingTokenizer {
    fn tokenize(
        &mut self,
        flags: TokenizeFlags,
        text: &[u8],
        locale: Option<&str>,
        sink: &mut dyn TokenSink,
    ) -> Result<TokenizeStats> {
        trace!(
            "tokenize '{}': {} bytes, flags {:#x}, locale hint {locale:?}",
            self.name,
            text.len(),
            flags.0
        );
        let mut stats = TokenizeStats::default();
        if text.is_empty() {
            return Ok(stats);
        }

        let utf16 = Utf16Text::from_utf8(text, self.malformed_input)
            .inspect_err(|err| warn!("tokenize '{}' rejected input: {err}", self.name))?;
        stats.code_units = utf16.len();
        self.segmenter.set_text(utf16.units())?;

        let mut pipeline = TokenPipeline::new(self.initial_scratch_units, self.initial_output_bytes)?;
        let mut boundaries = WordBoundaries::new(self.segmenter.as_mut(), utf16.len())?;
        for segment in boundaries.by_ref() {
            pipeline.process(&utf16, segment?, self.transliterator.as_mut(), sink)?;
        }

        stats.skipped_non_word = boundaries.skipped();
        pipeline.record(&mut stats);
        Ok(stats)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for SegmentingTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentingTokenizer")
            .field("name", &self.name)
            .field("locale", &self.locale)
            .field("rules", &self.rules)
            .field("malformed_input", &self.malformed_input)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::BuiltinCapabilities;
    use crate::analysis::token::{Flow, TokenFlags};
    use crate::error::ErrorKind;

    fn tokenizer(config: TokenizerConfig) -> SegmentingTokenizer {
        SegmentingTokenizer::create(&config, &BuiltinCapabilities).unwrap()
    }

    #[test]
    fn test_single_word() {
        let mut t = tokenizer(TokenizerConfig::default());
        let tokens = t.tokenize_str("Hello").unwrap();
        assert_eq!(tokens, vec![Token::with_offsets("hello", 0, 0, 5)]);
    }

    #[test]
    fn test_no_words() {
        let mut t = tokenizer(TokenizerConfig::default());
        assert!(t.tokenize_str("").unwrap().is_empty());
        assert!(t.tokenize_str(" ,.;  !").unwrap().is_empty());
    }

    #[test]
    fn test_kana_folding() {
        let mut t = tokenizer(TokenizerConfig::for_locale("ja"));
        let tokens = t.tokenize_str("カタカナ").unwrap();
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, "かたかな");
        assert_eq!(tokens.last().unwrap().end_offset, "カタカナ".len());
    }

    #[test]
    fn test_stats() {
        let mut t = tokenizer(TokenizerConfig::default());
        let mut collector = TokenCollector::new();
        let stats = t
            .tokenize(TokenizeFlags::DOCUMENT, b"one, two", None, &mut collector)
            .unwrap();
        assert_eq!(stats.code_units, 8);
        assert_eq!(stats.tokens, 2);
        assert_eq!(stats.skipped_non_word, 2);
        assert_eq!(stats.scratch_growths, 1);
    }

    #[test]
    fn test_stop_after_first_token() {
        let mut t = tokenizer(TokenizerConfig::default());
        let mut calls = 0;
        let mut sink = |_: TokenFlags, _: &[u8], _: usize, _: usize| {
            calls += 1;
            Flow::Stop
        };
        let err = t
            .tokenize(TokenizeFlags::DOCUMENT, b"a b c", None, &mut sink)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CallbackAbort);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_instance_is_reusable() {
        let mut t = tokenizer(TokenizerConfig::default());
        assert!(t.tokenize(TokenizeFlags::DOCUMENT, &[0x80], None, &mut TokenCollector::new()).is_err());
        assert_eq!(t.tokenize_str("again").unwrap()[0].text, "again");
    }

    #[test]
    fn test_rules_resolved_from_locale() {
        let t = tokenizer(TokenizerConfig::for_locale("ru"));
        assert_eq!(t.rules(), "NFKD; Cyrillic-Latin; Lower; NFKC");
        assert_eq!(t.name(), "uniword_ru");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = SegmentingTokenizer::create(&TokenizerConfig::new(""), &BuiltinCapabilities)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
