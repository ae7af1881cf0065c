//! Capability providers: where segmenter and transliterator handles come from.
//!
//! A tokenizer instance asks its [`CapabilityProvider`] for exactly one
//! segmenter (bound to a locale) and one transliterator (bound to a
//! rule-set). Handles are exclusively owned by the instance and closed by
//! dropping them.

use std::fmt;

use crate::analysis::segmenter::{UnicodeWordSegmenter, WordSegmenter};
use crate::analysis::transliterator::{RuleSetTransliterator, Transliterator};
use crate::error::Result;

/// Boxed segmenter handle owned by one tokenizer instance.
pub type SegmenterHandle = Box<dyn WordSegmenter + Send>;

/// Boxed transliterator handle owned by one tokenizer instance.
pub type TransliteratorHandle = Box<dyn Transliterator + Send>;

/// Opens segmentation and transform handles.
pub trait CapabilityProvider: Send + Sync {
    /// Open a word segmenter for `locale`.
    fn open_segmenter(&self, locale: &str) -> Result<SegmenterHandle>;

    /// Open a transliterator for a compound rule-set id.
    fn open_transliterator(&self, rules: &str) -> Result<TransliteratorHandle>;

    /// Get the name of this provider (for logging).
    fn name(&self) -> &'static str;
}

/// The built-in provider: UAX #29 segmentation and the rule-set engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinCapabilities;

impl BuiltinCapabilities {
    pub fn new() -> Self {
        BuiltinCapabilities
    }
}

impl CapabilityProvider for BuiltinCapabilities {
    fn open_segmenter(&self, locale: &str) -> Result<SegmenterHandle> {
        Ok(Box::new(UnicodeWordSegmenter::new(locale)?))
    }

    fn open_transliterator(&self, rules: &str) -> Result<TransliteratorHandle> {
        Ok(Box::new(RuleSetTransliterator::new(rules)?))
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

impl fmt::Debug for dyn CapabilityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityProvider({})", self.name())
    }
}
