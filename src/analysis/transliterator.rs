//! Transform (transliteration / normalization) capability.
//!
//! A [`Transliterator`] rewrites a region of a UTF-16 buffer in place, the way
//! ICU's `utrans_transUChars` does: the caller hands over a buffer whose
//! length is the capacity, the logical text length, and the `start..limit`
//! region to transform; the transliterator updates both length and limit.
//!
//! [`RuleSetTransliterator`] is the built-in engine. It understands a compound
//! id such as `"NFKD; Katakana-Hiragana; Lower; NFKC"` and applies each step
//! in order; see [`rules`] for the supported ids.
//!
//! # Examples
//!
//! ```
//! use uniword::analysis::transliterator::{RuleSetTransliterator, Transliterator};
//!
//! let mut transliterator = RuleSetTransliterator::new("NFKD; [:Nonspacing Mark:] Remove; Lower; NFKC").unwrap();
//!
//! let mut buffer = vec![0u16; 32];
//! let source: Vec<u16> = "Crème".encode_utf16().collect();
//! buffer[..source.len()].copy_from_slice(&source);
//!
//! let mut len = source.len();
//! let mut limit = len;
//! transliterator.transliterate(&mut buffer, &mut len, 0, &mut limit).unwrap();
//!
//! assert_eq!(String::from_utf16(&buffer[..len]).unwrap(), "creme");
//! ```

use crate::analysis::codec::decode_utf16_lossy;
use crate::error::{Result, TokenizerError};

pub mod rules;
mod script;

pub use rules::TransformStep;

/// A text transform engine bound to one rule-set.
pub trait Transliterator {
    /// Transform `text[start..*limit]` in place.
    ///
    /// `text.len()` is the capacity; `*len` is the logical length of the text
    /// in the buffer. On success `*len` and `*limit` reflect the rewritten
    /// region. Output that would not fit in the buffer is an error.
    fn transliterate(
        &mut self,
        text: &mut [u16],
        len: &mut usize,
        start: usize,
        limit: &mut usize,
    ) -> Result<()>;
}

/// The built-in rule-set engine.
#[derive(Clone, Debug)]
pub struct RuleSetTransliterator {
    rules: String,
    steps: Vec<TransformStep>,
}

impl RuleSetTransliterator {
    /// Compile a `;`-separated compound id. Unknown ids are rejected here,
    /// so a bad rule-set fails at open time rather than mid-tokenization.
    pub fn new(rules: &str) -> Result<Self> {
        let steps = rules::parse(rules)?;
        Ok(RuleSetTransliterator {
            rules: rules.to_string(),
            steps,
        })
    }

    /// The rule-set this engine was compiled from.
    pub fn rules(&self) -> &str {
        &self.rules
    }

    /// The compiled steps, in application order.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Apply every step to `input`.
    pub fn apply(&self, input: &str) -> String {
        self.steps
            .iter()
            .fold(input.to_string(), |text, step| step.apply(&text))
    }
}

impl Transliterator for RuleSetTransliterator {
    fn transliterate(
        &mut self,
        text: &mut [u16],
        len: &mut usize,
        start: usize,
        limit: &mut usize,
    ) -> Result<()> {
        let capacity = text.len();
        if start > *limit || *limit > *len || *len > capacity {
            return Err(TokenizerError::capability(format!(
                "invalid transform region {start}..{} (length {}, capacity {capacity})",
                *limit, *len
            )));
        }

        let source = decode_utf16_lossy(&text[start..*limit]);
        let output: Vec<u16> = self.apply(&source).encode_utf16().collect();

        let new_limit = start + output.len();
        let new_len = *len - (*limit - start) + output.len();
        if new_len > capacity {
            return Err(TokenizerError::capability(format!(
                "transform output of {new_len} units exceeds capacity {capacity}"
            )));
        }

        text.copy_within(*limit..*len, new_limit);
        text[start..new_limit].copy_from_slice(&output);
        *len = new_len;
        *limit = new_limit;
        Ok(())
    }
}
