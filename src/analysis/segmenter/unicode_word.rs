//! Built-in word segmenter based on Unicode word boundaries (UAX #29).
//!
//! Scripts written without spaces between words need more than UAX #29.
//! For Thai, Lao, Khmer, Burmese, Chinese and Japanese locales the segmenter
//! switches to ICU4X's dictionary-based word breaker; every other locale gets
//! the plain UAX #29 rules.
//!
//! # Examples
//!
//! ```
//! use uniword::analysis::segmenter::status::{WORD_LETTER, WORD_NONE};
//! use uniword::analysis::segmenter::{UnicodeWordSegmenter, WordSegmenter};
//!
//! let mut segmenter = UnicodeWordSegmenter::new("en").unwrap();
//! let units: Vec<u16> = "Hi, you".encode_utf16().collect();
//! segmenter.set_text(&units).unwrap();
//!
//! assert_eq!(segmenter.first(), 0);
//! assert_eq!(segmenter.next(), Some(2));
//! assert_eq!(segmenter.rule_status(), WORD_LETTER);
//! assert_eq!(segmenter.next(), Some(3));
//! assert_eq!(segmenter.rule_status(), WORD_NONE);
//! ```

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::codec::decode_utf16_lossy;
use crate::analysis::segmenter::WordSegmenter;
use crate::analysis::segmenter::status::*;
use crate::error::{Result, TokenizerError};

/// Primary language subtags whose text is segmented with dictionaries.
const DICTIONARY_LANGUAGES: &[&str] = &["ja", "km", "lo", "my", "th", "zh"];

/// The boundary engine chosen for a locale.
enum Backend {
    Uax29,
    Dictionary(Box<icu_segmenter::WordSegmenter>),
}

impl Backend {
    fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if DICTIONARY_LANGUAGES.contains(&language.as_str()) {
            Backend::Dictionary(Box::new(icu_segmenter::WordSegmenter::new_dictionary()))
        } else {
            Backend::Uax29
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Backend::Uax29 => "uax29",
            Backend::Dictionary(_) => "dictionary",
        }
    }
}

/// A segmenter that splits text on Unicode word boundaries.
///
/// Boundaries are computed eagerly in [`set_text`](WordSegmenter::set_text);
/// the cursor then walks the precomputed list. Segments are classified by
/// their script content into the ICU-compatible status ranges:
///
/// - no alphanumeric character → `WORD_NONE`
/// - digits (with `.`/`,` separators) → `WORD_NUMBER`
/// - any hiragana or katakana → `WORD_KANA`
/// - any CJK ideograph → `WORD_IDEO`
/// - otherwise → `WORD_LETTER`
pub struct UnicodeWordSegmenter {
    locale: String,
    backend: Backend,
    // (boundary in code units, status of the segment ending there)
    boundaries: Vec<(usize, i32)>,
    cursor: usize,
}

impl UnicodeWordSegmenter {
    /// Open a segmenter for `locale`. An empty locale selects the root rules.
    pub fn new(locale: &str) -> Result<Self> {
        if !is_valid_locale(locale) {
            return Err(TokenizerError::capability(format!(
                "invalid locale '{locale}'"
            )));
        }
        Ok(UnicodeWordSegmenter {
            locale: locale.to_string(),
            backend: Backend::for_locale(locale),
            boundaries: vec![(0, WORD_NONE)],
            cursor: 0,
        })
    }

    /// The locale this segmenter was opened for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether this locale is segmented with dictionaries.
    pub fn uses_dictionary(&self) -> bool {
        matches!(self.backend, Backend::Dictionary(_))
    }

    fn classify(word: &str) -> i32 {
        if !word.chars().any(char::is_alphanumeric) {
            return WORD_NONE;
        }

        if word
            .chars()
            .all(|c| c.is_numeric() || matches!(c, '.' | ',' | '\''))
        {
            return WORD_NUMBER;
        }

        if word.chars().any(is_kana) {
            return WORD_KANA;
        }

        if word.chars().any(is_ideographic) {
            return WORD_IDEO;
        }

        WORD_LETTER
    }
}

impl WordSegmenter for UnicodeWordSegmenter {
    fn set_text(&mut self, units: &[u16]) -> Result<()> {
        self.boundaries.clear();
        self.boundaries.push((0, WORD_NONE));
        self.cursor = 0;

        match &self.backend {
            Backend::Uax29 => {
                let text = decode_utf16_lossy(units);
                let mut position = 0;
                for word in text.split_word_bounds() {
                    // Lossy decoding keeps one unit per unpaired surrogate, so unit counts line up.
                    position += word.encode_utf16().count();
                    self.boundaries.push((position, Self::classify(word)));
                }
            }
            Backend::Dictionary(segmenter) => {
                let mut previous = 0;
                for boundary in segmenter.segment_utf16(units) {
                    if boundary <= previous {
                        continue;
                    }
                    let word = decode_utf16_lossy(units.get(previous..boundary).unwrap_or_default());
                    self.boundaries.push((boundary, Self::classify(&word)));
                    previous = boundary;
                }
            }
        }
        Ok(())
    }

    fn first(&mut self) -> usize {
        self.cursor = 0;
        self.boundaries[0].0
    }

    fn next(&mut self) -> Option<usize> {
        if self.cursor + 1 >= self.boundaries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.boundaries[self.cursor].0)
    }

    fn rule_status(&self) -> i32 {
        self.boundaries[self.cursor].1
    }
}

impl fmt::Debug for UnicodeWordSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnicodeWordSegmenter")
            .field("locale", &self.locale)
            .field("backend", &self.backend.name())
            .field("boundaries", &self.boundaries.len())
            .finish()
    }
}

fn is_kana(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' | // Hiragana
        '\u{30A0}'..='\u{30FF}' | // Katakana
        '\u{31F0}'..='\u{31FF}' | // Katakana Phonetic Extensions
        '\u{FF66}'..='\u{FF9F}'   // Halfwidth Katakana
    )
}

fn is_ideographic(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
        '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility Ideographs
        '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
        '\u{2A700}'..='\u{2B73F}' | // CJK Extension C
        '\u{2B740}'..='\u{2B81F}' | // CJK Extension D
        '\u{2B820}'..='\u{2CEAF}'   // CJK Extension E
    )
}

/// Accepts the root locale (`""`) or BCP 47 shaped tags such as `ja`, `zh-Hant`, `en_US`.
fn is_valid_locale(locale: &str) -> bool {
    locale.is_empty()
        || locale
            .split(['-', '_'])
            .all(|tag| (1..=8).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_alphanumeric()))
}
