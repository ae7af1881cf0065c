//! Compound transform ids and the steps they compile to.
//!
//! A rule-set is a `;`-separated list of transform ids, applied left to
//! right. Ids are case-insensitive and may carry an `Any-` source prefix.
//!
//! | id                                      | step                                |
//! |-----------------------------------------|-------------------------------------|
//! | `Null`                                  | identity                            |
//! | `NFC`, `NFD`, `NFKC`, `NFKD`            | Unicode normalization               |
//! | `Lower`, `Upper`                        | full case mapping                   |
//! | `[:Nonspacing Mark:] Remove`, `[:Mn:] Remove` | drop combining marks          |
//! | `Katakana-Hiragana`, `Hiragana-Katakana`| kana script mapping                 |
//! | `Fullwidth-Halfwidth`                   | fullwidth ASCII forms to ASCII      |
//! | `Latin-ASCII`                           | Latin letters to ASCII              |
//! | `Arabic-Latin`                          | DIN 31635 romanization              |
//! | `Cyrillic-Latin`                        | ISO 9 romanization                  |
//! | `Hebrew-Latin`                          | Hebrew romanization                 |
//! | `Greek-Latin`                           | Greek romanization                  |
//! | `Traditional-Simplified`                | OpenCC Traditional → Simplified     |

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::transliterator::script;
use crate::error::{Result, TokenizerError};

/// One compiled step of a rule-set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformStep {
    Null,
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
    Lower,
    Upper,
    RemoveMarks,
    KatakanaHiragana,
    HiraganaKatakana,
    FullwidthHalfwidth,
    LatinAscii,
    ArabicLatin,
    CyrillicLatin,
    HebrewLatin,
    GreekLatin,
    TraditionalSimplified,
}

impl TransformStep {
    /// Look up a single transform id.
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let name = normalized.strip_prefix("any-").unwrap_or(&normalized);

        let step = match name {
            "null" => TransformStep::Null,
            "nfc" => TransformStep::Nfc,
            "nfd" => TransformStep::Nfd,
            "nfkc" => TransformStep::Nfkc,
            "nfkd" => TransformStep::Nfkd,
            "lower" => TransformStep::Lower,
            "upper" => TransformStep::Upper,
            "[:nonspacing mark:] remove" | "[:mn:] remove" => TransformStep::RemoveMarks,
            "katakana-hiragana" => TransformStep::KatakanaHiragana,
            "hiragana-katakana" => TransformStep::HiraganaKatakana,
            "fullwidth-halfwidth" => TransformStep::FullwidthHalfwidth,
            "latin-ascii" => TransformStep::LatinAscii,
            "arabic-latin" => TransformStep::ArabicLatin,
            "cyrillic-latin" => TransformStep::CyrillicLatin,
            "hebrew-latin" => TransformStep::HebrewLatin,
            "greek-latin" => TransformStep::GreekLatin,
            "traditional-simplified" | "hant-hans" => TransformStep::TraditionalSimplified,
            _ => return None,
        };
        Some(step)
    }

    /// Apply this step to `input`.
    pub fn apply(&self, input: &str) -> String {
        match self {
            TransformStep::Null => input.to_string(),
            TransformStep::Nfc => input.nfc().collect(),
            TransformStep::Nfd => input.nfd().collect(),
            TransformStep::Nfkc => input.nfkc().collect(),
            TransformStep::Nfkd => input.nfkd().collect(),
            TransformStep::Lower => input.to_lowercase(),
            TransformStep::Upper => input.to_uppercase(),
            TransformStep::RemoveMarks => input.chars().filter(|&c| !is_combining_mark(c)).collect(),
            TransformStep::KatakanaHiragana => input.chars().map(script::katakana_to_hiragana).collect(),
            TransformStep::HiraganaKatakana => input.chars().map(script::hiragana_to_katakana).collect(),
            TransformStep::FullwidthHalfwidth => input.chars().map(script::fullwidth_to_halfwidth).collect(),
            TransformStep::LatinAscii => script::latin_to_ascii(input),
            TransformStep::ArabicLatin => script::romanize(input, script::arabic_latin),
            TransformStep::CyrillicLatin => script::romanize(input, script::cyrillic_latin),
            TransformStep::HebrewLatin => script::romanize(input, script::hebrew_latin),
            TransformStep::GreekLatin => script::romanize(input, script::greek_latin),
            TransformStep::TraditionalSimplified => script::traditional_to_simplified(input),
        }
    }
}

/// Compile a compound id into steps.
pub fn parse(rules: &str) -> Result<Vec<TransformStep>> {
    let mut steps = Vec::new();
    for id in rules.split(';').map(str::trim).filter(|id| !id.is_empty()) {
        let step = TransformStep::from_id(id)
            .ok_or_else(|| TokenizerError::capability(format!("unknown transform id '{id}'")))?;
        steps.push(step);
    }

    if steps.is_empty() {
        return Err(TokenizerError::capability("empty transform rule-set"));
    }
    Ok(steps)
}
