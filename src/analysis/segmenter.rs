//! Word segmentation capability and the boundary driver.
//!
//! A [`WordSegmenter`] is an external engine that finds word boundaries in a
//! UTF-16 buffer and tags each segment with a rule status. [`WordBoundaries`]
//! walks those boundaries pairwise, validates every position against the text
//! length and drops segments whose status falls in the non-word range.
//!
//! Rule statuses use the same numeric ranges as ICU's word break iterator so
//! that an ICU-backed segmenter can be plugged in without translation.

use log::warn;

use crate::error::{Result, TokenizerError};

pub mod unicode_word;

pub use unicode_word::UnicodeWordSegmenter;

/// Rule status ranges reported by [`WordSegmenter::rule_status`].
pub mod status {
    /// Whitespace, punctuation and other non-word segments.
    pub const WORD_NONE: i32 = 0;
    /// Upper bound (exclusive) of the non-word range.
    pub const WORD_NONE_LIMIT: i32 = 100;
    /// Numbers.
    pub const WORD_NUMBER: i32 = 100;
    /// Upper bound (exclusive) of the number range.
    pub const WORD_NUMBER_LIMIT: i32 = 200;
    /// Words made of letters.
    pub const WORD_LETTER: i32 = 200;
    /// Upper bound (exclusive) of the letter range.
    pub const WORD_LETTER_LIMIT: i32 = 300;
    /// Hiragana / katakana words.
    pub const WORD_KANA: i32 = 300;
    /// Upper bound (exclusive) of the kana range.
    pub const WORD_KANA_LIMIT: i32 = 400;
    /// Ideographic words.
    pub const WORD_IDEO: i32 = 400;
    /// Upper bound (exclusive) of the ideographic range.
    pub const WORD_IDEO_LIMIT: i32 = 500;

    /// Whether a segment with this status should be indexed.
    pub fn is_word(status: i32) -> bool {
        !(WORD_NONE..WORD_NONE_LIMIT).contains(&status)
    }
}

/// A word segmentation engine bound to one locale.
///
/// The handle keeps cursor state between calls, which is why every method
/// takes `&mut self`: one handle serves one tokenize call at a time.
pub trait WordSegmenter {
    /// Replace the text being segmented and reset the cursor.
    fn set_text(&mut self, units: &[u16]) -> Result<()>;

    /// Move to the first boundary and return it.
    fn first(&mut self) -> usize;

    /// Advance to the next boundary, or `None` once the text is exhausted.
    fn next(&mut self) -> Option<usize>;

    /// Rule status of the segment ending at the current boundary.
    fn rule_status(&self) -> i32;
}

/// A candidate token: a code-unit range with its rule status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub status: i32,
}

/// Iterator over word segments of the text last given to a segmenter.
///
/// Yields an error, then stops, if the segmenter reports a position outside
/// `0..=len` or a position before the previous one.
pub struct WordBoundaries<'a> {
    segmenter: &'a mut dyn WordSegmenter,
    len: usize,
    prev: usize,
    skipped: usize,
    done: bool,
}

impl<'a> WordBoundaries<'a> {
    /// Start iterating. `len` is the code-unit length given to `set_text`.
    pub fn new(segmenter: &'a mut dyn WordSegmenter, len: usize) -> Result<Self> {
        let first = segmenter.first();
        check_bounds(first, 0, len)?;
        Ok(WordBoundaries {
            segmenter,
            len,
            prev: first,
            skipped: 0,
            done: false,
        })
    }

    /// Number of non-word segments dropped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for WordBoundaries<'_> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(next) = self.segmenter.next() else {
                self.done = true;
                break;
            };
            if let Err(err) = check_bounds(next, self.prev, self.len) {
                self.done = true;
                return Some(Err(err));
            }

            let status = self.segmenter.rule_status();
            let start = self.prev;
            self.prev = next;

            if status::is_word(status) {
                return Some(Ok(Segment {
                    start,
                    end: next,
                    status,
                }));
            }
            self.skipped += 1;
        }
        None
    }
}

fn check_bounds(position: usize, prev: usize, len: usize) -> Result<()> {
    if position > len || position < prev {
        warn!("segmenter returned boundary {position} (previous {prev}, length {len})");
        return Err(TokenizerError::StructuralBoundsViolation { position, len });
    }
    Ok(())
}
