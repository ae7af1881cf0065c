//! Position-mapping codec between UTF-8 input and UTF-16 code units.
//!
//! Segmentation engines work on UTF-16, while the host engine addresses
//! documents by UTF-8 byte offset. [`Utf16Text`] holds the converted text
//! together with an offset map so every code-unit index can be translated
//! back to the byte offset of the scalar that produced it.
//!
//! ```text
//! bytes:   x   ␠   F0 9D 90 80   b   c
//! offset:  0   1   2  3  4  5    6   7   (8)
//! units:   x   ␠   D835  DC00    b   c
//! map:     0   1   2     2       6   7   8   ← sentinel
//! ```
//!
//! # Examples
//!
//! ```
//! use uniword::analysis::codec::{MalformedInputPolicy, Utf16Text};
//!
//! let text = Utf16Text::from_utf8("héllo".as_bytes(), MalformedInputPolicy::Reject).unwrap();
//! assert_eq!(text.len(), 5);
//! assert_eq!(text.offsets(), &[0, 1, 3, 4, 5, 6]);
//! ```

use std::char::REPLACEMENT_CHARACTER;

use serde::{Deserialize, Serialize};

use crate::analysis::buffer::{checked_capacity, try_reserve};
use crate::error::{Result, TokenizerError};

/// What to do when the input is not well-formed UTF-8.
///
/// A literal U+FFFD in the input counts as malformed too: it can only come
/// from an earlier lossy decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedInputPolicy {
    /// Fail the whole call with `MalformedInput`, including on an encoded U+FFFD.
    #[default]
    Reject,
    /// Substitute U+FFFD for each maximal invalid subsequence and continue.
    /// Encoded U+FFFD scalars pass through.
    Replace,
}

/// UTF-16 form of a document plus the code-unit → byte offset map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Utf16Text {
    units: Vec<u16>,
    offsets: Vec<usize>,
}

impl Utf16Text {
    /// Convert `bytes` to UTF-16, recording the byte offset of every unit.
    pub fn from_utf8(bytes: &[u8], policy: MalformedInputPolicy) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Utf16Text {
                units: Vec::new(),
                offsets: vec![0],
            });
        }

        // A scalar never needs more than two units; keep one spare for the sentinel.
        let unit_capacity = checked_capacity::<u16>(bytes.len(), 2, 1, "code-unit buffer")?;
        let map_capacity = checked_capacity::<usize>(bytes.len(), 2, 2, "offset map")?;

        let mut units = Vec::new();
        let mut offsets = Vec::new();
        try_reserve(&mut units, unit_capacity, "code-unit buffer")?;
        try_reserve(&mut offsets, map_capacity, "offset map")?;

        let mut base = 0;
        for chunk in bytes.utf8_chunks() {
            for (index, ch) in chunk.valid().char_indices() {
                // An encoded U+FFFD means the text was already damaged upstream.
                if ch == REPLACEMENT_CHARACTER && policy == MalformedInputPolicy::Reject {
                    return Err(TokenizerError::MalformedInput { offset: base + index });
                }
                push_scalar(&mut units, &mut offsets, ch, base + index);
            }
            base += chunk.valid().len();

            let invalid = chunk.invalid();
            if !invalid.is_empty() {
                match policy {
                    MalformedInputPolicy::Reject => {
                        return Err(TokenizerError::MalformedInput { offset: base });
                    }
                    MalformedInputPolicy::Replace => {
                        push_scalar(&mut units, &mut offsets, REPLACEMENT_CHARACTER, base);
                    }
                }
                base += invalid.len();
            }
        }

        offsets.push(bytes.len());
        Ok(Utf16Text { units, offsets })
    }

    /// The code units.
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// The offset map, one entry per unit plus the trailing sentinel.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Byte offset of the scalar at code-unit `index`; `index == len()` gives the input length.
    pub fn byte_offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    /// Byte range covered by the code-unit range `start..end`.
    pub fn byte_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        Some((self.byte_offset(start)?, self.byte_offset(end)?))
    }
}

fn push_scalar(units: &mut Vec<u16>, offsets: &mut Vec<usize>, ch: char, byte_offset: usize) {
    let mut pair = [0u16; 2];
    for unit in ch.encode_utf16(&mut pair) {
        units.push(*unit);
        // Both halves of a surrogate pair point at the scalar's first byte.
        offsets.push(byte_offset);
    }
}

/// Encode UTF-16 `units` as UTF-8 into `out`, returning the number of bytes written.
///
/// Unpaired surrogates become U+FFFD. Output stops at the last scalar that
/// fits, so the returned length never exceeds `out.len()`.
pub fn encode_utf8_lossy(units: &[u16], out: &mut [u8]) -> usize {
    let mut written = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        let ch = decoded.unwrap_or(REPLACEMENT_CHARACTER);
        let width = ch.len_utf8();
        if written + width > out.len() {
            break;
        }
        ch.encode_utf8(&mut out[written..written + width]);
        written += width;
    }
    written
}

/// Decode UTF-16 into a `String`, replacing unpaired surrogates.
pub fn decode_utf16_lossy(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|decoded| decoded.unwrap_or(REPLACEMENT_CHARACTER))
        .collect()
}
