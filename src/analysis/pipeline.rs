//! Per-token transform pipeline.
//!
//! For every word segment accepted by the boundary driver the pipeline:
//!
//! 1. looks up the segment's byte range in the offset map (empty ranges are skipped),
//! 2. copies the code units into a scratch buffer with room for expansion,
//! 3. runs the transliterator in place,
//! 4. clamps the reported limit to the scratch capacity and re-encodes the result to UTF-8,
//! 5. hands the bytes to the sink with the *original* byte offsets.
//!
//! Both working buffers belong to one [`TokenPipeline`], which lives for a
//! single tokenize call and is dropped on every exit path.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::analysis::buffer::{ScratchBuffer, checked_capacity};
use crate::analysis::codec::{Utf16Text, encode_utf8_lossy};
use crate::analysis::segmenter::Segment;
use crate::analysis::token::{Flow, TokenFlags, TokenSink};
use crate::analysis::transliterator::Transliterator;
use crate::error::{Result, STATUS_ERROR, TokenizerError};

/// Scratch units reserved per source unit, for decomposition and script expansion.
pub const SCRATCH_EXPANSION: usize = 6;

/// Fixed scratch headroom, in code units.
pub const SCRATCH_HEADROOM: usize = 2048;

/// Output bytes reserved per transformed unit.
pub const OUTPUT_EXPANSION: usize = 8;

/// Fixed output headroom, in bytes.
pub const OUTPUT_HEADROOM: usize = 4096;

/// Counters for one tokenize call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeStats {
    /// Code units produced from the input
    pub code_units: usize,
    /// Tokens handed to the sink
    pub tokens: usize,
    /// Segments dropped for having a non-word status
    pub skipped_non_word: usize,
    /// Segments dropped for covering no bytes or transforming to nothing
    pub skipped_empty: usize,
    /// Times the transform scratch buffer was enlarged
    pub scratch_growths: usize,
    /// Times the output buffer was enlarged
    pub output_growths: usize,
}

/// Result of processing one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Emitted,
    Skipped,
}

/// Working state for one tokenize call.
#[derive(Debug)]
pub struct TokenPipeline {
    scratch: ScratchBuffer<u16>,
    output: ScratchBuffer<u8>,
    emitted: usize,
    skipped: usize,
}

impl TokenPipeline {
    /// Create the pipeline with initial buffer capacities.
    pub fn new(initial_scratch_units: usize, initial_output_bytes: usize) -> Result<Self> {
        Ok(TokenPipeline {
            scratch: ScratchBuffer::with_capacity(initial_scratch_units, "transform scratch")?,
            output: ScratchBuffer::with_capacity(initial_output_bytes, "output buffer")?,
            emitted: 0,
            skipped: 0,
        })
    }

    /// Transform one segment of `text` and emit it.
    ///
    /// Returns `CallbackAbort` if the sink asks to stop.
    pub fn process(
        &mut self,
        text: &Utf16Text,
        segment: Segment,
        transliterator: &mut dyn Transliterator,
        sink: &mut dyn TokenSink,
    ) -> Result<Outcome> {
        let Some((start_byte, end_byte)) = text.byte_range(segment.start, segment.end) else {
            return Err(TokenizerError::StructuralBoundsViolation {
                position: segment.end,
                len: text.len(),
            });
        };
        if end_byte <= start_byte {
            self.skipped += 1;
            return Ok(Outcome::Skipped);
        }
        let source = &text.units()[segment.start..segment.end];

        let required = checked_capacity::<u16>(
            source.len(),
            SCRATCH_EXPANSION,
            SCRATCH_HEADROOM,
            "transform scratch",
        )?;
        self.scratch.ensure_capacity(required)?;

        let buffer = self.scratch.as_mut_slice();
        buffer[..source.len()].copy_from_slice(source);
        let mut len = source.len();
        let mut limit = len;
        transliterator.transliterate(buffer, &mut len, 0, &mut limit)?;

        // The token ends at the reported limit; never trust it past the buffer.
        let capacity = self.scratch.capacity();
        if limit > capacity {
            debug!("transliterator reported {limit} units in a buffer of {capacity}; clamping");
        }
        let len = limit.min(capacity);

        let required = checked_capacity::<u8>(len, OUTPUT_EXPANSION, OUTPUT_HEADROOM, "output buffer")?;
        self.output.ensure_capacity(required)?;
        let written = encode_utf8_lossy(self.scratch.prefix(len), self.output.as_mut_slice());
        let token = self.output.prefix(written);

        if token.is_empty() {
            self.skipped += 1;
            return Ok(Outcome::Skipped);
        }

        trace!(
            "token {:?} at {start_byte}..{end_byte}",
            String::from_utf8_lossy(token)
        );
        self.emitted += 1;
        match sink.emit(TokenFlags::NONE, token, start_byte, end_byte) {
            Flow::Continue => Ok(Outcome::Emitted),
            Flow::Stop => Err(TokenizerError::CallbackAbort {
                status: STATUS_ERROR,
            }),
        }
    }

    /// Fold this pipeline's counters into `stats`.
    pub fn record(&self, stats: &mut TokenizeStats) {
        stats.tokens = self.emitted;
        stats.skipped_empty = self.skipped;
        stats.scratch_growths = self.scratch.growths();
        stats.output_growths = self.output.growths();
    }
}
