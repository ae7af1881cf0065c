//! Text analysis: segmentation, transformation, and token emission.
//!
//! Data flows one way through these modules:
//!
//! ```text
//! UTF-8 bytes ─ codec ─▶ UTF-16 + offset map ─ segmenter ─▶ word segments
//!     ─ transliterator ─▶ normalized units ─ codec ─▶ UTF-8 token ─▶ TokenSink
//! ```
//!
//! [`tokenizer::SegmentingTokenizer`] drives the whole flow; [`engine`]
//! supplies the segmenter and transliterator handles it owns.

pub mod buffer;
pub mod codec;
pub mod engine;
pub mod pipeline;
pub mod segmenter;
pub mod token;
pub mod tokenizer;
pub mod transliterator;
