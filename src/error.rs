//! Error types for the uniword tokenizer.
//!
//! Every failure a tokenize call can hit is represented by [`TokenizerError`].
//! All of them abort the current call immediately; nothing is retried and no
//! partial token stream is produced past the failing point.
//!
//! # Examples
//!
//! ```
//! use uniword::error::{ErrorKind, Result, TokenizerError};
//!
//! fn open_rules(rules: &str) -> Result<()> {
//!     Err(TokenizerError::capability(format!("unknown transform '{rules}'")))
//! }
//!
//! let err = open_rules("Klingon-Latin").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::CapabilityFailure);
//! ```

use std::io;

use thiserror::Error;

/// Status code the host engine understands as success.
pub const STATUS_OK: i32 = 0;

/// Generic host failure status.
pub const STATUS_ERROR: i32 = 1;

/// Host status for allocation failure.
pub const STATUS_NOMEM: i32 = 7;

/// The main error type for tokenizer operations.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A buffer reservation failed.
    #[error("Out of memory: failed to reserve {requested} bytes")]
    OutOfMemory { requested: usize },

    /// A size computation would have exceeded the platform limit.
    #[error("Size overflow while computing {what}")]
    SizeOverflow { what: &'static str },

    /// The input bytes are not well-formed UTF-8.
    #[error("Malformed input at byte {offset}")]
    MalformedInput { offset: usize },

    /// The segmenter reported a boundary outside the text it was given.
    #[error("Boundary {position} outside code-unit range 0..={len}")]
    StructuralBoundsViolation { position: usize, len: usize },

    /// The segmentation or transform capability reported an internal error.
    #[error("Capability failure: {0}")]
    CapabilityFailure(String),

    /// The token callback asked to stop.
    #[error("Tokenization aborted by callback (status {status})")]
    CallbackAbort { status: i32 },

    /// Configuration errors (unknown tokenizer, bad locale table, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors while reading configuration or input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with TokenizerError.
pub type Result<T> = std::result::Result<T, TokenizerError>;

/// Coarse classification of a [`TokenizerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfMemory,
    SizeOverflow,
    MalformedInput,
    StructuralBoundsViolation,
    CapabilityFailure,
    CallbackAbort,
    Config,
    Io,
}

impl TokenizerError {
    /// Create a new capability failure.
    pub fn capability<S: Into<String>>(msg: S) -> Self {
        TokenizerError::CapabilityFailure(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TokenizerError::Config(msg.into())
    }

    /// Create a size overflow error for the named computation.
    pub fn size_overflow(what: &'static str) -> Self {
        TokenizerError::SizeOverflow { what }
    }

    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenizerError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            TokenizerError::SizeOverflow { .. } => ErrorKind::SizeOverflow,
            TokenizerError::MalformedInput { .. } => ErrorKind::MalformedInput,
            TokenizerError::StructuralBoundsViolation { .. } => {
                ErrorKind::StructuralBoundsViolation
            }
            TokenizerError::CapabilityFailure(_) => ErrorKind::CapabilityFailure,
            TokenizerError::CallbackAbort { .. } => ErrorKind::CallbackAbort,
            TokenizerError::Config(_) | TokenizerError::Json(_) => ErrorKind::Config,
            TokenizerError::Io(_) => ErrorKind::Io,
        }
    }

    /// Status code reported to the host engine for this error.
    ///
    /// A callback abort hands back whatever status the callback returned.
    pub fn status_code(&self) -> i32 {
        match self {
            TokenizerError::OutOfMemory { .. } => STATUS_NOMEM,
            TokenizerError::CallbackAbort { status } => *status,
            _ => STATUS_ERROR,
        }
    }
}
