//! Token types and the emission sink.
//!
//! The pipeline never builds a token list itself: every finished token is
//! pushed to a [`TokenSink`] as soon as it is ready, together with the byte
//! range it came from in the *original* input. [`TokenCollector`] is the sink
//! used when a materialized `Vec<Token>` is wanted.
//!
//! # Examples
//!
//! Any `FnMut(TokenFlags, &[u8], usize, usize) -> Flow` closure is a sink:
//!
//! ```
//! use uniword::analysis::token::{Flow, TokenFlags, TokenSink};
//!
//! let mut seen = Vec::new();
//! let mut sink = |_flags: TokenFlags, token: &[u8], start: usize, end: usize| {
//!     seen.push((token.to_vec(), start, end));
//!     Flow::Continue
//! };
//! assert_eq!(sink.emit(TokenFlags::NONE, b"hello", 0, 5), Flow::Continue);
//! assert_eq!(seen, vec![(b"hello".to_vec(), 0, 5)]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized token and the byte range of its source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The transformed token text
    pub text: String,

    /// The position of the token in the emitted stream (0-based)
    pub position: usize,

    /// The byte offset where the source text starts
    pub start_offset: usize,

    /// The byte offset where the source text ends
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The source text this token was produced from.
    pub fn source<'a>(&self, input: &'a [u8]) -> Option<&'a [u8]> {
        input.get(self.start_offset..self.end_offset)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Per-token flags passed to the sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenFlags(pub i32);

impl TokenFlags {
    /// An ordinary token.
    pub const NONE: TokenFlags = TokenFlags(0);
    /// The token is a synonym occupying the previous token's position.
    pub const COLOCATED: TokenFlags = TokenFlags(0x0001);

    pub fn bits(self) -> i32 {
        self.0
    }
}

/// Reason the host is tokenizing, passed through by the host protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenizeFlags(pub i32);

impl TokenizeFlags {
    pub const QUERY: TokenizeFlags = TokenizeFlags(0x0001);
    pub const PREFIX: TokenizeFlags = TokenizeFlags(0x0002);
    pub const DOCUMENT: TokenizeFlags = TokenizeFlags(0x0004);
    pub const AUX: TokenizeFlags = TokenizeFlags(0x0008);

    pub fn contains(self, other: TokenizeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// What the sink wants the tokenizer to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Receives finished tokens.
pub trait TokenSink {
    /// Accept one token. `start..end` is the byte range in the original input.
    fn emit(&mut self, flags: TokenFlags, token: &[u8], start: usize, end: usize) -> Flow;
}

impl<F> TokenSink for F
where
    F: FnMut(TokenFlags, &[u8], usize, usize) -> Flow,
{
    fn emit(&mut self, flags: TokenFlags, token: &[u8], start: usize, end: usize) -> Flow {
        self(flags, token, start, end)
    }
}

/// A sink that collects tokens, optionally stopping after `limit` of them.
#[derive(Debug, Default)]
pub struct TokenCollector {
    tokens: Vec<Token>,
    limit: Option<usize>,
}

impl TokenCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the tokenizer to stop once `limit` tokens have been collected.
    pub fn with_limit(limit: usize) -> Self {
        TokenCollector {
            tokens: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl TokenSink for TokenCollector {
    fn emit(&mut self, _flags: TokenFlags, token: &[u8], start: usize, end: usize) -> Flow {
        let position = self.tokens.len();
        self.tokens.push(Token::with_offsets(
            String::from_utf8_lossy(token),
            position,
            start,
            end,
        ));
        match self.limit {
            Some(limit) if self.tokens.len() >= limit => Flow::Stop,
            _ => Flow::Continue,
        }
    }
}
