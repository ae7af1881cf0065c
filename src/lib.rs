//! # uniword
//!
//! Unicode-aware word tokenizer for full-text search engines.
//!
//! ## Features
//!
//! - UAX #29 word segmentation, with dictionary segmentation for Thai, Chinese and Japanese
//! - Compound transform rule-sets (normalization, case folding, script transliteration)
//! - Tokens reported with byte offsets into the original UTF-8 input
//! - Per-locale tokenizer registration and a host engine protocol
//! - Checked buffer sizing with allocation failure reported as an error
//!
//! ```
//! use uniword::prelude::*;
//!
//! let registry = TokenizerRegistry::with_builtin().unwrap();
//! let mut instance = registry.create("uniword", &[]).unwrap();
//!
//! let mut tokens = Vec::new();
//! let rc = TokenizerModule::tokenize_v1(&mut instance, 0, "テスト".as_bytes(), |_, token, start, end| {
//!     tokens.push((String::from_utf8_lossy(token).into_owned(), start, end));
//!     STATUS_OK
//! });
//! assert_eq!(rc, STATUS_OK);
//! assert_eq!(tokens, vec![("てすと".to_string(), 0, 9)]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod fts;

pub mod prelude {
    pub use crate::analysis::codec::MalformedInputPolicy;
    pub use crate::analysis::engine::{BuiltinCapabilities, CapabilityProvider};
    pub use crate::analysis::pipeline::TokenizeStats;
    pub use crate::analysis::token::{Flow, Token, TokenCollector, TokenFlags, TokenSink, TokenizeFlags};
    pub use crate::analysis::tokenizer::{SegmentingTokenizer, Tokenizer};
    pub use crate::config::{LocaleRuleSets, RegistryConfig, TokenizerConfig};
    pub use crate::error::{ErrorKind, Result, STATUS_ERROR, STATUS_NOMEM, STATUS_OK, TokenizerError};
    pub use crate::fts::{TokenizerInstance, TokenizerModule, TokenizerRegistry};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
