//! Host engine protocol.
//!
//! A full-text search engine drives a tokenizer through four entry points:
//! create (with string arguments), destroy, and one of two tokenize variants.
//! The second protocol version adds a locale hint; both share the same
//! per-token callback `(flags, token, start, end) -> status`, where a status
//! other than [`STATUS_OK`] stops tokenization and is handed back to the host
//! unchanged.
//!
//! All offsets crossing this boundary are `i32`, so inputs longer than
//! `i32::MAX` bytes are refused with `SizeOverflow` before any work is done.

use std::sync::Arc;

use log::{debug, warn};

use crate::analysis::engine::CapabilityProvider;
use crate::analysis::token::{Flow, TokenFlags, TokenizeFlags};
use crate::analysis::tokenizer::{SegmentingTokenizer, Tokenizer};
use crate::config::TokenizerConfig;
use crate::error::{Result, STATUS_OK, TokenizerError};

pub mod registry;

pub use registry::TokenizerRegistry;

/// A registered tokenizer: its configuration plus the capability provider.
#[derive(Debug, Clone)]
pub struct TokenizerModule {
    config: TokenizerConfig,
    provider: Arc<dyn CapabilityProvider>,
}

/// One tokenizer instance created by the host.
#[derive(Debug)]
pub struct TokenizerInstance {
    tokenizer: SegmentingTokenizer,
}

impl TokenizerInstance {
    pub fn tokenizer(&self) -> &SegmentingTokenizer {
        &self.tokenizer
    }
}

impl TokenizerModule {
    pub fn new(config: TokenizerConfig, provider: Arc<dyn CapabilityProvider>) -> Self {
        TokenizerModule { config, provider }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Create an instance. Arguments are accepted and ignored.
    pub fn create(&self, args: &[&str]) -> Result<TokenizerInstance> {
        if !args.is_empty() {
            debug!("tokenizer '{}' ignoring arguments {args:?}", self.config.name);
        }
        let tokenizer = SegmentingTokenizer::create(&self.config, self.provider.as_ref())?;
        Ok(TokenizerInstance { tokenizer })
    }

    /// Create an instance, reporting failure as a host status code.
    pub fn create_status(&self, args: &[&str]) -> std::result::Result<TokenizerInstance, i32> {
        self.create(args).map_err(|err| {
            warn!("creating tokenizer '{}' failed: {err}", self.config.name);
            err.status_code()
        })
    }

    /// Destroy an instance. Passing `None` is a no-op.
    pub fn destroy(instance: Option<TokenizerInstance>) {
        if let Some(instance) = instance {
            instance.tokenizer.destroy();
        }
    }

    /// Tokenize with the version 2 protocol.
    ///
    /// Returns [`STATUS_OK`] on success, the callback's status if it stopped
    /// the run, or the error's status code otherwise. A locale hint that is
    /// not valid UTF-8 is ignored.
    pub fn tokenize<F>(
        instance: &mut TokenizerInstance,
        flags: i32,
        text: &[u8],
        locale: Option<&[u8]>,
        mut callback: F,
    ) -> i32
    where
        F: FnMut(i32, &[u8], i32, i32) -> i32,
    {
        if i32::try_from(text.len()).is_err() {
            let err = TokenizerError::size_overflow("host token offsets");
            warn!("{err}: input is {} bytes", text.len());
            return err.status_code();
        }
        let locale = locale.and_then(|bytes| std::str::from_utf8(bytes).ok());

        let mut callback_status = STATUS_OK;
        let mut sink = |token_flags: TokenFlags, token: &[u8], start: usize, end: usize| {
            let (Ok(start), Ok(end)) = (i32::try_from(start), i32::try_from(end)) else {
                callback_status = TokenizerError::size_overflow("host token offsets").status_code();
                return Flow::Stop;
            };
            callback_status = callback(token_flags.bits(), token, start, end);
            if callback_status == STATUS_OK {
                Flow::Continue
            } else {
                Flow::Stop
            }
        };

        match instance
            .tokenizer
            .tokenize(TokenizeFlags(flags), text, locale, &mut sink)
        {
            Ok(_) => STATUS_OK,
            Err(TokenizerError::CallbackAbort { .. }) => callback_status,
            Err(err) => {
                debug!("tokenize '{}' failed: {err}", instance.tokenizer.name());
                err.status_code()
            }
        }
    }

    /// Tokenize with the version 1 protocol.
    pub fn tokenize_v1<F>(instance: &mut TokenizerInstance, flags: i32, text: &[u8], callback: F) -> i32
    where
        F: FnMut(i32, &[u8], i32, i32) -> i32,
    {
        Self::tokenize(instance, flags, text, None, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::BuiltinCapabilities;
    use crate::error::{STATUS_ERROR, STATUS_NOMEM};

    fn module() -> TokenizerModule {
        TokenizerModule::new(TokenizerConfig::default(), Arc::new(BuiltinCapabilities))
    }

    #[test]
    fn test_v1_and_v2_agree() {
        let module = module();
        let mut instance = module.create(&["ignored", "args"]).unwrap();

        let mut v1 = Vec::new();
        let rc = TokenizerModule::tokenize_v1(&mut instance, 4, "Ünïcode text".as_bytes(), |f, t, s, e| {
            v1.push((f, t.to_vec(), s, e));
            STATUS_OK
        });
        assert_eq!(rc, STATUS_OK);

        let mut v2 = Vec::new();
        let rc = TokenizerModule::tokenize(&mut instance, 4, "Ünïcode text".as_bytes(), Some(&b"de"[..]), |f, t, s, e| {
            v2.push((f, t.to_vec(), s, e));
            STATUS_OK
        });
        assert_eq!(rc, STATUS_OK);
        assert_eq!(v1, v2);
        assert_eq!(v1[0], (0, b"unicode".to_vec(), 0, 9));
        assert_eq!(v1[1], (0, b"text".to_vec(), 10, 14));

        TokenizerModule::destroy(Some(instance));
    }

    #[test]
    fn test_callback_status_is_returned() {
        let module = module();
        let mut instance = module.create(&[]).unwrap();
        let mut calls = 0;
        let rc = TokenizerModule::tokenize(&mut instance, 0, b"one two three", None, |_, _, _, _| {
            calls += 1;
            STATUS_NOMEM
        });
        assert_eq!(rc, STATUS_NOMEM);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_malformed_input_status() {
        let module = module();
        let mut instance = module.create(&[]).unwrap();
        let rc = TokenizerModule::tokenize_v1(&mut instance, 0, &[b'a', 0xFF], |_, _, _, _| STATUS_OK);
        assert_eq!(rc, STATUS_ERROR);
    }

    #[test]
    fn test_create_failure_status() {
        let module = TokenizerModule::new(
            TokenizerConfig::new("broken").with_rules("No-Such-Transform"),
            Arc::new(BuiltinCapabilities),
        );
        assert_eq!(module.create_status(&[]).err(), Some(STATUS_ERROR));
    }

    #[test]
    fn test_destroy_none() {
        TokenizerModule::destroy(None);
    }
}
