//! Named tokenizer registration.

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};

use crate::analysis::engine::{BuiltinCapabilities, CapabilityProvider};
use crate::config::{RegistryConfig, TokenizerConfig};
use crate::error::{Result, TokenizerError};
use crate::fts::{TokenizerInstance, TokenizerModule};

/// Tokenizer modules keyed by name.
#[derive(Debug, Default)]
pub struct TokenizerRegistry {
    modules: AHashMap<String, TokenizerModule>,
}

impl TokenizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default set of tokenizers backed by the built-in capabilities.
    pub fn with_builtin() -> Result<Self> {
        Self::from_config(&RegistryConfig::default(), Arc::new(BuiltinCapabilities))
    }

    /// Register every tokenizer in `config`.
    ///
    /// Rule-sets are resolved against the config's locale table now, so
    /// instances created later do not depend on the table.
    pub fn from_config(config: &RegistryConfig, provider: Arc<dyn CapabilityProvider>) -> Result<Self> {
        config.validate()?;
        let mut registry = Self::new();
        for tokenizer in &config.tokenizers {
            let resolved = tokenizer.clone().resolve(&config.locale_rules);
            registry.register(TokenizerModule::new(resolved, Arc::clone(&provider)))?;
        }
        info!("registered {} tokenizers", registry.len());
        Ok(registry)
    }

    /// Register one module. Names must be unique.
    pub fn register(&mut self, module: TokenizerModule) -> Result<()> {
        module.config().validate()?;
        if self.modules.contains_key(module.name()) {
            return Err(TokenizerError::config(format!(
                "tokenizer '{}' is already registered",
                module.name()
            )));
        }
        debug!(
            "registering tokenizer '{}' with rules '{}'",
            module.name(),
            module.config().rules.as_deref().unwrap_or("<locale default>")
        );
        self.modules.insert(module.name().to_string(), module);
        Ok(())
    }

    /// Register a configuration with the built-in capabilities.
    pub fn register_config(&mut self, config: TokenizerConfig) -> Result<()> {
        self.register(TokenizerModule::new(config, Arc::new(BuiltinCapabilities)))
    }

    pub fn get(&self, name: &str) -> Option<&TokenizerModule> {
        self.modules.get(name)
    }

    /// Create an instance of the named tokenizer.
    pub fn create(&self, name: &str, args: &[&str]) -> Result<TokenizerInstance> {
        self.get(name)
            .ok_or_else(|| TokenizerError::config(format!("unknown tokenizer '{name}'")))?
            .create(args)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
