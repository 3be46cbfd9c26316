use crate::core::{BeanError, Result};
use serde::{Deserialize, Serialize};

/// Which descriptor cache a factory resolves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheScope {
    /// The process-wide cache.
    #[default]
    Shared,
    /// A cache owned by the factory alone.
    Isolated,
}

/// Bean factory configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Cache the factory resolves descriptors through
    pub cache: CacheScope,

    /// Upper bound on retained registries (isolated caches only)
    pub max_cached_models: Option<usize>,
}

impl FactoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a private descriptor cache
    pub fn isolated(mut self) -> Self {
        self.cache = CacheScope::Isolated;
        self
    }

    /// Use the process-wide descriptor cache
    pub fn shared(mut self) -> Self {
        self.cache = CacheScope::Shared;
        self
    }

    /// Limit how many models an isolated cache retains
    pub fn max_cached_models(mut self, max: usize) -> Self {
        self.max_cached_models = Some(max);
        self
    }

    /// Parse from JSON
    ///
    /// ```
    /// # use rustbean::{CacheScope, FactoryConfig};
    /// let config = FactoryConfig::from_json_str(r#"{"cache": "isolated", "max_cached_models": 8}"#).unwrap();
    /// assert_eq!(config.cache, CacheScope::Isolated);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| BeanError::InvalidArgument(format!("factory config: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_cached_models.is_some() && self.cache == CacheScope::Shared {
            return Err(BeanError::InvalidArgument(
                "max_cached_models applies only to an isolated cache".to_string(),
            ));
        }
        if self.max_cached_models == Some(0) {
            return Err(BeanError::InvalidArgument(
                "max_cached_models must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
