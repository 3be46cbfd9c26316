//! Entry point handing out builders for models.

pub mod config;

pub use config::{CacheScope, FactoryConfig};

use crate::bean::{BeanBuilder, BeanModel, ModelBuilder as _};
use crate::core::{BeanError, Result};
use crate::model::{DescriptorCache, ModelContract};
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing::{Level, event};

lazy_static! {
    static ref GLOBAL_FACTORY: BeanFactory = BeanFactory::default();
}

/// Hands out fresh builders, resolving each model through a descriptor cache.
///
/// No two calls share a builder or its store, even for the same model.
#[derive(Debug, Clone)]
pub struct BeanFactory {
    cache: Arc<DescriptorCache>,
    config: FactoryConfig,
}

impl Default for BeanFactory {
    fn default() -> Self {
        Self {
            cache: DescriptorCache::global(),
            config: FactoryConfig::default(),
        }
    }
}

impl BeanFactory {
    pub fn new(config: FactoryConfig) -> Result<Self> {
        config.validate()?;
        let cache = match (config.cache, config.max_cached_models) {
            (CacheScope::Shared, _) => DescriptorCache::global(),
            (CacheScope::Isolated, Some(max)) => Arc::new(DescriptorCache::with_limit(max)),
            (CacheScope::Isolated, None) => Arc::new(DescriptorCache::new()),
        };
        Ok(Self { cache, config })
    }

    /// Factory over an explicitly supplied cache.
    pub fn with_cache(cache: Arc<DescriptorCache>) -> Self {
        Self {
            cache,
            config: FactoryConfig::new().isolated(),
        }
    }

    /// The factory used by generated `<Model>Bean::builder()` helpers.
    pub fn global() -> &'static BeanFactory {
        &GLOBAL_FACTORY
    }

    pub fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Typed builder for a generated model.
    pub fn instantiate_builder<M: BeanModel>(&self) -> Result<M::Builder> {
        let registry = self.cache.resolve_with(&M::model_id(), M::contract)?;
        event!(Level::TRACE, model = %registry.model(), "instantiated typed builder");
        Ok(M::Builder::from_dynamic(BeanBuilder::new(registry)))
    }

    /// Builder for a runtime contract. An absent contract is rejected before
    /// any resolution happens.
    pub fn instantiate_dynamic(&self, contract: Option<&ModelContract>) -> Result<BeanBuilder> {
        let contract = contract.ok_or_else(|| {
            BeanError::InvalidArgument("model contract must be provided".to_string())
        })?;
        let registry = self.cache.resolve(contract)?;
        event!(Level::TRACE, model = %registry.model(), "instantiated dynamic builder");
        Ok(BeanBuilder::new(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;

    fn person() -> ModelContract {
        ModelContract::new("FactoryPerson")
            .property("id", DataType::Integer)
            .property("name", DataType::Text)
    }

    #[test]
    fn test_absent_contract_is_invalid_argument() {
        let factory = BeanFactory::new(FactoryConfig::new().isolated()).unwrap();
        let err = factory.instantiate_dynamic(None).unwrap_err();
        assert!(matches!(err, BeanError::InvalidArgument(_)));
        assert!(factory.cache().is_empty());
    }

    #[test]
    fn test_invalid_model_produces_no_builder() {
        let factory = BeanFactory::new(FactoryConfig::new().isolated()).unwrap();
        let err = factory
            .instantiate_dynamic(Some(&ModelContract::new("Nothing")))
            .unwrap_err();
        assert!(matches!(err, BeanError::InvalidModel(_)));
    }

    #[test]
    fn test_builders_never_share_stores() {
        let factory = BeanFactory::new(FactoryConfig::new().isolated()).unwrap();
        let mut first = factory.instantiate_dynamic(Some(&person())).unwrap();
        let second = factory.instantiate_dynamic(Some(&person())).unwrap();
        first.set("id", 1i64).unwrap();
        assert!(second.build().store().is_unset());
        assert!(Arc::ptr_eq(first.registry(), second.registry()));
    }

    #[test]
    fn test_isolated_factories_do_not_share_caches() {
        let a = BeanFactory::new(FactoryConfig::new().isolated()).unwrap();
        let b = BeanFactory::new(FactoryConfig::new().isolated()).unwrap();
        a.instantiate_dynamic(Some(&person())).unwrap();
        assert_eq!(a.cache().len(), 1);
        assert!(b.cache().is_empty());
    }

    #[test]
    fn test_shared_factories_use_global_cache() {
        let factory = BeanFactory::new(FactoryConfig::new()).unwrap();
        assert!(Arc::ptr_eq(factory.cache(), &DescriptorCache::global()));
    }
}
