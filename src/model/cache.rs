use super::contract::{ModelContract, ModelId};
use super::descriptor::{DescriptorRegistry, resolve_descriptors};
use crate::core::{BeanError, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{Level, event};

lazy_static! {
    static ref GLOBAL_DESCRIPTOR_CACHE: Arc<DescriptorCache> = Arc::new(DescriptorCache::new());
}

/// Resolved descriptor registries keyed by model identity.
///
/// Entries are created lazily on first resolution and never evicted. The
/// process-wide instance is returned by [`DescriptorCache::global`]; tests and
/// isolated factories create their own with [`DescriptorCache::new`].
///
/// Resolution runs outside the lock. When two callers race on the same model,
/// the first registry inserted wins and both observe that one.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: RwLock<HashMap<ModelId, Arc<DescriptorRegistry>>>,
    max_models: Option<usize>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `max_models` registries. Models beyond the
    /// limit are still resolved, just not retained.
    pub fn with_limit(max_models: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_models: Some(max_models),
        }
    }

    /// The process-wide cache shared by every default factory.
    pub fn global() -> Arc<DescriptorCache> {
        GLOBAL_DESCRIPTOR_CACHE.clone()
    }

    pub fn get(&self, model: &ModelId) -> Option<Arc<DescriptorRegistry>> {
        // Registries are immutable once inserted, so a poisoned map is still consistent.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(model).cloned()
    }

    pub fn resolve(&self, contract: &ModelContract) -> Result<Arc<DescriptorRegistry>> {
        self.resolve_with(contract.id(), || contract.clone())
    }

    /// Returns the cached registry for `model`, building the contract and
    /// resolving it only on a miss. The built contract must carry `model` as
    /// its identity.
    pub fn resolve_with<F>(&self, model: &ModelId, contract: F) -> Result<Arc<DescriptorRegistry>>
    where
        F: FnOnce() -> ModelContract,
    {
        if let Some(registry) = self.get(model) {
            event!(Level::TRACE, model = %model, "descriptor cache hit");
            return Ok(registry);
        }

        let contract = contract();
        if contract.id() != model {
            return Err(BeanError::InvalidArgument(format!(
                "Contract '{}' does not describe model '{}'",
                contract.name(),
                model
            )));
        }
        let registry = Arc::new(resolve_descriptors(&contract)?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(model) {
            return Ok(existing.clone());
        }
        if let Some(limit) = self.max_models {
            if entries.len() >= limit {
                event!(
                    Level::WARN,
                    model = %model,
                    limit,
                    "descriptor cache is full, registry will not be retained"
                );
                return Ok(registry);
            }
        }
        entries.insert(model.clone(), registry.clone());
        Ok(registry)
    }

    pub fn contains(&self, model: &ModelId) -> bool {
        self.get(model).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
