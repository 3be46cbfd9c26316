use crate::core::{BeanError, Result, Value};
use crate::model::{DescriptorRegistry, PropertyDescriptor};
use std::sync::Arc;

/// Whether the owning object is still being constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    /// Owned by a builder: every declared property may be written.
    Building,
    /// Owned by a built instance: only writable properties may be written.
    Sealed,
}

/// Per-instance property values, one slot per descriptor.
///
/// Slots are indexed by `PropertyDescriptor::index`; `None` is an absent value.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    registry: Arc<DescriptorRegistry>,
    values: Vec<Option<Value>>,
    phase: StorePhase,
}

impl PropertyStore {
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        let values = vec![None; registry.len()];
        Self {
            registry,
            values,
            phase: StorePhase::Building,
        }
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Copies every value into a new store in the given phase.
    pub(crate) fn fork(&self, phase: StorePhase) -> Self {
        Self {
            registry: self.registry.clone(),
            values: self.values.clone(),
            phase,
        }
    }

    pub fn get(&self, name: &str) -> Result<Option<&Value>> {
        let descriptor = self.registry.require(name)?;
        Ok(self.values[descriptor.index].as_ref())
    }

    /// Writes `value` (or clears the slot with `None`) and returns the previous value.
    ///
    /// Fails without touching the store when the name is unknown, when the
    /// property is read-only and the store is sealed, or when the value does
    /// not match the declared type.
    pub fn set(&mut self, name: &str, value: Option<Value>) -> Result<Option<Value>> {
        let index = self.registry.require(name)?.index;
        self.write(index, value)
    }

    /// Ordered copy of all entries.
    pub fn snapshot(&self) -> Vec<(String, Option<Value>)> {
        self.registry
            .iter()
            .map(|descriptor| (descriptor.name.clone(), self.values[descriptor.index].clone()))
            .collect()
    }

    /// Borrowing view of all entries in registry order.
    pub fn entries(&self) -> impl Iterator<Item = (&PropertyDescriptor, Option<&Value>)> {
        self.registry
            .iter()
            .map(|descriptor| (descriptor, self.values[descriptor.index].as_ref()))
    }

    pub fn is_unset(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Indexed write with the same checks as [`PropertyStore::set`].
    pub(crate) fn put_slot(&mut self, index: usize, value: Option<Value>) -> Result<Option<Value>> {
        if index >= self.values.len() {
            return Err(BeanError::InvalidArgument(format!(
                "Model '{}' has no property slot {}",
                self.registry.model_name(),
                index
            )));
        }
        self.write(index, value)
    }

    fn write(&mut self, index: usize, value: Option<Value>) -> Result<Option<Value>> {
        let descriptor = &self.registry.descriptors()[index];
        if self.phase == StorePhase::Sealed && !descriptor.writable {
            return Err(BeanError::read_only(
                self.registry.model_name(),
                &descriptor.name,
            ));
        }
        if let Some(value) = &value {
            if !descriptor.data_type.accepts(value) {
                return Err(BeanError::TypeMismatch(format!(
                    "Property '{}' of model '{}' expects {}, got {}",
                    descriptor.name,
                    self.registry.model_name(),
                    descriptor.data_type,
                    value.type_name()
                )));
            }
        }
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub(crate) fn values_eq(&self, other: &PropertyStore) -> bool {
        self.values == other.values
    }

    pub(crate) fn values(&self) -> &[Option<Value>] {
        &self.values
    }
}
