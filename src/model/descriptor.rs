use super::contract::{ModelContract, ModelId};
use crate::core::{BeanError, DataType, Result};
use std::collections::HashMap;
use tracing::{Level, debug_span, event};

/// Resolved metadata for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub readable: bool,
    pub writable: bool,
    pub index: usize,
}

/// Ordered, read-only set of descriptors for one model.
///
/// Iteration order is declaration order. Every other component treats this as
/// the source of truth for which accessors exist.
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    model: ModelId,
    descriptors: Vec<PropertyDescriptor>,
    by_name: HashMap<String, usize>,
}

impl DescriptorRegistry {
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name.get(name).map(|idx| &self.descriptors[*idx])
    }

    /// Looks a property up, failing with `UnknownProperty` outside the registry.
    pub fn require(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.get(name)
            .ok_or_else(|| BeanError::unknown_property(self.model_name(), name))
    }

    pub fn writable(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.descriptors.iter().filter(|descriptor| descriptor.writable)
    }
}

impl PartialEq for DescriptorRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.descriptors == other.descriptors
    }
}

impl Eq for DescriptorRegistry {}

impl<'a> IntoIterator for &'a DescriptorRegistry {
    type Item = &'a PropertyDescriptor;
    type IntoIter = std::slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// Validates a contract and derives its descriptor registry. Uncached.
///
/// Repeated declarations of one name merge their capabilities when the types
/// agree and keep the position of the first declaration.
pub fn resolve_descriptors(contract: &ModelContract) -> Result<DescriptorRegistry> {
    let span = debug_span!("resolve_descriptors", model = %contract.id());
    let _guard = span.enter();

    if contract.declarations().is_empty() {
        return Err(BeanError::InvalidModel(format!(
            "Model '{}' declares no properties",
            contract.name()
        )));
    }

    let mut descriptors = Vec::<PropertyDescriptor>::new();
    let mut by_name = HashMap::<String, usize>::new();

    for declaration in contract.declarations() {
        if declaration.name.is_empty() {
            return Err(BeanError::InvalidModel(format!(
                "Model '{}' declares a property with an empty name",
                contract.name()
            )));
        }
        if !declaration.readable && !declaration.writable {
            return Err(BeanError::InvalidModel(format!(
                "Property '{}' of model '{}' is neither readable nor writable",
                declaration.name,
                contract.name()
            )));
        }

        match by_name.get(&declaration.name) {
            Some(&idx) => {
                let existing = &mut descriptors[idx];
                if existing.data_type != declaration.data_type {
                    return Err(BeanError::InvalidModel(format!(
                        "Property '{}' of model '{}' is declared as both {} and {}",
                        declaration.name,
                        contract.name(),
                        existing.data_type,
                        declaration.data_type
                    )));
                }
                existing.readable |= declaration.readable;
                existing.writable |= declaration.writable;
            }
            None => {
                let index = descriptors.len();
                by_name.insert(declaration.name.clone(), index);
                descriptors.push(PropertyDescriptor {
                    name: declaration.name.clone(),
                    data_type: declaration.data_type.clone(),
                    readable: declaration.readable,
                    writable: declaration.writable,
                    index,
                });
            }
        }
    }

    event!(
        Level::DEBUG,
        model = %contract.id(),
        properties = descriptors.len(),
        "resolved property descriptors"
    );

    Ok(DescriptorRegistry {
        model: contract.id().clone(),
        descriptors,
        by_name,
    })
}
