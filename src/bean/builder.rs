use super::dynamic::DynamicBean;
use super::store::{PropertyStore, StorePhase};
use crate::core::{PropertyValue, Result, Value};
use crate::model::{DescriptorRegistry, ModelId};
use std::sync::Arc;
use tracing::{Level, event};

/// Construction-phase wrapper around a fresh [`PropertyStore`].
///
/// The builder may write every declared property, read-only ones included.
/// Each [`build`](BeanBuilder::build) copies the store, so later writes never
/// reach instances that were already built.
///
/// ```
/// use rustbean::{BeanFactory, DataType, ModelContract};
///
/// # fn main() -> rustbean::Result<()> {
/// let contract = ModelContract::new("Person")
///     .property("id", DataType::Integer)
///     .property("name", DataType::Text);
///
/// let mut builder = BeanFactory::global().instantiate_dynamic(Some(&contract))?;
/// builder.set("id", 7i64)?.set("name", "Ada")?;
/// let person = builder.build();
/// assert_eq!(person.to_string(), "Person[id=7, name=Ada]");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BeanBuilder {
    store: PropertyStore,
}

impl BeanBuilder {
    pub(crate) fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self {
            store: PropertyStore::new(registry),
        }
    }

    pub fn model(&self) -> &ModelId {
        self.store.registry().model()
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        self.store.registry()
    }

    pub fn get(&self, name: &str) -> Result<Option<&Value>> {
        self.store.get(name)
    }

    /// Fails fast on unknown names and type mismatches, leaving the store as it was.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.store.set(name, Some(value.into()))?;
        Ok(self)
    }

    pub fn set_as<T: PropertyValue>(&mut self, name: &str, value: T) -> Result<&mut Self> {
        self.store.set(name, Some(value.into_value()))?;
        Ok(self)
    }

    pub fn clear(&mut self, name: &str) -> Result<&mut Self> {
        self.store.set(name, None)?;
        Ok(self)
    }

    /// A new instance bound to its own copy of the current values.
    pub fn build(&self) -> DynamicBean {
        event!(Level::TRACE, model = %self.model(), "building bean");
        DynamicBean::from_store(self.store.fork(StorePhase::Sealed))
    }

    #[doc(hidden)]
    pub fn typed_set<T: PropertyValue>(
        &mut self,
        index: usize,
        value: Option<T>,
    ) -> Result<Option<Value>> {
        self.store.put_slot(index, value.map(PropertyValue::into_value))
    }
}
