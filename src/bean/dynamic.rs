use super::store::{PropertyStore, StorePhase};
use super::visitor::PropertyVisitor;
use crate::core::{BeanError, PropertyValue, Result, Value};
use crate::model::{DescriptorRegistry, ModelId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A live object implementing a model by delegating every accessor to its own
/// [`PropertyStore`].
///
/// Generated `<Model>Bean` types wrap one of these. It can also be used
/// directly through the name-based accessors, which is the dynamic invocation
/// path: names outside the registry fail with `UnknownProperty`.
pub struct DynamicBean {
    store: PropertyStore,
}

impl DynamicBean {
    pub(crate) fn from_store(store: PropertyStore) -> Self {
        Self { store }
    }

    /// A sealed instance with every property absent.
    pub fn empty(registry: Arc<DescriptorRegistry>) -> Self {
        Self::from_store(PropertyStore::new(registry).fork(StorePhase::Sealed))
    }

    pub fn model(&self) -> &ModelId {
        self.store.registry().model()
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        self.store.registry()
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn get(&self, name: &str) -> Result<Option<&Value>> {
        self.store.get(name)
    }

    /// Writes through the property's setter. Read-only properties are rejected.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        self.store.set(name, Some(value.into()))
    }

    pub fn clear(&mut self, name: &str) -> Result<Option<Value>> {
        self.store.set(name, None)
    }

    /// Typed read through the dynamic path.
    pub fn get_as<T: PropertyValue>(&self, name: &str) -> Result<Option<T>> {
        let descriptor = self.registry().require(name)?;
        if descriptor.data_type != T::data_type() {
            return Err(BeanError::TypeMismatch(format!(
                "Property '{}' of model '{}' is {}, requested {}",
                name,
                self.model(),
                descriptor.data_type,
                T::data_type()
            )));
        }
        Ok(self.store.slot(descriptor.index).and_then(T::from_value))
    }

    pub fn set_as<T: PropertyValue>(&mut self, name: &str, value: T) -> Result<Option<Value>> {
        self.store.set(name, Some(value.into_value()))
    }

    pub fn snapshot(&self) -> Vec<(String, Option<Value>)> {
        self.store.snapshot()
    }

    /// Walks properties in registry order.
    pub fn accept<V: PropertyVisitor + ?Sized>(&self, visitor: &mut V) {
        for (descriptor, value) in self.store.entries() {
            visitor.visit(descriptor, value);
        }
    }

    #[doc(hidden)]
    pub fn typed_get<T: PropertyValue>(&self, index: usize) -> Option<T> {
        self.store.slot(index).and_then(T::from_value)
    }

    /// Indexed write used by generated setters. Checked like [`DynamicBean::set`].
    #[doc(hidden)]
    pub fn typed_set<T: PropertyValue>(
        &mut self,
        index: usize,
        value: Option<T>,
    ) -> Result<Option<Value>> {
        self.store.put_slot(index, value.map(PropertyValue::into_value))
    }
}

impl Clone for DynamicBean {
    /// New instance over a new store holding copies of every value.
    fn clone(&self) -> Self {
        Self::from_store(self.store.fork(StorePhase::Sealed))
    }
}

impl PartialEq for DynamicBean {
    fn eq(&self, other: &Self) -> bool {
        self.model() == other.model() && self.store.values_eq(&other.store)
    }
}

impl Eq for DynamicBean {}

impl Hash for DynamicBean {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.model().hash(state);
        for value in self.store.values() {
            value.hash(state);
        }
    }
}

impl fmt::Display for DynamicBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.model())?;
        for (idx, (descriptor, value)) in self.store.entries().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{}={}", descriptor.name, value)?,
                None => write!(f, "{}=null", descriptor.name)?,
            }
        }
        write!(f, "]")
    }
}

impl fmt::Debug for DynamicBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(self.model().name());
        for (descriptor, value) in self.store.entries() {
            debug.field(&descriptor.name, &value);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;
    use crate::model::{ModelContract, resolve_descriptors};
    use std::collections::hash_map::DefaultHasher;

    fn registry(name: &str) -> Arc<DescriptorRegistry> {
        let contract = ModelContract::new(name)
            .property("id", DataType::Integer)
            .property("name", DataType::Text)
            .read_only("created", DataType::Timestamp);
        Arc::new(resolve_descriptors(&contract).unwrap())
    }

    fn hash_of(bean: &DynamicBean) -> u64 {
        let mut hasher = DefaultHasher::new();
        bean.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_empty_beans_are_equal() {
        let a = DynamicBean::empty(registry("Person"));
        let b = DynamicBean::empty(registry("Person"));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_beans_of_different_models_differ() {
        let a = DynamicBean::empty(registry("Person"));
        let b = DynamicBean::empty(registry("Employee"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sealed_bean_rejects_read_only_writes() {
        let mut bean = DynamicBean::empty(registry("Person"));
        bean.set("id", 7i64).unwrap();
        let err = bean.set("created", chrono::Utc::now()).unwrap_err();
        assert!(matches!(err, BeanError::ReadOnlyProperty(_, _)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = DynamicBean::empty(registry("Person"));
        original.set("name", "Ada").unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(hash_of(&copy), hash_of(&original));

        copy.set("name", "Grace").unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.get_as::<String>("name").unwrap(), Some("Ada".to_string()));
    }

    #[test]
    fn test_typed_read_checks_declared_type() {
        let mut bean = DynamicBean::empty(registry("Person"));
        bean.set_as("id", 7i64).unwrap();
        assert_eq!(bean.get_as::<i64>("id").unwrap(), Some(7));
        assert!(matches!(
            bean.get_as::<String>("id"),
            Err(BeanError::TypeMismatch(_))
        ));
        assert!(matches!(
            bean.get_as::<i64>("age"),
            Err(BeanError::UnknownProperty(_, _))
        ));
    }

    #[test]
    fn test_display_lists_properties_in_order() {
        let mut bean = DynamicBean::empty(registry("Person"));
        bean.set("id", 7i64).unwrap();
        bean.set("name", "Ada").unwrap();
        assert_eq!(bean.to_string(), "Person[id=7, name=Ada, created=null]");
    }

    #[test]
    fn test_visitor_sees_every_property() {
        let mut bean = DynamicBean::empty(registry("Person"));
        bean.set("name", "Ada").unwrap();

        let mut seen = Vec::new();
        bean.accept(&mut |descriptor: &crate::model::PropertyDescriptor, value: Option<&Value>| {
            seen.push((descriptor.name.clone(), value.is_some()));
        });
        assert_eq!(
            seen,
            vec![
                ("id".to_string(), false),
                ("name".to_string(), true),
                ("created".to_string(), false),
            ]
        );
    }
}
