// ============================================================================
// RustBean Library
// ============================================================================

pub mod bean;
pub mod core;
pub mod factory;
pub mod model;
pub mod prelude;
pub mod support;

// Re-export main types for convenience
pub use bean::{
    BeanBuilder, BeanModel, DynamicBean, ModelBuilder, PropertyCollector, PropertyStore,
    PropertyVisitor, StorePhase,
};
pub use core::{BeanError, DataType, PropertyValue, Result, Value};
pub use factory::{BeanFactory, CacheScope, FactoryConfig};
pub use model::{
    DescriptorCache, DescriptorRegistry, ModelContract, ModelId, PropertyDeclaration,
    PropertyDescriptor, resolve_descriptors,
};

/// Turns a trait of accessor pairs into a model.
///
/// For `trait Person` this generates `PersonBean`, which implements the trait
/// over a property store, and `PersonBuilder`, a fluent builder for it.
///
/// ```
/// use rustbean::bean_model;
///
/// #[bean_model]
/// pub trait Person {
///     fn id(&self) -> Option<i64>;
///     fn set_id(&mut self, value: i64);
///     fn name(&self) -> Option<String>;
///     fn set_name(&mut self, value: String);
/// }
///
/// # fn main() -> rustbean::Result<()> {
/// let ada = PersonBean::builder()?.id(7).name("Ada").build();
/// assert_eq!(ada.name(), Some("Ada".to_string()));
/// assert_eq!(ada.to_string(), "Person[id=7, name=Ada]");
/// # Ok(())
/// # }
/// ```
pub use rustbean_derive::bean_model;
