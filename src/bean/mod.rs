//! Property stores and the objects built on them.

pub mod builder;
pub mod dynamic;
pub mod store;
pub mod typed;
pub mod visitor;

pub use builder::BeanBuilder;
pub use dynamic::DynamicBean;
pub use store::{PropertyStore, StorePhase};
pub use typed::{BeanModel, ModelBuilder};
pub use visitor::{PresentValues, PropertyCollector, PropertyVisitor};
