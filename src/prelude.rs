//! Recommended imports grouped by how a model is described.
//!
//! `models` is the default for models declared as accessor traits.
//! `dynamic` is the name-based surface for contracts assembled at runtime.

pub mod models {
    //! Generated beans and their builders.
    //!
    //! Intended usage in app code:
    //! - `#[bean_model]` on an accessor trait,
    //! - `<Model>Bean::builder()` or `BeanFactory::instantiate_builder`,
    //! - `BeanModel`/`ModelBuilder` for the name-based escape hatch.
    pub use crate::{BeanFactory, BeanModel, ModelBuilder, Result, bean_model};
}

pub mod dynamic {
    //! Runtime contracts, builders and instances.
    pub use crate::{
        BeanBuilder, BeanError, BeanFactory, DataType, DynamicBean, ModelContract,
        PropertyDeclaration, PropertyValue, PropertyVisitor, Result, Value,
    };
}
