use super::builder::BeanBuilder;
use super::dynamic::DynamicBean;
use crate::core::{Result, Value};
use crate::model::{ModelContract, ModelId};

/// A concrete bean type generated for one model trait by `#[bean_model]`.
///
/// The generated type is a thin wrapper over a [`DynamicBean`]; the provided
/// methods expose the name-based dynamic path on top of the typed accessors.
pub trait BeanModel: Clone + Eq + std::hash::Hash + Sized + 'static {
    type Builder: ModelBuilder<Bean = Self>;

    fn model_id() -> ModelId;

    /// The declared capability set, in declaration order.
    fn contract() -> ModelContract;

    fn from_dynamic(bean: DynamicBean) -> Self;

    fn as_dynamic(&self) -> &DynamicBean;

    fn as_dynamic_mut(&mut self) -> &mut DynamicBean;

    fn into_dynamic(self) -> DynamicBean;

    fn get_property(&self, name: &str) -> Result<Option<&Value>> {
        self.as_dynamic().get(name)
    }

    fn set_property(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        self.as_dynamic_mut().set(name, value)
    }
}

/// The fluent builder generated alongside a [`BeanModel`].
pub trait ModelBuilder: Sized {
    type Bean: BeanModel<Builder = Self>;

    fn from_dynamic(builder: BeanBuilder) -> Self;

    fn as_dynamic(&self) -> &BeanBuilder;

    fn as_dynamic_mut(&mut self) -> &mut BeanBuilder;

    fn build(&self) -> Self::Bean {
        Self::Bean::from_dynamic(self.as_dynamic().build())
    }

    /// Name-based write, failing fast like [`BeanBuilder::set`].
    fn set_property(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.as_dynamic_mut().set(name, value)?;
        Ok(self)
    }
}
