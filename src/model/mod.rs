//! Model capability sets and their resolution into descriptor registries.

pub mod cache;
pub mod contract;
pub mod descriptor;

pub use cache::DescriptorCache;
pub use contract::{ModelContract, ModelId, PropertyDeclaration};
pub use descriptor::{DescriptorRegistry, PropertyDescriptor, resolve_descriptors};
