pub mod error;
pub mod property_value;
pub mod value;

pub use error::{BeanError, Result};
pub use property_value::PropertyValue;
pub use value::{DataType, Value};
