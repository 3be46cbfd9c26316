use super::{DataType, Value};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Rust types that can back a bean property.
///
/// Generated beans and builders convert through this trait, so a property
/// declared as `Option<T>` in a model trait is stored as `T::data_type()`.
pub trait PropertyValue: Clone + Send + Sync + 'static {
    fn data_type() -> DataType;
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

impl PropertyValue for i64 {
    fn data_type() -> DataType {
        DataType::Integer
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl PropertyValue for f64 {
    fn data_type() -> DataType {
        DataType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl PropertyValue for bool {
    fn data_type() -> DataType {
        DataType::Boolean
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl PropertyValue for String {
    fn data_type() -> DataType {
        DataType::Text
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl PropertyValue for DateTime<Utc> {
    fn data_type() -> DataType {
        DataType::Timestamp
    }

    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl PropertyValue for NaiveDate {
    fn data_type() -> DataType {
        DataType::Date
    }

    fn into_value(self) -> Value {
        Value::Date(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl PropertyValue for Uuid {
    fn data_type() -> DataType {
        DataType::Uuid
    }

    fn into_value(self) -> Value {
        Value::Uuid(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }
}

impl<T: PropertyValue> PropertyValue for Vec<T> {
    fn data_type() -> DataType {
        DataType::List(Box::new(T::data_type()))
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(PropertyValue::into_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_list()?
            .iter()
            .map(T::from_value)
            .collect::<Option<Vec<_>>>()
    }
}
