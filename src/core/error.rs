use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BeanError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Property '{1}' is not declared by model '{0}'")]
    UnknownProperty(String, String),

    #[error("Property '{1}' of model '{0}' is read-only")]
    ReadOnlyProperty(String, String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

pub type Result<T> = std::result::Result<T, BeanError>;

impl BeanError {
    pub(crate) fn unknown_property(model: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty(model.into(), property.into())
    }

    pub(crate) fn read_only(model: impl Into<String>, property: impl Into<String>) -> Self {
        Self::ReadOnlyProperty(model.into(), property.into())
    }
}
