use crate::core::DataType;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a model capability set.
///
/// Generated models are identified by the `TypeId` of their bean type. Runtime
/// contracts are identified by their name together with their declarations,
/// so two contracts sharing a name but declaring different properties are
/// different models.
#[derive(Debug, Clone)]
pub enum ModelId {
    Type {
        type_id: TypeId,
        name: &'static str,
    },
    Named {
        name: Arc<str>,
        shape: Arc<[PropertyDeclaration]>,
    },
}

impl ModelId {
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self::Type {
            type_id: TypeId::of::<T>(),
            name,
        }
    }

    /// Identity of a runtime model declaring exactly `declarations`.
    pub fn named(name: impl Into<Arc<str>>, declarations: &[PropertyDeclaration]) -> Self {
        Self::Named {
            name: name.into(),
            shape: Arc::from(declarations),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Type { name, .. } => name,
            Self::Named { name, .. } => name,
        }
    }
}

impl PartialEq for ModelId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type { type_id: a, .. }, Self::Type { type_id: b, .. }) => a == b,
            (
                Self::Named { name: a, shape: a_shape },
                Self::Named { name: b, shape: b_shape },
            ) => a == b && a_shape == b_shape,
            _ => false,
        }
    }
}

impl Eq for ModelId {}

impl Hash for ModelId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Type { type_id, .. } => {
                0u8.hash(state);
                type_id.hash(state);
            }
            Self::Named { name, shape } => {
                1u8.hash(state);
                name.hash(state);
                shape.hash(state);
            }
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One declared property of a model, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDeclaration {
    pub name: String,
    pub data_type: DataType,
    pub readable: bool,
    pub writable: bool,
}

impl PropertyDeclaration {
    /// A declaration with no capabilities yet; chain `readable`/`writable`.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            readable: false,
            writable: false,
        }
    }

    pub fn readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }
}

/// The declared capability set of a model: its identity and properties in
/// declaration order.
#[derive(Debug, Clone)]
pub struct ModelContract {
    id: ModelId,
    declarations: Vec<PropertyDeclaration>,
}

impl ModelContract {
    /// Runtime contract named `name`. Its identity follows its declarations.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_id(ModelId::named(name, &[]))
    }

    /// Contract for a generated bean type.
    pub fn for_type<T: 'static>(name: &'static str) -> Self {
        Self::with_id(ModelId::of::<T>(name))
    }

    pub fn with_id(id: ModelId) -> Self {
        Self {
            id,
            declarations: Vec::new(),
        }
    }

    pub fn declare(mut self, declaration: PropertyDeclaration) -> Self {
        self.declarations.push(declaration);
        if let ModelId::Named { name, .. } = &self.id {
            self.id = ModelId::named(name.clone(), &self.declarations);
        }
        self
    }

    /// Readable and writable property.
    pub fn property(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.declare(
            PropertyDeclaration::new(name, data_type)
                .readable(true)
                .writable(true),
        )
    }

    pub fn read_only(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.declare(PropertyDeclaration::new(name, data_type).readable(true))
    }

    pub fn write_only(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.declare(PropertyDeclaration::new(name, data_type).writable(true))
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn declarations(&self) -> &[PropertyDeclaration] {
        &self.declarations
    }
}
