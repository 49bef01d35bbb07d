//! Generated entity model.
//!
//! An [`Entity`] is the shape of one class the emitter renders: a name, a
//! package, ordered fields and the annotations ([`Descriptor`]) each part
//! carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::schema::ValueType;

/// Which of the schema's parameter lists a root field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    Import,
    Export,
    Table,
}

/// Parameter shape recorded on a field's parameter descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Simple,
    Structure,
    Table,
}

/// Declared type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    /// A primitive or standard library type.
    Primitive(ValueType),
    /// Reference to a generated structure entity by name.
    Entity(String),
    /// Generic sequence of the inner type.
    Sequence(Box<DeclaredType>),
}

impl DeclaredType {
    pub fn sequence_of(inner: DeclaredType) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Name of the generated entity this type refers to, looking through sequences.
    pub fn entity_name(&self) -> Option<&str> {
        match self {
            Self::Primitive(_) => None,
            Self::Entity(name) => Some(name),
            Self::Sequence(inner) => inner.entity_name(),
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => write!(f, "{ty}"),
            Self::Entity(name) => f.write_str(name),
            Self::Sequence(inner) => write!(f, "List<{inner}>"),
        }
    }
}

/// Annotation attached to a generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor<'a> {
    /// Direction of a root-level field.
    Role(RoleTag),
    /// Remote parameter the field maps to.
    Parameter { wire_name: &'a str, kind: FieldKind },
}

/// One field of a generated entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub declared_type: DeclaredType,
    pub wire_name: String,
    pub kind: FieldKind,
    /// Only set on fields of the root entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleTag>,
}

impl FieldSpec {
    /// Annotations in emission order: the role tag first, then the parameter mapping.
    pub fn descriptors(&self) -> Vec<Descriptor<'_>> {
        let mut out = Vec::with_capacity(2);
        if let Some(role) = self.role {
            out.push(Descriptor::Role(role));
        }
        out.push(Descriptor::Parameter {
            wire_name: &self.wire_name,
            kind: self.kind,
        });
        out
    }
}

/// Whether an entity is bound to a remote function or is a plain structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    Root {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operation: Option<String>,
    },
    Structure,
}

/// A generated class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub package: String,
    #[serde(flatten)]
    pub kind: EntityKind,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Entity {
    pub fn root(
        name: impl Into<String>,
        package: impl Into<String>,
        operation: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind: EntityKind::Root { operation },
            fields: Vec::new(),
        }
    }

    pub fn structure(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind: EntityKind::Structure,
            fields: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, EntityKind::Root { .. })
    }

    /// Wire name of the bound function, root entities only.
    pub fn operation(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Root { operation } => operation.as_deref(),
            EntityKind::Structure => None,
        }
    }

    /// `package.Name`, or just `Name` when the package is empty.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Output of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntitySet {
    pub root: Entity,
    /// Structure entities in first-registration order, unique by name.
    pub structures: Vec<Entity>,
}

impl GeneratedEntitySet {
    pub fn structure(&self, name: &str) -> Option<&Entity> {
        self.structures.iter().find(|e| e.name == name)
    }

    /// Root entity followed by every structure entity.
    pub fn all(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.root).chain(self.structures.iter())
    }
}
