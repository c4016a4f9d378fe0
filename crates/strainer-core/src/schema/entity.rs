use super::Field;

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub usize);

impl From<&EntityId> for EntityId {
    fn from(src: &EntityId) -> Self {
        *src
    }
}

impl From<&EntityType> for EntityId {
    fn from(value: &EntityType) -> Self {
        value.id
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// A root-addressable entity. Fields referencing it are association
    /// candidates.
    Entity,

    /// A value type stored inline in its owner.
    Embeddable,
}

impl EntityKind {
    pub fn is_entity(self) -> bool {
        matches!(self, Self::Entity)
    }
}

#[derive(Debug, Clone)]
pub struct EntityType {
    /// Uniquely identifies the entity type within the schema
    pub id: EntityId,

    /// Simple name of the type. Used as the alias index prefix and in error
    /// messages.
    pub name: String,

    pub kind: EntityKind,

    /// Type whose fields this type inherits
    pub supertype: Option<EntityId>,

    /// Fields declared by this type, in declaration order. Inherited fields
    /// are not repeated here.
    pub fields: Vec<Field>,
}

impl EntityType {
    pub(crate) fn new(id: EntityId, name: String, kind: EntityKind) -> Self {
        Self {
            id,
            name,
            kind,
            supertype: None,
            fields: vec![],
        }
    }

    /// Looks up a field declared directly on this type.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
