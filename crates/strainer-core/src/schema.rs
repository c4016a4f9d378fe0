mod annotation;
pub use annotation::{Annotation, AnnotationKind, FetchType};

mod builder;
pub use builder::{Builder, EntityBuilder};

mod entity;
pub use entity::{EntityId, EntityKind, EntityType};

mod field;
pub use field::Field;

pub mod metadata;
pub use metadata::{ElementKind, EntityMetadata, MetadataProvider, PropertyInfo};

mod verify;

use crate::stmt::Type;

use indexmap::IndexMap;

/// The registered entity types of an application.
///
/// A schema is immutable once built. Entity types are addressed by
/// [`EntityId`], handed out by the [`Builder`] when a type is declared.
#[derive(Debug, Default)]
pub struct Schema {
    entities: Vec<EntityType>,
    by_name: IndexMap<String, EntityId>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get an entity type by ID
    pub fn entity(&self, id: impl Into<EntityId>) -> &EntityType {
        &self.entities[id.into().0]
    }

    /// Get an entity type by ID, or `None` if the ID was not issued for this
    /// schema.
    pub fn get_entity(&self, id: EntityId) -> Option<&EntityType> {
        self.entities.get(id.0)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&EntityType> {
        self.by_name.get(name).map(|id| self.entity(*id))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.iter()
    }

    /// Iterates the given entity type followed by each of its supertypes,
    /// nearest first.
    pub fn hierarchy(&self, id: EntityId) -> impl Iterator<Item = &EntityType> {
        let mut next = Some(id);
        core::iter::from_fn(move || {
            let entity = self.entity(next?);
            next = entity.supertype;
            Some(entity)
        })
    }

    /// Returns `true` if the type is a registered entity, as opposed to a
    /// scalar, a container or an embeddable value type.
    pub fn is_entity_type(&self, ty: &Type) -> bool {
        match ty.as_entity() {
            Some(id) => self.entity(id).kind.is_entity(),
            None => false,
        }
    }

    /// Finds a declared field by name on the entity type or one of its
    /// supertypes.
    pub fn find_field(&self, id: EntityId, name: &str) -> Option<(&EntityType, &Field)> {
        self.hierarchy(id)
            .find_map(|entity| entity.field(name).map(|field| (entity, field)))
    }
}
