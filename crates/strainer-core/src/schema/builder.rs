use super::{EntityId, EntityKind, EntityType, Field, Schema};
use crate::Result;

use indexmap::IndexMap;
use tracing::debug;

/// Declares the entity types of a [`Schema`].
///
/// Types are declared first and populated afterwards, so fields may refer to
/// types declared later, including the declaring type itself.
///
/// ```
/// use strainer_core::schema::{Annotation, Field, Schema};
/// use strainer_core::stmt::Type;
///
/// let mut builder = Schema::builder();
/// let person = builder.entity("Person");
/// let address = builder.entity("Address");
///
/// builder
///     .model(person)
///     .field(Field::new("firstName", Type::String))
///     .field(Field::new("addressEntities", Type::set(address)).annotated(Annotation::many_to_many()));
/// builder.model(address).field(Field::new("city", Type::String));
///
/// let schema = builder.build().unwrap();
/// assert!(schema.entity_by_name("Person").is_some());
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    entities: Vec<EntityType>,
}

/// Populates a single declared entity type.
#[derive(Debug)]
pub struct EntityBuilder<'a> {
    entity: &'a mut EntityType,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an entity type.
    pub fn entity(&mut self, name: impl Into<String>) -> EntityId {
        self.declare(name.into(), EntityKind::Entity)
    }

    /// Declares an embeddable value type.
    pub fn embeddable(&mut self, name: impl Into<String>) -> EntityId {
        self.declare(name.into(), EntityKind::Embeddable)
    }

    fn declare(&mut self, name: String, kind: EntityKind) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(EntityType::new(id, name, kind));
        id
    }

    /// Returns a builder populating a previously declared type.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this builder.
    pub fn model(&mut self, id: EntityId) -> EntityBuilder<'_> {
        EntityBuilder {
            entity: &mut self.entities[id.0],
        }
    }

    /// Verifies the declarations and freezes them into a [`Schema`].
    pub fn build(self) -> Result<Schema> {
        let mut by_name = IndexMap::new();

        for entity in &self.entities {
            by_name.entry(entity.name.clone()).or_insert(entity.id);
        }

        let schema = Schema {
            entities: self.entities,
            by_name,
        };

        schema.verify()?;

        debug!(entities = schema.entities.len(), "built schema");
        Ok(schema)
    }
}

impl EntityBuilder<'_> {
    pub fn field(self, field: Field) -> Self {
        self.entity.fields.push(field);
        self
    }

    pub fn supertype(self, id: EntityId) -> Self {
        self.entity.supertype = Some(id);
        self
    }
}
