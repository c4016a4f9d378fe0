//! Per-entity property metadata.
//!
//! [`MetadataProvider`] classifies every searchable field of an entity type
//! and its supertypes into a [`PropertyInfo`]. The result is computed once per
//! entity type and shared afterwards.

use super::{Annotation, AnnotationKind, EntityId, EntityType, Field, Schema};
use crate::{stmt::Type, Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

/// Semantic shape of a field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// A single value, including embeddable value types
    Scalar,
    /// A single registered entity
    Entity,
    /// A list or an unordered collection
    Collection,
    Set,
    Map,
    Array,
}

impl ElementKind {
    fn of(schema: &Schema, ty: &Type) -> ElementKind {
        match ty {
            Type::List(_) | Type::Collection(_) => ElementKind::Collection,
            Type::Set(_) => ElementKind::Set,
            Type::Array(_) => ElementKind::Array,
            Type::Map(..) => ElementKind::Map,
            ty if schema.is_entity_type(ty) => ElementKind::Entity,
            _ => ElementKind::Scalar,
        }
    }

    /// Returns `true` for kinds holding several elements of one type.
    pub fn is_plural(self) -> bool {
        matches!(self, Self::Collection | Self::Set | Self::Array)
    }

    pub fn is_map(self) -> bool {
        matches!(self, Self::Map)
    }
}

/// Metadata of a single searchable field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    /// The type declaring the field. May be a supertype of the entity the
    /// metadata was computed for.
    pub declaring_type: EntityId,

    pub name: String,

    pub element_kind: ElementKind,

    pub declared_type: Type,

    /// Type arguments of a container type. Empty for every other kind.
    pub parameterized_types: Vec<Type>,

    pub annotations: Vec<Annotation>,

    /// The first annotation recognized as an association marker, if any.
    pub join_annotation: Option<Annotation>,

    /// Name used to describe the join in log output: the target entity name
    /// for associations to an entity, `Owner.field` otherwise.
    pub join_name: String,
}

impl PropertyInfo {
    /// Returns `true` if the field carries a join annotation.
    pub fn is_joinable(&self) -> bool {
        self.join_annotation.is_some()
    }

    /// The type a join through this field lands on: the element type of a
    /// collection, the value type of a map, the declared type otherwise.
    pub fn target_type(&self) -> &Type {
        match self.element_kind {
            ElementKind::Map => self.declared_type.map_value().unwrap_or(&self.declared_type),
            _ => self.declared_type.effective(),
        }
    }

    pub fn target_entity(&self) -> Option<EntityId> {
        self.target_type().as_entity()
    }

    pub fn has_annotation(&self, kind: &AnnotationKind) -> bool {
        self.annotations
            .iter()
            .any(|annotation| annotation.kind() == *kind)
    }
}

/// All searchable properties of an entity type, own fields first, then each
/// supertype's.
#[derive(Debug, PartialEq)]
pub struct EntityMetadata {
    pub entity: EntityId,
    pub properties: IndexMap<String, PropertyInfo>,
}

impl EntityMetadata {
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.values()
    }

    pub fn joinable(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.iter().filter(|property| property.is_joinable())
    }
}

/// Computes and caches [`EntityMetadata`].
#[derive(Debug)]
pub struct MetadataProvider {
    schema: Arc<Schema>,

    /// Annotation kinds treated as association markers
    join_annotations: Vec<AnnotationKind>,

    cache: RwLock<HashMap<EntityId, Arc<EntityMetadata>>>,
}

impl MetadataProvider {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_join_annotations(schema, AnnotationKind::associations())
    }

    pub fn with_join_annotations(schema: Arc<Schema>, join_annotations: Vec<AnnotationKind>) -> Self {
        debug!(?join_annotations, "initialized metadata provider");

        Self {
            schema,
            join_annotations,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn is_entity_type(&self, ty: &Type) -> bool {
        self.schema.is_entity_type(ty)
    }

    pub fn is_join_annotation(&self, kind: &AnnotationKind) -> bool {
        self.join_annotations.contains(kind)
    }

    /// Returns the metadata of an entity type, computing it on first use.
    ///
    /// Every call for the same entity returns the same shared instance.
    pub fn property_infos(&self, entity: EntityId) -> Result<Arc<EntityMetadata>> {
        if let Some(metadata) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&entity)
        {
            return Ok(metadata.clone());
        }

        let computed = self.compute(entity)?;

        // Another thread may have published while this one computed. Keep the
        // first instance.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(entity).or_insert_with(|| Arc::new(computed)).clone())
    }

    fn compute(&self, entity: EntityId) -> Result<EntityMetadata> {
        let Some(root) = self.schema.get_entity(entity) else {
            return Err(Error::invalid_schema(format!(
                "entity type #{} is not registered",
                entity.0
            )));
        };

        let mut properties = IndexMap::new();

        for owner in self.schema.hierarchy(root.id) {
            for field in owner.fields.iter().filter(|field| field.is_searchable()) {
                let property = self.property_info(owner, field)?;
                trace!(
                    entity = %root.name,
                    property = %property.name,
                    kind = ?property.element_kind,
                    joinable = property.is_joinable(),
                    "computed property"
                );
                properties.insert(field.name.clone(), property);
            }
        }

        debug!(entity = %root.name, properties = properties.len(), "computed entity metadata");

        Ok(EntityMetadata {
            entity,
            properties,
        })
    }

    fn property_info(&self, owner: &EntityType, field: &Field) -> Result<PropertyInfo> {
        let element_kind = ElementKind::of(&self.schema, &field.ty);

        let parameterized_types: Vec<Type> =
            field.ty.parameters().into_iter().cloned().collect();

        let expected = match element_kind {
            ElementKind::Map => 2,
            kind if kind.is_plural() => 1,
            _ => 0,
        };

        if parameterized_types.len() != expected {
            return Err(Error::invalid_schema(format!(
                "cannot determine the type arguments of `{}.{}`",
                owner.name, field.name
            )));
        }

        let join_annotation = field
            .annotations
            .iter()
            .find(|annotation| self.is_join_annotation(&annotation.kind()))
            .cloned();

        let mut property = PropertyInfo {
            declaring_type: owner.id,
            name: field.name.clone(),
            element_kind,
            declared_type: field.ty.clone(),
            parameterized_types,
            annotations: field.annotations.clone(),
            join_annotation,
            join_name: String::new(),
        };

        property.join_name = match property.target_entity() {
            Some(target) if self.schema.entity(target).kind.is_entity() => {
                self.schema.entity(target).name.clone()
            }
            _ => format!("{}.{}", owner.name, field.name),
        };

        Ok(property)
    }
}
