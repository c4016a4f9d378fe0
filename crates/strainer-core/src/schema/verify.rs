use super::{EntityId, EntityType, Schema};
use crate::{stmt::Type, Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_entity_names_are_unique()?;

        // Supertype chains must be sound before anything walks a hierarchy.
        for entity in self.schema.entities() {
            self.verify_supertype_chain(entity)?;
        }

        for entity in self.schema.entities() {
            self.verify_field_names(entity)?;

            for field in &entity.fields {
                self.verify_field_type(entity, &field.name, &field.ty)?;
            }
        }

        Ok(())
    }

    fn verify_entity_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for entity in self.schema.entities() {
            if entity.name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "entity type #{} has an empty name",
                    entity.id.0
                )));
            }

            if !names.insert(entity.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate entity name `{}`",
                    entity.name
                )));
            }
        }

        Ok(())
    }

    fn verify_supertype_chain(&self, entity: &EntityType) -> Result<()> {
        let mut seen = HashSet::from([entity.id]);
        let mut next = entity.supertype;

        while let Some(id) = next {
            self.verify_entity_id(id, || format!("supertype of `{}`", entity.name))?;

            if !seen.insert(id) {
                return Err(Error::invalid_schema(format!(
                    "supertype chain of `{}` loops back to `{}`",
                    entity.name,
                    self.schema.entity(id).name
                )));
            }

            next = self.schema.entity(id).supertype;
        }

        Ok(())
    }

    fn verify_field_names(&self, entity: &EntityType) -> Result<()> {
        let mut names = HashSet::new();

        for owner in self.schema.hierarchy(entity.id) {
            for field in &owner.fields {
                if field.name.is_empty() {
                    return Err(Error::invalid_schema(format!(
                        "`{}` declares a field with an empty name",
                        owner.name
                    )));
                }

                if field.name.contains('.') {
                    return Err(Error::invalid_schema(format!(
                        "field name `{}.{}` contains the path separator",
                        owner.name, field.name
                    )));
                }

                if !names.insert(field.name.as_str()) {
                    return Err(Error::invalid_schema(format!(
                        "field `{}` is declared more than once in the hierarchy of `{}`",
                        field.name, entity.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_field_type(&self, entity: &EntityType, field: &str, ty: &Type) -> Result<()> {
        let location = || format!("type of field `{}.{}`", entity.name, field);

        for param in ty.parameters() {
            if param.is_container() {
                return Err(Error::invalid_schema(format!(
                    "field `{}.{}` has type `{ty}`; the element type of a container must not \
                     itself be a container",
                    entity.name, field
                )));
            }

            if let Some(id) = param.as_entity() {
                self.verify_entity_id(id, location)?;
            }
        }

        if let Some(id) = ty.as_entity() {
            self.verify_entity_id(id, location)?;
        }

        Ok(())
    }

    fn verify_entity_id(&self, id: EntityId, location: impl FnOnce() -> String) -> Result<()> {
        if id.0 < self.schema.entities.len() {
            Ok(())
        } else {
            Err(Error::invalid_schema(format!(
                "{} references undeclared entity type #{}",
                location(),
                id.0
            )))
        }
    }
}
