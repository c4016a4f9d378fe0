use super::{child_path, FieldPathInfo, PathSegment, PathStep, MAP_KEY, MAP_VALUE, SEPARATOR};
use crate::alias::AliasResolutionService;
use crate::schema::{EntityId, MetadataProvider};
use crate::stmt::Type;
use crate::{Error, Result};

use std::sync::Arc;
use tracing::trace;

/// Resolves dotted field paths against a root entity type.
#[derive(Debug, Clone)]
pub struct FieldPathResolver {
    metadata: Arc<MetadataProvider>,
    aliases: Arc<AliasResolutionService>,
}

impl FieldPathResolver {
    pub fn new(metadata: Arc<MetadataProvider>, aliases: Arc<AliasResolutionService>) -> Self {
        Self { metadata, aliases }
    }

    /// Resolves `path` segment by segment, starting at `root`.
    ///
    /// Each segment is first passed through alias resolution against the type
    /// it is read from, then looked up among that type's declared and
    /// inherited fields. Below a map-valued field only the [`MAP_KEY`] and
    /// [`MAP_VALUE`] pseudo-segments are accepted.
    ///
    /// # Errors
    ///
    /// Returns an invalid field path error when a segment is empty, names no
    /// field, follows a map with anything but a pseudo-segment, or descends
    /// into a scalar.
    pub fn resolve_field_path(&self, root: EntityId, path: &str) -> Result<FieldPathInfo> {
        let Some(root_entity) = self.metadata.schema().get_entity(root) else {
            return Err(Error::invalid_schema(format!(
                "entity type #{} is not registered",
                root.0
            )));
        };

        let invalid = |segment: &str, detail: String| {
            Error::invalid_field_path(path, &root_entity.name, segment, detail)
        };

        if path.is_empty() {
            return Err(invalid("", "the path is empty".to_string()));
        }

        let mut parent_type = Type::Entity(root);
        let mut current_type = Type::Entity(root);
        let mut resolved_path = String::new();
        let mut segments = Vec::new();

        for segment in path.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(invalid(segment, "the path contains an empty segment".to_string()));
            }

            parent_type = current_type;

            let (name, step, next) = match &parent_type {
                Type::Map(key, value) => match segment {
                    MAP_KEY => (MAP_KEY.to_string(), PathStep::MapKey, (**key).clone()),
                    MAP_VALUE => (MAP_VALUE.to_string(), PathStep::MapValue, (**value).clone()),
                    _ => {
                        return Err(invalid(
                            segment,
                            format!(
                                "`{segment}` cannot follow map-valued field `{}`; \
                                 expected `{MAP_KEY}` or `{MAP_VALUE}`",
                                segments
                                    .last()
                                    .map(|s: &PathSegment| s.name.as_str())
                                    .unwrap_or_default()
                            ),
                        ))
                    }
                },
                Type::Entity(owner) => {
                    let owner = *owner;
                    let name = self.aliases.resolve(owner, segment);
                    let metadata = self.metadata.property_infos(owner)?;

                    let Some(property) = metadata.property(&name) else {
                        let owner_name = &self.metadata.schema().entity(owner).name;
                        return Err(invalid(
                            segment,
                            format!("`{name}` is not a field of `{owner_name}`"),
                        ));
                    };

                    let next = property.declared_type.effective().clone();
                    (name, PathStep::Field(property.clone()), next)
                }
                scalar => {
                    let previous = segments
                        .last()
                        .map(|s: &PathSegment| s.name.as_str())
                        .unwrap_or_default();
                    return Err(invalid(
                        segment,
                        format!("`{previous}` of type {scalar} has no nested fields"),
                    ));
                }
            };

            resolved_path = child_path(&resolved_path, &name);
            segments.push(PathSegment {
                name,
                path: resolved_path.clone(),
                step,
            });
            current_type = next;
        }

        let field_name = segments
            .last()
            .map(|segment| segment.name.clone())
            .unwrap_or_default();

        trace!(root = %root_entity.name, path, resolved = %resolved_path, "resolved field path");

        Ok(FieldPathInfo {
            root,
            original_path: path.to_string(),
            resolved_path,
            field_name,
            parent_type,
            terminal_type: current_type,
            segments,
        })
    }
}
