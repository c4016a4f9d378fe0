use crate::schema::{EntityId, PropertyInfo};
use crate::stmt::Type;

/// How a resolved segment moves from its parent to its target.
#[derive(Debug, Clone, PartialEq)]
pub enum PathStep {
    /// A declared field of the parent entity type.
    Field(PropertyInfo),

    /// The keys of the parent map.
    MapKey,

    /// The values of the parent map.
    MapValue,
}

impl PathStep {
    pub fn as_field(&self) -> Option<&PropertyInfo> {
        match self {
            Self::Field(property) => Some(property),
            _ => None,
        }
    }
}

/// One resolved segment of a field path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    /// Segment name after alias substitution
    pub name: String,

    /// Resolved path from the root up to and including this segment. Used as
    /// the join key.
    pub path: String,

    pub step: PathStep,
}

/// A field path resolved against a root entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPathInfo {
    pub root: EntityId,

    /// The path as submitted
    pub original_path: String,

    /// The path with every alias replaced by the declared field name
    pub resolved_path: String,

    /// Resolved name of the last segment
    pub field_name: String,

    /// Type owning the last segment: an entity type, or a map type when the
    /// path ends on a map pseudo-segment
    pub parent_type: Type,

    /// Type of the last segment with collections unwrapped to their element
    /// type
    pub terminal_type: Type,

    /// Resolved segments in path order
    pub segments: Vec<PathSegment>,
}

impl FieldPathInfo {
    /// The segment filtered on.
    pub fn terminal(&self) -> &PathSegment {
        // Resolution never produces an empty segment list
        &self.segments[self.segments.len() - 1]
    }

    /// Segments leading to the terminal segment.
    pub fn intermediate(&self) -> &[PathSegment] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Metadata of the terminal field, unless the path ends on a map
    /// pseudo-segment.
    pub fn terminal_property(&self) -> Option<&PropertyInfo> {
        self.terminal().step.as_field()
    }

    /// Returns `true` if the terminal field holds several values, so a
    /// filter on it tests membership rather than equality.
    pub fn is_plural(&self) -> bool {
        self.terminal_property()
            .map(|property| property.element_kind.is_plural())
            .unwrap_or(false)
    }
}
