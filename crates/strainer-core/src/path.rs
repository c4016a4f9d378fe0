mod info;
pub use info::{FieldPathInfo, PathSegment, PathStep};

mod resolver;
pub use resolver::FieldPathResolver;

/// Separator between the segments of a field path.
pub const SEPARATOR: char = '.';

/// Pseudo-segment selecting the keys of a map-valued field.
pub const MAP_KEY: &str = "key";

/// Pseudo-segment selecting the values of a map-valued field.
pub const MAP_VALUE: &str = "value";

/// Joins a parent path and a segment.
pub(crate) fn child_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}{SEPARATOR}{segment}")
    }
}
