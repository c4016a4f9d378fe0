use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - Two entity types share a name, or a field name repeats within a hierarchy
/// - A field references an entity type or supertype that was never declared
/// - The supertype chain loops back on itself
/// - A container type nests another container, so its element type cannot be
///   determined
///
/// These errors are raised while the schema is built, before any request is
/// served.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
