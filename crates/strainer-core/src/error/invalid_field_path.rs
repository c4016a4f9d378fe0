use super::Error;

/// Error when a request field path cannot be resolved against the root
/// entity type.
///
/// This occurs when:
/// - A segment does not name a declared field, even after alias resolution
/// - A segment below a map-valued field is neither `key` nor `value`
/// - A segment tries to descend into a scalar
/// - The path, or one of its segments, is empty
#[derive(Debug)]
pub(super) struct InvalidFieldPath {
    path: Box<str>,
    root: Box<str>,
    segment: Box<str>,
    detail: Box<str>,
}

impl InvalidFieldPath {
    pub(super) fn path(&self) -> &str {
        &self.path
    }
}

impl std::error::Error for InvalidFieldPath {}

impl core::fmt::Display for InvalidFieldPath {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid field path `{}` from `{}`: {}",
            self.path, self.root, self.detail
        )
    }
}

impl Error {
    /// Creates an invalid field path error.
    ///
    /// `path` is the path as submitted by the caller, `root` the name of the
    /// entity type it was resolved from and `segment` the part that failed.
    pub fn invalid_field_path(
        path: impl Into<String>,
        root: impl Into<String>,
        segment: impl Into<String>,
        detail: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidFieldPath(InvalidFieldPath {
            path: path.into().into(),
            root: root.into().into(),
            segment: segment.into().into(),
            detail: detail.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid field path error.
    pub fn is_invalid_field_path(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidFieldPath(_))
    }

    /// The path segment that could not be resolved, for invalid field path
    /// errors.
    pub fn invalid_segment(&self) -> Option<&str> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::InvalidFieldPath(err) => Some(&*err.segment),
            _ => None,
        })
    }
}
