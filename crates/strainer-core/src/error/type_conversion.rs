use super::Error;

/// Error when a raw request value cannot be converted to the type of the field
/// it filters.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    raw: Box<str>,
    to_type: Box<str>,
    reason: Box<str>,
    field_path: Option<Box<str>>,
}

impl TypeConversionError {
    pub(super) fn field_path(&self) -> Option<&str> {
        self.field_path.as_deref()
    }
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert `{}` to {}", self.raw, self.to_type)?;
        if let Some(ref path) = self.field_path {
            write!(f, " for field `{path}`")?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl Error {
    /// Creates a type conversion error.
    pub fn type_conversion(
        raw: impl Into<String>,
        to_type: impl Into<String>,
        reason: impl core::fmt::Display,
    ) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            raw: raw.into().into(),
            to_type: to_type.into().into(),
            reason: reason.to_string().into(),
            field_path: None,
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeConversion(_))
    }

    /// Attaches the request field path to a type conversion error.
    ///
    /// Errors of any other kind, or conversion errors that already name a
    /// field, are returned unchanged.
    pub fn for_field(self, path: &str) -> Error {
        match self.kind() {
            super::ErrorKind::TypeConversion(err) if err.field_path.is_none() => {
                Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
                    raw: err.raw.clone(),
                    to_type: err.to_type.clone(),
                    reason: err.reason.clone(),
                    field_path: Some(path.into()),
                }))
            }
            _ => self,
        }
    }
}
