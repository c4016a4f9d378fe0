use super::Error;

/// Several field-level errors reported together.
#[derive(Debug)]
pub(super) struct ValidationError {
    errors: Vec<Error>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "validation failed with {} error(s)", self.errors.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            core::fmt::Display::fmt(err, f)?;
        }
        Ok(())
    }
}

impl Error {
    /// Aggregates field-level errors into a single validation error.
    pub fn validation(errors: Vec<Error>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError { errors }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }

    /// The aggregated errors of a validation error. Empty for every other kind.
    pub fn errors(&self) -> &[Error] {
        match self.kind() {
            super::ErrorKind::Validation(err) => &err.errors,
            _ => &[],
        }
    }
}
