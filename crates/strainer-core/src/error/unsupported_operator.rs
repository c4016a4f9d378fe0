use super::Error;
use crate::stmt::Operator;

/// Error when the query backend cannot express an operator of the value
/// language.
///
/// This is a capability mismatch between the request and the configured
/// backend. It is permanent: retrying the same request cannot succeed.
#[derive(Debug)]
pub(super) struct UnsupportedOperator {
    operator: Operator,
    backend: Box<str>,
}

impl std::error::Error for UnsupportedOperator {}

impl core::fmt::Display for UnsupportedOperator {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported operator {}: {} cannot express it",
            self.operator, self.backend
        )
    }
}

impl Error {
    /// Creates an unsupported operator error.
    pub fn unsupported_operator(operator: Operator, backend: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperator(UnsupportedOperator {
            operator,
            backend: backend.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operator error.
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperator(_))
    }
}
