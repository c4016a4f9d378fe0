mod adhoc;
mod invalid_field_path;
mod invalid_schema;
mod type_conversion;
mod unsupported_operator;
mod validation;

use adhoc::AdhocError;
use invalid_field_path::InvalidFieldPath;
use invalid_schema::InvalidSchema;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unsupported_operator::UnsupportedOperator;
use validation::ValidationError;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while turning request parameters into a query
/// specification.
///
/// Every error carries a stable [`code`](Error::code) so callers can map
/// failures to their own response format, and, when the failure concerns a
/// single request field, the offending [`field_path`](Error::field_path).
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Stable, machine-readable identifier of the failure kind.
    ///
    /// Context layers are skipped: the code is the one of the most specific
    /// error in the chain.
    pub fn code(&self) -> &'static str {
        self.chain()
            .map(|err| err.kind().code())
            .find(|code| *code != ErrorKind::INTERNAL)
            .unwrap_or(ErrorKind::INTERNAL)
    }

    /// The request field path the failure relates to, if any.
    pub fn field_path(&self) -> Option<&str> {
        self.chain().find_map(|err| match err.kind() {
            ErrorKind::InvalidFieldPath(err) => Some(err.path()),
            ErrorKind::TypeConversion(err) => err.field_path(),
            _ => None,
        })
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => self
                .inner
                .as_ref()
                .and_then(|inner| inner.cause.as_ref())
                .map(|cause| cause as &(dyn std::error::Error + 'static)),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    InvalidFieldPath(InvalidFieldPath),
    TypeConversion(TypeConversionError),
    UnsupportedOperator(UnsupportedOperator),
    InvalidSchema(InvalidSchema),
    Validation(ValidationError),
    Unknown,
}

impl ErrorKind {
    const INTERNAL: &'static str = "INTERNAL";

    fn code(&self) -> &'static str {
        use self::ErrorKind::*;

        match self {
            InvalidFieldPath(_) => "INVALID_FIELD_PATH",
            TypeConversion(_) => "CONVERSION_FAILED",
            UnsupportedOperator(_) => "UNSUPPORTED_OPERATOR",
            InvalidSchema(_) => "INVALID_SCHEMA",
            Validation(_) => "VALIDATION",
            Anyhow(_) | Adhoc(_) | Unknown => Self::INTERNAL,
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidFieldPath(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperator(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown strainer error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
