//! String to value conversion.

mod default;
pub use default::{ConvertFn, DefaultConversions};

mod converter;
pub use converter::{ValueConverter, NULL_TOKEN};

use crate::stmt::{Type, Value};
use crate::Result;

/// Converts raw request strings into typed values.
pub trait TypeConversionRegistry: Send + Sync {
    /// Converts `raw` to a value of type `ty`.
    ///
    /// # Errors
    ///
    /// Returns a type conversion error when `raw` is not a valid
    /// representation of `ty`, or when no conversion exists for `ty`.
    fn convert(&self, raw: &str, ty: &Type) -> Result<Value>;
}
