use super::{DefaultConversions, TypeConversionRegistry};
use crate::stmt::{FieldValue, Keyword, Type};
use crate::Result;

use std::fmt;
use std::sync::Arc;

/// Default reserved token standing for an explicit null filter.
pub const NULL_TOKEN: &str = "null";

/// Converts raw request values of a field into [`FieldValue`]s.
///
/// The null token and, when enabled, the keyword tokens are recognized
/// regardless of case and never reach the conversion registry.
#[derive(Clone)]
pub struct ValueConverter {
    null_token: String,
    keywords: bool,
    registry: Arc<dyn TypeConversionRegistry>,
}

impl ValueConverter {
    pub fn new(registry: Arc<dyn TypeConversionRegistry>) -> Self {
        Self {
            null_token: NULL_TOKEN.to_string(),
            keywords: true,
            registry,
        }
    }

    pub fn null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = token.into();
        self
    }

    pub fn keywords(mut self, enabled: bool) -> Self {
        self.keywords = enabled;
        self
    }

    pub fn convert(&self, raw: &str, ty: &Type) -> Result<FieldValue> {
        if raw.eq_ignore_ascii_case(&self.null_token) {
            return Ok(FieldValue::Null);
        }

        if self.keywords {
            if let Some(keyword) = Keyword::from_token(raw) {
                return Ok(FieldValue::Keyword(keyword));
            }
        }

        self.registry.convert(raw, ty).map(FieldValue::Value)
    }
}

impl Default for ValueConverter {
    fn default() -> Self {
        Self::new(Arc::new(DefaultConversions::new()))
    }
}

impl fmt::Debug for ValueConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueConverter")
            .field("null_token", &self.null_token)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}
