use super::{Keyword, Value};

use std::fmt;

/// A single filter operand.
///
/// `Null` is the explicit "is null / is empty" request made with the null
/// token. It is never produced by a type converter, and it is distinct from a
/// parameter that was not submitted at all.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    Null,
    Keyword(Keyword),
    Value(Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Keyword(keyword) => keyword.fmt(f),
            Self::Value(value) => value.fmt(f),
        }
    }
}

impl From<Keyword> for FieldValue {
    fn from(value: Keyword) -> Self {
        Self::Keyword(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_from_primitive!(bool, i32, i64, f64, String, &str);
