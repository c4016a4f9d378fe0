use super::TypeConversionRegistry;
use crate::stmt::{Type, Value};
use crate::{Error, Result};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::mem::{self, Discriminant};
use uuid::Uuid;

/// A stateless conversion from a raw string to a value of the given type.
pub type ConvertFn = fn(&str, &Type) -> Result<Value>;

/// Conversions for every scalar [`Type`].
///
/// A conversion is registered per type variant; parameters such as the
/// variants of an enum are passed to the conversion function.
#[derive(Clone)]
pub struct DefaultConversions {
    conversions: HashMap<Discriminant<Type>, ConvertFn>,
}

impl DefaultConversions {
    pub fn new() -> Self {
        let mut conversions = Self {
            conversions: HashMap::new(),
        };

        conversions.register(&Type::Bool, convert_bool);
        conversions.register(&Type::I32, convert_i32);
        conversions.register(&Type::I64, convert_i64);
        conversions.register(&Type::F64, convert_f64);
        conversions.register(&Type::String, convert_string);
        conversions.register(&Type::Uuid, convert_uuid);
        conversions.register(&Type::Date, convert_date);
        conversions.register(&Type::Time, convert_time);
        conversions.register(&Type::DateTime, convert_date_time);
        conversions.register(&Type::Enum(Default::default()), convert_enum);
        conversions
    }

    /// Registers the conversion for the variant of `ty`, replacing any
    /// previous one.
    pub fn register(&mut self, ty: &Type, convert: ConvertFn) -> &mut Self {
        self.conversions.insert(mem::discriminant(ty), convert);
        self
    }
}

impl Default for DefaultConversions {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeConversionRegistry for DefaultConversions {
    fn convert(&self, raw: &str, ty: &Type) -> Result<Value> {
        match self.conversions.get(&mem::discriminant(ty)) {
            Some(convert) => convert(raw, ty),
            None => Err(Error::type_conversion(
                raw,
                ty.to_string(),
                "no conversion is registered for this type",
            )),
        }
    }
}

impl fmt::Debug for DefaultConversions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultConversions")
            .field("conversions", &self.conversions.len())
            .finish()
    }
}

fn failed(raw: &str, ty: &Type, reason: impl fmt::Display) -> Error {
    Error::type_conversion(raw, ty.to_string(), reason)
}

fn convert_bool(raw: &str, ty: &Type) -> Result<Value> {
    const TRUE: [&str; 4] = ["true", "on", "yes", "1"];
    const FALSE: [&str; 4] = ["false", "off", "no", "0"];

    if TRUE.iter().any(|token| token.eq_ignore_ascii_case(raw)) {
        Ok(Value::Bool(true))
    } else if FALSE.iter().any(|token| token.eq_ignore_ascii_case(raw)) {
        Ok(Value::Bool(false))
    } else {
        Err(failed(raw, ty, "expected true/false, on/off, yes/no or 1/0"))
    }
}

fn convert_i32(raw: &str, ty: &Type) -> Result<Value> {
    raw.parse::<i32>()
        .map(Value::I32)
        .map_err(|err| failed(raw, ty, err))
}

fn convert_i64(raw: &str, ty: &Type) -> Result<Value> {
    raw.parse::<i64>()
        .map(Value::I64)
        .map_err(|err| failed(raw, ty, err))
}

fn convert_f64(raw: &str, ty: &Type) -> Result<Value> {
    raw.parse::<f64>()
        .map(Value::F64)
        .map_err(|err| failed(raw, ty, err))
}

fn convert_string(raw: &str, _ty: &Type) -> Result<Value> {
    Ok(Value::String(raw.to_string()))
}

fn convert_uuid(raw: &str, ty: &Type) -> Result<Value> {
    Uuid::parse_str(raw)
        .map(Value::Uuid)
        .map_err(|err| failed(raw, ty, err))
}

fn convert_date(raw: &str, ty: &Type) -> Result<Value> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Value::Date)
        .map_err(|err| failed(raw, ty, err))
}

fn convert_time(raw: &str, ty: &Type) -> Result<Value> {
    raw.parse::<NaiveTime>()
        .map(Value::Time)
        .map_err(|err| failed(raw, ty, err))
}

/// RFC 3339 with an offset, or a naive ISO 8601 date-time read as UTC.
fn convert_date_time(raw: &str, ty: &Type) -> Result<Value> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Value::DateTime(date_time.with_timezone(&Utc)));
    }

    raw.parse::<NaiveDateTime>()
        .map(|date_time| Value::DateTime(date_time.and_utc()))
        .map_err(|err| failed(raw, ty, err))
}

fn convert_enum(raw: &str, ty: &Type) -> Result<Value> {
    match ty.as_enum() {
        Some(ty_enum) if ty_enum.has_variant(raw) => Ok(Value::Enum(raw.to_string())),
        Some(ty_enum) => Err(failed(
            raw,
            ty,
            format!("expected one of {}", ty_enum.variants.join(", ")),
        )),
        None => Err(failed(raw, ty, "not an enum type")),
    }
}
