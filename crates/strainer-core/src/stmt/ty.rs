use super::TypeEnum;
use crate::schema::EntityId;

use std::fmt;

/// The declared type of an entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 64-bit floating point number
    F64,

    /// String type
    String,

    /// Universally unique identifier
    Uuid,

    /// Calendar date without a time zone
    Date,

    /// Time of day without a time zone
    Time,

    /// Instant in time, normalized to UTC
    DateTime,

    /// An enumeration of named variants
    Enum(TypeEnum),

    /// A registered entity or embeddable type
    Entity(EntityId),

    /// An ordered list of a single type
    List(Box<Type>),

    /// A set of a single type
    Set(Box<Type>),

    /// An unordered collection of a single type
    Collection(Box<Type>),

    /// A fixed array of a single type
    Array(Box<Type>),

    /// A map from key type to value type
    Map(Box<Type>, Box<Type>),
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn set(ty: impl Into<Self>) -> Self {
        Self::Set(Box::new(ty.into()))
    }

    pub fn collection(ty: impl Into<Self>) -> Self {
        Self::Collection(Box::new(ty.into()))
    }

    pub fn array(ty: impl Into<Self>) -> Self {
        Self::Array(Box::new(ty.into()))
    }

    pub fn map(key: impl Into<Self>, value: impl Into<Self>) -> Self {
        Self::Map(Box::new(key.into()), Box::new(value.into()))
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    /// Returns `true` for list, set, collection and array types. Maps are not
    /// included.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::List(_) | Self::Set(_) | Self::Collection(_) | Self::Array(_)
        )
    }

    pub fn is_container(&self) -> bool {
        self.is_collection() || self.is_map()
    }

    /// Returns `true` for types that hold a single comparable value.
    pub fn is_scalar(&self) -> bool {
        !self.is_entity() && !self.is_container()
    }

    pub fn as_entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&TypeEnum> {
        match self {
            Self::Enum(ty) => Some(ty),
            _ => None,
        }
    }

    /// The element type of a list, set, collection or array.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(ty) | Self::Set(ty) | Self::Collection(ty) | Self::Array(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn map_key(&self) -> Option<&Type> {
        match self {
            Self::Map(key, _) => Some(key),
            _ => None,
        }
    }

    pub fn map_value(&self) -> Option<&Type> {
        match self {
            Self::Map(_, value) => Some(value),
            _ => None,
        }
    }

    /// The type arguments of a container type, in declaration order.
    ///
    /// Empty for every non-container type.
    pub fn parameters(&self) -> Vec<&Type> {
        match self {
            Self::Map(key, value) => vec![key, value],
            _ => self.element().into_iter().collect(),
        }
    }

    /// The type a path segment lands on after traversing a field of this type.
    ///
    /// Collections unwrap to their element type. Maps stay maps: the map
    /// pseudo-segments pick the key or value side.
    pub fn effective(&self) -> &Type {
        self.element().unwrap_or(self)
    }
}

impl From<&Self> for Type {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl From<EntityId> for Type {
    fn from(value: EntityId) -> Self {
        Self::Entity(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("Bool"),
            Self::I32 => f.write_str("I32"),
            Self::I64 => f.write_str("I64"),
            Self::F64 => f.write_str("F64"),
            Self::String => f.write_str("String"),
            Self::Uuid => f.write_str("Uuid"),
            Self::Date => f.write_str("Date"),
            Self::Time => f.write_str("Time"),
            Self::DateTime => f.write_str("DateTime"),
            Self::Enum(ty) => write!(f, "Enum({})", ty.name),
            Self::Entity(id) => write!(f, "Entity({})", id.0),
            Self::List(ty) => write!(f, "List<{ty}>"),
            Self::Set(ty) => write!(f, "Set<{ty}>"),
            Self::Collection(ty) => write!(f, "Collection<{ty}>"),
            Self::Array(ty) => write!(f, "Array<{ty}>"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}
