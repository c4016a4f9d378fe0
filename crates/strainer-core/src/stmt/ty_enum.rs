use super::Type;

/// A closed set of named variants.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeEnum {
    pub name: String,
    pub variants: Vec<String>,
}

impl TypeEnum {
    pub fn new<I>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.iter().any(|variant| variant == name)
    }
}

impl From<TypeEnum> for Type {
    fn from(value: TypeEnum) -> Self {
        Self::Enum(value)
    }
}
