use super::AliasResolver;
use crate::schema::{EntityType, Field};

/// Registers a field name without its trailing suffix as an alias.
///
/// With the default suffixes `Entity` and `Entities`, `addressEntities` is
/// also reachable as `address` and `jobEntity` as `job`. The first matching
/// suffix wins.
#[derive(Debug, Clone)]
pub struct SuffixAliasResolver {
    suffixes: Vec<String>,
}

impl SuffixAliasResolver {
    pub const DEFAULT_SUFFIXES: [&'static str; 2] = ["Entity", "Entities"];

    pub fn new<I>(suffixes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SuffixAliasResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUFFIXES)
    }
}

impl AliasResolver for SuffixAliasResolver {
    fn supports(&self, _owner: &EntityType, _field: &Field) -> bool {
        true
    }

    fn resolve(&self, _owner: &EntityType, field: &Field) -> Vec<String> {
        self.suffixes
            .iter()
            .filter(|suffix| !suffix.is_empty())
            .find_map(|suffix| field.name.strip_suffix(suffix.as_str()))
            .filter(|alias| !alias.is_empty())
            .map(|alias| vec![alias.to_string()])
            .unwrap_or_default()
    }
}
