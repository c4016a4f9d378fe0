use super::AliasResolver;
use crate::schema::{EntityType, Field};

use heck::ToSnakeCase;

/// Registers the `snake_case` spelling of camelCase field names, so
/// `firstName` is also reachable as `first_name`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCaseAliasResolver;

impl AliasResolver for SnakeCaseAliasResolver {
    fn supports(&self, _owner: &EntityType, field: &Field) -> bool {
        field.name.chars().any(|c| c.is_ascii_uppercase())
    }

    fn resolve(&self, _owner: &EntityType, field: &Field) -> Vec<String> {
        let alias = field.name.to_snake_case();

        if alias == field.name {
            vec![]
        } else {
            vec![alias]
        }
    }
}
