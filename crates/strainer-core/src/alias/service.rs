use super::AliasResolver;
use crate::schema::{EntityId, Schema};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

const ALIAS_SEPARATOR: char = '.';

/// Maps aliases to declared field names.
///
/// The aliases of an entity type are indexed the first time the type is
/// queried, by running every registered resolver over every field the type
/// declares or inherits. The index only grows.
///
/// When two resolvers register the same alias for the same entity type, the
/// resolver registered last wins.
pub struct AliasResolutionService {
    schema: Arc<Schema>,
    resolvers: Vec<Box<dyn AliasResolver>>,
    index: RwLock<AliasIndex>,
}

#[derive(Debug, Default)]
struct AliasIndex {
    processed: HashSet<EntityId>,

    /// `"{EntityName}.{alias}"` to field name
    aliases: HashMap<String, String>,
}

impl AliasResolutionService {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            resolvers: vec![],
            index: RwLock::new(AliasIndex::default()),
        }
    }

    /// Appends a resolver. Resolvers added later take precedence.
    pub fn add_alias_resolver(&mut self, resolver: impl AliasResolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }

    pub fn with_alias_resolver(mut self, resolver: impl AliasResolver + 'static) -> Self {
        self.add_alias_resolver(resolver);
        self
    }

    /// Returns the field name the alias stands for on `owner`, or the alias
    /// itself when no resolver claims it.
    pub fn resolve(&self, owner: EntityId, alias: &str) -> String {
        let Some(entity) = self.schema.get_entity(owner) else {
            return alias.to_string();
        };

        if self.resolvers.is_empty() {
            return alias.to_string();
        }

        let key = format!("{}{ALIAS_SEPARATOR}{alias}", entity.name);

        {
            let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
            if index.processed.contains(&owner) {
                return index.aliases.get(&key).cloned().unwrap_or_else(|| alias.to_string());
            }
        }

        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);

        // Checked again: another thread may have indexed the type between the
        // two locks.
        if !index.processed.contains(&owner) {
            self.index_entity(owner, &mut index);
        }

        index.aliases.get(&key).cloned().unwrap_or_else(|| alias.to_string())
    }

    fn index_entity(&self, owner: EntityId, index: &mut AliasIndex) {
        let entity = self.schema.entity(owner);
        let mut registered = 0;

        for resolver in &self.resolvers {
            let fields = self.schema.hierarchy(owner).flat_map(|ty| &ty.fields);

            for field in fields.filter(|field| field.is_searchable()) {
                if !resolver.supports(entity, field) {
                    continue;
                }

                for alias in resolver.resolve(entity, field) {
                    trace!(entity = %entity.name, %alias, field = %field.name, "registered alias");
                    index
                        .aliases
                        .insert(format!("{}{ALIAS_SEPARATOR}{alias}", entity.name), field.name.clone());
                    registered += 1;
                }
            }
        }

        index.processed.insert(owner);
        debug!(entity = %entity.name, aliases = registered, "indexed aliases");
    }
}

impl fmt::Debug for AliasResolutionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasResolutionService")
            .field("resolvers", &self.resolvers.len())
            .finish_non_exhaustive()
    }
}
