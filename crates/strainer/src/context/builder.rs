use super::SearchContext;
use crate::SearchConfig;

use strainer_core::alias::{
    AliasResolutionService, AliasResolver, SnakeCaseAliasResolver, SuffixAliasResolver,
};
use strainer_core::convert::{DefaultConversions, TypeConversionRegistry, ValueConverter};
use strainer_core::join::EntityJoinManager;
use strainer_core::path::FieldPathResolver;
use strainer_core::schema::{AnnotationKind, MetadataProvider, Schema};
use strainer_core::Result;

use std::sync::Arc;
use tracing::debug;

pub struct Builder {
    schema: Arc<Schema>,

    config: SearchConfig,

    /// Application alias resolvers, consulted after the built-in ones
    alias_resolvers: Vec<Arc<dyn AliasResolver>>,

    /// Overrides the association markers treated as joins
    join_annotations: Option<Vec<AnnotationKind>>,

    conversions: Option<Arc<dyn TypeConversionRegistry>>,
}

impl Builder {
    pub(super) fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            config: SearchConfig::default(),
            alias_resolvers: vec![],
            join_annotations: None,
            conversions: None,
        }
    }

    pub fn config(&mut self, config: SearchConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Registers an alias resolver. Resolvers registered later win over
    /// earlier ones, and all of them win over the built-in resolvers.
    pub fn alias_resolver(&mut self, resolver: impl AliasResolver + 'static) -> &mut Self {
        self.alias_resolvers.push(Arc::new(resolver));
        self
    }

    pub fn join_annotations(&mut self, kinds: Vec<AnnotationKind>) -> &mut Self {
        self.join_annotations = Some(kinds);
        self
    }

    /// Replaces the default conversion registry.
    pub fn conversions(&mut self, registry: impl TypeConversionRegistry + 'static) -> &mut Self {
        self.conversions = Some(Arc::new(registry));
        self
    }

    /// Builds the context.
    ///
    /// The metadata of every entity type is computed up front, so a schema
    /// the metadata provider cannot classify fails here rather than on the
    /// first request. Registered alias resolvers are shared with the context,
    /// so the builder can be built again.
    pub fn build(&mut self) -> Result<SearchContext> {
        self.config.verify()?;

        let metadata = Arc::new(match self.join_annotations.clone() {
            Some(kinds) => MetadataProvider::with_join_annotations(self.schema.clone(), kinds),
            None => MetadataProvider::new(self.schema.clone()),
        });

        for entity in self.schema.entities() {
            metadata.property_infos(entity.id)?;
        }

        let mut aliases = AliasResolutionService::new(self.schema.clone());

        if !self.config.alias_field_suffixes.is_empty() {
            aliases.add_alias_resolver(SuffixAliasResolver::new(
                self.config.alias_field_suffixes.iter().cloned(),
            ));
        }

        if self.config.snake_case_aliases {
            aliases.add_alias_resolver(SnakeCaseAliasResolver);
        }

        for resolver in &self.alias_resolvers {
            aliases.add_alias_resolver(resolver.clone());
        }

        let aliases = Arc::new(aliases);

        let registry = self
            .conversions
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultConversions::new()));

        let converter = ValueConverter::new(registry)
            .null_token(self.config.null_token.clone())
            .keywords(self.config.keywords);

        debug!(config = ?self.config, "initialized search context");

        Ok(SearchContext {
            config: self.config.clone(),
            resolver: FieldPathResolver::new(metadata.clone(), aliases.clone()),
            joins: EntityJoinManager::new(metadata.clone()),
            metadata,
            aliases,
            converter,
        })
    }
}
