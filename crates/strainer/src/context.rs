mod builder;
pub use builder::Builder;

use crate::SearchConfig;

use strainer_core::alias::AliasResolutionService;
use strainer_core::convert::ValueConverter;
use strainer_core::expr::{Expression, FieldExpression, RootExpression};
use strainer_core::join::{EntityJoinHandler, EntityJoinManager, EntityJoins, QueryJoins};
use strainer_core::path::{FieldPathInfo, FieldPathResolver};
use strainer_core::schema::{EntityId, MetadataProvider, Schema};
use strainer_core::stmt::{FieldValue, Operator};
use strainer_core::{Error, QueryBuilder, Result, Specification};

use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Resolution registry shared by every search request.
///
/// Owns the schema together with the metadata and alias caches. A context is
/// `Send + Sync`; wrap it in an [`Arc`] to share it between threads. The
/// expression trees and specifications it produces belong to a single
/// request.
#[derive(Debug)]
pub struct SearchContext {
    config: SearchConfig,
    metadata: Arc<MetadataProvider>,
    aliases: Arc<AliasResolutionService>,
    resolver: FieldPathResolver,
    joins: EntityJoinManager,
    converter: ValueConverter,
}

impl SearchContext {
    pub fn builder(schema: impl Into<Arc<Schema>>) -> Builder {
        Builder::new(schema.into())
    }

    /// Creates a context with the default configuration.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Result<Self> {
        Self::builder(schema).build()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        self.metadata.schema()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn metadata(&self) -> &MetadataProvider {
        &self.metadata
    }

    pub fn alias_resolution(&self) -> &AliasResolutionService {
        &self.aliases
    }

    /// Looks up a root entity type by name.
    pub fn entity(&self, name: &str) -> Result<EntityId> {
        self.schema()
            .entity_by_name(name)
            .map(|entity| entity.id)
            .ok_or_else(|| Error::invalid_schema(format!("no entity type named `{name}`")))
    }

    pub fn resolve_field_path(&self, root: EntityId, path: &str) -> Result<FieldPathInfo> {
        self.resolver.resolve_field_path(root, path)
    }

    /// Resolves `path` and converts each raw value to the type of its
    /// terminal field.
    pub fn resolve_values<S: AsRef<str>>(
        &self,
        root: EntityId,
        path: &str,
        raw_values: &[S],
    ) -> Result<(FieldPathInfo, Vec<FieldValue>)> {
        let field = self.resolve_field_path(root, path)?;
        let values = raw_values
            .iter()
            .map(|raw| self.convert(&field, raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok((field, values))
    }

    /// Builds the expression for one field with an explicit operator.
    ///
    /// All operators except [`Operator::In`] use the first value only.
    pub fn resolve_expression<S: AsRef<str>>(
        &self,
        root: EntityId,
        path: &str,
        raw_values: &[S],
        operator: Operator,
        negated: bool,
    ) -> Result<Expression> {
        let (field, mut values) = self.resolve_values(root, path, raw_values)?;

        if values.is_empty() {
            return Err(Error::type_conversion(
                "",
                field.terminal_type.to_string(),
                format!("{operator} needs a value"),
            )
            .for_field(path));
        }

        if !operator.is_in() {
            values.truncate(1);
        }

        let expr = Expression::from(FieldExpression::new(field, operator, values));
        Ok(if negated { Expression::not(expr) } else { expr })
    }

    /// Builds the expression tree of a request.
    ///
    /// Each parameter maps a field path to its raw values. One value filters
    /// on equality, several on membership, and a parameter without values is
    /// ignored. The first unresolvable path or unconvertible value aborts the
    /// whole tree.
    pub fn build_expression_tree<I, K, V>(&self, root: EntityId, params: I) -> Result<RootExpression>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut children = vec![];

        for (path, raw_values) in params {
            let raw_values: Vec<V::Item> = raw_values.into_iter().collect();
            let (field, values) = self.resolve_values(root, path.as_ref(), &raw_values)?;

            let expr = match values.len() {
                0 => continue,
                1 => FieldExpression::new(field, Operator::Equals, values),
                _ => FieldExpression::new(field, Operator::In, values),
            };

            debug!(root = %self.schema().entity(root).name, expr = %expr, "resolved expression");
            children.push(Expression::Field(expr));
        }

        Ok(RootExpression::new(root, children))
    }

    /// Resolves and converts every parameter without stopping at the first
    /// failure.
    ///
    /// Returns a single validation error listing each failing field.
    pub fn validate<I, K, V>(&self, root: EntityId, params: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut errors = vec![];

        for (path, raw_values) in params {
            let field = match self.resolve_field_path(root, path.as_ref()) {
                Ok(field) => field,
                Err(err) => {
                    errors.push(err);
                    continue;
                }
            };

            for raw in raw_values {
                if let Err(err) = self.convert(&field, raw.as_ref()) {
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors))
        }
    }

    /// Creates the join plan of a request on `root`.
    pub fn compute_entity_joins(
        &self,
        root: EntityId,
        handlers: &[Arc<dyn EntityJoinHandler>],
    ) -> Result<EntityJoins> {
        self.joins.compute_entity_joins(root, handlers)
    }

    /// Turns an expression tree into a specification, planning joins with
    /// `handlers`.
    pub fn create_specification<B: QueryBuilder>(
        &self,
        expr: &RootExpression,
        handlers: &[Arc<dyn EntityJoinHandler>],
    ) -> Result<Specification<B>> {
        let plan = self.compute_entity_joins(expr.root, handlers)?;
        let joins = Rc::new(QueryJoins::new(Rc::new(plan)));

        Ok(expr.to_specification(&joins))
    }

    fn convert(&self, field: &FieldPathInfo, raw: &str) -> Result<FieldValue> {
        self.converter
            .convert(raw, &field.terminal_type)
            .map_err(|err| err.for_field(&field.original_path))
    }
}
