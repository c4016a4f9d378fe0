use crate::join::JoinNode;
use crate::path::PathSegment;
use crate::stmt::{FieldValue, Operator};
use crate::{Error, Result};

/// The capabilities of a query backend that specifications are evaluated
/// against.
///
/// A builder translates planned joins, resolved path segments and field
/// values into its own predicate representation. Joins are requested parent
/// first and at most once per [`JoinNode`] during a single evaluation.
///
/// Whether a filter on a multi-valued field tests membership rather than
/// equality is up to the builder; the segment passed to
/// [`path`](QueryBuilder::path) carries the field metadata needed to decide.
///
/// The pattern and ordering operators default to an unsupported operator
/// error so that backends without them still implement the trait.
pub trait QueryBuilder: 'static {
    /// Backend predicate
    type Predicate;

    /// Backend expression addressing a field
    type Path;

    /// Backend handle of the root entity or of a join
    type Join: Clone;

    /// Name used in error messages.
    fn name(&self) -> &str {
        "query builder"
    }

    /// Handle of the root entity.
    fn root(&mut self) -> Self::Join;

    /// Requests that duplicate rows produced by joins are suppressed.
    fn distinct(&mut self);

    /// Creates the join described by `node`, starting from `parent`.
    fn join(&mut self, parent: &Self::Join, node: &JoinNode) -> Result<Self::Join>;

    /// Addresses the field of `segment`, read from `from`.
    fn path(&mut self, from: &Self::Join, segment: &PathSegment) -> Result<Self::Path>;

    /// Addresses the values reached through `join`, the handle created for
    /// `node`. Used when the filtered field is itself a fetched join, so each
    /// value is compared on its own rather than as a collection.
    fn joined(&mut self, join: &Self::Join, node: &JoinNode) -> Result<Self::Path>;

    fn and(&mut self, lhs: Self::Predicate, rhs: Self::Predicate) -> Self::Predicate;

    fn or(&mut self, lhs: Self::Predicate, rhs: Self::Predicate) -> Self::Predicate;

    fn not(&mut self, predicate: Self::Predicate) -> Self::Predicate;

    fn equal(&mut self, path: &Self::Path, value: &FieldValue) -> Result<Self::Predicate>;

    /// Tests for null, or for emptiness on multi-valued fields.
    fn is_null(&mut self, path: &Self::Path) -> Result<Self::Predicate>;

    /// Tests membership of the field value in `values`. `values` never
    /// contains [`FieldValue::Null`].
    fn in_list(&mut self, path: &Self::Path, values: &[FieldValue]) -> Result<Self::Predicate>;

    /// Case-sensitive pattern match, `*` standing for any run of characters.
    fn like(&mut self, path: &Self::Path, pattern: &str) -> Result<Self::Predicate> {
        let _ = (path, pattern);
        Err(Error::unsupported_operator(Operator::Matches, self.name()))
    }

    /// Case-insensitive pattern match, `*` standing for any run of
    /// characters.
    fn ilike(&mut self, path: &Self::Path, pattern: &str) -> Result<Self::Predicate> {
        let _ = (path, pattern);
        Err(Error::unsupported_operator(Operator::IMatches, self.name()))
    }

    fn less_than(&mut self, path: &Self::Path, value: &FieldValue) -> Result<Self::Predicate> {
        let _ = (path, value);
        Err(Error::unsupported_operator(Operator::LessThan, self.name()))
    }

    fn less_than_or_equals(
        &mut self,
        path: &Self::Path,
        value: &FieldValue,
    ) -> Result<Self::Predicate> {
        let _ = (path, value);
        Err(Error::unsupported_operator(Operator::LessThanOrEquals, self.name()))
    }

    fn greater_than(&mut self, path: &Self::Path, value: &FieldValue) -> Result<Self::Predicate> {
        let _ = (path, value);
        Err(Error::unsupported_operator(Operator::GreaterThan, self.name()))
    }

    fn greater_than_or_equals(
        &mut self,
        path: &Self::Path,
        value: &FieldValue,
    ) -> Result<Self::Predicate> {
        let _ = (path, value);
        Err(Error::unsupported_operator(Operator::GreaterThanOrEquals, self.name()))
    }
}
