//! Filter expressions.
//!
//! An expression tree is built per request from resolved field paths and
//! converted values, turned into a [`Specification`] once and discarded.

mod field;
pub use field::FieldExpression;

mod logical;
pub use logical::LogicalExpression;

mod not;
pub use not::NotExpression;

mod root;
pub use root::RootExpression;

use crate::join::QueryJoins;
use crate::path::FieldPathInfo;
use crate::spec::{QueryBuilder, Specification};
use crate::stmt::{FieldValue, LogicalOperator, Operator};

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Field(FieldExpression),
    Not(NotExpression),
    Logical(LogicalExpression),
}

impl Expression {
    pub fn equals(field: FieldPathInfo, value: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::Equals, vec![value.into()]).into()
    }

    pub fn matches(field: FieldPathInfo, pattern: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::Matches, vec![pattern.into()]).into()
    }

    pub fn imatches(field: FieldPathInfo, pattern: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::IMatches, vec![pattern.into()]).into()
    }

    pub fn less_than(field: FieldPathInfo, value: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::LessThan, vec![value.into()]).into()
    }

    pub fn less_than_or_equals(field: FieldPathInfo, value: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::LessThanOrEquals, vec![value.into()]).into()
    }

    pub fn greater_than(field: FieldPathInfo, value: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::GreaterThan, vec![value.into()]).into()
    }

    pub fn greater_than_or_equals(field: FieldPathInfo, value: impl Into<FieldValue>) -> Self {
        FieldExpression::new(field, Operator::GreaterThanOrEquals, vec![value.into()]).into()
    }

    pub fn in_list<I>(field: FieldPathInfo, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        FieldExpression::new(field, Operator::In, values).into()
    }

    /// Strictly between `low` and `high`.
    pub fn between(
        field: FieldPathInfo,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Self {
        Self::greater_than(field.clone(), low).and(Self::less_than(field, high))
    }

    pub fn not(expr: Expression) -> Self {
        Self::Not(NotExpression::new(expr))
    }

    pub fn and(self, other: Expression) -> Self {
        LogicalExpression::new(LogicalOperator::And, vec![self, other]).into()
    }

    pub fn or(self, other: Expression) -> Self {
        LogicalExpression::new(LogicalOperator::Or, vec![self, other]).into()
    }

    /// Flattens the tree into its field expressions.
    ///
    /// `negated` is threaded through the tree: each [`NotExpression`] flips
    /// it, so two nested negations cancel out.
    pub fn to_field_expressions(&self, negated: bool) -> Vec<FieldExpression> {
        match self {
            Self::Field(expr) => vec![expr.with_negation(negated)],
            Self::Not(expr) => expr.to_field_expressions(negated),
            Self::Logical(expr) => expr.to_field_expressions(negated),
        }
    }

    pub fn to_specification<B: QueryBuilder>(&self, joins: &Rc<QueryJoins<B>>) -> Specification<B> {
        match self {
            Self::Field(expr) => expr.to_specification(joins),
            Self::Not(expr) => expr.to_specification(joins),
            Self::Logical(expr) => expr.to_specification(joins),
        }
    }
}

impl From<FieldExpression> for Expression {
    fn from(value: FieldExpression) -> Self {
        Self::Field(value)
    }
}

impl From<NotExpression> for Expression {
    fn from(value: NotExpression) -> Self {
        Self::Not(value)
    }
}

impl From<LogicalExpression> for Expression {
    fn from(value: LogicalExpression) -> Self {
        Self::Logical(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(expr) => expr.fmt(f),
            Self::Not(expr) => expr.fmt(f),
            Self::Logical(expr) => expr.fmt(f),
        }
    }
}
