use super::{Expression, FieldExpression};
use crate::join::QueryJoins;
use crate::spec::{QueryBuilder, Specification};
use crate::stmt::LogicalOperator;

use std::fmt;
use std::rc::Rc;

/// Expressions joined by `AND` or `OR`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub children: Vec<Expression>,
}

impl LogicalExpression {
    pub fn new(operator: LogicalOperator, children: Vec<Expression>) -> Self {
        Self { operator, children }
    }

    pub fn to_field_expressions(&self, negated: bool) -> Vec<FieldExpression> {
        self.children
            .iter()
            .flat_map(|child| child.to_field_expressions(negated))
            .collect()
    }

    /// Folds the children's specifications, starting from the no-predicate
    /// specification.
    pub fn to_specification<B: QueryBuilder>(&self, joins: &Rc<QueryJoins<B>>) -> Specification<B> {
        self.children
            .iter()
            .fold(Specification::no_predicate(), |spec, child| {
                let child = child.to_specification(joins);
                match self.operator {
                    LogicalOperator::And => spec.and(child),
                    LogicalOperator::Or => spec.or(child),
                }
            })
    }
}

impl fmt::Display for LogicalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator)?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}
