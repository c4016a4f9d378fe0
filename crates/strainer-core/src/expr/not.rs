use super::{Expression, FieldExpression};
use crate::join::QueryJoins;
use crate::spec::{QueryBuilder, Specification};

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct NotExpression {
    pub expr: Box<Expression>,
}

impl NotExpression {
    pub fn new(expr: Expression) -> Self {
        Self {
            expr: Box::new(expr),
        }
    }

    pub fn to_field_expressions(&self, negated: bool) -> Vec<FieldExpression> {
        self.expr.to_field_expressions(!negated)
    }

    pub fn to_specification<B: QueryBuilder>(&self, joins: &Rc<QueryJoins<B>>) -> Specification<B> {
        self.expr.to_specification(joins).not()
    }
}

impl fmt::Display for NotExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOT ({})", self.expr)
    }
}
