use super::{Expression, FieldExpression};
use crate::join::QueryJoins;
use crate::schema::EntityId;
use crate::spec::{QueryBuilder, Specification};

use std::rc::Rc;
use tracing::trace;

/// The top of an expression tree: every child must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct RootExpression {
    pub root: EntityId,
    pub children: Vec<Expression>,
}

impl RootExpression {
    pub fn new(root: EntityId, children: Vec<Expression>) -> Self {
        Self { root, children }
    }

    pub fn to_field_expressions(&self, negated: bool) -> Vec<FieldExpression> {
        self.children
            .iter()
            .flat_map(|child| child.to_field_expressions(negated))
            .collect()
    }

    /// Creates the specification of the whole request.
    ///
    /// Evaluation starts over with fresh join handles, requests distinct rows
    /// and creates every fetched join of the plan, filtered on or not. The
    /// children are then and-ed together; a child traversing a fetched join
    /// reuses it.
    ///
    /// Other specifications built on `joins` see the handles of this one only
    /// when they are evaluated after it, as in `root.and(extra)`. Evaluated
    /// before it, their handles are discarded by the reset.
    pub fn to_specification<B: QueryBuilder>(&self, joins: &Rc<QueryJoins<B>>) -> Specification<B> {
        let structure = {
            let joins = joins.clone();

            Specification::new(move |builder: &mut B| {
                joins.reset();
                builder.distinct();

                for node in joins.plan().fetched() {
                    joins.materialize(builder, &node)?;
                }

                Ok(None)
            })
        };

        trace!(children = self.children.len(), "creating root specification");

        self.children
            .iter()
            .fold(structure, |spec, child| spec.and(child.to_specification(joins)))
    }
}
