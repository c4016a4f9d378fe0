//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

// Re-export core test infrastructure
pub use crate::{ExecLog, FieldRef, Fixture, Op, Pred, RecordingBuilder};

// Re-export macros
pub use crate::params;
pub use std_util::prelude::*;

// Frequently used library items
pub use strainer::join::{
    EntityJoinHandler, FetchingAllJoinHandler, FetchingEagerJoinHandler, JoinKind,
};
pub use strainer::stmt::{FieldValue, Keyword, Operator, Value};
pub use strainer::{Expression, RootExpression, SearchConfig, SearchContext, Specification};

pub use std::sync::Arc;

/// Builds the specification of `params` on `Person` with `handlers` and
/// evaluates it, returning the predicate and the builder log.
pub fn evaluate(
    context: &SearchContext,
    params: Vec<(&str, Vec<&str>)>,
    handlers: &[Arc<dyn EntityJoinHandler>],
) -> strainer::Result<(Option<Pred>, ExecLog)> {
    let person = context.entity("Person")?;
    let expr = context.build_expression_tree(person, params)?;
    let spec = context.create_specification::<RecordingBuilder>(&expr, handlers)?;

    let mut builder = RecordingBuilder::new();
    let predicate = spec.to_predicate(&mut builder)?;
    Ok((predicate, builder.log))
}
