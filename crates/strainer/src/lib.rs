//! Turns flat request parameters into query specifications.
//!
//! A [`SearchContext`] is built once from the application [`Schema`] and
//! shared between requests. For each request it resolves the submitted field
//! paths, converts the raw values and assembles a [`RootExpression`], which
//! is then turned into a [`Specification`] evaluated by a backend
//! [`QueryBuilder`].

mod config;
pub use config::SearchConfig;

pub mod context;
pub use context::SearchContext;

pub use strainer_core::{alias, convert, expr, join, path, schema, spec, stmt};
pub use strainer_core::{
    Error, Expression, FieldPathInfo, QueryBuilder, Result, RootExpression, Schema, Specification,
};
