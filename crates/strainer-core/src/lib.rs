pub mod alias;
pub use alias::AliasResolutionService;

pub mod convert;

mod error;
pub use error::{Error, IntoError};

pub mod expr;
pub use expr::{Expression, RootExpression};

pub mod join;

pub mod path;
pub use path::{FieldPathInfo, FieldPathResolver};

pub mod schema;
pub use schema::Schema;

pub mod spec;
pub use spec::{QueryBuilder, Specification};

pub mod stmt;

/// A Result type alias that uses Strainer's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
