//! Alias resolution.
//!
//! Request parameters may name a field by an alternate spelling. Each
//! [`AliasResolver`] proposes aliases for the fields of an entity type, and the
//! [`AliasResolutionService`] indexes them per entity type on first use.

mod resolver;
pub use resolver::{AliasResolver, FnAliasResolver};

mod service;
pub use service::AliasResolutionService;

mod snake_case;
pub use snake_case::SnakeCaseAliasResolver;

mod suffix;
pub use suffix::SuffixAliasResolver;
