mod builder;
pub use builder::QueryBuilder;

mod specification;
pub use specification::Specification;
