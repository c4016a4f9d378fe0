//! Join planning.
//!
//! An [`EntityJoins`] plan holds at most one [`JoinNode`] per resolved path.
//! [`EntityJoinManager`] seeds a plan with the associations of the root entity
//! type; the remaining nodes are planned the first time a field path
//! traverses them. [`QueryJoins`] turns nodes into backend join handles while
//! a specification is evaluated.

mod handler;
pub use handler::{
    DefaultJoinHandler, EntityJoinHandler, FetchingAllJoinHandler, FetchingEagerJoinHandler,
    JoinDecision, JoinKind,
};

mod manager;
pub use manager::EntityJoinManager;

mod node;
pub use node::JoinNode;

mod plan;
pub use plan::EntityJoins;

mod query_joins;
pub use query_joins::QueryJoins;
