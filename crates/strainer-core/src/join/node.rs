use super::{JoinDecision, JoinKind};
use crate::path::PathStep;

use std::rc::Rc;

/// A planned join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinNode {
    /// Resolved path from the root entity type. Unique within a plan.
    pub path: String,

    /// Human readable name of the joined type, used in log output
    pub name: String,

    pub step: PathStep,

    pub kind: JoinKind,

    pub fetched: bool,

    /// Join this one starts from. `None` when it starts at the root entity.
    pub parent: Option<Rc<JoinNode>>,
}

impl JoinNode {
    pub fn decision(&self) -> JoinDecision {
        JoinDecision {
            kind: self.kind,
            fetched: self.fetched,
        }
    }

    /// Nesting depth. Joins starting at the root have depth 1.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map(|parent| parent.depth()).unwrap_or(0)
    }
}
