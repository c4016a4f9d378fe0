use super::{EntityJoins, JoinNode};
use crate::path::FieldPathInfo;
use crate::spec::QueryBuilder;
use crate::Result;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Backend join handles created while evaluating a specification.
///
/// Handles are cached by join path, so [`QueryBuilder::join`] runs once per
/// planned node per evaluation. [`reset`](QueryJoins::reset) starts a new
/// evaluation.
///
/// The specification of a [`RootExpression`](crate::expr::RootExpression)
/// resets its joins when it is evaluated. Specifications sharing the same
/// `QueryJoins` must therefore be evaluated after it, for example by
/// composing them as `root.and(extra)`, or their handles are created again.
pub struct QueryJoins<B: QueryBuilder> {
    plan: Rc<EntityJoins>,
    root: RefCell<Option<B::Join>>,
    handles: RefCell<HashMap<String, B::Join>>,
}

impl<B: QueryBuilder> QueryJoins<B> {
    pub fn new(plan: Rc<EntityJoins>) -> Self {
        Self {
            plan,
            root: RefCell::new(None),
            handles: RefCell::new(HashMap::new()),
        }
    }

    pub fn plan(&self) -> &Rc<EntityJoins> {
        &self.plan
    }

    /// Forgets the handles of a previous evaluation.
    pub fn reset(&self) {
        self.root.borrow_mut().take();
        self.handles.borrow_mut().clear();
    }

    /// Handle of the root entity.
    pub fn root(&self, builder: &mut B) -> B::Join {
        if let Some(root) = &*self.root.borrow() {
            return root.clone();
        }

        let root = builder.root();
        *self.root.borrow_mut() = Some(root.clone());
        root
    }

    /// Returns the handle of a planned join, creating it and its parents on
    /// first use.
    pub fn materialize(&self, builder: &mut B, node: &JoinNode) -> Result<B::Join> {
        if let Some(handle) = self.handles.borrow().get(&node.path) {
            return Ok(handle.clone());
        }

        let parent = match &node.parent {
            Some(parent) => self.materialize(builder, parent)?,
            None => self.root(builder),
        };

        let handle = builder.join(&parent, node)?;

        debug!(
            path = %node.path,
            join = %node.name,
            kind = %node.kind,
            fetched = node.fetched,
            "created join"
        );

        self.handles
            .borrow_mut()
            .insert(node.path.clone(), handle.clone());
        Ok(handle)
    }

    /// Addresses the terminal field of a resolved path, joining every
    /// association on the way. A terminal field with a fetched join is read
    /// through that join.
    pub fn path(&self, builder: &mut B, info: &FieldPathInfo) -> Result<B::Path> {
        if let Some(node) = self.plan.fetched_node(&info.terminal().path) {
            let join = self.materialize(builder, &node)?;
            return builder.joined(&join, &node);
        }

        let from = match self.plan.nodes_for(info) {
            Some(node) => self.materialize(builder, &node)?,
            None => self.root(builder),
        };

        builder.path(&from, info.terminal())
    }
}

impl<B: QueryBuilder> fmt::Debug for QueryJoins<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryJoins")
            .field("plan", &self.plan)
            .field("handles", &self.handles.borrow().len())
            .finish_non_exhaustive()
    }
}
