use super::{EntityJoinHandler, JoinDecision, JoinNode};
use crate::path::{FieldPathInfo, PathSegment, PathStep};
use crate::schema::{EntityId, PropertyInfo};

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::trace;

/// The joins of one search request, keyed by resolved path.
///
/// A plan hands out a single shared [`JoinNode`] per path no matter how many
/// field paths traverse it. Nodes are added as paths are planned and never
/// replaced.
pub struct EntityJoins {
    root: EntityId,
    handlers: Vec<Arc<dyn EntityJoinHandler>>,
    nodes: RefCell<IndexMap<String, Rc<JoinNode>>>,
}

impl EntityJoins {
    /// Creates an empty plan. `handlers` are consulted in order and should
    /// end with a handler supporting every property.
    pub fn new(root: EntityId, handlers: Vec<Arc<dyn EntityJoinHandler>>) -> Self {
        Self {
            root,
            handlers,
            nodes: RefCell::new(IndexMap::new()),
        }
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    pub fn get(&self, path: &str) -> Option<Rc<JoinNode>> {
        self.nodes.borrow().get(path).cloned()
    }

    /// The node planned for `path`, if it loads its association.
    pub fn fetched_node(&self, path: &str) -> Option<Rc<JoinNode>> {
        self.get(path).filter(|node| node.fetched)
    }

    /// Every planned node, parents before children.
    pub fn joins(&self) -> Vec<Rc<JoinNode>> {
        self.nodes.borrow().values().cloned().collect()
    }

    /// Planned nodes that load their association.
    pub fn fetched(&self) -> Vec<Rc<JoinNode>> {
        self.nodes
            .borrow()
            .values()
            .filter(|node| node.fetched)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Asks the handlers how a join-annotated property is joined. The first
    /// supporting handler decides.
    pub fn decide(&self, property: &PropertyInfo) -> JoinDecision {
        self.handlers
            .iter()
            .find(|handler| handler.supports(property))
            .map(|handler| handler.handle(property))
            .unwrap_or(JoinDecision::DEFAULT)
    }

    /// Returns the node for a resolved segment, planning it on first use.
    pub fn node_for(&self, parent: Option<&Rc<JoinNode>>, segment: &PathSegment) -> Rc<JoinNode> {
        if let Some(node) = self.get(&segment.path) {
            return node;
        }

        let (name, decision) = match &segment.step {
            PathStep::Field(property) if property.is_joinable() => {
                (property.join_name.clone(), self.decide(property))
            }
            PathStep::Field(property) => (property.join_name.clone(), JoinDecision::DEFAULT),
            // Map entries are read through their map's join
            PathStep::MapKey | PathStep::MapValue => (
                segment.path.clone(),
                JoinDecision {
                    kind: parent.map(|parent| parent.kind).unwrap_or_default(),
                    fetched: false,
                },
            ),
        };

        let node = Rc::new(JoinNode {
            path: segment.path.clone(),
            name,
            step: segment.step.clone(),
            kind: decision.kind,
            fetched: decision.fetched,
            parent: parent.cloned(),
        });

        trace!(path = %node.path, kind = %node.kind, fetched = node.fetched, "planned join");

        self.nodes
            .borrow_mut()
            .insert(node.path.clone(), node.clone());
        node
    }

    /// Plans the joins leading to the terminal segment of a field path and
    /// returns the innermost one. Returns `None` for paths read directly
    /// from the root entity.
    pub fn nodes_for(&self, info: &FieldPathInfo) -> Option<Rc<JoinNode>> {
        let mut parent: Option<Rc<JoinNode>> = None;

        for segment in info.intermediate() {
            parent = Some(self.node_for(parent.as_ref(), segment));
        }

        parent
    }
}

impl fmt::Debug for EntityJoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityJoins")
            .field("root", &self.root)
            .field("handlers", &self.handlers.len())
            .field("nodes", &self.nodes.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}
