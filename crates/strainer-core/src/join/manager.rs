use super::{DefaultJoinHandler, EntityJoinHandler, EntityJoins, JoinNode};
use crate::path::{child_path, PathSegment, PathStep};
use crate::schema::{EntityId, MetadataProvider};
use crate::Result;

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Creates join plans.
#[derive(Debug, Clone)]
pub struct EntityJoinManager {
    metadata: Arc<MetadataProvider>,
}

impl EntityJoinManager {
    pub fn new(metadata: Arc<MetadataProvider>) -> Self {
        debug!("initialized entity join manager");
        Self { metadata }
    }

    /// Creates the join plan of a search request on `root`.
    ///
    /// [`DefaultJoinHandler`] is appended to `handlers`. Every join-annotated
    /// property of the root entity type is planned up front, descending
    /// through each fetched join so the whole fetch graph is known before any
    /// filter is evaluated. Associations leading back to the root type, or to
    /// a type already on the current branch, are skipped.
    pub fn compute_entity_joins(
        &self,
        root: EntityId,
        handlers: &[Arc<dyn EntityJoinHandler>],
    ) -> Result<EntityJoins> {
        let mut handlers = handlers.to_vec();
        handlers.push(Arc::new(DefaultJoinHandler));

        let plan = EntityJoins::new(root, handlers);
        let mut branch = HashSet::from([root]);
        self.plan_entity(&plan, root, None, &mut branch)?;

        debug!(
            root = %self.metadata.schema().entity(root).name,
            joins = plan.len(),
            fetched = plan.fetched().len(),
            "computed entity joins"
        );

        Ok(plan)
    }

    fn plan_entity(
        &self,
        plan: &EntityJoins,
        entity: EntityId,
        parent: Option<&Rc<JoinNode>>,
        branch: &mut HashSet<EntityId>,
    ) -> Result<()> {
        let metadata = self.metadata.property_infos(entity)?;
        let parent_path = parent.map(|parent| parent.path.as_str()).unwrap_or_default();

        for property in metadata.joinable() {
            let target = property
                .target_entity()
                .filter(|_| self.metadata.is_entity_type(property.target_type()));

            if matches!(target, Some(target) if branch.contains(&target)) {
                continue;
            }

            let segment = PathSegment {
                name: property.name.clone(),
                path: child_path(parent_path, &property.name),
                step: PathStep::Field(property.clone()),
            };

            let node = plan.node_for(parent, &segment);

            if let (true, Some(target)) = (node.fetched, target) {
                branch.insert(target);
                self.plan_entity(plan, target, Some(&node), branch)?;
                branch.remove(&target);
            }
        }

        Ok(())
    }
}
