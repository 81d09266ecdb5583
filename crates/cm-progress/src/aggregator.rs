//! Progress aggregation and cascade propagation
//!
//! No locking is applied across cascade levels: each step is a
//! read-modify-write through the store adapter, atomic per call only.
//! If an ancestor lookup or write fails mid-cascade, the levels already
//! persisted stay persisted and the error reports them; there is no
//! rollback.

use std::sync::Arc;

use cm_core::error::CmError;
use cm_core::result::CmResult;
use cm_core::types::{clamp_percentage, Id, Level};
use cm_models::{Assignment, Node};
use cm_store::HierarchyStore;
use tracing::{debug, info};

/// Event emitted after a node's completion percentage is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeChanged {
    pub level: Level,
    pub id: Id,
    pub percentage: i32,
}

/// The progress aggregator
pub struct ProgressService {
    store: Arc<dyn HierarchyStore>,
    listeners: Vec<Box<dyn Fn(&NodeChanged) + Send + Sync>>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self {
            store,
            listeners: Vec::new(),
        }
    }

    /// Register a change listener, e.g. a cache-invalidation component.
    pub fn on_node_changed<F>(&mut self, listener: F)
    where
        F: Fn(&NodeChanged) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: NodeChanged) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Fetch a node at any level.
    pub async fn fetch_node(&self, level: Level, id: Id) -> CmResult<Node> {
        Ok(match level {
            Level::Project => Node::Project(self.store.project(id).await?),
            Level::Unit => Node::Unit(self.store.unit(id).await?),
            Level::Category => Node::Category(self.store.category(id).await?),
            Level::Assignment => Node::Assignment(self.store.assignment(id).await?),
        })
    }

    /// Recompute a node's completion percentage from its direct children.
    ///
    /// A node with no children keeps its stored value (manual leaf); the
    /// call is a no-op and returns that value. Otherwise the unweighted
    /// mean of the children, truncated toward zero, is persisted and
    /// returned. Does not recurse in either direction.
    pub async fn recompute_from_children(&self, level: Level, id: Id) -> CmResult<i32> {
        let (stored, children): (i32, Vec<i32>) = match level {
            Level::Project => {
                let project = self.store.project(id).await?;
                let units = self.store.units_of(id).await?;
                (
                    project.progress_percentage,
                    units.iter().map(|u| u.progress_percentage).collect(),
                )
            }
            Level::Unit => {
                let unit = self.store.unit(id).await?;
                let categories = self.store.categories_of(id).await?;
                (
                    unit.progress_percentage,
                    categories.iter().map(|c| c.progress_percentage).collect(),
                )
            }
            Level::Category => {
                let category = self.store.category(id).await?;
                let assignments = self.store.assignments_of(id).await?;
                (
                    category.progress_percentage,
                    assignments.iter().map(|a| a.progress_percentage).collect(),
                )
            }
            // Assignments are leaves; their percentage is always direct.
            Level::Assignment => {
                let assignment = self.store.assignment(id).await?;
                (assignment.progress_percentage, Vec::new())
            }
        };

        if children.is_empty() {
            debug!(?level, id, stored, "recompute skipped, no children");
            return Ok(stored);
        }

        // Integer truncation, not rounding: {100, 100, 0} -> 66.
        let sum: i64 = children.iter().map(|&p| p as i64).sum();
        let average = (sum / children.len() as i64) as i32;

        self.store.save_progress(level, id, average).await?;
        debug!(?level, id, average, "recomputed progress from children");
        self.emit(NodeChanged {
            level,
            id,
            percentage: average,
        });

        Ok(average)
    }

    /// Set an assignment's completion percentage and cascade the
    /// recomputation up to the project root.
    ///
    /// The input is clamped to [0, 100]. The cascade recomputes the
    /// owning Category, then Unit, then Project, in that fixed order.
    /// A failure mid-cascade surfaces as
    /// [`CmError::PartialCascade`] listing the levels already persisted.
    pub async fn set_leaf_progress(
        &self,
        assignment_id: Id,
        percentage: i32,
    ) -> CmResult<Assignment> {
        let mut assignment = self.store.assignment(assignment_id).await?;
        let clamped = clamp_percentage(percentage);

        self.store
            .save_progress(Level::Assignment, assignment_id, clamped)
            .await?;
        assignment.progress_percentage = clamped;
        self.emit(NodeChanged {
            level: Level::Assignment,
            id: assignment_id,
            percentage: clamped,
        });

        let mut updated = vec![Level::Assignment];

        let category = self
            .store
            .category(assignment.category_id)
            .await
            .map_err(|e| partial(&updated, e.into()))?;
        self.cascade_step(Level::Category, category.id, &mut updated)
            .await?;

        let unit = self
            .store
            .unit(category.unit_id)
            .await
            .map_err(|e| partial(&updated, e.into()))?;
        self.cascade_step(Level::Unit, unit.id, &mut updated).await?;

        self.cascade_step(Level::Project, unit.project_id, &mut updated)
            .await?;

        info!(
            assignment_id,
            percentage = clamped,
            "assignment progress updated, cascade complete"
        );
        Ok(assignment)
    }

    /// Manual override at any level: clamp and persist, without
    /// recursing into children and without propagating upward.
    ///
    /// Direct sets below the root are intentionally not mirrored to
    /// ancestors; only leaf-originated updates cascade.
    pub async fn set_node_progress_direct(
        &self,
        level: Level,
        id: Id,
        percentage: i32,
    ) -> CmResult<Node> {
        let mut node = self.fetch_node(level, id).await?;
        let clamped = clamp_percentage(percentage);

        self.store.save_progress(level, id, clamped).await?;
        node.set_progress_percentage(clamped);
        debug!(?level, id, percentage = clamped, "direct progress override");
        self.emit(NodeChanged {
            level,
            id,
            percentage: clamped,
        });

        Ok(node)
    }

    async fn cascade_step(
        &self,
        level: Level,
        id: Id,
        updated: &mut Vec<Level>,
    ) -> CmResult<()> {
        match self.recompute_from_children(level, id).await {
            Ok(_) => {
                updated.push(level);
                Ok(())
            }
            Err(source) => Err(partial(updated, source)),
        }
    }
}

fn partial(updated: &[Level], source: CmError) -> CmError {
    CmError::PartialCascade {
        updated: updated.to_vec(),
        source: Box::new(source),
    }
}
