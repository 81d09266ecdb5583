//! Level-generic node view over the hierarchy entities

use cm_core::types::{Id, Level};
use serde::{Deserialize, Serialize};

use crate::{Assignment, Category, Project, Unit};

/// Reference to a node by level and identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub level: Level,
    pub id: Id,
}

impl NodeRef {
    pub fn new(level: Level, id: Id) -> Self {
        Self { level, id }
    }
}

/// A node at any of the four hierarchy levels
///
/// Used by the level-generic operations (`recompute_node`, direct
/// overrides); the typed entities remain the primary representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Project(Project),
    Unit(Unit),
    Category(Category),
    Assignment(Assignment),
}

impl Node {
    pub fn level(&self) -> Level {
        match self {
            Node::Project(_) => Level::Project,
            Node::Unit(_) => Level::Unit,
            Node::Category(_) => Level::Category,
            Node::Assignment(_) => Level::Assignment,
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Project(p) => p.id,
            Node::Unit(u) => u.id,
            Node::Category(c) => c.id,
            Node::Assignment(a) => a.id,
        }
    }

    pub fn progress_percentage(&self) -> i32 {
        match self {
            Node::Project(p) => p.progress_percentage,
            Node::Unit(u) => u.progress_percentage,
            Node::Category(c) => c.progress_percentage,
            Node::Assignment(a) => a.progress_percentage,
        }
    }

    pub fn set_progress_percentage(&mut self, percentage: i32) {
        match self {
            Node::Project(p) => p.progress_percentage = percentage,
            Node::Unit(u) => u.progress_percentage = percentage,
            Node::Category(c) => c.progress_percentage = percentage,
            Node::Assignment(a) => a.progress_percentage = percentage,
        }
    }

    /// The parent reference for this node, `None` for projects
    pub fn parent_ref(&self) -> Option<NodeRef> {
        match self {
            Node::Project(_) => None,
            Node::Unit(u) => Some(NodeRef::new(Level::Project, u.project_id)),
            Node::Category(c) => Some(NodeRef::new(Level::Unit, c.unit_id)),
            Node::Assignment(a) => Some(NodeRef::new(Level::Category, a.category_id)),
        }
    }
}
