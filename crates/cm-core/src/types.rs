//! Core vocabulary types for the progress hierarchy.

use serde::{Deserialize, Serialize};

/// Primary key type for all hierarchy entities
pub type Id = i64;

/// The four levels of the completion hierarchy, root first.
///
/// A `Project` contains `Unit`s, a `Unit` contains `Category`s (work
/// phases), and a `Category` contains `Assignment`s (one crew's work on
/// one category). Assignments are the leaves as far as progress
/// aggregation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Project,
    Unit,
    Category,
    Assignment,
}

impl Level {
    /// The level directly above this one, `None` at the root.
    pub fn parent(&self) -> Option<Level> {
        match self {
            Level::Project => None,
            Level::Unit => Some(Level::Project),
            Level::Category => Some(Level::Unit),
            Level::Assignment => Some(Level::Category),
        }
    }

    /// The level directly below this one, `None` at the leaf.
    pub fn child(&self) -> Option<Level> {
        match self {
            Level::Project => Some(Level::Unit),
            Level::Unit => Some(Level::Category),
            Level::Category => Some(Level::Assignment),
            Level::Assignment => None,
        }
    }

    /// Human-readable entity name for error messages
    pub fn entity_name(&self) -> &'static str {
        match self {
            Level::Project => "Project",
            Level::Unit => "Unit",
            Level::Category => "Category",
            Level::Assignment => "Assignment",
        }
    }
}

/// Clamp a completion percentage into [0, 100].
///
/// Out-of-range inputs are clamped rather than rejected.
pub fn clamp_percentage(percentage: i32) -> i32 {
    percentage.clamp(0, 100)
}
