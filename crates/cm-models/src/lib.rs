//! # cm-models
//!
//! Domain models for ConstructManager RS: the four-level completion
//! hierarchy (Project → Unit → Category → Assignment) plus the Team
//! entity referenced by assignments and analytics.
//!
//! Models carry parent identifiers, never back-references; node data is
//! owned by the store adapter and looked up by id.

pub mod assignment;
pub mod category;
pub mod node;
pub mod project;
pub mod team;
pub mod unit;

pub use assignment::{Assignment, AssignmentStatus};
pub use category::Category;
pub use node::{Node, NodeRef};
pub use project::{Project, ProjectStatus};
pub use team::Team;
pub use unit::{Unit, UnitType};
