//! # cm-progress
//!
//! The progress aggregator: keeps the four-level completion hierarchy
//! consistent whenever a leaf assignment's completion changes.
//!
//! A leaf write recomputes and persists each ancestor in the fixed order
//! Category → Unit → Project. A node with children always holds the
//! integer-truncated mean of its children; a childless node keeps
//! whatever percentage was assigned to it directly.

pub mod aggregator;

pub use aggregator::{NodeChanged, ProgressService};
