//! # cm-engine
//!
//! The top-level facade consumed by the CRUD/API layer. Composes the
//! progress aggregator and the portfolio metrics engine over a shared
//! [`cm_store::HierarchyStore`], and forwards change events and
//! advisory eviction hints to a pluggable [`CacheInvalidator`].
//!
//! The engine holds no cache state of its own; whichever memoization
//! layer a deployment runs wires in its own invalidator.

pub mod cache;
pub mod engine;

pub use cache::{CacheInvalidator, NoopInvalidator};
pub use cm_progress::NodeChanged;
pub use engine::Engine;
