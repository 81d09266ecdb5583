//! # cm-store
//!
//! The hierarchy store adapter: read/write access to the four entity
//! levels keyed by identifier and by parent identifier, plus the
//! tenant-scoped reads the analytics engine needs.
//!
//! The persistence layer itself is an external collaborator; this crate
//! defines the contract (`HierarchyStore`) and ships an in-memory
//! implementation used by tests and embedded deployments.

pub mod memory;
pub mod store;

pub use memory::MemoryHierarchyStore;
pub use store::{HierarchyStore, StoreError, StoreResult};

#[cfg(feature = "mock")]
pub use store::MockHierarchyStore;
