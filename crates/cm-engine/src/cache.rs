//! Cache-invalidation hook.
//!
//! The engine never manages cache state. It emits two kinds of
//! signals an external memoization layer can act on: a `NodeChanged`
//! event for every node the aggregator persists, and an advisory
//! eviction hint forwarded from the CRUD layer after its own writes.

use cm_core::types::Id;
use cm_progress::NodeChanged;
use tracing::debug;

pub trait CacheInvalidator: Send + Sync {
    /// Called once per node the progress aggregator persists.
    fn node_changed(&self, event: &NodeChanged);

    /// Advisory eviction request scoped to a tenant and the units its
    /// write touched.
    fn invalidate(&self, company_id: Id, unit_ids: &[Id]);
}

/// Default wiring for deployments without a memoization layer.
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn node_changed(&self, _event: &NodeChanged) {}

    fn invalidate(&self, company_id: Id, unit_ids: &[Id]) {
        debug!(company_id, ?unit_ids, "cache hint dropped, no cache wired");
    }
}
