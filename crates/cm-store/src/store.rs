//! Store adapter contract
//!
//! The progress aggregator and the portfolio metrics engine read and
//! write hierarchy state exclusively through this trait. Each
//! `save_progress` call persists a single field and must be atomic per
//! call; no cross-level transaction is held during a cascade.

use async_trait::async_trait;
use cm_core::error::CmError;
use cm_core::types::{Id, Level};
use cm_models::{Assignment, Category, Project, Team, Unit};
use rust_decimal::Decimal;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: Id },

    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(level: Level, id: Id) -> Self {
        StoreError::NotFound {
            entity: level.entity_name(),
            id,
        }
    }
}

impl From<StoreError> for CmError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => CmError::NotFound { entity, id },
            StoreError::Backend(message) => CmError::Store(message),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write access to the hierarchy, supplied by the persistence
/// collaborator.
///
/// Children are returned in a stable order: categories by their
/// `order_sequence`, everything else by creation order.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    /// Find a project by id
    async fn project(&self, id: Id) -> StoreResult<Project>;

    /// Find a unit by id
    async fn unit(&self, id: Id) -> StoreResult<Unit>;

    /// Find a category by id
    async fn category(&self, id: Id) -> StoreResult<Category>;

    /// Find an assignment by id
    async fn assignment(&self, id: Id) -> StoreResult<Assignment>;

    /// Units of a project, in creation order
    async fn units_of(&self, project_id: Id) -> StoreResult<Vec<Unit>>;

    /// Categories of a unit, ordered by `order_sequence`
    async fn categories_of(&self, unit_id: Id) -> StoreResult<Vec<Category>>;

    /// Assignments of a category, in creation order
    async fn assignments_of(&self, category_id: Id) -> StoreResult<Vec<Assignment>>;

    /// Persist the completion percentage of a single node; atomic per
    /// call
    async fn save_progress(&self, level: Level, id: Id, percentage: i32) -> StoreResult<()>;

    /// All projects belonging to a tenant
    async fn projects_for_company(&self, company_id: Id) -> StoreResult<Vec<Project>>;

    /// All teams belonging to a tenant
    async fn teams_for_company(&self, company_id: Id) -> StoreResult<Vec<Team>>;

    /// Sum of PAID payments recorded for a tenant
    async fn total_paid(&self, company_id: Id) -> StoreResult<Decimal>;
}
