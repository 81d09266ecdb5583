//! Engine facade
//!
//! One entry point per operation the CRUD/API layer consumes. Writes
//! run through the progress aggregator and fan change events out to
//! the wired cache invalidator; reads run through the analytics
//! service against current store state.

use std::sync::Arc;

use cm_analytics::{
    AnalysisPeriod, AnalyticsService, BudgetMetric, CategoryMetric, MonthlyPoint, RiskEntry,
    SummaryMetrics, TeamMetric,
};
use cm_core::config::EngineConfig;
use cm_core::result::CmResult;
use cm_core::types::{Id, Level};
use cm_models::{Assignment, Node};
use cm_progress::ProgressService;
use cm_store::HierarchyStore;
use tracing::debug;

use crate::cache::{CacheInvalidator, NoopInvalidator};

pub struct Engine {
    progress: ProgressService,
    analytics: AnalyticsService,
    config: EngineConfig,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl Engine {
    /// Engine with default configuration and no cache wired.
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self::with_parts(store, EngineConfig::default(), Arc::new(NoopInvalidator))
    }

    pub fn with_parts(
        store: Arc<dyn HierarchyStore>,
        config: EngineConfig,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        let mut progress = ProgressService::new(Arc::clone(&store));
        if config.cache.enabled {
            let sink = Arc::clone(&invalidator);
            progress.on_node_changed(move |event| sink.node_changed(event));
        }

        Self {
            progress,
            analytics: AnalyticsService::new(store),
            config,
            invalidator,
        }
    }

    /// Leaf write: clamp, persist, and cascade through Category, Unit
    /// and Project. Returns the updated assignment.
    pub async fn update_assignment_progress(
        &self,
        assignment_id: Id,
        percentage: i32,
    ) -> CmResult<Assignment> {
        self.progress.set_leaf_progress(assignment_id, percentage).await
    }

    /// Manual re-sync entry point: recompute one node from its current
    /// children and return it.
    pub async fn recompute_node(&self, level: Level, id: Id) -> CmResult<Node> {
        self.progress.recompute_from_children(level, id).await?;
        self.progress.fetch_node(level, id).await
    }

    /// Direct override of one node's percentage, without propagation.
    pub async fn override_node_progress(
        &self,
        level: Level,
        id: Id,
        percentage: i32,
    ) -> CmResult<Node> {
        self.progress.set_node_progress_direct(level, id, percentage).await
    }

    pub async fn portfolio_summary(&self, company_id: Id) -> CmResult<SummaryMetrics> {
        self.analytics.summary(company_id).await
    }

    /// Monthly planned/actual/budget series. `period` accepts the
    /// external period strings; `None` and unrecognized values fall
    /// back to the configured default.
    pub async fn monthly_progress_series(
        &self,
        company_id: Id,
        period: Option<&str>,
    ) -> CmResult<Vec<MonthlyPoint>> {
        let period = AnalysisPeriod::parse(
            period.unwrap_or(self.config.analytics.default_period.as_str()),
        );
        self.analytics.monthly_series(company_id, period).await
    }

    pub async fn category_analysis(&self, company_id: Id) -> CmResult<Vec<CategoryMetric>> {
        self.analytics.category_analysis(company_id).await
    }

    pub async fn team_performance(&self, company_id: Id) -> CmResult<Vec<TeamMetric>> {
        self.analytics.team_performance(company_id).await
    }

    pub async fn budget_analysis(&self, company_id: Id) -> CmResult<BudgetMetric> {
        self.analytics.budget_analysis(company_id).await
    }

    pub async fn risk_factors(&self, company_id: Id) -> CmResult<Vec<RiskEntry>> {
        self.analytics.risk_factors(company_id).await
    }

    /// Advisory hint from the CRUD layer after one of its own writes.
    /// Forwarded verbatim; dropped when cache hints are disabled.
    pub fn invalidate_cache_hint(&self, company_id: Id, unit_ids: &[Id]) {
        if !self.config.cache.enabled {
            debug!(company_id, "cache hints disabled, hint dropped");
            return;
        }
        self.invalidator.invalidate(company_id, unit_ids);
    }
}
