//! Analytics output types
//!
//! Percentages are rounded to the nearest integer only here, at the
//! output boundary; money stays `Decimal`.

use cm_core::types::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio summary for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// Average current completion across all tenant projects
    pub average_progress: i32,
    /// `100 - paid/budget*100`, 0 when no budget is set
    pub budget_efficiency: i32,
    /// `100 - delayed/total*100` over assignments, 100 when none exist
    pub on_time_delivery: i32,
    pub active_projects: i64,
    pub active_teams: i64,
    pub average_duration_days: i32,
}

/// One month of the planned-vs-actual progress series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Short month label ("Jan", "Feb", ...)
    pub month: String,
    pub planned_progress: i32,
    /// Current stored completion, used as a proxy for historical state
    pub actual_progress: i32,
    /// Budget pro-rated to this month by date overlap
    pub budget: Decimal,
    /// `budget * average_progress / 100`, an approximation rather than a
    /// ledger figure
    pub spent: Decimal,
}

/// Metrics for one category name across the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetric {
    pub name: String,
    pub average_duration_days: i32,
    /// Percentage of instances at 100% completion
    pub completion_rate: i32,
    /// Percentage of instances past their end date and below 100%
    pub delay_rate: i32,
}

/// Per-team performance metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetric {
    pub team_id: Id,
    pub name: String,
    pub specialty: Option<String>,
    /// `completed/total*100` over the team's assignments, 0 when none
    pub efficiency: i32,
    pub completed_assignments: i64,
    /// Distinct active projects the team is assigned in
    pub active_projects: i64,
}

/// Portfolio-level budget metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetMetric {
    pub total_budget: Decimal,
    pub total_paid: Decimal,
    /// `total_budget * average_progress / 100`
    pub projected_spend: Decimal,
    pub savings: Decimal,
    pub overrun: Decimal,
}

/// Qualitative tier for risk impact and probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// One rule-derived risk entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEntry {
    pub factor: String,
    pub impact: RiskTier,
    pub probability: RiskTier,
    pub mitigation: String,
}

impl RiskEntry {
    pub fn new(
        factor: &str,
        impact: RiskTier,
        probability: RiskTier,
        mitigation: &str,
    ) -> Self {
        Self {
            factor: factor.to_string(),
            impact,
            probability,
            mitigation: mitigation.to_string(),
        }
    }
}
