//! Project model

use chrono::NaiveDate;
use cm_core::types::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Project lifecycle status, set by operators through the CRUD layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
    OnHold,
    Cancelled,
}

/// A construction job, root of the completion hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub company_id: Id,
    pub name: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Monetary budget; `None` when no budget has been set
    pub budget: Option<Decimal>,
    pub status: ProjectStatus,
    /// Derived from units when any exist, manually assigned otherwise
    pub progress_percentage: i32,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Duration in days (`end_date - start_date`), clamped at zero for
    /// inverted ranges
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}
