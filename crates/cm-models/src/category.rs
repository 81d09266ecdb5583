//! Category model

use chrono::NaiveDate;
use cm_core::types::Id;
use serde::{Deserialize, Serialize};

/// A work phase within a unit (e.g. "Plumbing")
///
/// Categories are ordered within their unit by `order_sequence`. Category
/// date ranges are not validated against the owning project's range; the
/// analytics engine tolerates inconsistent ranges by clamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Id,
    pub unit_id: Id,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub order_sequence: i32,
    /// Derived from assignments when any exist, manually assigned otherwise
    pub progress_percentage: i32,
}

impl Category {
    /// Duration in days (`end_date - start_date`), clamped at zero for
    /// inverted ranges
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }

    pub fn is_completed(&self) -> bool {
        self.progress_percentage >= 100
    }

    /// Past its end date without reaching completion
    pub fn is_delayed(&self, today: NaiveDate) -> bool {
        self.end_date < today && self.progress_percentage < 100
    }
}
