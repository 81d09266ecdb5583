//! Assignment model (one crew's work on one category)

use cm_core::types::Id;
use serde::{Deserialize, Serialize};

/// Operator-set lifecycle status of an assignment
///
/// Independent of the stored completion percentage and not kept
/// consistent with it (status can be `Done` while completion is below
/// 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
    Delayed,
}

/// One team's assignment to one category; the leaf level of progress
/// aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Id,
    pub category_id: Id,
    pub team_id: Id,
    pub status: AssignmentStatus,
    pub reception_status: bool,
    pub payment_status: bool,
    /// Directly assigned; the leaf of every cascade
    pub progress_percentage: i32,
}

impl Assignment {
    pub fn is_done(&self) -> bool {
        self.status == AssignmentStatus::Done
    }

    pub fn is_delayed(&self) -> bool {
        self.status == AssignmentStatus::Delayed
    }
}
