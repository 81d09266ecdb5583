//! Team model

use cm_core::types::Id;
use serde::{Deserialize, Serialize};

/// A crew that can be assigned to categories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Id,
    pub company_id: Id,
    pub name: String,
    pub specialty: Option<String>,
    pub is_active: bool,
}
