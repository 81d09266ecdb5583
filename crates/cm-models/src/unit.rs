//! Unit model

use cm_core::types::Id;
use serde::{Deserialize, Serialize};

/// Physical sub-structure type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    #[default]
    Villa,
    Apartment,
    Commercial,
}

/// A physical sub-structure of a project (villa, apartment, commercial)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Id,
    pub project_id: Id,
    pub name: String,
    pub unit_type: UnitType,
    pub floor: Option<String>,
    /// Derived from categories when any exist, manually assigned otherwise
    pub progress_percentage: i32,
}
