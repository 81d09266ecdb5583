//! Rule-based risk heuristics
//!
//! A fixed rule table, evaluated independently (rules are not mutually
//! exclusive), each contributing zero or one entry. Deterministic and
//! data-driven, not a statistical model.

use rust_decimal::Decimal;

use crate::metrics::{RiskEntry, RiskTier};

/// Inputs the rule table is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct RiskInputs {
    pub delayed_assignments: i64,
    pub budget_overrun: Decimal,
    pub active_projects: i64,
    pub active_teams: i64,
}

/// Evaluate the rule table.
pub fn evaluate(inputs: &RiskInputs) -> Vec<RiskEntry> {
    let mut risks = Vec::new();

    if inputs.delayed_assignments > 0 {
        risks.push(RiskEntry::new(
            "Weather Delays",
            if inputs.delayed_assignments > 5 {
                RiskTier::High
            } else {
                RiskTier::Medium
            },
            RiskTier::High,
            "Schedule buffer and indoor work alternatives",
        ));
    }

    if inputs.budget_overrun > Decimal::ZERO {
        risks.push(RiskEntry::new(
            "Budget Overrun",
            RiskTier::High,
            RiskTier::Medium,
            "Cost control measures and value engineering",
        ));
    }

    if inputs.active_projects > inputs.active_teams {
        let probability = if inputs.active_projects as f64 > 1.5 * inputs.active_teams as f64 {
            RiskTier::High
        } else {
            RiskTier::Medium
        };
        risks.push(RiskEntry::new(
            "Team Availability",
            RiskTier::Medium,
            probability,
            "Cross-training and resource optimization",
        ));
    }

    // Standing advisories, independent of the data.
    risks.push(RiskEntry::new(
        "Material Shortage",
        RiskTier::High,
        RiskTier::Medium,
        "Alternative suppliers and early procurement",
    ));
    risks.push(RiskEntry::new(
        "Quality Issues",
        RiskTier::Medium,
        RiskTier::Low,
        "Enhanced quality control and inspections",
    ));

    risks
}
