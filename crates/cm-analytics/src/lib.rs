//! # cm-analytics
//!
//! Time-windowed portfolio analytics over the completion hierarchy:
//! schedule (planned vs. actual progress), monthly budget pro-rating,
//! category and team metrics, and rule-based risk entries.
//!
//! All date math is built on two pure interval primitives
//! ([`interval::overlap_fraction`] and [`interval::planned_progress_at`]);
//! money never leaves `rust_decimal::Decimal`.

pub mod engine;
pub mod interval;
pub mod metrics;
pub mod period;
pub mod risk;

pub use engine::AnalyticsService;
pub use metrics::{
    BudgetMetric, CategoryMetric, MonthlyPoint, RiskEntry, RiskTier, SummaryMetrics, TeamMetric,
};
pub use period::AnalysisPeriod;
