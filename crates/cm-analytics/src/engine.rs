//! Portfolio metrics engine
//!
//! Read-only derivation of portfolio analytics from current hierarchy
//! state. One malformed or unreadable project never aborts the whole
//! portfolio: its subtree is skipped and the remaining projects are
//! reported.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use cm_core::result::CmResult;
use cm_core::types::Id;
use cm_models::{Assignment, Category, Project};
use cm_store::HierarchyStore;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::interval::{overlap_ratio, planned_progress_at};
use crate::metrics::{
    BudgetMetric, CategoryMetric, MonthlyPoint, RiskEntry, SummaryMetrics, TeamMetric,
};
use crate::period::{month_windows, AnalysisPeriod};
use crate::risk::{self, RiskInputs};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The portfolio metrics engine
pub struct AnalyticsService {
    store: Arc<dyn HierarchyStore>,
}

/// Flattened view of one tenant's hierarchy, gathered in a single walk
struct PortfolioSnapshot {
    projects: Vec<Project>,
    categories: Vec<Category>,
    /// Each assignment tagged with its owning project
    assignments: Vec<(Id, Assignment)>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self { store }
    }

    /// Portfolio summary metrics for a tenant.
    pub async fn summary(&self, company_id: Id) -> CmResult<SummaryMetrics> {
        let snapshot = self.snapshot(company_id).await?;
        let teams = self.store.teams_for_company(company_id).await?;
        let total_paid = self.store.total_paid(company_id).await?;

        let average_progress = round_pct(mean_progress(&snapshot.projects));

        let total_budget = total_budget(&snapshot.projects);
        let budget_efficiency = if total_budget > Decimal::ZERO {
            clamp_metric(round_decimal(HUNDRED - total_paid / total_budget * HUNDRED))
        } else {
            0
        };

        let total_assignments = snapshot.assignments.len() as i64;
        let delayed = snapshot
            .assignments
            .iter()
            .filter(|(_, a)| a.is_delayed())
            .count() as i64;
        let on_time_delivery = if total_assignments > 0 {
            clamp_metric(round_pct(
                100.0 - delayed as f64 / total_assignments as f64 * 100.0,
            ))
        } else {
            100
        };

        let average_duration_days = if snapshot.projects.is_empty() {
            0
        } else {
            let total: i64 = snapshot.projects.iter().map(|p| p.duration_days()).sum();
            round_pct(total as f64 / snapshot.projects.len() as f64)
        };

        Ok(SummaryMetrics {
            average_progress,
            budget_efficiency,
            on_time_delivery,
            active_projects: snapshot.projects.iter().filter(|p| p.is_active()).count() as i64,
            active_teams: teams.iter().filter(|t| t.is_active).count() as i64,
            average_duration_days,
        })
    }

    /// Planned-vs-actual progress and budget series, one point per
    /// calendar month in the period.
    pub async fn monthly_series(
        &self,
        company_id: Id,
        period: AnalysisPeriod,
    ) -> CmResult<Vec<MonthlyPoint>> {
        self.monthly_series_as_of(company_id, period, today()).await
    }

    pub async fn monthly_series_as_of(
        &self,
        company_id: Id,
        period: AnalysisPeriod,
        today: NaiveDate,
    ) -> CmResult<Vec<MonthlyPoint>> {
        let projects = self.store.projects_for_company(company_id).await?;
        debug!(company_id, period = period.as_str(), "building monthly progress series");

        // Actual progress is the current stored completion: there is no
        // historical snapshot to time-travel to, so every month reports
        // the same actual value.
        let actual = round_pct(mean_progress(&projects));
        let average = mean_progress_decimal(&projects);

        let windows = month_windows(period.start_date(today), today);
        let mut points = Vec::with_capacity(windows.len());

        for window in windows {
            let planned = if projects.is_empty() {
                0.0
            } else {
                let total: f64 = projects
                    .iter()
                    .map(|p| planned_progress_at(p.start_date, p.end_date, window.end))
                    .sum();
                total / projects.len() as f64
            };

            let budget: Decimal = projects
                .iter()
                .filter_map(|p| {
                    p.budget.map(|b| {
                        b * overlap_ratio(p.start_date, p.end_date, window.start, window.end)
                    })
                })
                .sum();
            let spent = budget * average / HUNDRED;

            points.push(MonthlyPoint {
                month: window.label(),
                planned_progress: round_pct(planned),
                actual_progress: actual,
                budget,
                spent,
            });
        }

        Ok(points)
    }

    /// Per-category-name duration, completion and delay rates.
    pub async fn category_analysis(&self, company_id: Id) -> CmResult<Vec<CategoryMetric>> {
        self.category_analysis_as_of(company_id, today()).await
    }

    pub async fn category_analysis_as_of(
        &self,
        company_id: Id,
        today: NaiveDate,
    ) -> CmResult<Vec<CategoryMetric>> {
        let snapshot = self.snapshot(company_id).await?;

        let mut by_name: BTreeMap<String, Vec<&Category>> = BTreeMap::new();
        for category in &snapshot.categories {
            by_name.entry(category.name.clone()).or_default().push(category);
        }

        Ok(by_name
            .into_iter()
            .map(|(name, group)| {
                let count = group.len() as f64;
                let total_duration: i64 = group.iter().map(|c| c.duration_days()).sum();
                let completed = group.iter().filter(|c| c.is_completed()).count() as f64;
                let delayed = group.iter().filter(|c| c.is_delayed(today)).count() as f64;

                CategoryMetric {
                    name,
                    average_duration_days: round_pct(total_duration as f64 / count),
                    completion_rate: round_pct(completed / count * 100.0),
                    delay_rate: round_pct(delayed / count * 100.0),
                }
            })
            .collect())
    }

    /// Per-team efficiency and workload metrics, active teams only.
    pub async fn team_performance(&self, company_id: Id) -> CmResult<Vec<TeamMetric>> {
        let snapshot = self.snapshot(company_id).await?;
        let teams = self.store.teams_for_company(company_id).await?;

        let active_projects: HashSet<Id> = snapshot
            .projects
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.id)
            .collect();

        Ok(teams
            .into_iter()
            .filter(|t| t.is_active)
            .map(|team| {
                let mut total = 0i64;
                let mut completed = 0i64;
                let mut projects: HashSet<Id> = HashSet::new();
                for (project_id, assignment) in &snapshot.assignments {
                    if assignment.team_id != team.id {
                        continue;
                    }
                    total += 1;
                    if assignment.is_done() {
                        completed += 1;
                    }
                    if active_projects.contains(project_id) {
                        projects.insert(*project_id);
                    }
                }

                let efficiency = if total > 0 {
                    round_pct(completed as f64 / total as f64 * 100.0)
                } else {
                    0
                };

                TeamMetric {
                    team_id: team.id,
                    name: team.name,
                    specialty: team.specialty,
                    efficiency,
                    completed_assignments: completed,
                    active_projects: projects.len() as i64,
                }
            })
            .collect())
    }

    /// Portfolio budget position: total, paid, projection, savings and
    /// overrun.
    pub async fn budget_analysis(&self, company_id: Id) -> CmResult<BudgetMetric> {
        let projects = self.store.projects_for_company(company_id).await?;
        let total_paid = self.store.total_paid(company_id).await?;

        let total_budget = total_budget(&projects);
        let projected_spend = total_budget * mean_progress_decimal(&projects) / HUNDRED;

        Ok(BudgetMetric {
            total_budget,
            total_paid,
            projected_spend,
            savings: (total_budget - projected_spend).max(Decimal::ZERO),
            overrun: (projected_spend - total_budget).max(Decimal::ZERO),
        })
    }

    /// Rule-derived risk entries for the tenant.
    pub async fn risk_factors(&self, company_id: Id) -> CmResult<Vec<RiskEntry>> {
        let snapshot = self.snapshot(company_id).await?;
        let teams = self.store.teams_for_company(company_id).await?;
        let budget = self.budget_analysis(company_id).await?;

        let inputs = RiskInputs {
            delayed_assignments: snapshot
                .assignments
                .iter()
                .filter(|(_, a)| a.is_delayed())
                .count() as i64,
            budget_overrun: budget.overrun,
            active_projects: snapshot.projects.iter().filter(|p| p.is_active()).count() as i64,
            active_teams: teams.iter().filter(|t| t.is_active).count() as i64,
        };

        Ok(risk::evaluate(&inputs))
    }

    /// Walk the tenant's hierarchy once. A project whose subtree cannot
    /// be read is logged and skipped; the projects list itself is kept
    /// so portfolio-level averages stay stable.
    async fn snapshot(&self, company_id: Id) -> CmResult<PortfolioSnapshot> {
        let projects = self.store.projects_for_company(company_id).await?;
        let mut categories = Vec::new();
        let mut assignments = Vec::new();

        for project in &projects {
            if let Err(err) = self
                .collect_subtree(project.id, &mut categories, &mut assignments)
                .await
            {
                warn!(
                    project_id = project.id,
                    error = %err,
                    "skipping unreadable project subtree in analytics"
                );
            }
        }

        Ok(PortfolioSnapshot {
            projects,
            categories,
            assignments,
        })
    }

    async fn collect_subtree(
        &self,
        project_id: Id,
        categories: &mut Vec<Category>,
        assignments: &mut Vec<(Id, Assignment)>,
    ) -> CmResult<()> {
        for unit in self.store.units_of(project_id).await? {
            for category in self.store.categories_of(unit.id).await? {
                for assignment in self.store.assignments_of(category.id).await? {
                    assignments.push((project_id, assignment));
                }
                categories.push(category);
            }
        }
        Ok(())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn total_budget(projects: &[Project]) -> Decimal {
    projects.iter().filter_map(|p| p.budget).sum()
}

fn mean_progress(projects: &[Project]) -> f64 {
    if projects.is_empty() {
        return 0.0;
    }
    let total: i64 = projects.iter().map(|p| p.progress_percentage as i64).sum();
    total as f64 / projects.len() as f64
}

fn mean_progress_decimal(projects: &[Project]) -> Decimal {
    if projects.is_empty() {
        return Decimal::ZERO;
    }
    let total: i64 = projects.iter().map(|p| p.progress_percentage as i64).sum();
    Decimal::from(total) / Decimal::from(projects.len() as i64)
}

fn round_pct(value: f64) -> i32 {
    value.round() as i32
}

fn round_decimal(value: Decimal) -> i32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

fn clamp_metric(value: i32) -> i32 {
    value.clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_models::{
        Assignment, AssignmentStatus, Category, Project, ProjectStatus, Team, Unit, UnitType,
    };
    use cm_store::{MemoryHierarchyStore, MockHierarchyStore, StoreError};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(
        company_id: Id,
        start: NaiveDate,
        end: NaiveDate,
        budget: Option<Decimal>,
        status: ProjectStatus,
        progress: i32,
    ) -> Project {
        Project {
            id: 0,
            company_id,
            name: "Project".into(),
            location: None,
            start_date: start,
            end_date: end,
            budget,
            status,
            progress_percentage: progress,
        }
    }

    fn unit(project_id: Id) -> Unit {
        Unit {
            id: 0,
            project_id,
            name: "Unit".into(),
            unit_type: UnitType::Apartment,
            floor: None,
            progress_percentage: 0,
        }
    }

    fn category(
        unit_id: Id,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
        progress: i32,
    ) -> Category {
        Category {
            id: 0,
            unit_id,
            name: name.into(),
            start_date: start,
            end_date: end,
            order_sequence: 1,
            progress_percentage: progress,
        }
    }

    fn assignment(category_id: Id, team_id: Id, status: AssignmentStatus, progress: i32) -> Assignment {
        Assignment {
            id: 0,
            category_id,
            team_id,
            status,
            reception_status: false,
            payment_status: false,
            progress_percentage: progress,
        }
    }

    /// Two projects, two teams, three assignments, 30k paid of a 60k
    /// budget.
    fn portfolio_fixture(store: &MemoryHierarchyStore) -> Id {
        let company_id = 1;
        let p1 = store.add_project(project(
            company_id,
            date(2025, 4, 1),
            date(2025, 5, 30),
            Some(dec!(60000)),
            ProjectStatus::Active,
            50,
        ));
        let p2 = store.add_project(project(
            company_id,
            date(2025, 1, 1),
            date(2025, 12, 31),
            None,
            ProjectStatus::Planning,
            30,
        ));
        let t1 = store.add_team(Team {
            id: 0,
            company_id,
            name: "Alpha Crew".into(),
            specialty: Some("Plumbing".into()),
            is_active: true,
        });
        store.add_team(Team {
            id: 0,
            company_id,
            name: "Retired Crew".into(),
            specialty: None,
            is_active: false,
        });

        let u1 = store.add_unit(unit(p1.id));
        let c1 = store.add_category(category(
            u1.id,
            "Plumbing",
            date(2025, 4, 1),
            date(2025, 4, 30),
            100,
        ));
        store.add_assignment(assignment(c1.id, t1.id, AssignmentStatus::Done, 100));
        store.add_assignment(assignment(c1.id, t1.id, AssignmentStatus::Delayed, 50));

        let u2 = store.add_unit(unit(p2.id));
        let c2 = store.add_category(category(
            u2.id,
            "Plumbing",
            date(2025, 1, 1),
            date(2025, 2, 1),
            40,
        ));
        store.add_assignment(assignment(c2.id, t1.id, AssignmentStatus::InProgress, 40));

        store.record_paid(company_id, dec!(30000));
        company_id
    }

    #[tokio::test]
    async fn test_summary_metrics() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = portfolio_fixture(&store);
        let service = AnalyticsService::new(store);

        let summary = service.summary(company_id).await.unwrap();

        assert_eq!(summary.average_progress, 40);
        // 100 - 30000/60000 * 100
        assert_eq!(summary.budget_efficiency, 50);
        // 1 delayed of 3 assignments
        assert_eq!(summary.on_time_delivery, 67);
        assert_eq!(summary.active_projects, 1);
        assert_eq!(summary.active_teams, 1);
        // (59 + 364) / 2 = 211.5
        assert_eq!(summary.average_duration_days, 212);
    }

    #[tokio::test]
    async fn test_summary_with_empty_portfolio() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let service = AnalyticsService::new(store);

        let summary = service.summary(9).await.unwrap();

        assert_eq!(summary.average_progress, 0);
        assert_eq!(summary.budget_efficiency, 0);
        assert_eq!(summary.on_time_delivery, 100);
        assert_eq!(summary.average_duration_days, 0);
    }

    #[tokio::test]
    async fn test_monthly_budget_sums_to_total() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = 2;
        store.add_project(project(
            company_id,
            date(2025, 4, 1),
            date(2025, 5, 30),
            Some(dec!(60000)),
            ProjectStatus::Active,
            50,
        ));
        let service = AnalyticsService::new(store);

        let points = service
            .monthly_series_as_of(company_id, AnalysisPeriod::Last3Months, date(2025, 5, 31))
            .await
            .unwrap();

        // Feb..May; the project range is fully covered and no two
        // months double-count a day.
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].budget, Decimal::ZERO);
        assert_eq!(points[2].budget, dec!(30000));
        assert_eq!(points[3].budget, dec!(30000));
        let total: Decimal = points.iter().map(|p| p.budget).sum();
        assert_eq!(total, dec!(60000));
    }

    #[tokio::test]
    async fn test_monthly_series_planned_and_spent() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = 2;
        store.add_project(project(
            company_id,
            date(2025, 4, 1),
            date(2025, 5, 30),
            Some(dec!(60000)),
            ProjectStatus::Active,
            50,
        ));
        let service = AnalyticsService::new(store);

        let points = service
            .monthly_series_as_of(company_id, AnalysisPeriod::LastMonth, date(2025, 5, 30))
            .await
            .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].month, "Apr");
        // At Apr 30: 29 of 59 exclusive days elapsed.
        assert_eq!(points[0].planned_progress, 49);
        // At May 31 (past the end): planned is complete.
        assert_eq!(points[1].planned_progress, 100);
        // Actual is the current stored value in every month.
        assert_eq!(points[0].actual_progress, 50);
        assert_eq!(points[1].actual_progress, 50);
        // Spent = monthly budget * 50%.
        assert_eq!(points[0].spent, dec!(15000));
    }

    #[tokio::test]
    async fn test_category_analysis_rates() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = portfolio_fixture(&store);
        let service = AnalyticsService::new(store);

        let metrics = service
            .category_analysis_as_of(company_id, date(2025, 7, 15))
            .await
            .unwrap();

        assert_eq!(metrics.len(), 1);
        let plumbing = &metrics[0];
        assert_eq!(plumbing.name, "Plumbing");
        // (29 + 31) / 2
        assert_eq!(plumbing.average_duration_days, 30);
        // One of two instances at 100%.
        assert_eq!(plumbing.completion_rate, 50);
        // One past its end date below 100%.
        assert_eq!(plumbing.delay_rate, 50);
    }

    #[tokio::test]
    async fn test_team_performance() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = portfolio_fixture(&store);
        let service = AnalyticsService::new(store);

        let metrics = service.team_performance(company_id).await.unwrap();

        // The inactive team is not reported.
        assert_eq!(metrics.len(), 1);
        let team = &metrics[0];
        assert_eq!(team.name, "Alpha Crew");
        // 1 of 3 assignments done.
        assert_eq!(team.efficiency, 33);
        assert_eq!(team.completed_assignments, 1);
        // Assignments in two projects, only one of them active.
        assert_eq!(team.active_projects, 1);
    }

    #[tokio::test]
    async fn test_budget_analysis_savings() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = portfolio_fixture(&store);
        let service = AnalyticsService::new(store);

        let budget = service.budget_analysis(company_id).await.unwrap();

        assert_eq!(budget.total_budget, dec!(60000));
        assert_eq!(budget.total_paid, dec!(30000));
        // Average progress 40% of 60000.
        assert_eq!(budget.projected_spend, dec!(24000));
        assert_eq!(budget.savings, dec!(36000));
        assert_eq!(budget.overrun, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_risk_factors_wiring() {
        let store = Arc::new(MemoryHierarchyStore::new());
        let company_id = portfolio_fixture(&store);
        let service = AnalyticsService::new(store);

        let risks = service.risk_factors(company_id).await.unwrap();

        // One delayed assignment plus the two standing advisories.
        let factors: Vec<&str> = risks.iter().map(|r| r.factor.as_str()).collect();
        assert_eq!(
            factors,
            vec!["Weather Delays", "Material Shortage", "Quality Issues"]
        );
    }

    #[tokio::test]
    async fn test_unreadable_subtree_is_skipped() {
        let mut store = MockHierarchyStore::new();

        let p1 = Project {
            id: 1,
            ..project(
                1,
                date(2025, 1, 1),
                date(2025, 6, 30),
                None,
                ProjectStatus::Active,
                80,
            )
        };
        let p2 = Project {
            id: 2,
            ..project(
                1,
                date(2025, 1, 1),
                date(2025, 6, 30),
                None,
                ProjectStatus::Active,
                20,
            )
        };
        store
            .expect_projects_for_company()
            .returning(move |_| Ok(vec![p1.clone(), p2.clone()]));
        store.expect_units_of().returning(|project_id| {
            if project_id == 1 {
                Ok(vec![Unit {
                    id: 10,
                    project_id: 1,
                    name: "U".into(),
                    unit_type: UnitType::Villa,
                    floor: None,
                    progress_percentage: 80,
                }])
            } else {
                Err(StoreError::Backend("connection reset".into()))
            }
        });
        store.expect_categories_of().returning(|_| {
            Ok(vec![Category {
                id: 20,
                unit_id: 10,
                name: "Electrical".into(),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 3, 31),
                order_sequence: 1,
                progress_percentage: 100,
            }])
        });
        store.expect_assignments_of().returning(|_| Ok(vec![]));
        store.expect_teams_for_company().returning(|_| Ok(vec![]));
        store
            .expect_total_paid()
            .returning(|_| Ok(Decimal::ZERO));

        let service = AnalyticsService::new(Arc::new(store));

        // The readable project's categories are reported.
        let metrics = service
            .category_analysis_as_of(1, date(2025, 7, 1))
            .await
            .unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "Electrical");

        // Both projects still count toward the portfolio average.
        let summary = service.summary(1).await.unwrap();
        assert_eq!(summary.average_progress, 50);
    }
}
