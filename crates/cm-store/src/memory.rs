//! In-memory hierarchy store
//!
//! Backs tests and embedded deployments. Ids are assigned from a single
//! monotonic counter, so creation order is id order.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use cm_core::types::{Id, Level};
use cm_models::{Assignment, Category, Project, Team, Unit};
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::store::{HierarchyStore, StoreError, StoreResult};

/// In-memory implementation of [`HierarchyStore`]
pub struct MemoryHierarchyStore {
    projects: DashMap<Id, Project>,
    units: DashMap<Id, Unit>,
    categories: DashMap<Id, Category>,
    assignments: DashMap<Id, Assignment>,
    teams: DashMap<Id, Team>,
    /// company_id -> accumulated PAID payment total
    paid: DashMap<Id, Decimal>,
    next_id: AtomicI64,
}

impl Default for MemoryHierarchyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHierarchyStore {
    pub fn new() -> Self {
        Self {
            projects: DashMap::new(),
            units: DashMap::new(),
            categories: DashMap::new(),
            assignments: DashMap::new(),
            teams: DashMap::new(),
            paid: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn alloc_id(&self) -> Id {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Insert a project, assigning its id. Returns the stored copy.
    pub fn add_project(&self, mut project: Project) -> Project {
        project.id = self.alloc_id();
        self.projects.insert(project.id, project.clone());
        project
    }

    /// Insert a unit, assigning its id. Returns the stored copy.
    pub fn add_unit(&self, mut unit: Unit) -> Unit {
        unit.id = self.alloc_id();
        self.units.insert(unit.id, unit.clone());
        unit
    }

    /// Insert a category, assigning its id. Returns the stored copy.
    pub fn add_category(&self, mut category: Category) -> Category {
        category.id = self.alloc_id();
        self.categories.insert(category.id, category.clone());
        category
    }

    /// Insert an assignment, assigning its id. Returns the stored copy.
    pub fn add_assignment(&self, mut assignment: Assignment) -> Assignment {
        assignment.id = self.alloc_id();
        self.assignments.insert(assignment.id, assignment.clone());
        assignment
    }

    /// Insert a team, assigning its id. Returns the stored copy.
    pub fn add_team(&self, mut team: Team) -> Team {
        team.id = self.alloc_id();
        self.teams.insert(team.id, team.clone());
        team
    }

    /// Accumulate a PAID payment for a company
    pub fn record_paid(&self, company_id: Id, amount: Decimal) {
        *self.paid.entry(company_id).or_insert(Decimal::ZERO) += amount;
    }
}

#[async_trait]
impl HierarchyStore for MemoryHierarchyStore {
    async fn project(&self, id: Id) -> StoreResult<Project> {
        self.projects
            .get(&id)
            .map(|p| p.clone())
            .ok_or_else(|| StoreError::not_found(Level::Project, id))
    }

    async fn unit(&self, id: Id) -> StoreResult<Unit> {
        self.units
            .get(&id)
            .map(|u| u.clone())
            .ok_or_else(|| StoreError::not_found(Level::Unit, id))
    }

    async fn category(&self, id: Id) -> StoreResult<Category> {
        self.categories
            .get(&id)
            .map(|c| c.clone())
            .ok_or_else(|| StoreError::not_found(Level::Category, id))
    }

    async fn assignment(&self, id: Id) -> StoreResult<Assignment> {
        self.assignments
            .get(&id)
            .map(|a| a.clone())
            .ok_or_else(|| StoreError::not_found(Level::Assignment, id))
    }

    async fn units_of(&self, project_id: Id) -> StoreResult<Vec<Unit>> {
        let mut units: Vec<Unit> = self
            .units
            .iter()
            .filter(|u| u.project_id == project_id)
            .map(|u| u.clone())
            .collect();
        units.sort_by_key(|u| u.id);
        Ok(units)
    }

    async fn categories_of(&self, unit_id: Id) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| c.unit_id == unit_id)
            .map(|c| c.clone())
            .collect();
        categories.sort_by_key(|c| (c.order_sequence, c.id));
        Ok(categories)
    }

    async fn assignments_of(&self, category_id: Id) -> StoreResult<Vec<Assignment>> {
        let mut assignments: Vec<Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.category_id == category_id)
            .map(|a| a.clone())
            .collect();
        assignments.sort_by_key(|a| a.id);
        Ok(assignments)
    }

    async fn save_progress(&self, level: Level, id: Id, percentage: i32) -> StoreResult<()> {
        match level {
            Level::Project => {
                let mut project = self
                    .projects
                    .get_mut(&id)
                    .ok_or_else(|| StoreError::not_found(level, id))?;
                project.progress_percentage = percentage;
            }
            Level::Unit => {
                let mut unit = self
                    .units
                    .get_mut(&id)
                    .ok_or_else(|| StoreError::not_found(level, id))?;
                unit.progress_percentage = percentage;
            }
            Level::Category => {
                let mut category = self
                    .categories
                    .get_mut(&id)
                    .ok_or_else(|| StoreError::not_found(level, id))?;
                category.progress_percentage = percentage;
            }
            Level::Assignment => {
                let mut assignment = self
                    .assignments
                    .get_mut(&id)
                    .ok_or_else(|| StoreError::not_found(level, id))?;
                assignment.progress_percentage = percentage;
            }
        }
        Ok(())
    }

    async fn projects_for_company(&self, company_id: Id) -> StoreResult<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .filter(|p| p.company_id == company_id)
            .map(|p| p.clone())
            .collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    async fn teams_for_company(&self, company_id: Id) -> StoreResult<Vec<Team>> {
        let mut teams: Vec<Team> = self
            .teams
            .iter()
            .filter(|t| t.company_id == company_id)
            .map(|t| t.clone())
            .collect();
        teams.sort_by_key(|t| t.id);
        Ok(teams)
    }

    async fn total_paid(&self, company_id: Id) -> StoreResult<Decimal> {
        Ok(self
            .paid
            .get(&company_id)
            .map(|amount| *amount)
            .unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cm_models::{AssignmentStatus, ProjectStatus, UnitType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_project(company_id: Id) -> Project {
        Project {
            id: 0,
            company_id,
            name: "Site".into(),
            location: None,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
            budget: Some(dec!(500000)),
            status: ProjectStatus::Active,
            progress_percentage: 0,
        }
    }

    #[tokio::test]
    async fn test_lookup_and_not_found() {
        let store = MemoryHierarchyStore::new();
        let project = store.add_project(sample_project(1));

        assert_eq!(store.project(project.id).await.unwrap().name, "Site");
        assert!(matches!(
            store.project(999).await,
            Err(StoreError::NotFound { entity: "Project", id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_categories_ordered_by_sequence() {
        let store = MemoryHierarchyStore::new();
        let project = store.add_project(sample_project(1));
        let unit = store.add_unit(Unit {
            id: 0,
            project_id: project.id,
            name: "Villa 1".into(),
            unit_type: UnitType::Villa,
            floor: None,
            progress_percentage: 0,
        });

        for (name, seq) in [("Finishing", 3), ("Foundation", 1), ("Plumbing", 2)] {
            store.add_category(Category {
                id: 0,
                unit_id: unit.id,
                name: name.into(),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 6, 30),
                order_sequence: seq,
                progress_percentage: 0,
            });
        }

        let names: Vec<String> = store
            .categories_of(unit.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Foundation", "Plumbing", "Finishing"]);
    }

    #[tokio::test]
    async fn test_save_progress_persists_single_field() {
        let store = MemoryHierarchyStore::new();
        let project = store.add_project(sample_project(1));

        store
            .save_progress(Level::Project, project.id, 45)
            .await
            .unwrap();

        let stored = store.project(project.id).await.unwrap();
        assert_eq!(stored.progress_percentage, 45);
        assert_eq!(stored.budget, Some(dec!(500000)));
    }

    #[tokio::test]
    async fn test_assignments_in_creation_order() {
        let store = MemoryHierarchyStore::new();
        let project = store.add_project(sample_project(1));
        let unit = store.add_unit(Unit {
            id: 0,
            project_id: project.id,
            name: "Block A".into(),
            unit_type: UnitType::Apartment,
            floor: None,
            progress_percentage: 0,
        });
        let category = store.add_category(Category {
            id: 0,
            unit_id: unit.id,
            name: "Electrical".into(),
            start_date: date(2025, 2, 1),
            end_date: date(2025, 4, 30),
            order_sequence: 1,
            progress_percentage: 0,
        });

        let first = store.add_assignment(Assignment {
            id: 0,
            category_id: category.id,
            team_id: 10,
            status: AssignmentStatus::InProgress,
            reception_status: false,
            payment_status: false,
            progress_percentage: 30,
        });
        let second = store.add_assignment(Assignment {
            id: 0,
            category_id: category.id,
            team_id: 11,
            status: AssignmentStatus::NotStarted,
            reception_status: false,
            payment_status: false,
            progress_percentage: 0,
        });

        let ids: Vec<Id> = store
            .assignments_of(category.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_total_paid_accumulates() {
        let store = MemoryHierarchyStore::new();
        assert_eq!(store.total_paid(1).await.unwrap(), Decimal::ZERO);

        store.record_paid(1, dec!(1200.50));
        store.record_paid(1, dec!(800));
        assert_eq!(store.total_paid(1).await.unwrap(), dec!(2000.50));
    }
}
