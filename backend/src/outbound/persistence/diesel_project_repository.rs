//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProjectPatch, ProjectPersistenceError, ProjectRepository};
use crate::domain::{DateWindow, Project, ProjectDraft, ProjectStatus, UserId};

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{NewProjectRow, ProjectChanges, ProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProjectPersistenceError {
    map_pool_error(error, ProjectPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ProjectPersistenceError {
    map_diesel_error(
        error,
        ProjectPersistenceError::query,
        ProjectPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain project.
fn row_to_project(row: ProjectRow) -> Result<Project, ProjectPersistenceError> {
    let ProjectRow {
        id,
        name,
        description,
        start_date,
        end_date,
        required_skills,
        team_size,
        status,
        manager_id,
    } = row;

    let window = DateWindow::new(start_date, end_date)
        .map_err(|err| ProjectPersistenceError::query(err.to_string()))?;
    let status = status
        .parse::<ProjectStatus>()
        .map_err(|err| ProjectPersistenceError::query(err.to_string()))?;

    Project::new(ProjectDraft {
        id,
        name,
        description,
        window,
        required_skills,
        team_size,
        status,
        manager_id: UserId::from_uuid(manager_id),
    })
    .map_err(|err| ProjectPersistenceError::query(err.to_string()))
}

fn new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        start_date: project.window().start(),
        end_date: project.window().end(),
        required_skills: project.required_skills().to_vec(),
        team_size: project.team_size(),
        status: project.status().as_str().to_owned(),
        manager_id: *project.manager_id().as_uuid(),
    }
}

fn changes(patch: &ProjectPatch) -> ProjectChanges {
    ProjectChanges {
        name: patch.name.clone(),
        description: patch.description.clone(),
        start_date: patch.window.start(),
        end_date: patch.window.end(),
        required_skills: patch.required_skills.clone(),
        team_size: patch.team_size,
        status: patch.status.as_str().to_owned(),
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(projects::table)
            .values(new_row(project))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list(&self) -> Result<Vec<Project>, ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ProjectRow> = projects::table
            .order(projects::created_at.asc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = projects::table
            .filter(projects::id.eq(id))
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_project).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, ProjectPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(projects::table.filter(projects::id.eq(id)))
            .set(changes(patch))
            .returning(ProjectRow::as_returning())
            .get_result::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_project).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion edge cases.

    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_row() -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            name: "Billing revamp".to_owned(),
            description: "Replace the invoicing pipeline".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30).expect("valid date"),
            required_skills: vec!["rust".to_owned()],
            team_size: 3,
            status: "active".to_owned(),
            manager_id: Uuid::new_v4(),
        }
    }

    #[rstest]
    fn converts_valid_row(valid_row: ProjectRow) {
        let project = row_to_project(valid_row).expect("valid row converts");
        assert_eq!(project.status(), ProjectStatus::Active);
    }

    #[rstest]
    fn rejects_unknown_status(mut valid_row: ProjectRow) {
        valid_row.status = "archived".to_owned();
        let err = row_to_project(valid_row).expect_err("unknown status fails");
        assert!(matches!(err, ProjectPersistenceError::Query { .. }));
    }

    #[rstest]
    fn rejects_inverted_window(mut valid_row: ProjectRow) {
        valid_row.end_date = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let err = row_to_project(valid_row).expect_err("inverted window fails");
        assert!(matches!(err, ProjectPersistenceError::Query { .. }));
    }
}
