//! PostgreSQL-backed `AssignmentRepository` implementation using Diesel ORM.
//!
//! `list_for_engineer` returns the engineer's full assignment set; the
//! overlap filter belongs to the capacity evaluator, not to the query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AssignmentPatch, AssignmentPersistenceError, AssignmentRepository};
use crate::domain::{
    AllocationPercentage, Assignment, AssignmentDraft, DateWindow, UserId,
};

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{AssignmentChanges, AssignmentRow, NewAssignmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::assignments;

/// Diesel-backed implementation of the assignment repository port.
#[derive(Clone)]
pub struct DieselAssignmentRepository {
    pool: DbPool,
}

impl DieselAssignmentRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AssignmentPersistenceError {
    map_pool_error(error, AssignmentPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AssignmentPersistenceError {
    map_diesel_error(
        error,
        AssignmentPersistenceError::query,
        AssignmentPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain assignment.
fn row_to_assignment(row: AssignmentRow) -> Result<Assignment, AssignmentPersistenceError> {
    let AssignmentRow {
        id,
        engineer_id,
        project_id,
        allocation_percentage,
        start_date,
        end_date,
        role,
    } = row;

    let allocation = AllocationPercentage::new(allocation_percentage)
        .map_err(|err| AssignmentPersistenceError::query(err.to_string()))?;
    let window = DateWindow::new(start_date, end_date)
        .map_err(|err| AssignmentPersistenceError::query(err.to_string()))?;

    Assignment::new(AssignmentDraft {
        id,
        engineer_id: UserId::from_uuid(engineer_id),
        project_id,
        allocation,
        window,
        role,
    })
    .map_err(|err| AssignmentPersistenceError::query(err.to_string()))
}

fn new_row(assignment: &Assignment) -> NewAssignmentRow {
    NewAssignmentRow {
        id: assignment.id(),
        engineer_id: *assignment.engineer_id().as_uuid(),
        project_id: assignment.project_id(),
        allocation_percentage: assignment.allocation().get(),
        start_date: assignment.window().start(),
        end_date: assignment.window().end(),
        role: assignment.role().to_owned(),
    }
}

fn changes(patch: &AssignmentPatch) -> AssignmentChanges {
    AssignmentChanges {
        allocation_percentage: patch.allocation.get(),
        start_date: patch.window.start(),
        end_date: patch.window.end(),
        role: patch.role.clone(),
    }
}

#[async_trait]
impl AssignmentRepository for DieselAssignmentRepository {
    async fn insert(&self, assignment: &Assignment) -> Result<(), AssignmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(assignments::table)
            .values(new_row(assignment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list_all(&self) -> Result<Vec<Assignment>, AssignmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<AssignmentRow> = assignments::table
            .order(assignments::start_date.asc())
            .select(AssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_assignment).collect()
    }

    async fn list_for_engineer(
        &self,
        engineer_id: &UserId,
    ) -> Result<Vec<Assignment>, AssignmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<AssignmentRow> = assignments::table
            .filter(assignments::engineer_id.eq(engineer_id.as_uuid()))
            .order(assignments::start_date.asc())
            .select(AssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_assignment).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, AssignmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(assignments::table.filter(assignments::id.eq(id)))
            .set(changes(patch))
            .returning(AssignmentRow::as_returning())
            .get_result::<AssignmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_assignment).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AssignmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let affected = diesel::delete(assignments::table.filter(assignments::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(affected > 0)
    }
}
