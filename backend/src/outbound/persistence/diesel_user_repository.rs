//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Reads go through the validated domain constructors so corrupt rows
//! surface as query errors instead of leaking invalid accounts into the
//! core.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, EngineerProfileUpdate, MaxCapacity, Role, Seniority, User, UserDraft, UserId,
};

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::{UserProfileChanges, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain user.
pub(super) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        role,
        skills,
        seniority,
        max_capacity,
        department,
    } = row;

    let email =
        EmailAddress::new(email).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let role = role
        .parse::<Role>()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let seniority = seniority
        .map(|raw| raw.parse::<Seniority>())
        .transpose()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let max_capacity = MaxCapacity::new(max_capacity)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;

    User::new(UserDraft {
        id: UserId::from_uuid(id),
        name,
        email,
        role,
        skills,
        seniority,
        max_capacity,
        department,
    })
    .map_err(|err| UserPersistenceError::query(err.to_string()))
}

fn profile_changes(update: &EngineerProfileUpdate) -> UserProfileChanges {
    UserProfileChanges {
        name: update.name.clone(),
        skills: update.skills.clone(),
        seniority: update.seniority.map(|s| s.as_str().to_owned()),
        max_capacity: update.max_capacity.get(),
        department: update.department.clone(),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_engineers(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::role.eq(Role::Engineer.as_str()))
            .order(users::name.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_user).transpose()
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &EngineerProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(profile_changes(update))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_user).transpose()
    }
}
