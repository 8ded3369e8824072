//! User domain services.
//!
//! These services implement the user driving ports for directory reads,
//! point-in-time capacity snapshots, and self-service profile edits.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::capacity::CapacitySnapshot;
use crate::domain::error::Error;
use crate::domain::mapping::{map_assignment_persistence_error, map_user_persistence_error};
use crate::domain::ports::{
    AssignmentRepository, UserProfileCommand, UserRepository, UsersQuery,
};
use crate::domain::schedule::DateWindow;
use crate::domain::user::{EngineerProfileUpdate, User, UserId};

/// User service implementing query driving ports.
#[derive(Clone)]
pub struct UsersQueryService<U, A> {
    users: Arc<U>,
    assignments: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<U, A> UsersQueryService<U, A> {
    /// Create a new query service over user and assignment storage.
    ///
    /// The clock supplies "today" for point-in-time capacity snapshots so
    /// date-sensitive behaviour stays deterministic under test.
    pub fn new(users: Arc<U>, assignments: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            assignments,
            clock,
        }
    }
}

impl<U, A> UsersQueryService<U, A>
where
    U: UserRepository,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl<U, A> UsersQuery for UsersQueryService<U, A>
where
    U: UserRepository,
    A: AssignmentRepository,
{
    async fn list_engineers(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_engineers()
            .await
            .map_err(map_user_persistence_error)
    }

    async fn get_engineer(&self, id: &UserId) -> Result<User, Error> {
        self.find_user(id)
            .await?
            .ok_or_else(|| Error::not_found("Engineer not found"))
    }

    async fn get_profile(&self, id: &UserId) -> Result<User, Error> {
        self.find_user(id)
            .await?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn engineer_capacity(&self, id: &UserId) -> Result<CapacitySnapshot, Error> {
        let engineer = self.get_engineer(id).await?;
        let assignments = self
            .assignments
            .list_for_engineer(id)
            .await
            .map_err(map_assignment_persistence_error)?;

        let today = DateWindow::single_day(self.clock.utc().date_naive());
        Ok(CapacitySnapshot::compute(&engineer, &today, &assignments))
    }
}

/// User service implementing the profile command driving port.
#[derive(Clone)]
pub struct UserProfileCommandService<U> {
    users: Arc<U>,
}

impl<U> UserProfileCommandService<U> {
    /// Create a new command service over user storage.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserProfileCommand for UserProfileCommandService<U>
where
    U: UserRepository,
{
    async fn update_profile(
        &self,
        id: &UserId,
        update: EngineerProfileUpdate,
    ) -> Result<User, Error> {
        update
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.users
            .update_profile(id, &update)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("Engineer not found"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for user reads, capacity snapshots, and error
    //! mapping.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::UserPersistenceError;
    use crate::domain::test_support::{
        StubAssignmentRepository, StubUserRepository, assignment_for, clock_at,
        engineer_with_capacity, manager,
    };
    use crate::domain::user::{MaxCapacity, Seniority};

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).expect("valid test date")
    }

    fn service(
        users: StubUserRepository,
        assignments: StubAssignmentRepository,
        today: NaiveDate,
    ) -> UsersQueryService<StubUserRepository, StubAssignmentRepository> {
        UsersQueryService::new(Arc::new(users), Arc::new(assignments), clock_at(today))
    }

    #[tokio::test]
    async fn list_engineers_excludes_managers() {
        let engineer = engineer_with_capacity(100);
        let subject = service(
            StubUserRepository::with_users(vec![engineer.clone(), manager()]),
            StubAssignmentRepository::default(),
            date(5, 1),
        );

        let engineers = subject.list_engineers().await.expect("listing succeeds");
        assert_eq!(engineers, vec![engineer]);
    }

    #[tokio::test]
    async fn capacity_counts_only_assignments_containing_today() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let assignments = vec![
            assignment_for(id, 40, date(5, 1), date(5, 31)),
            assignment_for(id, 30, date(6, 1), date(6, 30)),
        ];

        let subject = service(
            StubUserRepository::with_users(vec![engineer]),
            StubAssignmentRepository::with_assignments(assignments),
            date(5, 15),
        );

        let snapshot = subject
            .engineer_capacity(&id)
            .await
            .expect("snapshot succeeds");
        assert_eq!(snapshot.allocated, 40);
        assert_eq!(snapshot.available, 60);
    }

    #[tokio::test]
    async fn capacity_with_no_assignments_reports_full_availability() {
        let engineer = engineer_with_capacity(50);
        let id = *engineer.id();
        let subject = service(
            StubUserRepository::with_users(vec![engineer]),
            StubAssignmentRepository::default(),
            date(5, 1),
        );

        let snapshot = subject
            .engineer_capacity(&id)
            .await
            .expect("snapshot succeeds");
        assert_eq!(snapshot.allocated, 0);
        assert_eq!(snapshot.available, 50);
    }

    #[tokio::test]
    async fn capacity_for_unknown_engineer_is_not_found() {
        let subject = service(
            StubUserRepository::default(),
            StubAssignmentRepository::default(),
            date(5, 1),
        );

        let err = subject
            .engineer_capacity(&UserId::random())
            .await
            .expect_err("unknown engineer fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Engineer not found");
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn persistence_failures_map_to_domain_errors(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let subject = service(
            StubUserRepository::failing(failure),
            StubAssignmentRepository::default(),
            date(5, 1),
        );

        let err = subject
            .list_engineers()
            .await
            .expect_err("failure propagates");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn update_profile_replaces_fields() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let users = Arc::new(StubUserRepository::with_users(vec![engineer]));
        let subject = UserProfileCommandService::new(users);

        let updated = subject
            .update_profile(
                &id,
                EngineerProfileUpdate {
                    name: "Margaret H. Hamilton".to_owned(),
                    skills: vec!["apollo".to_owned()],
                    seniority: Some(Seniority::Senior),
                    max_capacity: MaxCapacity::new(50).expect("valid capacity"),
                    department: "Flight Software".to_owned(),
                },
            )
            .await
            .expect("update succeeds");

        assert_eq!(updated.name(), "Margaret H. Hamilton");
        assert_eq!(updated.max_capacity().get(), 50);
    }

    #[tokio::test]
    async fn update_profile_rejects_blank_name() {
        let subject = UserProfileCommandService::new(Arc::new(StubUserRepository::default()));

        let err = subject
            .update_profile(
                &UserId::random(),
                EngineerProfileUpdate {
                    name: "  ".to_owned(),
                    skills: Vec::new(),
                    seniority: None,
                    max_capacity: MaxCapacity::full_time(),
                    department: String::new(),
                },
            )
            .await
            .expect_err("blank name fails");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_profile_for_unknown_engineer_is_not_found() {
        let subject = UserProfileCommandService::new(Arc::new(StubUserRepository::default()));

        let err = subject
            .update_profile(
                &UserId::random(),
                EngineerProfileUpdate {
                    name: "Someone".to_owned(),
                    skills: Vec::new(),
                    seniority: None,
                    max_capacity: MaxCapacity::full_time(),
                    department: String::new(),
                },
            )
            .await
            .expect_err("unknown engineer fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
