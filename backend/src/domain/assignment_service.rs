//! Assignment domain services.
//!
//! The command service is the write path guarded by admission control: it
//! resolves the engineer, fetches that engineer's existing assignments, and
//! lets the capacity core accept or reject the proposal before anything is
//! persisted. There is no transaction around the read-then-write sequence;
//! see [`crate::domain::capacity`] for why that race stays open.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::assignment::{AllocationPercentage, Assignment, AssignmentDraft};
use crate::domain::capacity::{AdmissionError, admit_assignment};
use crate::domain::error::Error;
use crate::domain::mapping::{
    map_assignment_persistence_error, map_project_persistence_error, map_user_persistence_error,
};
use crate::domain::ports::{
    AssignmentCommand, AssignmentOverview, AssignmentPatch, AssignmentRepository,
    AssignmentsQuery, CreateAssignmentRequest, EngineerSummary, ProjectRepository, ProjectSummary,
    UpdateAssignmentRequest, UserRepository,
};
use crate::domain::schedule::AssignmentPhase;
use crate::domain::user::UserId;

fn map_admission_error(error: AdmissionError) -> Error {
    match error {
        AdmissionError::EngineerNotFound => Error::not_found(error.to_string()),
        AdmissionError::CapacityExceeded { available } => {
            Error::invalid_request(error.to_string()).with_details(json!({
                "available": available,
                "code": "capacity_exceeded",
            }))
        }
    }
}

/// Assignment service implementing the command driving port.
#[derive(Clone)]
pub struct AssignmentCommandService<U, A> {
    users: Arc<U>,
    assignments: Arc<A>,
}

impl<U, A> AssignmentCommandService<U, A> {
    /// Create a new command service over user and assignment storage.
    pub fn new(users: Arc<U>, assignments: Arc<A>) -> Self {
        Self { users, assignments }
    }
}

#[async_trait]
impl<U, A> AssignmentCommand for AssignmentCommandService<U, A>
where
    U: UserRepository,
    A: AssignmentRepository,
{
    async fn create_assignment(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<Assignment, Error> {
        let engineer = self
            .users
            .find_by_id(&request.engineer_id)
            .await
            .map_err(map_user_persistence_error)?;

        let existing = self
            .assignments
            .list_for_engineer(&request.engineer_id)
            .await
            .map_err(map_assignment_persistence_error)?;

        admit_assignment(
            engineer.as_ref(),
            request.allocation_percentage,
            &request.window,
            &existing,
        )
        .map_err(map_admission_error)?;

        let allocation = AllocationPercentage::new(request.allocation_percentage).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "allocationPercentage",
                "value": request.allocation_percentage,
                "code": "allocation_out_of_range",
            }))
        })?;

        // Admitted: persist the proposal exactly as submitted.
        let assignment = Assignment::new(AssignmentDraft {
            id: Uuid::new_v4(),
            engineer_id: request.engineer_id,
            project_id: request.project_id,
            allocation,
            window: request.window,
            role: request.role,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.assignments
            .insert(&assignment)
            .await
            .map_err(map_assignment_persistence_error)?;

        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        id: Uuid,
        request: UpdateAssignmentRequest,
    ) -> Result<Assignment, Error> {
        if request.role.trim().is_empty() {
            return Err(Error::invalid_request("assignment role must not be empty"));
        }

        let patch = AssignmentPatch {
            allocation: request.allocation,
            window: request.window,
            role: request.role,
        };

        self.assignments
            .update(id, &patch)
            .await
            .map_err(map_assignment_persistence_error)?
            .ok_or_else(|| Error::not_found("Assignment not found"))
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<(), Error> {
        let deleted = self
            .assignments
            .delete(id)
            .await
            .map_err(map_assignment_persistence_error)?;

        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("Assignment not found"))
        }
    }
}

/// Assignment service implementing the query driving port.
#[derive(Clone)]
pub struct AssignmentsQueryService<A, P, U> {
    assignments: Arc<A>,
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<A, P, U> AssignmentsQueryService<A, P, U> {
    /// Create a new query service joining assignments with their
    /// collaborators.
    pub fn new(assignments: Arc<A>, projects: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            assignments,
            projects,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<A, P, U> AssignmentsQuery for AssignmentsQueryService<A, P, U>
where
    A: AssignmentRepository,
    P: ProjectRepository,
    U: UserRepository,
{
    async fn list_assignments(
        &self,
        engineer_id: Option<&UserId>,
    ) -> Result<Vec<AssignmentOverview>, Error> {
        let assignments = match engineer_id {
            Some(id) => self.assignments.list_for_engineer(id).await,
            None => self.assignments.list_all().await,
        }
        .map_err(map_assignment_persistence_error)?;

        // One org's projects and engineers fit comfortably in memory, so a
        // single fetch of each beats a lookup per assignment.
        let projects = self
            .projects
            .list()
            .await
            .map_err(map_project_persistence_error)?;
        let engineers = self
            .users
            .list_engineers()
            .await
            .map_err(map_user_persistence_error)?;

        let today = self.clock.utc().date_naive();
        let overviews = assignments
            .into_iter()
            .map(|assignment| {
                let project = projects
                    .iter()
                    .find(|project| project.id() == assignment.project_id())
                    .map(ProjectSummary::from);
                let engineer = engineers
                    .iter()
                    .find(|user| user.id() == assignment.engineer_id())
                    .map(EngineerSummary::from);
                let phase = AssignmentPhase::classify(today, assignment.window());
                AssignmentOverview {
                    assignment,
                    phase,
                    project,
                    engineer,
                }
            })
            .collect();

        Ok(overviews)
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour coverage for admission control wiring and listing joins.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::AssignmentPersistenceError;
    use crate::domain::schedule::DateWindow;
    use crate::domain::test_support::{
        StubAssignmentRepository, StubProjectRepository, StubUserRepository, assignment_for,
        clock_at, engineer_with_capacity, manager, project_owned_by,
    };

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).expect("valid test date")
    }

    fn window(start: NaiveDate, end: NaiveDate) -> DateWindow {
        DateWindow::new(start, end).expect("valid window")
    }

    fn allocation(value: i32) -> AllocationPercentage {
        AllocationPercentage::new(value).expect("valid allocation")
    }

    fn create_request(engineer_id: UserId, value: i32) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            engineer_id,
            project_id: Uuid::new_v4(),
            allocation_percentage: value,
            window: window(date(7, 1), date(7, 31)),
            role: "Developer".to_owned(),
        }
    }

    #[tokio::test]
    async fn admitted_assignment_is_persisted_unchanged() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let users = Arc::new(StubUserRepository::with_users(vec![engineer]));
        let assignments = Arc::new(StubAssignmentRepository::default());
        let service = AssignmentCommandService::new(users, assignments.clone());

        let created = service
            .create_assignment(create_request(id, 60))
            .await
            .expect("admission succeeds");

        assert_eq!(created.allocation().get(), 60);
        assert_eq!(assignments.stored(), vec![created]);
    }

    #[tokio::test]
    async fn over_commitment_is_rejected_with_headroom_message() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let existing = assignment_for(id, 60, date(7, 1), date(7, 20));
        let users = Arc::new(StubUserRepository::with_users(vec![engineer]));
        let assignments = Arc::new(StubAssignmentRepository::with_assignments(vec![existing]));
        let service = AssignmentCommandService::new(users, assignments.clone());

        let err = service
            .create_assignment(create_request(id, 50))
            .await
            .expect_err("over-commitment fails");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Engineer only has 40% capacity left.");
        assert_eq!(
            err.details().and_then(|d| d.get("available")).cloned(),
            Some(serde_json::json!(40))
        );
        // Nothing beyond the pre-existing assignment was written.
        assert_eq!(assignments.stored().len(), 1);
    }

    #[tokio::test]
    async fn oversized_request_reports_full_headroom() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let users = Arc::new(StubUserRepository::with_users(vec![engineer]));
        let service =
            AssignmentCommandService::new(users, Arc::new(StubAssignmentRepository::default()));

        let err = service
            .create_assignment(create_request(id, 101))
            .await
            .expect_err("101% never fits");

        assert_eq!(err.message(), "Engineer only has 100% capacity left.");
    }

    #[tokio::test]
    async fn exact_headroom_is_admitted() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let existing = assignment_for(id, 60, date(7, 1), date(7, 20));
        let users = Arc::new(StubUserRepository::with_users(vec![engineer]));
        let assignments = Arc::new(StubAssignmentRepository::with_assignments(vec![existing]));
        let service = AssignmentCommandService::new(users, assignments);

        service
            .create_assignment(create_request(id, 40))
            .await
            .expect("exact headroom is admitted");
    }

    #[tokio::test]
    async fn unknown_engineer_is_rejected_before_persistence() {
        let users = Arc::new(StubUserRepository::default());
        let assignments = Arc::new(StubAssignmentRepository::default());
        let service = AssignmentCommandService::new(users, assignments.clone());

        let err = service
            .create_assignment(create_request(UserId::random(), 10))
            .await
            .expect_err("unknown engineer fails");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Engineer not found");
        assert!(assignments.stored().is_empty());
    }

    #[tokio::test]
    async fn update_bypasses_admission_control() {
        let engineer = engineer_with_capacity(100);
        let id = *engineer.id();
        let existing = assignment_for(id, 60, date(7, 1), date(7, 31));
        let existing_id = existing.id();
        let users = Arc::new(StubUserRepository::with_users(vec![engineer]));
        let assignments = Arc::new(StubAssignmentRepository::with_assignments(vec![existing]));
        let service = AssignmentCommandService::new(users, assignments);

        // 100% on top of nothing else would still pass admission, but an
        // edit is applied without any capacity check at all.
        let updated = service
            .update_assignment(
                existing_id,
                UpdateAssignmentRequest {
                    allocation: allocation(100),
                    window: window(date(7, 1), date(7, 31)),
                    role: "Tech Lead".to_owned(),
                },
            )
            .await
            .expect("update succeeds without re-validation");

        assert_eq!(updated.allocation().get(), 100);
        assert_eq!(updated.role(), "Tech Lead");
    }

    #[tokio::test]
    async fn delete_reports_missing_assignment() {
        let service = AssignmentCommandService::new(
            Arc::new(StubUserRepository::default()),
            Arc::new(StubAssignmentRepository::default()),
        );

        let err = service
            .delete_assignment(Uuid::new_v4())
            .await
            .expect_err("missing assignment fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_joins_collaborators_and_classifies_phase() {
        let engineer = engineer_with_capacity(100);
        let engineer_id = *engineer.id();
        let owner = manager();
        let project = project_owned_by(*owner.id(), "Billing revamp");

        let mut current = assignment_for(engineer_id, 50, date(5, 1), date(5, 31));
        // Rebind the fixture to the known project so the join resolves.
        current = Assignment::new(AssignmentDraft {
            id: current.id(),
            engineer_id,
            project_id: project.id(),
            allocation: current.allocation(),
            window: *current.window(),
            role: current.role().to_owned(),
        })
        .expect("valid assignment");
        let upcoming = assignment_for(engineer_id, 20, date(6, 10), date(6, 20));

        let service = AssignmentsQueryService::new(
            Arc::new(StubAssignmentRepository::with_assignments(vec![
                current.clone(),
                upcoming.clone(),
            ])),
            Arc::new(StubProjectRepository::with_projects(vec![project.clone()])),
            Arc::new(StubUserRepository::with_users(vec![engineer])),
            clock_at(date(5, 15)),
        );

        let overviews = service
            .list_assignments(Some(&engineer_id))
            .await
            .expect("listing succeeds");

        assert_eq!(overviews.len(), 2);
        let first = overviews
            .iter()
            .find(|o| o.assignment.id() == current.id())
            .expect("joined overview present");
        assert_eq!(first.phase, AssignmentPhase::Current);
        assert_eq!(
            first.project.as_ref().map(|p| p.name.as_str()),
            Some("Billing revamp")
        );
        assert_eq!(
            first.engineer.as_ref().map(|e| e.name.as_str()),
            Some("Margaret Hamilton")
        );

        let second = overviews
            .iter()
            .find(|o| o.assignment.id() == upcoming.id())
            .expect("dangling overview present");
        assert_eq!(second.phase, AssignmentPhase::Upcoming);
        // Its project was never stored; the listing keeps the assignment.
        assert!(second.project.is_none());
    }

    #[rstest]
    #[case(AssignmentPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(AssignmentPersistenceError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn listing_maps_persistence_failures(
        #[case] failure: AssignmentPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let service = AssignmentsQueryService::new(
            Arc::new(StubAssignmentRepository::failing(failure)),
            Arc::new(StubProjectRepository::default()),
            Arc::new(StubUserRepository::default()),
            clock_at(date(5, 1)),
        );

        let err = service
            .list_assignments(None)
            .await
            .expect_err("failure propagates");
        assert_eq!(err.code(), expected);
    }
}
