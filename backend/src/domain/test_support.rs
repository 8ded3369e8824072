//! In-memory stubs and fixtures shared by domain service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::assignment::{AllocationPercentage, Assignment, AssignmentDraft};
use crate::domain::ports::{
    AssignmentPatch, AssignmentPersistenceError, AssignmentRepository, ProjectPatch,
    ProjectPersistenceError, ProjectRepository, UserPersistenceError, UserRepository,
};
use crate::domain::project::{Project, ProjectDraft, ProjectStatus};
use crate::domain::schedule::DateWindow;
use crate::domain::user::{
    EmailAddress, EngineerProfileUpdate, MaxCapacity, Role, Seniority, User, UserDraft, UserId,
};

/// Engineer fixture with the given capacity.
pub(crate) fn engineer_with_capacity(max_capacity: i32) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        name: "Margaret Hamilton".to_owned(),
        email: EmailAddress::new("margaret@example.com").expect("valid email"),
        role: Role::Engineer,
        skills: vec!["guidance".to_owned()],
        seniority: Some(Seniority::Senior),
        max_capacity: MaxCapacity::new(max_capacity).expect("valid capacity"),
        department: "Flight Software".to_owned(),
    })
    .expect("valid engineer")
}

/// Manager fixture.
pub(crate) fn manager() -> User {
    User::new(UserDraft {
        id: UserId::random(),
        name: "Pat Manager".to_owned(),
        email: EmailAddress::new("pat@example.com").expect("valid email"),
        role: Role::Manager,
        skills: Vec::new(),
        seniority: None,
        max_capacity: MaxCapacity::full_time(),
        department: "PMO".to_owned(),
    })
    .expect("valid manager")
}

/// Assignment fixture bound to an engineer.
pub(crate) fn assignment_for(
    engineer_id: UserId,
    allocation: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Assignment {
    Assignment::new(AssignmentDraft {
        id: Uuid::new_v4(),
        engineer_id,
        project_id: Uuid::new_v4(),
        allocation: AllocationPercentage::new(allocation).expect("valid allocation"),
        window: DateWindow::new(start, end).expect("valid window"),
        role: "Developer".to_owned(),
    })
    .expect("valid assignment")
}

/// Project fixture owned by the given manager.
pub(crate) fn project_owned_by(manager_id: UserId, name: &str) -> Project {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date");
    Project::new(ProjectDraft {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        description: "Fixture project".to_owned(),
        window: DateWindow::new(start, end).expect("valid window"),
        required_skills: vec!["rust".to_owned()],
        team_size: 2,
        status: ProjectStatus::Active,
        manager_id,
    })
    .expect("valid project")
}

/// In-memory [`UserRepository`] stub.
#[derive(Default)]
pub(crate) struct StubUserRepository {
    users: Mutex<Vec<User>>,
    failure: Option<UserPersistenceError>,
}

impl StubUserRepository {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            failure: None,
        }
    }

    pub(crate) fn failing(failure: UserPersistenceError) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    fn check_failure(&self) -> Result<(), UserPersistenceError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn list_engineers(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.check_failure()?;
        Ok(self
            .users
            .lock()
            .expect("state lock")
            .iter()
            .filter(|user| user.role() == Role::Engineer)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check_failure()?;
        Ok(self
            .users
            .lock()
            .expect("state lock")
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &EngineerProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.check_failure()?;
        let mut users = self.users.lock().expect("state lock");
        let Some(existing) = users.iter_mut().find(|user| user.id() == id) else {
            return Ok(None);
        };
        let updated = User::new(UserDraft {
            id: *existing.id(),
            name: update.name.clone(),
            email: existing.email().clone(),
            role: existing.role(),
            skills: update.skills.clone(),
            seniority: update.seniority,
            max_capacity: update.max_capacity,
            department: update.department.clone(),
        })
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        *existing = updated.clone();
        Ok(Some(updated))
    }
}

/// In-memory [`AssignmentRepository`] stub.
#[derive(Default)]
pub(crate) struct StubAssignmentRepository {
    assignments: Mutex<Vec<Assignment>>,
    failure: Option<AssignmentPersistenceError>,
}

impl StubAssignmentRepository {
    pub(crate) fn with_assignments(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments: Mutex::new(assignments),
            failure: None,
        }
    }

    pub(crate) fn failing(failure: AssignmentPersistenceError) -> Self {
        Self {
            assignments: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    pub(crate) fn stored(&self) -> Vec<Assignment> {
        self.assignments.lock().expect("state lock").clone()
    }

    fn check_failure(&self) -> Result<(), AssignmentPersistenceError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AssignmentRepository for StubAssignmentRepository {
    async fn insert(&self, assignment: &Assignment) -> Result<(), AssignmentPersistenceError> {
        self.check_failure()?;
        self.assignments
            .lock()
            .expect("state lock")
            .push(assignment.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Assignment>, AssignmentPersistenceError> {
        self.check_failure()?;
        Ok(self.assignments.lock().expect("state lock").clone())
    }

    async fn list_for_engineer(
        &self,
        engineer_id: &UserId,
    ) -> Result<Vec<Assignment>, AssignmentPersistenceError> {
        self.check_failure()?;
        Ok(self
            .assignments
            .lock()
            .expect("state lock")
            .iter()
            .filter(|assignment| assignment.engineer_id() == engineer_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, AssignmentPersistenceError> {
        self.check_failure()?;
        let mut assignments = self.assignments.lock().expect("state lock");
        let Some(existing) = assignments.iter_mut().find(|a| a.id() == id) else {
            return Ok(None);
        };
        let updated = Assignment::new(AssignmentDraft {
            id: existing.id(),
            engineer_id: *existing.engineer_id(),
            project_id: existing.project_id(),
            allocation: patch.allocation,
            window: patch.window,
            role: patch.role.clone(),
        })
        .map_err(|err| AssignmentPersistenceError::query(err.to_string()))?;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AssignmentPersistenceError> {
        self.check_failure()?;
        let mut assignments = self.assignments.lock().expect("state lock");
        let before = assignments.len();
        assignments.retain(|a| a.id() != id);
        Ok(assignments.len() < before)
    }
}

/// In-memory [`ProjectRepository`] stub.
#[derive(Default)]
pub(crate) struct StubProjectRepository {
    projects: Mutex<Vec<Project>>,
    failure: Option<ProjectPersistenceError>,
}

impl StubProjectRepository {
    pub(crate) fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            failure: None,
        }
    }

    pub(crate) fn failing(failure: ProjectPersistenceError) -> Self {
        Self {
            projects: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    pub(crate) fn stored(&self) -> Vec<Project> {
        self.projects.lock().expect("state lock").clone()
    }

    fn check_failure(&self) -> Result<(), ProjectPersistenceError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectRepository for StubProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectPersistenceError> {
        self.check_failure()?;
        self.projects
            .lock()
            .expect("state lock")
            .push(project.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Project>, ProjectPersistenceError> {
        self.check_failure()?;
        Ok(self.projects.lock().expect("state lock").clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectPersistenceError> {
        self.check_failure()?;
        Ok(self
            .projects
            .lock()
            .expect("state lock")
            .iter()
            .find(|project| project.id() == id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, ProjectPersistenceError> {
        self.check_failure()?;
        let mut projects = self.projects.lock().expect("state lock");
        let Some(existing) = projects.iter_mut().find(|p| p.id() == id) else {
            return Ok(None);
        };
        let updated = Project::new(ProjectDraft {
            id: existing.id(),
            name: patch.name.clone(),
            description: patch.description.clone(),
            window: patch.window,
            required_skills: patch.required_skills.clone(),
            team_size: patch.team_size,
            status: patch.status,
            manager_id: *existing.manager_id(),
        })
        .map_err(|err| ProjectPersistenceError::query(err.to_string()))?;
        *existing = updated.clone();
        Ok(Some(updated))
    }
}

/// Fixed-instant clock for date-sensitive assertions.
pub(crate) struct StubClock(DateTime<Utc>);

impl Clock for StubClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock pinned to noon UTC on the given day.
pub(crate) fn clock_at(date: NaiveDate) -> Arc<dyn Clock> {
    let instant = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"));
    Arc::new(StubClock(instant))
}
