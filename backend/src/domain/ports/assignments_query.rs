//! Driving port for assignment read use-cases.

use async_trait::async_trait;

use crate::domain::assignment::Assignment;
use crate::domain::error::Error;
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::schedule::{AssignmentPhase, DateWindow};
use crate::domain::user::{EmailAddress, User, UserId};
use uuid::Uuid;

/// Condensed project fields embedded in assignment listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Delivery window.
    pub window: DateWindow,
    /// Lifecycle label.
    pub status: ProjectStatus,
    /// Advisory skill labels.
    pub required_skills: Vec<String>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().to_owned(),
            window: *project.window(),
            status: project.status(),
            required_skills: project.required_skills().to_vec(),
        }
    }
}

/// Condensed engineer fields embedded in assignment listings.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineerSummary {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: EmailAddress,
}

impl From<&User> for EngineerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            name: user.name().to_owned(),
            email: user.email().clone(),
        }
    }
}

/// One assignment joined with its collaborators and the derived phase.
///
/// `project` or `engineer` may be absent when the referenced record has been
/// removed; listings still show the dangling assignment rather than hiding
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentOverview {
    /// The assignment record.
    pub assignment: Assignment,
    /// View-only classification against "today".
    pub phase: AssignmentPhase,
    /// Condensed target project, when it still exists.
    pub project: Option<ProjectSummary>,
    /// Condensed assigned engineer, when the account still exists.
    pub engineer: Option<EngineerSummary>,
}

/// Domain use-case port for assignment reads.
#[async_trait]
pub trait AssignmentsQuery: Send + Sync {
    /// List assignments, optionally restricted to one engineer, each joined
    /// with project/engineer summaries and classified against "today".
    async fn list_assignments(
        &self,
        engineer_id: Option<&UserId>,
    ) -> Result<Vec<AssignmentOverview>, Error>;
}
