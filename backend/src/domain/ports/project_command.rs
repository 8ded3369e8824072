//! Driving port for project mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::schedule::DateWindow;
use crate::domain::user::UserId;

/// Request payload for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    /// Project name; must not be blank.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Delivery window.
    pub window: DateWindow,
    /// Advisory skill labels.
    pub required_skills: Vec<String>,
    /// Intended head count.
    pub team_size: i32,
    /// Initial lifecycle label.
    pub status: ProjectStatus,
    /// Owning manager, taken from the authenticated session.
    pub manager_id: UserId,
}

/// Request payload for replacing a project's mutable fields.
#[derive(Debug, Clone)]
pub struct UpdateProjectRequest {
    /// Replacement name.
    pub name: String,
    /// Replacement description.
    pub description: String,
    /// Replacement delivery window.
    pub window: DateWindow,
    /// Replacement advisory skill labels.
    pub required_skills: Vec<String>,
    /// Replacement head count.
    pub team_size: i32,
    /// Replacement lifecycle label.
    pub status: ProjectStatus,
}

/// Domain use-case port for project mutations.
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Validate and persist a new project.
    async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, Error>;

    /// Replace a project's mutable fields; the owning manager is immutable.
    async fn update_project(
        &self,
        id: Uuid,
        request: UpdateProjectRequest,
    ) -> Result<Project, Error>;
}
