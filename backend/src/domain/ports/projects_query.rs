//! Driving port for project read use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::project::Project;

/// Domain use-case port for project reads.
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// List every project.
    async fn list_projects(&self) -> Result<Vec<Project>, Error>;

    /// Fetch one project; fails with a not-found error when absent.
    async fn get_project(&self, id: Uuid) -> Result<Project, Error>;
}
