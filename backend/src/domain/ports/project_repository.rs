//! Port abstraction for project persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::project::{Project, ProjectStatus};
use crate::domain::schedule::DateWindow;

/// Persistence errors raised by project repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectPersistenceError {
    /// Repository connection could not be established.
    #[error("project repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("project repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl ProjectPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Replacement values applied to a stored project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPatch {
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

/// Driven port for project storage.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project record.
    async fn insert(&self, project: &Project) -> Result<(), ProjectPersistenceError>;

    /// Fetch every project.
    async fn list(&self) -> Result<Vec<Project>, ProjectPersistenceError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectPersistenceError>;

    /// Apply replacement values and return the updated record, or `None`
    /// when the project does not exist.
    async fn update(
        &self,
        id: Uuid,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, ProjectPersistenceError>;
}
