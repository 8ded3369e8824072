//! Project data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schedule::{DateWindow, WindowValidationError};
use crate::domain::user::UserId;

/// Validation errors returned by the project constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    /// The project name was blank once trimmed.
    #[error("project name must not be empty")]
    EmptyName,
    /// The end date precedes the start date.
    #[error("project end date must not precede its start date")]
    EndsBeforeStart,
    /// The team size was zero or negative.
    #[error("team size must be at least 1")]
    TeamSizeNotPositive,
    /// The status label was not `planning`, `active`, or `completed`.
    #[error("status must be planning, active, or completed")]
    InvalidStatus,
}

impl From<WindowValidationError> for ProjectValidationError {
    fn from(value: WindowValidationError) -> Self {
        match value {
            WindowValidationError::EndsBeforeStart => Self::EndsBeforeStart,
        }
    }
}

/// Project lifecycle label, set by the owning manager and never derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Staffing and scoping underway.
    Planning,
    /// Work in progress.
    Active,
    /// Delivered or cancelled.
    Completed,
}

impl ProjectStatus {
    /// Stable lowercase label, as persisted and serialised.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planning
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ProjectValidationError::InvalidStatus),
        }
    }
}

/// Input payload for [`Project::new`].
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Project name; must not be blank.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Delivery window.
    pub window: DateWindow,
    /// Skills the staffing UI suggests filtering by; never enforced.
    pub required_skills: Vec<String>,
    /// Intended head count; must be positive.
    pub team_size: i32,
    /// Lifecycle label.
    pub status: ProjectStatus,
    /// Owning manager.
    pub manager_id: UserId,
}

/// A project owned by a manager.
///
/// ## Invariants
/// - `name` is non-blank.
/// - `team_size >= 1`.
/// - the delivery window satisfies `start <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    id: Uuid,
    name: String,
    description: String,
    window: DateWindow,
    required_skills: Vec<String>,
    team_size: i32,
    status: ProjectStatus,
    manager_id: UserId,
}

impl Project {
    /// Creates a validated project.
    pub fn new(draft: ProjectDraft) -> Result<Self, ProjectValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Delivery window.
    #[must_use]
    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    /// Advisory skill labels.
    #[must_use]
    pub fn required_skills(&self) -> &[String] {
        self.required_skills.as_slice()
    }

    /// Intended head count.
    #[must_use]
    pub fn team_size(&self) -> i32 {
        self.team_size
    }

    /// Lifecycle label.
    #[must_use]
    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Owning manager.
    #[must_use]
    pub fn manager_id(&self) -> &UserId {
        &self.manager_id
    }
}

impl TryFrom<ProjectDraft> for Project {
    type Error = ProjectValidationError;

    fn try_from(value: ProjectDraft) -> Result<Self, Self::Error> {
        if value.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if value.team_size < 1 {
            return Err(ProjectValidationError::TeamSizeNotPositive);
        }

        Ok(Self {
            id: value.id,
            name: value.name,
            description: value.description,
            window: value.window,
            required_skills: value.required_skills,
            team_size: value.team_size,
            status: value.status,
            manager_id: value.manager_id,
        })
    }
}
