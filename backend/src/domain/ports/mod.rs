//! Domain ports and supporting types for the hexagonal boundary.

mod assignment_command;
mod assignment_repository;
mod assignments_query;
mod login_service;
mod project_command;
mod project_repository;
mod projects_query;
mod user_profile_command;
mod user_repository;
mod users_query;

pub use assignment_command::{AssignmentCommand, CreateAssignmentRequest, UpdateAssignmentRequest};
pub use assignment_repository::{
    AssignmentPatch, AssignmentPersistenceError, AssignmentRepository,
};
pub use assignments_query::{
    AssignmentOverview, AssignmentsQuery, EngineerSummary, ProjectSummary,
};
pub use login_service::{LoginService, session_subject};
pub use project_command::{CreateProjectRequest, ProjectCommand, UpdateProjectRequest};
pub use project_repository::{ProjectPatch, ProjectPersistenceError, ProjectRepository};
pub use projects_query::ProjectsQuery;
pub use user_profile_command::UserProfileCommand;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
