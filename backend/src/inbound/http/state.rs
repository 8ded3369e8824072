//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssignmentCommand, AssignmentsQuery, LoginService, ProjectCommand, ProjectsQuery,
    UserProfileCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// User directory and capacity reads.
    pub users: Arc<dyn UsersQuery>,
    /// Self-service profile edits.
    pub profile: Arc<dyn UserProfileCommand>,
    /// Project reads.
    pub projects_query: Arc<dyn ProjectsQuery>,
    /// Project mutations.
    pub projects: Arc<dyn ProjectCommand>,
    /// Assignment reads.
    pub assignments_query: Arc<dyn AssignmentsQuery>,
    /// Assignment mutations behind admission control.
    pub assignments: Arc<dyn AssignmentCommand>,
}
