//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the pure capacity/admission core, and the services
//! implementing the driving ports. Types are immutable once constructed;
//! each type's Rustdoc documents its invariants.

pub mod ports;

mod assignment;
mod assignment_service;
mod auth;
mod capacity;
mod error;
mod project;
mod project_service;
mod schedule;
#[cfg(test)]
pub(crate) mod test_support;
mod trace_id;
mod user;
mod users_service;

pub use self::assignment::{
    ALLOCATION_MAX, ALLOCATION_MIN, AllocationPercentage, Assignment, AssignmentDraft,
    AssignmentValidationError,
};
pub use self::assignment_service::{AssignmentCommandService, AssignmentsQueryService};
pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError};
pub use self::capacity::{
    AdmissionError, CapacitySnapshot, admit_assignment, committed_allocation,
};
pub use self::error::{Error, ErrorCode};
pub use self::project::{Project, ProjectDraft, ProjectStatus, ProjectValidationError};
pub use self::project_service::{ProjectCommandService, ProjectsQueryService};
pub use self::schedule::{AssignmentPhase, DateWindow, WindowValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, EngineerProfileUpdate, MAX_CAPACITY_MAX, MAX_CAPACITY_MIN, MaxCapacity, Role,
    Seniority, User, UserDraft, UserId, UserValidationError,
};
pub use self::users_service::{UserProfileCommandService, UsersQueryService};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) mod mapping {
    //! Shared mapping from driven-port persistence errors to domain errors.
    //!
    //! Connection failures surface as service-unavailable so clients retry;
    //! query failures are internal faults. The inbound layer redacts
    //! internal messages before they reach a client.

    use super::Error;
    use super::ports::{
        AssignmentPersistenceError, ProjectPersistenceError, UserPersistenceError,
    };

    pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
        }
    }

    pub(crate) fn map_project_persistence_error(error: ProjectPersistenceError) -> Error {
        match error {
            ProjectPersistenceError::Connection { message } => Error::service_unavailable(message),
            ProjectPersistenceError::Query { message } => Error::internal(message),
        }
    }

    pub(crate) fn map_assignment_persistence_error(error: AssignmentPersistenceError) -> Error {
        match error {
            AssignmentPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            AssignmentPersistenceError::Query { message } => Error::internal(message),
        }
    }
}
