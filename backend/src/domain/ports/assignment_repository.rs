//! Port abstraction for assignment persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::assignment::{AllocationPercentage, Assignment};
use crate::domain::schedule::DateWindow;
use crate::domain::user::UserId;

/// Persistence errors raised by assignment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentPersistenceError {
    /// Repository connection could not be established.
    #[error("assignment repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("assignment repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl AssignmentPersistenceError {
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

/// Replacement values applied to a stored assignment.
///
/// Deliberately excludes the engineer and project references: a commitment
/// is retargeted by deleting and recreating it, which routes the new target
/// through admission control. Allocation and window changes are applied
/// without re-validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPatch {
    /// Replacement committed fraction.
    pub allocation: AllocationPercentage,
    /// Replacement commitment window.
    pub window: DateWindow,
    /// Replacement role label.
    pub role: String,
}

/// Driven port for assignment storage.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Persist a new assignment record.
    async fn insert(&self, assignment: &Assignment) -> Result<(), AssignmentPersistenceError>;

    /// Fetch every assignment.
    async fn list_all(&self) -> Result<Vec<Assignment>, AssignmentPersistenceError>;

    /// Fetch the full assignment set of one engineer.
    async fn list_for_engineer(
        &self,
        engineer_id: &UserId,
    ) -> Result<Vec<Assignment>, AssignmentPersistenceError>;

    /// Apply replacement values and return the updated record, or `None`
    /// when the assignment does not exist.
    async fn update(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, AssignmentPersistenceError>;

    /// Remove an assignment; `false` when no record matched.
    async fn delete(&self, id: Uuid) -> Result<bool, AssignmentPersistenceError>;
}
