//! Driving port for assignment mutations, including admission control.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::assignment::{AllocationPercentage, Assignment};
use crate::domain::error::Error;
use crate::domain::schedule::DateWindow;
use crate::domain::user::UserId;

/// Request payload for creating an assignment.
///
/// The allocation stays a raw integer until admission has run: the capacity
/// check must see an oversized request and answer with the remaining
/// headroom, rather than losing it to input validation.
#[derive(Debug, Clone)]
pub struct CreateAssignmentRequest {
    /// Engineer to commit.
    pub engineer_id: UserId,
    /// Target project.
    pub project_id: Uuid,
    /// Proposed capacity fraction as submitted.
    pub allocation_percentage: i32,
    /// Proposed commitment window; admission evaluates against this window,
    /// not against "today".
    pub window: DateWindow,
    /// Free-text role label.
    pub role: String,
}

/// Request payload for replacing an assignment's mutable fields.
///
/// Applied without re-running admission control: over-commitment through
/// edits is accepted, matching the single-shot admission contract.
#[derive(Debug, Clone)]
pub struct UpdateAssignmentRequest {
    /// Replacement committed fraction.
    pub allocation: AllocationPercentage,
    /// Replacement commitment window.
    pub window: DateWindow,
    /// Replacement role label.
    pub role: String,
}

/// Domain use-case port for assignment mutations.
#[async_trait]
pub trait AssignmentCommand: Send + Sync {
    /// Run admission control and persist the assignment when admitted.
    async fn create_assignment(&self, request: CreateAssignmentRequest)
    -> Result<Assignment, Error>;

    /// Replace an assignment's mutable fields, bypassing admission.
    async fn update_assignment(
        &self,
        id: Uuid,
        request: UpdateAssignmentRequest,
    ) -> Result<Assignment, Error>;

    /// Delete an assignment.
    async fn delete_assignment(&self, id: Uuid) -> Result<(), Error>;
}
