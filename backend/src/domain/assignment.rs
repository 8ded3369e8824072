//! Assignment data model: the link between an engineer and a project.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schedule::{DateWindow, WindowValidationError};
use crate::domain::user::UserId;

/// Validation errors returned by the assignment constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentValidationError {
    /// The allocation percentage fell outside `(0, 100]`.
    #[error("allocation percentage must be between {min} and {max}")]
    AllocationOutOfRange {
        /// Lowest accepted percentage.
        min: i32,
        /// Highest accepted percentage.
        max: i32,
    },
    /// The end date precedes the start date.
    #[error("assignment end date must not precede its start date")]
    EndsBeforeStart,
    /// The role label was blank once trimmed.
    #[error("assignment role must not be empty")]
    EmptyRole,
}

impl From<WindowValidationError> for AssignmentValidationError {
    fn from(value: WindowValidationError) -> Self {
        match value {
            WindowValidationError::EndsBeforeStart => Self::EndsBeforeStart,
        }
    }
}

/// Lowest accepted allocation percentage.
pub const ALLOCATION_MIN: i32 = 1;
/// Highest accepted allocation percentage.
pub const ALLOCATION_MAX: i32 = 100;

/// The fraction of an engineer's working capacity committed to one
/// assignment, as an integer percentage in `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AllocationPercentage(i32);

impl AllocationPercentage {
    /// Validate and construct an allocation percentage.
    pub fn new(value: i32) -> Result<Self, AssignmentValidationError> {
        if (ALLOCATION_MIN..=ALLOCATION_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AssignmentValidationError::AllocationOutOfRange {
                min: ALLOCATION_MIN,
                max: ALLOCATION_MAX,
            })
        }
    }

    /// Underlying percentage.
    #[must_use]
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl From<AllocationPercentage> for i32 {
    fn from(value: AllocationPercentage) -> Self {
        value.0
    }
}

impl TryFrom<i32> for AllocationPercentage {
    type Error = AssignmentValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`Assignment::new`].
#[derive(Debug, Clone)]
pub struct AssignmentDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Assigned engineer.
    pub engineer_id: UserId,
    /// Target project.
    pub project_id: Uuid,
    /// Committed capacity fraction.
    pub allocation: AllocationPercentage,
    /// Commitment window; overlaps with other assignments are permitted and
    /// bounded only by the capacity check at creation time.
    pub window: DateWindow,
    /// Free-text role label, e.g. "Developer" or "Tech Lead".
    pub role: String,
}

/// A commitment of part of an engineer's capacity to one project.
///
/// No uniqueness constraint exists across overlapping assignments for the
/// same engineer; the admission check bounds the allocation sum instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    id: Uuid,
    engineer_id: UserId,
    project_id: Uuid,
    allocation: AllocationPercentage,
    window: DateWindow,
    role: String,
}

impl Assignment {
    /// Creates a validated assignment.
    pub fn new(draft: AssignmentDraft) -> Result<Self, AssignmentValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Assigned engineer.
    #[must_use]
    pub fn engineer_id(&self) -> &UserId {
        &self.engineer_id
    }

    /// Target project.
    #[must_use]
    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    /// Committed capacity fraction.
    #[must_use]
    pub fn allocation(&self) -> AllocationPercentage {
        self.allocation
    }

    /// Commitment window.
    #[must_use]
    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    /// Free-text role label.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }
}

impl TryFrom<AssignmentDraft> for Assignment {
    type Error = AssignmentValidationError;

    fn try_from(value: AssignmentDraft) -> Result<Self, Self::Error> {
        if value.role.trim().is_empty() {
            return Err(AssignmentValidationError::EmptyRole);
        }

        Ok(Self {
            id: value.id,
            engineer_id: value.engineer_id,
            project_id: value.project_id,
            allocation: value.allocation,
            window: value.window,
            role: value.role,
        })
    }
}
