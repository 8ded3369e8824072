//! Driving port for user and capacity read use-cases.

use async_trait::async_trait;

use crate::domain::capacity::CapacitySnapshot;
use crate::domain::error::Error;
use crate::domain::user::{User, UserId};

/// Domain use-case port for user reads.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// List every engineer account.
    async fn list_engineers(&self) -> Result<Vec<User>, Error>;

    /// Fetch one engineer; fails with a not-found error when absent.
    async fn get_engineer(&self, id: &UserId) -> Result<User, Error>;

    /// Fetch the authenticated subject's own account.
    async fn get_profile(&self, id: &UserId) -> Result<User, Error>;

    /// Point-in-time capacity snapshot for "today": only assignments whose
    /// window contains the current day count towards `allocated`.
    async fn engineer_capacity(&self, id: &UserId) -> Result<CapacitySnapshot, Error>;
}
