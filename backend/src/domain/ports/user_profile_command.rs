//! Driving port for engineer profile mutations.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{EngineerProfileUpdate, User, UserId};

/// Domain use-case port for self-service profile edits.
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Replace an engineer's profile fields and return the updated record.
    async fn update_profile(
        &self,
        id: &UserId,
        update: EngineerProfileUpdate,
    ) -> Result<User, Error>;
}
