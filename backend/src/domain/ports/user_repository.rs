//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{EngineerProfileUpdate, User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl UserPersistenceError {
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

/// Driven port for user account storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user carrying the engineer role.
    async fn list_engineers(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier, regardless of role.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Apply profile changes and return the updated record, or `None` when
    /// the user does not exist.
    async fn update_profile(
        &self,
        id: &UserId,
        update: &EngineerProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError>;
}
