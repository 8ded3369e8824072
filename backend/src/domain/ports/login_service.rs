//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! credential store. HTTP handler tests substitute a test double instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::auth::{AuthenticatedUser, LoginCredentials};
use crate::domain::error::Error;
use crate::domain::user::User;

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    ///
    /// The returned [`User`] feeds the login response body; the embedded
    /// [`AuthenticatedUser`] subject is what the session stores.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Derive the session subject from an authenticated account.
#[must_use]
pub fn session_subject(user: &User) -> AuthenticatedUser {
    AuthenticatedUser {
        id: *user.id(),
        role: user.role(),
    }
}
