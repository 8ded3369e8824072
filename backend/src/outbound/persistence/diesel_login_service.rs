//! Diesel-backed `LoginService` adapter verifying argon2 credentials.
//!
//! The stored hash never crosses the domain boundary: this adapter selects
//! the credential row, verifies the password, and hands a hash-free domain
//! [`User`] to the caller. Unknown addresses and wrong passwords answer with
//! the same `invalid credentials` error so login probes cannot enumerate
//! accounts.

use argon2::Argon2;
use argon2::password_hash::{Error as HashError, PasswordHash, PasswordVerifier};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, User};

use super::diesel_user_repository::row_to_user;
use super::error_map::{map_diesel_error, map_pool_error};
use super::models::CredentialRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed `LoginService` over the `users` credential store.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> Error {
    map_pool_error(error, Error::service_unavailable)
}

fn map_diesel(error: diesel::result::Error) -> Error {
    map_diesel_error(error, Error::internal, Error::service_unavailable)
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), Error> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| Error::internal(format!("stored password hash is invalid: {err}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(HashError::Password) => Err(invalid_credentials()),
        Err(err) => Err(Error::internal(format!(
            "password verification failed: {err}"
        ))),
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::email.eq(credentials.email().as_ref()))
            .select(CredentialRow::as_select())
            .first::<CredentialRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(row) = row else {
            return Err(invalid_credentials());
        };

        verify_password(credentials.password(), &row.password_hash)?;

        row_to_user(row.into()).map_err(|err| Error::internal(err.to_string()))
    }
}
