//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the authenticated subject and
//! enforcing the role guard ahead of the core.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthenticatedUser, Error, Role};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_ROLE_KEY: &str = "user_role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated subject in the session cookie.
    pub fn persist_subject(&self, subject: &AuthenticatedUser) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, subject.id.to_string())
            .and_then(|()| self.0.insert(USER_ROLE_KEY, subject.role.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current subject from the session, if present.
    ///
    /// Tampered or stale values are treated as an absent session rather than
    /// an internal fault.
    pub fn subject(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };

        let (Some(id), Some(role)) = (read(USER_ID_KEY)?, read(USER_ROLE_KEY)?) else {
            return Ok(None);
        };

        match AuthenticatedUser::try_from_strings(&id, &role) {
            Ok(subject) => Ok(Some(subject)),
            Err(error) => {
                tracing::warn!("invalid subject in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated subject or return `401 Unauthorized`.
    pub fn require_subject(&self) -> Result<AuthenticatedUser, Error> {
        self.subject()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated manager or return `403 Forbidden`.
    pub fn require_manager(&self) -> Result<AuthenticatedUser, Error> {
        let subject = self.require_subject()?;
        if subject.role == Role::Manager {
            Ok(subject)
        } else {
            Err(Error::forbidden("manager role required"))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
