//! Test helpers for inbound HTTP components.
//!
//! Builds a fully wired [`HttpState`] over the in-memory domain stubs so
//! handler tests exercise the real services, session middleware, and role
//! guard without any I/O.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::LoginService;
use crate::domain::test_support::{
    StubAssignmentRepository, StubProjectRepository, StubUserRepository, clock_at,
};
use crate::domain::{
    Assignment, AssignmentCommandService, AssignmentsQueryService, Error, LoginCredentials,
    Project, ProjectCommandService, ProjectsQueryService, User, UserProfileCommandService,
    UsersQueryService,
};
use crate::inbound::http::state::HttpState;

/// Password accepted for every seeded account.
pub(crate) const TEST_PASSWORD: &str = "password";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Login double authenticating any seeded account with [`TEST_PASSWORD`].
pub(crate) struct StubLoginService {
    accounts: Vec<User>,
}

#[async_trait]
impl LoginService for StubLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.password() != TEST_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        self.accounts
            .iter()
            .find(|account| account.email() == credentials.email())
            .cloned()
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

/// Wire the real domain services over in-memory stubs.
pub(crate) fn test_state(
    users: Vec<User>,
    projects: Vec<Project>,
    assignments: Vec<Assignment>,
    today: NaiveDate,
) -> web::Data<HttpState> {
    let user_repo = Arc::new(StubUserRepository::with_users(users.clone()));
    let project_repo = Arc::new(StubProjectRepository::with_projects(projects));
    let assignment_repo = Arc::new(StubAssignmentRepository::with_assignments(assignments));
    let clock = clock_at(today);

    web::Data::new(HttpState {
        login: Arc::new(StubLoginService { accounts: users }),
        users: Arc::new(UsersQueryService::new(
            user_repo.clone(),
            assignment_repo.clone(),
            clock.clone(),
        )),
        profile: Arc::new(UserProfileCommandService::new(user_repo.clone())),
        projects_query: Arc::new(ProjectsQueryService::new(project_repo.clone())),
        projects: Arc::new(ProjectCommandService::new(project_repo.clone())),
        assignments_query: Arc::new(AssignmentsQueryService::new(
            assignment_repo.clone(),
            project_repo,
            user_repo.clone(),
            clock,
        )),
        assignments: Arc::new(AssignmentCommandService::new(user_repo, assignment_repo)),
    })
}

/// Application mirroring the production route layout for handler tests.
pub(crate) fn api_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .service(crate::inbound::http::auth::login)
            .service(crate::inbound::http::auth::profile)
            .service(crate::inbound::http::engineers::list_engineers)
            .service(crate::inbound::http::engineers::engineer_capacity)
            .service(crate::inbound::http::engineers::get_engineer)
            .service(crate::inbound::http::engineers::update_engineer)
            .service(crate::inbound::http::projects::create_project)
            .service(crate::inbound::http::projects::list_projects)
            .service(crate::inbound::http::projects::get_project)
            .service(crate::inbound::http::projects::update_project)
            .service(crate::inbound::http::assignments::list_assignments)
            .service(crate::inbound::http::assignments::create_assignment)
            .service(crate::inbound::http::assignments::update_assignment)
            .service(crate::inbound::http::assignments::delete_assignment),
    )
}

/// Log in as the seeded account with the given e-mail and return the session
/// cookie.
pub(crate) async fn login_as<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({
                "email": email,
                "password": TEST_PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_success(),
        "login for {email} failed with {}",
        res.status()
    );
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie issued")
}
