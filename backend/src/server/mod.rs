//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use crate::domain::{
    AssignmentCommandService, AssignmentsQueryService, ProjectCommandService,
    ProjectsQueryService, UserProfileCommandService, UsersQueryService,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{assignments, auth, engineers, projects};
use crate::middleware::trace::Trace;
use crate::outbound::persistence::{
    DieselAssignmentRepository, DieselLoginService, DieselProjectRepository, DieselUserRepository,
};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the Diesel adapters and domain services into the handler state.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let user_repo = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let project_repo = Arc::new(DieselProjectRepository::new(config.db_pool.clone()));
    let assignment_repo = Arc::new(DieselAssignmentRepository::new(config.db_pool.clone()));
    let clock = Arc::new(DefaultClock);

    HttpState {
        login: Arc::new(DieselLoginService::new(config.db_pool.clone())),
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
    }
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: actix_web::cookie::SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}

/// Build and bind the HTTP server.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the listen address cannot be bound.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state(&config));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone(), cookie_secure, same_site))
            .service(auth::login)
            .service(auth::profile)
            .service(engineers::list_engineers)
            .service(engineers::engineer_capacity)
            .service(engineers::get_engineer)
            .service(engineers::update_engineer)
            .service(projects::create_project)
            .service(projects::list_projects)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(assignments::list_assignments)
            .service(assignments::create_assignment)
            .service(assignments::update_assignment)
            .service(assignments::delete_assignment);

        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    Ok(server.run())
}
