//! Project HTTP handlers.
//!
//! ```text
//! POST /api/v1/projects
//! GET /api/v1/projects
//! GET /api/v1/projects/{id}
//! PUT /api/v1/projects/{id}
//! ```
//!
//! Creation and update are manager-only; every authenticated account can
//! read.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{CreateProjectRequest, UpdateProjectRequest};
use crate::domain::{DateWindow, Error, Project, ProjectStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, parse_window};

/// Project payload returned by the project endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponseBody {
    /// Project identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// First day of the delivery window.
    #[schema(format = "date")]
    pub start_date: String,
    /// Last day of the delivery window.
    #[schema(format = "date")]
    pub end_date: String,
    /// Advisory skill labels.
    pub required_skills: Vec<String>,
    /// Intended head count.
    pub team_size: i32,
    /// Lifecycle label: `planning`, `active`, or `completed`.
    pub status: String,
    /// Owning manager.
    #[schema(format = "uuid")]
    pub manager_id: String,
}

impl From<&Project> for ProjectResponseBody {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            name: project.name().to_owned(),
            description: project.description().to_owned(),
            start_date: project.window().start().to_string(),
            end_date: project.window().end().to_string(),
            required_skills: project.required_skills().to_vec(),
            team_size: project.team_size(),
            status: project.status().to_string(),
            manager_id: project.manager_id().to_string(),
        }
    }
}

/// Request payload shared by project creation and update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequestBody {
    /// Project name; must not be blank.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// First day of the delivery window, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub start_date: String,
    /// Last day of the delivery window, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub end_date: String,
    /// Advisory skill labels.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Intended head count; defaults to 1.
    pub team_size: Option<i32>,
    /// Lifecycle label; defaults to `planning`.
    pub status: Option<String>,
}

struct ParsedProjectBody {
    name: String,
    description: String,
    window: DateWindow,
    required_skills: Vec<String>,
    team_size: i32,
    status: ProjectStatus,
}

fn parse_project_body(body: ProjectRequestBody) -> Result<ParsedProjectBody, Error> {
    let window = parse_window(&body.start_date, &body.end_date)?;

    let status = body
        .status
        .map(|raw| {
            raw.parse::<ProjectStatus>().map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "status",
                    "value": raw,
                    "code": "invalid_status",
                }))
            })
        })
        .transpose()?
        .unwrap_or_default();

    Ok(ParsedProjectBody {
        name: body.name,
        description: body.description,
        window,
        required_skills: body.required_skills,
        team_size: body.team_size.unwrap_or(1),
        status,
    })
}

/// Create a project owned by the authenticated manager.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = ProjectRequestBody,
    responses(
        (status = 201, description = "Project created", body = ProjectResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject",
    security(("SessionCookie" = []))
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProjectRequestBody>,
) -> ApiResult<HttpResponse> {
    let subject = session.require_manager()?;
    let parsed = parse_project_body(payload.into_inner())?;

    let project = state
        .projects
        .create_project(CreateProjectRequest {
            name: parsed.name,
            description: parsed.description,
            window: parsed.window,
            required_skills: parsed.required_skills,
            team_size: parsed.team_size,
            status: parsed.status,
            manager_id: subject.id,
        })
        .await?;

    Ok(HttpResponse::Created().json(ProjectResponseBody::from(&project)))
}

/// List every project.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Projects", body = [ProjectResponseBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects",
    security(("SessionCookie" = []))
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectResponseBody>>> {
    session.require_subject()?;
    let projects = state.projects_query.list_projects().await?;
    Ok(web::Json(
        projects.iter().map(ProjectResponseBody::from).collect(),
    ))
}

/// Fetch one project by id.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, format = "uuid", description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject",
    security(("SessionCookie" = []))
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponseBody>> {
    session.require_subject()?;
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let project = state.projects_query.get_project(id).await?;
    Ok(web::Json(ProjectResponseBody::from(&project)))
}

/// Replace a project's mutable fields.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, format = "uuid", description = "Project id")),
    request_body = ProjectRequestBody,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProject",
    security(("SessionCookie" = []))
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ProjectRequestBody>,
) -> ApiResult<web::Json<ProjectResponseBody>> {
    session.require_manager()?;
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let parsed = parse_project_body(payload.into_inner())?;

    let project = state
        .projects
        .update_project(
            id,
            UpdateProjectRequest {
                name: parsed.name,
                description: parsed.description,
                window: parsed.window,
                required_skills: parsed.required_skills,
                team_size: parsed.team_size,
                status: parsed.status,
            },
        )
        .await?;

    Ok(web::Json(ProjectResponseBody::from(&project)))
}
