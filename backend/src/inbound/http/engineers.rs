//! Engineer directory and capacity HTTP handlers.
//!
//! ```text
//! GET /api/v1/engineers
//! GET /api/v1/engineers/{id}
//! GET /api/v1/engineers/{id}/capacity
//! PUT /api/v1/engineers/{id}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    CapacitySnapshot, EngineerProfileUpdate, Error, MaxCapacity, Seniority, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

/// User payload returned by directory, profile, and login endpoints.
///
/// Password material never appears here; the domain type does not carry it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    /// Account identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact and login address.
    pub email: String,
    /// Account role: `engineer` or `manager`.
    pub role: String,
    /// Skill labels, advisory only.
    pub skills: Vec<String>,
    /// Seniority band, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    /// Total assignable percentage.
    pub max_capacity: i32,
    /// Free-text department label.
    pub department: String,
}

impl From<&User> for UserResponseBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            skills: user.skills().to_vec(),
            seniority: user.seniority().map(|s| s.to_string()),
            max_capacity: user.max_capacity().get(),
            department: user.department().to_owned(),
        }
    }
}

/// Point-in-time capacity payload for one engineer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapacityResponseBody {
    /// Engineer the snapshot describes.
    #[schema(format = "uuid")]
    pub engineer_id: String,
    /// Total assignable percentage.
    pub max_capacity: i32,
    /// Percentage committed to assignments containing today.
    pub allocated: i32,
    /// Remaining headroom; negative once over-committed.
    pub available: i32,
}

impl From<CapacitySnapshot> for CapacityResponseBody {
    fn from(snapshot: CapacitySnapshot) -> Self {
        Self {
            engineer_id: snapshot.engineer_id.to_string(),
            max_capacity: snapshot.max_capacity,
            allocated: snapshot.allocated,
            available: snapshot.available,
        }
    }
}

/// Request payload for replacing an engineer's profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEngineerRequestBody {
    /// Replacement display name.
    pub name: String,
    /// Replacement skill labels.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Replacement seniority band: `junior`, `mid`, or `senior`.
    pub seniority: Option<String>,
    /// Replacement assignable percentage (0-100).
    pub max_capacity: i32,
    /// Replacement department label.
    #[serde(default)]
    pub department: String,
}

fn parse_profile_update(body: UpdateEngineerRequestBody) -> Result<EngineerProfileUpdate, Error> {
    let seniority = body
        .seniority
        .map(|raw| {
            raw.parse::<Seniority>().map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "seniority",
                    "value": raw,
                    "code": "invalid_seniority",
                }))
            })
        })
        .transpose()?;

    let max_capacity = MaxCapacity::new(body.max_capacity).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "maxCapacity",
            "value": body.max_capacity,
            "code": "capacity_out_of_range",
        }))
    })?;

    Ok(EngineerProfileUpdate {
        name: body.name,
        skills: body.skills,
        seniority,
        max_capacity,
        department: body.department,
    })
}

/// List every engineer account.
#[utoipa::path(
    get,
    path = "/api/v1/engineers",
    responses(
        (status = 200, description = "Engineers", body = [UserResponseBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "listEngineers",
    security(("SessionCookie" = []))
)]
#[get("/engineers")]
pub async fn list_engineers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    session.require_subject()?;
    let engineers = state.users.list_engineers().await?;
    Ok(web::Json(
        engineers.iter().map(UserResponseBody::from).collect(),
    ))
}

/// Fetch one engineer by id.
#[utoipa::path(
    get,
    path = "/api/v1/engineers/{id}",
    params(("id" = String, Path, format = "uuid", description = "Engineer id")),
    responses(
        (status = 200, description = "Engineer", body = UserResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "getEngineer",
    security(("SessionCookie" = []))
)]
#[get("/engineers/{id}")]
pub async fn get_engineer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    session.require_subject()?;
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let engineer = state.users.get_engineer(&id).await?;
    Ok(web::Json(UserResponseBody::from(&engineer)))
}

/// Point-in-time capacity snapshot for one engineer.
///
/// Only assignments whose window contains the current day count towards
/// `allocated`; `available` may be negative when the stored data already
/// over-commits the engineer.
#[utoipa::path(
    get,
    path = "/api/v1/engineers/{id}/capacity",
    params(("id" = String, Path, format = "uuid", description = "Engineer id")),
    responses(
        (status = 200, description = "Capacity snapshot", body = CapacityResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "getEngineerCapacity",
    security(("SessionCookie" = []))
)]
#[get("/engineers/{id}/capacity")]
pub async fn engineer_capacity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CapacityResponseBody>> {
    session.require_subject()?;
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let snapshot = state.users.engineer_capacity(&id).await?;
    Ok(web::Json(CapacityResponseBody::from(snapshot)))
}

/// Replace an engineer's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/engineers/{id}",
    params(("id" = String, Path, format = "uuid", description = "Engineer id")),
    request_body = UpdateEngineerRequestBody,
    responses(
        (status = 200, description = "Updated engineer", body = UserResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "updateEngineer",
    security(("SessionCookie" = []))
)]
#[put("/engineers/{id}")]
pub async fn update_engineer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateEngineerRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    session.require_subject()?;
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let update = parse_profile_update(payload.into_inner())?;
    let updated = state.profile.update_profile(&id, update).await?;
    Ok(web::Json(UserResponseBody::from(&updated)))
}
