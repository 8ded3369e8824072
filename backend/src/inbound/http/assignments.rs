//! Assignment HTTP handlers.
//!
//! ```text
//! GET /api/v1/assignments?engineerId=...
//! POST /api/v1/assignments
//! PUT /api/v1/assignments/{id}
//! DELETE /api/v1/assignments/{id}
//! ```
//!
//! Creation runs admission control; update and delete are applied without
//! re-validation. All mutations are manager-only.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    AssignmentOverview, CreateAssignmentRequest, EngineerSummary, ProjectSummary,
    UpdateAssignmentRequest,
};
use crate::domain::{AllocationPercentage, Assignment, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id, parse_uuid, parse_window};

/// Assignment payload returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponseBody {
    /// Assignment identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Assigned engineer.
    #[schema(format = "uuid")]
    pub engineer_id: String,
    /// Target project.
    #[schema(format = "uuid")]
    pub project_id: String,
    /// Committed capacity fraction.
    pub allocation_percentage: i32,
    /// First day of the commitment, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub start_date: String,
    /// Last day of the commitment, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub end_date: String,
    /// Free-text role label.
    pub role: String,
}

impl From<&Assignment> for AssignmentResponseBody {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id: assignment.id().to_string(),
            engineer_id: assignment.engineer_id().to_string(),
            project_id: assignment.project_id().to_string(),
            allocation_percentage: assignment.allocation().get(),
            start_date: assignment.window().start().to_string(),
            end_date: assignment.window().end().to_string(),
            role: assignment.role().to_owned(),
        }
    }
}

/// Condensed project payload embedded in assignment listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryBody {
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
    /// Lifecycle label.
    pub status: String,
    /// Advisory skill labels.
    pub required_skills: Vec<String>,
}

impl From<ProjectSummary> for ProjectSummaryBody {
    fn from(summary: ProjectSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            description: summary.description,
            start_date: summary.window.start().to_string(),
            end_date: summary.window.end().to_string(),
            status: summary.status.to_string(),
            required_skills: summary.required_skills,
        }
    }
}

/// Condensed engineer payload embedded in assignment listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineerSummaryBody {
    /// Account identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl From<EngineerSummary> for EngineerSummaryBody {
    fn from(summary: EngineerSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            email: summary.email.to_string(),
        }
    }
}

/// One assignment joined with its collaborators and the derived phase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOverviewBody {
    /// The assignment record, flattened.
    #[serde(flatten)]
    pub assignment: AssignmentResponseBody,
    /// View-only classification against today: `upcoming`, `current`, or
    /// `completed`.
    pub phase: String,
    /// Condensed target project, when it still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSummaryBody>,
    /// Condensed assigned engineer, when the account still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineer: Option<EngineerSummaryBody>,
}

impl From<AssignmentOverview> for AssignmentOverviewBody {
    fn from(overview: AssignmentOverview) -> Self {
        Self {
            assignment: AssignmentResponseBody::from(&overview.assignment),
            phase: overview.phase.to_string(),
            project: overview.project.map(ProjectSummaryBody::from),
            engineer: overview.engineer.map(EngineerSummaryBody::from),
        }
    }
}

/// Query parameters accepted by the assignment listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListQuery {
    /// Restrict the listing to one engineer.
    pub engineer_id: Option<String>,
}

/// Request payload for creating an assignment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequestBody {
    /// Engineer to commit.
    #[schema(format = "uuid")]
    pub engineer_id: String,
    /// Target project.
    #[schema(format = "uuid")]
    pub project_id: String,
    /// Proposed capacity fraction, an integer in `(0, 100]`.
    pub allocation_percentage: i32,
    /// First day of the commitment, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub start_date: String,
    /// Last day of the commitment, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub end_date: String,
    /// Free-text role label.
    pub role: String,
}

/// Request payload for replacing an assignment's mutable fields.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequestBody {
    /// Replacement capacity fraction, an integer in `(0, 100]`.
    pub allocation_percentage: i32,
    /// First day of the commitment, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub start_date: String,
    /// Last day of the commitment, formatted `YYYY-MM-DD`.
    #[schema(format = "date")]
    pub end_date: String,
    /// Replacement role label.
    pub role: String,
}

fn parse_allocation(value: i32) -> Result<AllocationPercentage, Error> {
    AllocationPercentage::new(value).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "allocationPercentage",
            "value": value,
            "code": "allocation_out_of_range",
        }))
    })
}

/// List assignments, optionally restricted to one engineer.
///
/// Each item embeds the target project and assigned engineer when they still
/// exist, plus the derived `phase` classification against today.
#[utoipa::path(
    get,
    path = "/api/v1/assignments",
    params(("engineerId" = Option<String>, Query, format = "uuid", description = "Restrict to one engineer")),
    responses(
        (status = 200, description = "Assignments", body = [AssignmentOverviewBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "listAssignments",
    security(("SessionCookie" = []))
)]
#[get("/assignments")]
pub async fn list_assignments(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AssignmentListQuery>,
) -> ApiResult<web::Json<Vec<AssignmentOverviewBody>>> {
    session.require_subject()?;

    let engineer_id = query
        .into_inner()
        .engineer_id
        .map(|raw| parse_user_id(&raw, FieldName::new("engineerId")))
        .transpose()?;

    let overviews = state
        .assignments_query
        .list_assignments(engineer_id.as_ref())
        .await?;

    Ok(web::Json(
        overviews
            .into_iter()
            .map(AssignmentOverviewBody::from)
            .collect(),
    ))
}

/// Create an assignment after the capacity admission check.
///
/// Rejected proposals answer with the remaining headroom, e.g.
/// `Engineer only has 40% capacity left.`
#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    request_body = CreateAssignmentRequestBody,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentResponseBody),
        (status = 400, description = "Invalid request or capacity exceeded", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Engineer not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "createAssignment",
    security(("SessionCookie" = []))
)]
#[post("/assignments")]
pub async fn create_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateAssignmentRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_manager()?;
    let body = payload.into_inner();

    // The raw percentage goes straight to admission so an oversized request
    // is answered with the remaining headroom.
    let request = CreateAssignmentRequest {
        engineer_id: parse_user_id(&body.engineer_id, FieldName::new("engineerId"))?,
        project_id: parse_uuid(&body.project_id, FieldName::new("projectId"))?,
        allocation_percentage: body.allocation_percentage,
        window: parse_window(&body.start_date, &body.end_date)?,
        role: body.role,
    };

    let assignment = state.assignments.create_assignment(request).await?;
    Ok(HttpResponse::Created().json(AssignmentResponseBody::from(&assignment)))
}

/// Replace an assignment's mutable fields without re-running admission.
#[utoipa::path(
    put,
    path = "/api/v1/assignments/{id}",
    params(("id" = String, Path, format = "uuid", description = "Assignment id")),
    request_body = UpdateAssignmentRequestBody,
    responses(
        (status = 200, description = "Updated assignment", body = AssignmentResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "updateAssignment",
    security(("SessionCookie" = []))
)]
#[put("/assignments/{id}")]
pub async fn update_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateAssignmentRequestBody>,
) -> ApiResult<web::Json<AssignmentResponseBody>> {
    session.require_manager()?;
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let body = payload.into_inner();

    let request = UpdateAssignmentRequest {
        allocation: parse_allocation(body.allocation_percentage)?,
        window: parse_window(&body.start_date, &body.end_date)?,
        role: body.role,
    };

    let assignment = state.assignments.update_assignment(id, request).await?;
    Ok(web::Json(AssignmentResponseBody::from(&assignment)))
}

/// Delete an assignment.
#[utoipa::path(
    delete,
    path = "/api/v1/assignments/{id}",
    params(("id" = String, Path, format = "uuid", description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "deleteAssignment",
    security(("SessionCookie" = []))
)]
#[delete("/assignments/{id}")]
pub async fn delete_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_manager()?;
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    state.assignments.delete_assignment(id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    //! Endpoint coverage: admission outcomes over HTTP, role gating, and the
    //! joined listing shape.

    use actix_web::{http::StatusCode, test as actix_test};
    use chrono::NaiveDate;
    use serde_json::Value;

    use crate::domain::test_support::{
        assignment_for, engineer_with_capacity, manager, project_owned_by,
    };
    use crate::inbound::http::test_utils::{api_app, login_as, test_state};

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).expect("valid test date")
    }

    fn create_body(engineer_id: &str, project_id: &str, allocation: i32) -> Value {
        serde_json::json!({
            "engineerId": engineer_id,
            "projectId": project_id,
            "allocationPercentage": allocation,
            "startDate": "2026-07-01",
            "endDate": "2026-07-31",
            "role": "Developer",
        })
    }

    #[actix_web::test]
    async fn manager_creates_assignment_within_capacity() {
        let owner = manager();
        let engineer = engineer_with_capacity(100);
        let project = project_owned_by(*owner.id(), "Billing revamp");
        let state = test_state(
            vec![owner.clone(), engineer.clone()],
            vec![project.clone()],
            vec![],
            date(7, 1),
        );
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, owner.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/assignments")
                .cookie(cookie)
                .set_json(create_body(
                    &engineer.id().to_string(),
                    &project.id().to_string(),
                    60,
                ))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.get("allocationPercentage").and_then(Value::as_i64),
            Some(60)
        );
    }

    #[actix_web::test]
    async fn over_commitment_answers_with_headroom_message() {
        let owner = manager();
        let engineer = engineer_with_capacity(100);
        let engineer_id = *engineer.id();
        let existing = assignment_for(engineer_id, 60, date(7, 1), date(7, 20));
        let project = project_owned_by(*owner.id(), "Billing revamp");
        let state = test_state(
            vec![owner.clone(), engineer],
            vec![project.clone()],
            vec![existing],
            date(7, 1),
        );
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, owner.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/assignments")
                .cookie(cookie)
                .set_json(create_body(
                    &engineer_id.to_string(),
                    &project.id().to_string(),
                    50,
                ))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Engineer only has 40% capacity left.")
        );
        assert_eq!(
            value
                .get("details")
                .and_then(|d| d.get("available"))
                .and_then(Value::as_i64),
            Some(40)
        );
    }

    #[actix_web::test]
    async fn unknown_engineer_answers_404() {
        let owner = manager();
        let state = test_state(vec![owner.clone()], vec![], vec![], date(7, 1));
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, owner.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/assignments")
                .cookie(cookie)
                .set_json(create_body(
                    "00000000-0000-0000-0000-000000000001",
                    "00000000-0000-0000-0000-000000000002",
                    10,
                ))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Engineer not found")
        );
    }

    #[actix_web::test]
    async fn engineers_cannot_create_assignments() {
        let engineer = engineer_with_capacity(100);
        let state = test_state(vec![engineer.clone()], vec![], vec![], date(7, 1));
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, engineer.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/assignments")
                .cookie(cookie)
                .set_json(create_body(
                    &engineer.id().to_string(),
                    "00000000-0000-0000-0000-000000000002",
                    10,
                ))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn listing_filters_by_engineer_and_embeds_phase() {
        let owner = manager();
        let first = engineer_with_capacity(100);
        let first_id = *first.id();
        let second = engineer_with_capacity(100);
        let second_id = *second.id();
        let mine = assignment_for(first_id, 40, date(5, 1), date(5, 31));
        let other = assignment_for(second_id, 20, date(5, 1), date(5, 31));
        let state = test_state(
            vec![owner, first.clone(), second],
            vec![],
            vec![mine.clone(), other],
            date(5, 15),
        );
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, first.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/assignments?engineerId={first_id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(res).await;
        let items = value.as_array().expect("array payload");
        assert_eq!(items.len(), 1);
        let item = items.first().expect("one assignment");
        assert_eq!(
            item.get("id").and_then(Value::as_str),
            Some(mine.id().to_string().as_str())
        );
        assert_eq!(item.get("phase").and_then(Value::as_str), Some("current"));
        assert_eq!(
            item.get("engineer")
                .and_then(|e| e.get("name"))
                .and_then(Value::as_str),
            Some("Margaret Hamilton")
        );
    }

    #[actix_web::test]
    async fn update_applies_without_admission_check() {
        let owner = manager();
        let engineer = engineer_with_capacity(100);
        let engineer_id = *engineer.id();
        let existing = assignment_for(engineer_id, 60, date(7, 1), date(7, 31));
        let existing_id = existing.id();
        let state = test_state(
            vec![owner.clone(), engineer],
            vec![],
            vec![existing],
            date(7, 1),
        );
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, owner.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/assignments/{existing_id}"))
                .cookie(cookie)
                .set_json(serde_json::json!({
                    "allocationPercentage": 100,
                    "startDate": "2026-07-01",
                    "endDate": "2026-07-31",
                    "role": "Tech Lead",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.get("allocationPercentage").and_then(Value::as_i64),
            Some(100)
        );
    }

    #[actix_web::test]
    async fn delete_answers_404_for_missing_assignment() {
        let owner = manager();
        let state = test_state(vec![owner.clone()], vec![], vec![], date(7, 1));
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, owner.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/assignments/00000000-0000-0000-0000-000000000001")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_removes_the_assignment() {
        let owner = manager();
        let engineer = engineer_with_capacity(100);
        let existing = assignment_for(*engineer.id(), 60, date(7, 1), date(7, 31));
        let existing_id = existing.id();
        let state = test_state(
            vec![owner.clone(), engineer],
            vec![],
            vec![existing],
            date(7, 1),
        );
        let app = actix_test::init_service(api_app(state)).await;
        let cookie = login_as(&app, owner.email().as_ref()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/assignments/{existing_id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/assignments")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value.as_array().map(Vec::len), Some(0));
    }
}
