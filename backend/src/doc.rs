//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: request/response bodies plus the domain error wrappers
//! - **Security**: the session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::assignments::{
    AssignmentOverviewBody, AssignmentResponseBody, CreateAssignmentRequestBody,
    EngineerSummaryBody, ProjectSummaryBody, UpdateAssignmentRequestBody,
};
use crate::inbound::http::auth::LoginRequestBody;
use crate::inbound::http::engineers::{
    CapacityResponseBody, UpdateEngineerRequestBody, UserResponseBody,
};
use crate::inbound::http::projects::{ProjectRequestBody, ProjectResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Resource management backend API",
        description = "Role-gated staffing API: projects, engineers, and \
                       capacity-checked assignments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::profile,
        crate::inbound::http::engineers::list_engineers,
        crate::inbound::http::engineers::get_engineer,
        crate::inbound::http::engineers::engineer_capacity,
        crate::inbound::http::engineers::update_engineer,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::assignments::list_assignments,
        crate::inbound::http::assignments::create_assignment,
        crate::inbound::http::assignments::update_assignment,
        crate::inbound::http::assignments::delete_assignment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequestBody,
        UserResponseBody,
        CapacityResponseBody,
        UpdateEngineerRequestBody,
        ProjectRequestBody,
        ProjectResponseBody,
        CreateAssignmentRequestBody,
        UpdateAssignmentRequestBody,
        AssignmentResponseBody,
        AssignmentOverviewBody,
        ProjectSummaryBody,
        EngineerSummaryBody,
    )),
    tags(
        (name = "auth", description = "Session authentication"),
        (name = "engineers", description = "Engineer directory and capacity"),
        (name = "projects", description = "Project management"),
        (name = "assignments", description = "Capacity-checked staffing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema registration.

    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/v1/auth/login",
            "/api/v1/engineers/{id}/capacity",
            "/api/v1/assignments",
            "/health/ready",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn error_schema_is_registered_under_domain_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        // utoipa replaces :: with . in schema names
        assert!(schemas.contains_key("crate.domain.Error"));
    }
}
