//! Resource-management backend: role-gated staffing REST API with a
//! capacity-checked assignment core.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Tracing middleware attaching a request-scoped trace identifier.
pub use middleware::trace::Trace;
/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
