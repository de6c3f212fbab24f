//! OpenAPI document for the HTTP API.
//!
//! Served through Swagger UI at `/swagger` in the Development environment.

use utoipa::OpenApi;

use super::handlers::{DataItem, DataResponse, ServiceInfo};
use crate::status::StatusSnapshot;

/// Path of the generated OpenAPI JSON document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path of the Swagger UI.
pub const SWAGGER_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(title = "Sample Web API", version = "1.0.0"),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::data,
        crate::api::handlers::root,
    ),
    components(schemas(StatusSnapshot, DataItem, DataResponse, ServiceInfo)),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Data", description = "Sample payloads"),
        (name = "Root", description = "Service descriptor")
    )
)]
pub struct ApiDoc;
