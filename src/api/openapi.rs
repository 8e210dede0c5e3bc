use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::HealthResponse;
use crate::application::dto::ContainerFile;
use crate::domain::errors::ErrorResponse;

/// OpenAPI document for the content-file API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Container Files API",
        version = "1.0.0",
        description = "Upload, replace, download, delete and list files held in blob-storage containers"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::upload::upload_handler,
        crate::api::handlers::patch::patch_handler,
        crate::api::handlers::download::download_handler,
        crate::api::handlers::delete::delete_handler,
        crate::api::handlers::list::list_handler,
    ),
    components(schemas(ErrorResponse, ContainerFile, HealthResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "contentfiles", description = "Files stored in containers")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
