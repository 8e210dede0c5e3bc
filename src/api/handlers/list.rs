use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::dto::ContainerFile;
use crate::application::use_cases::ListFilesUseCase;
use crate::domain::errors::ErrorResponse;

/// GET /api/v1/{containername}/contentfiles
#[utoipa::path(
    get,
    path = "/api/v1/{containername}/contentfiles",
    tag = "contentfiles",
    params(("containername" = String, Path, description = "Container name")),
    responses(
        (status = 200, description = "Files in backend order", body = [ContainerFile]),
        (status = 400, description = "Invalid parameters or storage failure", body = [ErrorResponse]),
        (status = 404, description = "Container does not exist", body = ErrorResponse)
    )
)]
pub async fn list_handler(
    State(use_case): State<Arc<ListFilesUseCase>>,
    Path(container_name): Path<String>,
) -> Result<Json<Vec<ContainerFile>>, ApiError> {
    let files = use_case.execute(&container_name).await?;
    Ok(Json(files))
}
