use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::use_cases::DeleteFileUseCase;
use crate::domain::errors::ErrorResponse;

/// DELETE /api/v1/{containername}/contentfiles/{fileName}
#[utoipa::path(
    delete,
    path = "/api/v1/{containername}/contentfiles/{fileName}",
    tag = "contentfiles",
    params(
        ("containername" = String, Path, description = "Container name"),
        ("fileName" = String, Path, description = "File name")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "Invalid parameters or storage failure", body = [ErrorResponse]),
        (status = 404, description = "Container or file does not exist", body = ErrorResponse)
    )
)]
pub async fn delete_handler(
    State(use_case): State<Arc<DeleteFileUseCase>>,
    Path((container_name, file_name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(&container_name, &file_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
