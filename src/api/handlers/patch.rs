use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        Path, State,
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::file_form::read_file_payload;
use crate::api::errors::ApiError;
use crate::application::use_cases::PatchFileUseCase;
use crate::domain::errors::ErrorResponse;

/// PATCH /api/v1/{containername}/contentfiles/{fileName}
/// Replace the content of an existing file
#[utoipa::path(
    patch,
    path = "/api/v1/{containername}/contentfiles/{fileName}",
    tag = "contentfiles",
    params(
        ("containername" = String, Path, description = "Container name"),
        ("fileName" = String, Path, description = "File name")
    ),
    request_body(content_type = "multipart/form-data", description = "File in the `fileData` part"),
    responses(
        (status = 204, description = "File replaced"),
        (status = 400, description = "Invalid parameters or storage failure", body = [ErrorResponse]),
        (status = 404, description = "Container or file does not exist", body = ErrorResponse)
    )
)]
pub async fn patch_handler(
    State(use_case): State<Arc<PatchFileUseCase>>,
    Path((container_name, file_name)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, ApiError> {
    let payload = read_file_payload(multipart).await?;

    use_case
        .execute(&container_name, &file_name, payload)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
