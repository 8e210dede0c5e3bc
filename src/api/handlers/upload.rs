use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::file_form::read_file_payload;
use crate::api::errors::ApiError;
use crate::application::dto::UploadOutcome;
use crate::application::use_cases::UploadFileUseCase;
use crate::domain::errors::ErrorResponse;

/// PUT /api/v1/{containername}/contentfiles/{fileName}
/// Create or replace a file, creating the container if needed
#[utoipa::path(
    put,
    path = "/api/v1/{containername}/contentfiles/{fileName}",
    tag = "contentfiles",
    params(
        ("containername" = String, Path, description = "Container name, 3-63 characters"),
        ("fileName" = String, Path, description = "File name, up to 75 characters")
    ),
    request_body(content_type = "multipart/form-data", description = "File in the `fileData` part"),
    responses(
        (status = 201, description = "File created; Location points at it"),
        (status = 204, description = "Existing file replaced"),
        (status = 400, description = "Invalid parameters or storage failure", body = [ErrorResponse])
    )
)]
pub async fn upload_handler(
    State(use_case): State<Arc<UploadFileUseCase>>,
    Path((container_name, file_name)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let payload = read_file_payload(multipart).await?;

    let outcome = use_case
        .execute(&container_name, &file_name, payload)
        .await?;

    Ok(match outcome {
        UploadOutcome::Created { location } => {
            (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
        }
        UploadOutcome::Updated => StatusCode::NO_CONTENT.into_response(),
    })
}
