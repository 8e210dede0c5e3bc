use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::ApiError;
use crate::application::use_cases::GetFileUseCase;
use crate::domain::errors::ErrorResponse;

/// GET /api/v1/{containername}/contentfiles/{fileName}
/// Stream the file back with its stored content type
#[utoipa::path(
    get,
    path = "/api/v1/{containername}/contentfiles/{fileName}",
    tag = "contentfiles",
    params(
        ("containername" = String, Path, description = "Container name"),
        ("fileName" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "Raw file content", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid parameters or storage failure", body = [ErrorResponse]),
        (status = 404, description = "Container or file does not exist", body = ErrorResponse)
    )
)]
pub async fn download_handler(
    State(use_case): State<Arc<GetFileUseCase>>,
    Path((container_name, file_name)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let blob = use_case.execute(&container_name, &file_name).await?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, blob.content_type);
    if let Some(length) = blob.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(ReaderStream::new(blob.reader)))
        .map_err(|e| ApiError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to build response: {}", e),
        })
}
