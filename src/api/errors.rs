use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::errors::ContainerFilesError;
use crate::domain::errors::ErrorResponse;

/// API error response
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the full list of collected errors
    BadRequest(Vec<ErrorResponse>),
    /// 404 with a single error object
    NotFound(ErrorResponse),
    /// Request rejected before it reached a use case (body limit, broken multipart)
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(errors) => (status, Json(errors)).into_response(),
            ApiError::NotFound(error) => (status, Json(error)).into_response(),
            ApiError::Rejected { message, .. } => {
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

impl From<ContainerFilesError> for ApiError {
    fn from(err: ContainerFilesError) -> Self {
        match err {
            ContainerFilesError::BadRequest(errors) => ApiError::BadRequest(errors),
            ContainerFilesError::NotFound(error) => ApiError::NotFound(error),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}
