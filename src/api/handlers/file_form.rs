use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::http::StatusCode;

use crate::api::errors::ApiError;
use crate::application::dto::{FilePayload, PayloadReadError, ReceivedPayload};
use crate::domain::validation::FILE_DATA_PARAM;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Pull the `fileData` part out of a multipart form.
///
/// A request that is not multipart at all counts as "no file" so the use case
/// can report it as a missing parameter. A `fileData` part that breaks off is
/// handed on as a read error. Only an oversized body is rejected here.
pub async fn read_file_payload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ReceivedPayload, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Ok(Ok(None));
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(Ok(None)),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Unreadable multipart body");
                return Ok(Ok(None));
            }
        };

        if field.name() != Some(FILE_DATA_PARAM) {
            continue; // Ignore unknown fields.
        }

        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        return match field.bytes().await {
            Ok(data) => Ok(Ok(Some(FilePayload::new(content_type, data)))),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(e.into()),
            Err(e) => Ok(Err(PayloadReadError(e.body_text()))),
        };
    }
}
