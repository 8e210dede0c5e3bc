//! Error type shared by the container-file use cases
//!
//! Only two response shapes exist: a list of entries for 400 and a single
//! entry for 404. Every failure branch of every endpoint ends up in one of them.

use thiserror::Error;

use crate::application::dto::PayloadReadError;
use crate::application::ports::StorageError;
use crate::domain::errors::{ErrorCode, ErrorResponse};
use crate::domain::validation::{CONTAINER_NAME_PARAM, FILE_DATA_PARAM, FILE_NAME_PARAM};
use crate::domain::value_objects::{ContainerName, FileName};

#[derive(Debug, Error)]
pub enum ContainerFilesError {
    #[error("Bad request: {} error(s)", .0.len())]
    BadRequest(Vec<ErrorResponse>),

    #[error("Not found: {} = {:?}", .0.parameter_name, .0.parameter_value)]
    NotFound(ErrorResponse),
}

impl ContainerFilesError {
    pub fn single(error: ErrorResponse) -> Self {
        ContainerFilesError::BadRequest(vec![error])
    }

    pub fn errors(&self) -> &[ErrorResponse] {
        match self {
            ContainerFilesError::BadRequest(errors) => errors,
            ContainerFilesError::NotFound(error) => std::slice::from_ref(error),
        }
    }
}

/// 404 for a container that does not exist; reports the lowercased name
pub fn container_not_found(container: &ContainerName) -> ContainerFilesError {
    ContainerFilesError::NotFound(ErrorResponse::new(
        ErrorCode::EntityNoFound,
        CONTAINER_NAME_PARAM,
        Some(container.to_string()),
    ))
}

/// 404 for a blob that does not exist; reports the name as given
pub fn file_not_found(file: &FileName) -> ContainerFilesError {
    ContainerFilesError::NotFound(ErrorResponse::new(
        ErrorCode::EntityNoFound,
        FILE_NAME_PARAM,
        Some(file.to_string()),
    ))
}

/// Request body broke off while the file part was being read
pub fn payload_unreadable(error: &PayloadReadError) -> ContainerFilesError {
    ContainerFilesError::single(
        ErrorResponse::new(ErrorCode::ServerError, FILE_DATA_PARAM, None)
            .with_detail(&error.to_string()),
    )
}

/// Classify a failed storage call.
///
/// A backend that answered gets `code` plus its status description; anything
/// without a response is a `ServerError` carrying the raw message.
pub fn storage_failure(
    error: &StorageError,
    code: ErrorCode,
    parameter_name: &str,
    parameter_value: Option<String>,
) -> ErrorResponse {
    match error.transport_detail() {
        Some(detail) => {
            ErrorResponse::new(code, parameter_name, parameter_value).with_detail(detail)
        }
        None => ErrorResponse::new(ErrorCode::ServerError, parameter_name, parameter_value)
            .with_detail(&error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failure_with_response_keeps_code() {
        let error = StorageError::response(409, "Conflict");
        let response = storage_failure(
            &error,
            ErrorCode::EntityNoDeleted,
            "fileName",
            Some("a.txt".into()),
        );

        assert_eq!(response.error_number, 8);
        assert!(response.error_description.ends_with(" Conflict"));
        assert_eq!(response.parameter_value.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_storage_failure_without_response_is_server_error() {
        let error = StorageError::Transport("connection refused".to_string());
        let response = storage_failure(&error, ErrorCode::EntityNoUploaded, "fileData", None);

        assert_eq!(response.error_number, 9);
        assert!(response.error_description.contains("connection refused"));
        assert_eq!(response.parameter_name, "fileData");
    }

    #[test]
    fn test_payload_unreadable_is_server_error_on_file_data() {
        let err = payload_unreadable(&PayloadReadError("incomplete field data".to_string()));

        let errors = err.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 9);
        assert_eq!(errors[0].parameter_name, "fileData");
        assert_eq!(errors[0].parameter_value, None);
        assert!(errors[0].error_description.ends_with(" incomplete field data"));
    }

    #[test]
    fn test_not_found_shapes() {
        let container = ContainerName::new("MyFiles").unwrap();
        let file = FileName::new("Report.PDF").unwrap();

        let ContainerFilesError::NotFound(c) = container_not_found(&container) else {
            panic!("expected NotFound");
        };
        assert_eq!(c.error_number, 4);
        assert_eq!(c.parameter_name, "containername");
        assert_eq!(c.parameter_value.as_deref(), Some("myfiles"));

        let ContainerFilesError::NotFound(f) = file_not_found(&file) else {
            panic!("expected NotFound");
        };
        assert_eq!(f.parameter_name, "fileName");
        assert_eq!(f.parameter_value.as_deref(), Some("Report.PDF"));
    }
}
