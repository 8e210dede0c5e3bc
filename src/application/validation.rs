//! Request-level validation shared by the use cases
//!
//! Wraps the pure domain checks into the use-case error type so every
//! endpoint fails fast with the same 400 body.

use crate::application::dto::FilePayload;
use crate::application::errors::ContainerFilesError;
use crate::domain::errors::{ErrorCode, ErrorResponse};
use crate::domain::validation::FILE_DATA_PARAM;
use crate::domain::value_objects::{ContainerName, FileName};

/// Validate container and file route parameters together
///
/// All violations of both parameters are reported, container errors first.
pub fn parse_file_params(
    container_name: &str,
    file_name: &str,
) -> Result<(ContainerName, FileName), ContainerFilesError> {
    match (ContainerName::new(container_name), FileName::new(file_name)) {
        (Ok(container), Ok(file)) => Ok((container, file)),
        (container, file) => {
            let mut errors = container.err().unwrap_or_default();
            errors.extend(file.err().unwrap_or_default());
            Err(ContainerFilesError::BadRequest(errors))
        }
    }
}

pub fn parse_container_param(container_name: &str) -> Result<ContainerName, ContainerFilesError> {
    ContainerName::new(container_name).map_err(ContainerFilesError::BadRequest)
}

/// The uploaded file must be present and carry at least one byte
pub fn require_payload(payload: Option<FilePayload>) -> Result<FilePayload, ContainerFilesError> {
    match payload {
        Some(payload) if !payload.is_empty() => Ok(payload),
        _ => Err(ContainerFilesError::single(ErrorResponse::new(
            ErrorCode::ParameterCannotBeNull,
            FILE_DATA_PARAM,
            None,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_params_ok() {
        let (container, file) = parse_file_params("PublicUpload", "Kitten7.JPG").unwrap();
        assert_eq!(container.as_str(), "publicupload");
        assert_eq!(file.as_str(), "Kitten7.JPG");
    }

    #[test]
    fn test_parse_file_params_collects_both() {
        let err = parse_file_params("", "").unwrap_err();
        let names: Vec<_> = err.errors().iter().map(|e| e.parameter_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["containername", "containername", "fileName", "fileName"]
        );
    }

    #[test]
    fn test_require_payload() {
        assert!(require_payload(Some(FilePayload::new("text/plain", "hi"))).is_ok());

        for payload in [None, Some(FilePayload::new("text/plain", ""))] {
            let err = require_payload(payload).unwrap_err();
            let errors = err.errors();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].error_number, 6);
            assert_eq!(errors[0].parameter_name, "fileData");
            assert_eq!(errors[0].parameter_value, None);
        }
    }
}
