use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::ReceivedPayload;
use crate::application::errors::{
    container_not_found, file_not_found, payload_unreadable, storage_failure, ContainerFilesError,
};
use crate::application::log_events::LogEvent;
use crate::application::ports::{BlobGateway, StorageError, Telemetry, TraceContext};
use crate::application::validation::{parse_file_params, require_payload};
use crate::domain::errors::ErrorCode;
use crate::domain::validation::FILE_DATA_PARAM;

/// Use case: Overwrite a file that must already exist
pub struct PatchFileUseCase {
    gateway: Arc<dyn BlobGateway>,
    telemetry: Arc<dyn Telemetry>,
}

impl PatchFileUseCase {
    pub fn new(gateway: Arc<dyn BlobGateway>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self { gateway, telemetry }
    }

    pub async fn execute(
        &self,
        container_name: &str,
        file_name: &str,
        payload: ReceivedPayload,
    ) -> Result<(), ContainerFilesError> {
        let trace = TraceContext::for_file(container_name, file_name);
        self.telemetry.track_trace("PatchFilesURLVariables", &trace);

        let (container, file) = parse_file_params(container_name, file_name).inspect_err(|_| {
            self.telemetry.track_event("InvalidParamsPatchFile", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                file_name, container_name, "Invalid patch parameters"
            );
        })?;

        let payload = payload.map_err(|error| {
            self.telemetry.track_exception(&error.to_string(), &trace);
            warn!(
                event_id = LogEvent::InternalError.id(),
                %error,
                file_name,
                container = %container,
                "Patch file data unreadable"
            );
            payload_unreadable(&error)
        })?;
        let payload = require_payload(payload).inspect_err(|_| {
            self.telemetry.track_event("InvalidFileDataPatchFile", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                file_name,
                container = %container,
                "Patch without file data"
            );
        })?;

        let failed = |error: StorageError| self.storage_failed(error, &trace, file_name);

        if !self
            .gateway
            .container_exists(container.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry.track_event("ContainerNoPatchFile", &trace);
            warn!(
                event_id = LogEvent::ContainerNotFound.id(),
                file_name,
                container = %container,
                "Container does not exist"
            );
            return Err(container_not_found(&container));
        }

        if !self
            .gateway
            .blob_exists(container.as_str(), file.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry.track_event("FileNoExistPatchFile", &trace);
            warn!(
                event_id = LogEvent::UpdateItemNotFound.id(),
                file_name,
                container = %container,
                "File does not exist"
            );
            return Err(file_not_found(&file));
        }

        self.telemetry.track_event("FileUpdatedPatchFile", &trace);
        info!(
            event_id = LogEvent::UpdateItem.id(),
            file_name,
            container = %container,
            "Updating file"
        );

        self.gateway
            .upload_blob(
                container.as_str(),
                file.as_str(),
                &payload.content_type,
                payload.data,
            )
            .await
            .map_err(failed)
    }

    fn storage_failed(
        &self,
        error: StorageError,
        trace: &TraceContext,
        file_name: &str,
    ) -> ContainerFilesError {
        self.telemetry.track_exception(&error.to_string(), trace);
        let event = match error.transport_detail() {
            Some(_) => LogEvent::UpdateItemError,
            None => LogEvent::InternalError,
        };
        warn!(event_id = event.id(), %error, file_name, "Patch failed");

        ContainerFilesError::single(storage_failure(
            &error,
            ErrorCode::EntityNoUploaded,
            FILE_DATA_PARAM,
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{FilePayload, PayloadReadError};
    use crate::application::ports::MockBlobGateway;
    use crate::application::use_cases::test_utils::RecordingTelemetry;

    fn payload() -> ReceivedPayload {
        Ok(Some(FilePayload::new("text/plain", "new content")))
    }

    #[tokio::test]
    async fn test_patch_happy_path() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway
            .expect_container_exists()
            .withf(|c| c == "docs")
            .returning(|_| Ok(true));
        gateway
            .expect_blob_exists()
            .withf(|c, b| c == "docs" && b == "Readme.md")
            .returning(|_, _| Ok(true));
        gateway
            .expect_upload_blob()
            .withf(|_, b, ct, data| b == "Readme.md" && ct == "text/plain" && data.as_ref() == b"new content")
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let telemetry = RecordingTelemetry::new();
        let use_case = PatchFileUseCase::new(Arc::new(gateway), telemetry.clone());

        // Act
        let result = use_case.execute("DOCS", "Readme.md", payload()).await;

        // Assert
        assert!(result.is_ok());
        assert!(telemetry.contains("FileUpdatedPatchFile"));
    }

    #[tokio::test]
    async fn test_patch_missing_container() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(false));
        gateway.expect_blob_exists().never();
        gateway.expect_upload_blob().never();
        let use_case = PatchFileUseCase::new(Arc::new(gateway), RecordingTelemetry::new());

        // Act
        let result = use_case.execute("Missing", "a.txt", payload()).await;

        // Assert
        let Err(ContainerFilesError::NotFound(error)) = result else {
            panic!("expected NotFound");
        };
        assert_eq!(error.error_number, 4);
        assert_eq!(error.parameter_name, "containername");
        assert_eq!(error.parameter_value.as_deref(), Some("missing"));
    }

    #[tokio::test]
    async fn test_patch_missing_file() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(true));
        gateway.expect_blob_exists().returning(|_, _| Ok(false));
        gateway.expect_upload_blob().never();
        let use_case = PatchFileUseCase::new(Arc::new(gateway), RecordingTelemetry::new());

        // Act
        let result = use_case.execute("docs", "Ghost.TXT", payload()).await;

        // Assert
        let Err(ContainerFilesError::NotFound(error)) = result else {
            panic!("expected NotFound");
        };
        assert_eq!(error.parameter_name, "fileName");
        assert_eq!(error.parameter_value.as_deref(), Some("Ghost.TXT"));
    }

    #[tokio::test]
    async fn test_patch_requires_payload() {
        // Arrange
        let gateway = MockBlobGateway::new();
        let use_case = PatchFileUseCase::new(Arc::new(gateway), RecordingTelemetry::new());

        // Act
        let result = use_case
            .execute("docs", "a.txt", Ok(Some(FilePayload::new("text/plain", ""))))
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors[0].error_number, 6);
        assert_eq!(errors[0].parameter_name, "fileData");
    }

    #[tokio::test]
    async fn test_patch_unreadable_payload_skips_storage() {
        // Arrange
        let gateway = MockBlobGateway::new();
        let telemetry = RecordingTelemetry::new();
        let use_case = PatchFileUseCase::new(Arc::new(gateway), telemetry.clone());

        // Act
        let result = use_case
            .execute(
                "docs",
                "a.txt",
                Err(PayloadReadError("connection reset".to_string())),
            )
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 9);
        assert_eq!(errors[0].parameter_name, "fileData");
        assert!(errors[0].error_description.contains("connection reset"));
        assert!(telemetry.contains("exception"));
    }

    #[tokio::test]
    async fn test_patch_upload_failure() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(true));
        gateway.expect_blob_exists().returning(|_, _| Ok(true));
        gateway
            .expect_upload_blob()
            .returning(|_, _, _, _| Err(StorageError::response(412, "Precondition Failed")));
        let use_case = PatchFileUseCase::new(Arc::new(gateway), RecordingTelemetry::new());

        // Act
        let result = use_case.execute("docs", "a.txt", payload()).await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 7);
        assert!(errors[0].error_description.contains("Precondition Failed"));
    }
}
