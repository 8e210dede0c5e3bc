use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::dto::{content_file_path, FilePayload, ReceivedPayload, UploadOutcome};
use crate::application::errors::{payload_unreadable, storage_failure, ContainerFilesError};
use crate::application::log_events::LogEvent;
use crate::application::ports::{BlobGateway, StorageError, Telemetry, TraceContext};
use crate::application::validation::{parse_file_params, require_payload};
use crate::domain::errors::ErrorCode;
use crate::domain::validation::FILE_DATA_PARAM;
use crate::domain::value_objects::{AccessPolicy, ContainerName, FileName};

/// Use case: Create or overwrite a file, provisioning its container on demand
pub struct UploadFileUseCase {
    gateway: Arc<dyn BlobGateway>,
    telemetry: Arc<dyn Telemetry>,
    public_marker: String,
}

impl UploadFileUseCase {
    pub fn new(
        gateway: Arc<dyn BlobGateway>,
        telemetry: Arc<dyn Telemetry>,
        public_marker: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            telemetry,
            public_marker: public_marker.into().to_lowercase(),
        }
    }

    /// Execute upload workflow
    pub async fn execute(
        &self,
        container_name: &str,
        file_name: &str,
        payload: ReceivedPayload,
    ) -> Result<UploadOutcome, ContainerFilesError> {
        let trace = TraceContext::for_file(container_name, file_name);
        self.telemetry.track_trace("UploadFilesURLVariables", &trace);

        // 1. Validate route parameters
        let (container, file) = parse_file_params(container_name, file_name).inspect_err(|_| {
            self.telemetry.track_event("InvalidParamsUploadFile", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                file_name, container_name, "Invalid upload parameters"
            );
        })?;

        // 2. Derive access policy from the lowercased name
        let policy = AccessPolicy::for_container(&container, &self.public_marker);

        // 3. Require a complete, non-empty file
        let payload = payload.map_err(|error| {
            self.telemetry.track_exception(&error.to_string(), &trace);
            warn!(
                event_id = LogEvent::InternalError.id(),
                %error,
                file_name,
                container = %container,
                "Upload file data unreadable"
            );
            payload_unreadable(&error)
        })?;
        let payload = require_payload(payload).inspect_err(|_| {
            self.telemetry.track_event("InvalidFileDataUploadFile", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                file_name,
                container = %container,
                "Upload without file data"
            );
        })?;

        // 4. Store, then classify any backend failure
        self.store(&container, &file, policy, payload, &trace)
            .await
            .map_err(|error| {
                self.telemetry.track_exception(&error.to_string(), &trace);
                let event = match error.transport_detail() {
                    Some(_) => LogEvent::UploadItemError,
                    None => LogEvent::InternalError,
                };
                warn!(
                    event_id = event.id(),
                    %error,
                    file_name,
                    container = %container,
                    "Upload failed"
                );
                ContainerFilesError::single(storage_failure(
                    &error,
                    ErrorCode::EntityNoUploaded,
                    FILE_DATA_PARAM,
                    None,
                ))
            })
    }

    async fn store(
        &self,
        container: &ContainerName,
        file: &FileName,
        policy: AccessPolicy,
        payload: FilePayload,
        trace: &TraceContext,
    ) -> Result<UploadOutcome, StorageError> {
        if !self.gateway.container_exists(container.as_str()).await? {
            self.telemetry.track_event("CreateContainerUploadFile", trace);
            info!(container = %container, %policy, "Creating container");
            match self
                .gateway
                .create_container(container.as_str(), policy)
                .await
            {
                Err(error) if error.is_conflict() => {
                    debug!(container = %container, "Container created concurrently");
                }
                result => result?,
            }
        }

        let existed = self
            .gateway
            .blob_exists(container.as_str(), file.as_str())
            .await?;

        self.gateway
            .upload_blob(
                container.as_str(),
                file.as_str(),
                &payload.content_type,
                payload.data,
            )
            .await?;

        if existed {
            self.telemetry.track_event("UpdateFileUploaded", trace);
            info!(
                event_id = LogEvent::UpdateItem.id(),
                file_name = %file,
                container = %container,
                "File updated"
            );
            return Ok(UploadOutcome::Updated);
        }

        info!(
            event_id = LogEvent::UploadItem.id(),
            file_name = %file,
            container = %container,
            "File uploaded"
        );

        let location = if policy.is_public() {
            self.telemetry.track_event("CreateNewFilePublic", trace);
            self.gateway.blob_url(container.as_str(), file.as_str())
        } else {
            self.telemetry.track_event("CreateNewFilePrivate", trace);
            content_file_path(container, file)
        };

        Ok(UploadOutcome::Created { location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::PayloadReadError;
    use crate::application::ports::MockBlobGateway;
    use crate::application::use_cases::test_utils::RecordingTelemetry;
    use crate::domain::value_objects::DEFAULT_PUBLIC_MARKER;

    fn payload() -> ReceivedPayload {
        Ok(Some(FilePayload::new("image/jpeg", vec![0xFF, 0xD8, 0xFF])))
    }

    fn use_case(gateway: MockBlobGateway, telemetry: Arc<RecordingTelemetry>) -> UploadFileUseCase {
        UploadFileUseCase::new(Arc::new(gateway), telemetry, DEFAULT_PUBLIC_MARKER)
    }

    #[tokio::test]
    async fn test_upload_creates_public_container_and_returns_blob_url() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway
            .expect_container_exists()
            .withf(|c| c == "publicupload")
            .times(1)
            .returning(|_| Ok(false));
        gateway
            .expect_create_container()
            .withf(|c, p| c == "publicupload" && *p == AccessPolicy::Public)
            .times(1)
            .returning(|_, _| Ok(()));
        gateway
            .expect_blob_exists()
            .withf(|c, b| c == "publicupload" && b == "Kitten7.JPG")
            .times(1)
            .returning(|_, _| Ok(false));
        gateway
            .expect_upload_blob()
            .withf(|_, _, ct, data| ct == "image/jpeg" && data.len() == 3)
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        gateway
            .expect_blob_url()
            .times(1)
            .returning(|c, b| format!("https://acct.blob.core.windows.net/{}/{}", c, b));
        let telemetry = RecordingTelemetry::new();

        // Act
        let result = use_case(gateway, Arc::clone(&telemetry))
            .execute("PublicUpload", "Kitten7.JPG", payload())
            .await;

        // Assert
        assert_eq!(
            result.unwrap(),
            UploadOutcome::Created {
                location: "https://acct.blob.core.windows.net/publicupload/Kitten7.JPG"
                    .to_string()
            }
        );
        assert!(telemetry.contains("CreateContainerUploadFile"));
        assert!(telemetry.contains("CreateNewFilePublic"));
    }

    #[tokio::test]
    async fn test_upload_when_container_created_concurrently() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(false));
        gateway.expect_create_container().times(1).returning(|_, _| {
            Err(StorageError::response(
                409,
                "The specified container already exists.",
            ))
        });
        gateway.expect_blob_exists().returning(|_, _| Ok(false));
        gateway
            .expect_upload_blob()
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        // Act
        let result = use_case(gateway, RecordingTelemetry::new())
            .execute("photos", "cat.png", payload())
            .await;

        // Assert
        assert_eq!(
            result.unwrap(),
            UploadOutcome::Created {
                location: "/api/v1/photos/contentfiles/cat.png".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_mixed_case_marker_still_matches() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(false));
        gateway
            .expect_create_container()
            .withf(|c, p| c == "mypublicfiles" && *p == AccessPolicy::Public)
            .times(1)
            .returning(|_, _| Ok(()));
        gateway.expect_blob_exists().returning(|_, _| Ok(false));
        gateway.expect_upload_blob().returning(|_, _, _, _| Ok(()));
        gateway
            .expect_blob_url()
            .returning(|c, b| format!("https://acct.blob.core.windows.net/{}/{}", c, b));
        let use_case =
            UploadFileUseCase::new(Arc::new(gateway), RecordingTelemetry::new(), "Public");

        // Act
        let result = use_case
            .execute("MyPublicFiles", "a.txt", payload())
            .await;

        // Assert
        assert!(matches!(result, Ok(UploadOutcome::Created { .. })));
    }

    #[tokio::test]
    async fn test_upload_private_returns_resource_path() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(true));
        gateway.expect_create_container().never();
        gateway.expect_blob_exists().returning(|_, _| Ok(false));
        gateway.expect_upload_blob().returning(|_, _, _, _| Ok(()));
        gateway.expect_blob_url().never();

        // Act
        let result = use_case(gateway, RecordingTelemetry::new())
            .execute("privateupload", "notes.txt", payload())
            .await;

        // Assert
        assert_eq!(
            result.unwrap(),
            UploadOutcome::Created {
                location: "/api/v1/privateupload/contentfiles/notes.txt".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upload_existing_blob_is_update() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(true));
        gateway.expect_blob_exists().returning(|_, _| Ok(true));
        gateway
            .expect_upload_blob()
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let telemetry = RecordingTelemetry::new();

        // Act
        let result = use_case(gateway, Arc::clone(&telemetry))
            .execute("photos", "cat.png", payload())
            .await;

        // Assert
        assert_eq!(result.unwrap(), UploadOutcome::Updated);
        assert!(telemetry.contains("UpdateFileUploaded"));
    }

    #[tokio::test]
    async fn test_upload_invalid_params_skip_storage() {
        // Arrange
        let gateway = MockBlobGateway::new(); // Note: No expectations
        let telemetry = RecordingTelemetry::new();

        // Act
        let result = use_case(gateway, Arc::clone(&telemetry))
            .execute("12", "1", payload())
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 5);
        assert_eq!(errors[0].parameter_name, "containername");
        assert_eq!(errors[0].parameter_value.as_deref(), Some("12"));
        assert!(telemetry.contains("InvalidParamsUploadFile"));
    }

    #[tokio::test]
    async fn test_upload_without_payload() {
        // Arrange
        let gateway = MockBlobGateway::new();

        // Act
        let result = use_case(gateway, RecordingTelemetry::new())
            .execute("photos", "cat.png", Ok(None))
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 6);
        assert_eq!(errors[0].parameter_name, "fileData");
        assert_eq!(errors[0].parameter_value, None);
    }

    #[tokio::test]
    async fn test_upload_truncated_payload_is_server_error() {
        // Arrange
        let gateway = MockBlobGateway::new(); // Note: No expectations
        let telemetry = RecordingTelemetry::new();

        // Act
        let result = use_case(gateway, Arc::clone(&telemetry))
            .execute(
                "photos",
                "cat.png",
                Err(PayloadReadError("incomplete field data".to_string())),
            )
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 9);
        assert_eq!(errors[0].parameter_name, "fileData");
        assert_eq!(errors[0].parameter_value, None);
        assert!(errors[0].error_description.ends_with(" incomplete field data"));
        assert!(telemetry.contains("exception"));
    }

    #[tokio::test]
    async fn test_upload_backend_rejection_maps_to_not_uploaded() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway.expect_container_exists().returning(|_| Ok(true));
        gateway.expect_blob_exists().returning(|_, _| Ok(false));
        gateway
            .expect_upload_blob()
            .returning(|_, _, _, _| Err(StorageError::response(403, "Forbidden")));
        let telemetry = RecordingTelemetry::new();

        // Act
        let result = use_case(gateway, Arc::clone(&telemetry))
            .execute("photos", "cat.png", payload())
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors[0].error_number, 7);
        assert_eq!(errors[0].parameter_name, "fileData");
        assert!(errors[0].error_description.ends_with(" Forbidden"));
        assert!(telemetry.contains("exception"));
    }

    #[tokio::test]
    async fn test_upload_transport_failure_is_server_error() {
        // Arrange
        let mut gateway = MockBlobGateway::new();
        gateway
            .expect_container_exists()
            .returning(|_| Err(StorageError::Transport("dns error".to_string())));

        // Act
        let result = use_case(gateway, RecordingTelemetry::new())
            .execute("photos", "cat.png", payload())
            .await;

        // Assert
        let Err(ContainerFilesError::BadRequest(errors)) = result else {
            panic!("expected BadRequest");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_number, 9);
        assert!(errors[0].error_description.contains("dns error"));
    }
}
