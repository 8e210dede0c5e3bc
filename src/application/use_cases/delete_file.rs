use std::sync::Arc;
use tracing::{info, warn};

use crate::application::errors::{
    container_not_found, file_not_found, storage_failure, ContainerFilesError,
};
use crate::application::log_events::LogEvent;
use crate::application::ports::{BlobGateway, StorageError, Telemetry, TraceContext};
use crate::application::validation::parse_file_params;
use crate::domain::errors::ErrorCode;
use crate::domain::validation::FILE_NAME_PARAM;

/// Use case: Delete an existing file
pub struct DeleteFileUseCase {
    gateway: Arc<dyn BlobGateway>,
    telemetry: Arc<dyn Telemetry>,
}

impl DeleteFileUseCase {
    pub fn new(gateway: Arc<dyn BlobGateway>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self { gateway, telemetry }
    }

    /// Execute delete workflow
    pub async fn execute(
        &self,
        container_name: &str,
        file_name: &str,
    ) -> Result<(), ContainerFilesError> {
        let trace = TraceContext::for_file(container_name, file_name);
        self.telemetry.track_trace("DeleteFilesURLVariables", &trace);

        // 1. Validate
        let (container, file) = parse_file_params(container_name, file_name).inspect_err(|_| {
            self.telemetry.track_event("InvalidParamsDeleteFile", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                file_name, container_name, "Invalid delete parameters"
            );
        })?;

        let failed = |error: StorageError| self.storage_failed(error, &trace, file_name);

        // 2. Container must exist
        if !self
            .gateway
            .container_exists(container.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry
                .track_event("ContainerNoExistDeleteFile", &trace);
            warn!(
                event_id = LogEvent::ContainerNotFound.id(),
                file_name,
                container = %container,
                "Container does not exist"
            );
            return Err(container_not_found(&container));
        }

        // 3. File must exist
        if !self
            .gateway
            .blob_exists(container.as_str(), file.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry.track_event("FileNoExistDeleteFile", &trace);
            warn!(
                event_id = LogEvent::DeleteItemNotFound.id(),
                file_name,
                container = %container,
                "File does not exist"
            );
            return Err(file_not_found(&file));
        }

        // 4. Delete
        info!(
            event_id = LogEvent::DeleteItem.id(),
            file_name,
            container = %container,
            "Deleting file"
        );
        self.telemetry.track_event("DeleteFile", &trace);

        self.gateway
            .delete_blob(container.as_str(), file.as_str())
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
            Some(_) => LogEvent::DeleteItemError,
            None => LogEvent::InternalError,
        };
        warn!(event_id = event.id(), %error, file_name, "Delete failed");

        ContainerFilesError::single(storage_failure(
            &error,
            ErrorCode::EntityNoDeleted,
            FILE_NAME_PARAM,
            Some(file_name.to_string()),
        ))
    }
}
