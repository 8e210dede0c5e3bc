use std::sync::Arc;
use tracing::{info, warn};

use crate::application::errors::{
    container_not_found, file_not_found, storage_failure, ContainerFilesError,
};
use crate::application::log_events::LogEvent;
use crate::application::ports::{
    BlobGateway, DownloadedBlob, StorageError, Telemetry, TraceContext,
};
use crate::application::validation::parse_file_params;
use crate::domain::errors::ErrorCode;
use crate::domain::validation::FILE_NAME_PARAM;

/// Use case: Open a file for download
pub struct GetFileUseCase {
    gateway: Arc<dyn BlobGateway>,
    telemetry: Arc<dyn Telemetry>,
}

impl GetFileUseCase {
    pub fn new(gateway: Arc<dyn BlobGateway>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self { gateway, telemetry }
    }

    pub async fn execute(
        &self,
        container_name: &str,
        file_name: &str,
    ) -> Result<DownloadedBlob, ContainerFilesError> {
        let trace = TraceContext::for_file(container_name, file_name);
        self.telemetry.track_trace("GetFilesURLVariables", &trace);

        let (container, file) = parse_file_params(container_name, file_name).inspect_err(|_| {
            self.telemetry.track_event("InvalidParamsGetFile", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                file_name, container_name, "Invalid get parameters"
            );
        })?;

        let failed = |error: StorageError| self.storage_failed(error, &trace, file_name);

        if !self
            .gateway
            .container_exists(container.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry.track_event("ContainerNoExistGetFile", &trace);
            warn!(
                event_id = LogEvent::ContainerNotFound.id(),
                file_name,
                container = %container,
                "Container not found"
            );
            return Err(container_not_found(&container));
        }

        if !self
            .gateway
            .blob_exists(container.as_str(), file.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry.track_event("FileNoExistGetFile", &trace);
            warn!(
                event_id = LogEvent::GetItemNotFound.id(),
                file_name,
                container = %container,
                "File not found"
            );
            return Err(file_not_found(&file));
        }

        info!(
            event_id = LogEvent::GetItem.id(),
            file_name,
            container = %container,
            "Get file"
        );

        let blob = self
            .gateway
            .download_blob(container.as_str(), file.as_str())
            .await
            .map_err(failed)?;

        self.telemetry.track_event("GetFile", &trace);
        Ok(blob)
    }

    // A failed download after a positive existence check still reports
    // EntityNoFound; clients depend on that number.
    fn storage_failed(
        &self,
        error: StorageError,
        trace: &TraceContext,
        file_name: &str,
    ) -> ContainerFilesError {
        self.telemetry.track_exception(&error.to_string(), trace);
        let event = match error.transport_detail() {
            Some(_) => LogEvent::GetItemError,
            None => LogEvent::InternalError,
        };
        warn!(event_id = event.id(), %error, file_name, "Get file failed");

        ContainerFilesError::single(storage_failure(
            &error,
            ErrorCode::EntityNoFound,
            FILE_NAME_PARAM,
            Some(file_name.to_string()),
        ))
    }
}
