use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::ContainerFile;
use crate::application::errors::{container_not_found, storage_failure, ContainerFilesError};
use crate::application::log_events::LogEvent;
use crate::application::ports::{BlobGateway, StorageError, Telemetry, TraceContext};
use crate::application::validation::parse_container_param;
use crate::domain::errors::ErrorCode;
use crate::domain::validation::CONTAINER_NAME_PARAM;
use crate::domain::value_objects::ContainerName;

/// Use case: List the files of a container
pub struct ListFilesUseCase {
    gateway: Arc<dyn BlobGateway>,
    telemetry: Arc<dyn Telemetry>,
}

impl ListFilesUseCase {
    pub fn new(gateway: Arc<dyn BlobGateway>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self { gateway, telemetry }
    }

    /// Names come back in backend order, not sorted
    pub async fn execute(
        &self,
        container_name: &str,
    ) -> Result<Vec<ContainerFile>, ContainerFilesError> {
        let trace = TraceContext::for_container(container_name);
        self.telemetry.track_trace("GetFilesURLVariables", &trace);

        let container = parse_container_param(container_name).inspect_err(|_| {
            self.telemetry.track_event("InvalidParamsGetFiles", &trace);
            warn!(
                event_id = LogEvent::InvalidItem.id(),
                container_name, "Invalid list parameters"
            );
        })?;

        let failed = |error: StorageError| self.storage_failed(error, &trace, &container);

        if !self
            .gateway
            .container_exists(container.as_str())
            .await
            .map_err(failed)?
        {
            self.telemetry.track_trace("ContainerNoExistGetFiles", &trace);
            warn!(
                event_id = LogEvent::ContainerNotFound.id(),
                container = %container,
                "Container not found"
            );
            return Err(container_not_found(&container));
        }

        let names = self
            .gateway
            .list_blobs(container.as_str())
            .await
            .map_err(failed)?;

        self.telemetry.track_event("GetFiles", &trace);
        info!(
            event_id = LogEvent::GetItemList.id(),
            container = %container,
            count = names.len(),
            "List files"
        );

        Ok(names
            .into_iter()
            .map(|name| ContainerFile { name })
            .collect())
    }

    fn storage_failed(
        &self,
        error: StorageError,
        trace: &TraceContext,
        container: &ContainerName,
    ) -> ContainerFilesError {
        self.telemetry.track_exception(&error.to_string(), trace);
        warn!(
            event_id = LogEvent::InternalError.id(),
            %error,
            container = %container,
            "List files failed"
        );

        ContainerFilesError::single(storage_failure(
            &error,
            ErrorCode::ServerError,
            CONTAINER_NAME_PARAM,
            Some(container.to_string()),
        ))
    }
}
