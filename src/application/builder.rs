use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::api::router::AppState;
use crate::application::ports::{BlobGateway, Telemetry};
use crate::application::use_cases::{
    DeleteFileUseCase, GetFileUseCase, ListFilesUseCase, PatchFileUseCase, UploadFileUseCase,
};
use crate::config::{Config, StorageBackend};
use crate::infrastructure::storage::{AzureBlobStore, MemoryBlobStore, StorageConnectionString};
use crate::infrastructure::telemetry::TracingTelemetry;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    gateway: Option<Arc<dyn BlobGateway>>,
    telemetry: Arc<dyn Telemetry>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gateway: None,
            telemetry: Arc::new(TracingTelemetry),
        }
    }

    /// Connect the storage backend named by `STORAGE_BACKEND`
    pub fn with_storage(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let gateway: Arc<dyn BlobGateway> = match self.config.backend()? {
            StorageBackend::Azure => {
                let raw = self
                    .config
                    .storage_connection
                    .as_deref()
                    .ok_or("STORAGE_CONNECTION not configured")?;
                let connection = StorageConnectionString::parse(raw)?;
                info!(
                    account = %connection.account_name,
                    endpoint = %connection.blob_endpoint,
                    "Using Azure blob storage"
                );
                Arc::new(AzureBlobStore::new(
                    connection,
                    Duration::from_secs(self.config.http_timeout_secs),
                )?)
            }
            StorageBackend::Memory => {
                info!(
                    base_url = %self.config.memory_public_base_url,
                    "Using in-memory blob storage"
                );
                Arc::new(MemoryBlobStore::new(
                    self.config.memory_public_base_url.clone(),
                ))
            }
        };

        self.gateway = Some(gateway);
        Ok(self)
    }

    /// Use an already constructed gateway (tests, embedding)
    pub fn with_gateway(mut self, gateway: Arc<dyn BlobGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let gateway = self.gateway.ok_or("Storage gateway not initialized")?;
        let telemetry = self.telemetry;

        let state = AppState {
            upload_use_case: Arc::new(UploadFileUseCase::new(
                Arc::clone(&gateway),
                Arc::clone(&telemetry),
                self.config.public_container_marker.clone(),
            )),
            patch_use_case: Arc::new(PatchFileUseCase::new(
                Arc::clone(&gateway),
                Arc::clone(&telemetry),
            )),
            download_use_case: Arc::new(GetFileUseCase::new(
                Arc::clone(&gateway),
                Arc::clone(&telemetry),
            )),
            delete_use_case: Arc::new(DeleteFileUseCase::new(
                Arc::clone(&gateway),
                Arc::clone(&telemetry),
            )),
            list_use_case: Arc::new(ListFilesUseCase::new(gateway, telemetry)),
            max_upload_bytes: self.config.max_upload_bytes,
        };

        info!("Application layer initialized");
        Ok(state)
    }
}
