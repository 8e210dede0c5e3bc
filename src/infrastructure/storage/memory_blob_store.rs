//! In-memory blob account.
//!
//! Containers and blobs live in a `tokio::sync::RwLock<HashMap<...>>`. Blobs
//! inside a container are kept in a `BTreeMap` so listing returns names in the
//! same lexicographic order the real service uses.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use tokio::sync::RwLock;

use crate::application::ports::{BlobGateway, DownloadedBlob, StorageError};
use crate::domain::value_objects::AccessPolicy;

#[derive(Debug, Clone)]
struct StoredBlob {
    content_type: String,
    data: Bytes,
}

#[derive(Debug, Default)]
struct MemoryContainer {
    policy: AccessPolicy,
    blobs: BTreeMap<String, StoredBlob>,
}

pub struct MemoryBlobStore {
    containers: RwLock<HashMap<String, MemoryContainer>>,
    /// Reported as the account endpoint in blob URLs
    base_url: String,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Access level a container was created with
    pub async fn container_policy(&self, container: &str) -> Option<AccessPolicy> {
        self.containers
            .read()
            .await
            .get(container)
            .map(|c| c.policy)
    }

    fn container_missing() -> StorageError {
        StorageError::response(404, "The specified container does not exist.")
    }

    fn blob_missing() -> StorageError {
        StorageError::response(404, "The specified blob does not exist.")
    }
}

#[async_trait]
impl BlobGateway for MemoryBlobStore {
    async fn container_exists(&self, container: &str) -> Result<bool, StorageError> {
        Ok(self.containers.read().await.contains_key(container))
    }

    async fn create_container(
        &self,
        container: &str,
        policy: AccessPolicy,
    ) -> Result<(), StorageError> {
        let mut containers = self.containers.write().await;
        // Already present: keep the policy it was created with
        if containers.contains_key(container) {
            return Ok(());
        }
        containers.insert(
            container.to_string(),
            MemoryContainer {
                policy,
                blobs: BTreeMap::new(),
            },
        );
        tracing::debug!(container, %policy, "Created in-memory container");
        Ok(())
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool, StorageError> {
        Ok(self
            .containers
            .read()
            .await
            .get(container)
            .is_some_and(|c| c.blobs.contains_key(blob)))
    }

    async fn upload_blob(
        &self,
        container: &str,
        blob: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError> {
        let mut containers = self.containers.write().await;
        let entry = containers
            .get_mut(container)
            .ok_or_else(Self::container_missing)?;
        entry.blobs.insert(
            blob.to_string(),
            StoredBlob {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(())
    }

    async fn download_blob(
        &self,
        container: &str,
        blob: &str,
    ) -> Result<DownloadedBlob, StorageError> {
        let containers = self.containers.read().await;
        let stored = containers
            .get(container)
            .ok_or_else(Self::container_missing)?
            .blobs
            .get(blob)
            .ok_or_else(Self::blob_missing)?
            .clone();

        Ok(DownloadedBlob {
            content_type: stored.content_type,
            content_length: Some(stored.data.len() as u64),
            reader: Box::pin(Cursor::new(stored.data)),
        })
    }

    async fn delete_blob(&self, container: &str, blob: &str) -> Result<(), StorageError> {
        if let Some(entry) = self.containers.write().await.get_mut(container) {
            entry.blobs.remove(blob);
        }
        Ok(())
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let containers = self.containers.read().await;
        let entry = containers
            .get(container)
            .ok_or_else(Self::container_missing)?;
        Ok(entry.blobs.keys().cloned().collect())
    }

    fn blob_url(&self, container: &str, blob: &str) -> String {
        format!("{}/{}/{}", self.base_url, container, blob)
    }
}
