use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::AccessPolicy;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend answered with a non-success status
    #[error("{description}")]
    Response { status: u16, description: String },

    /// The request never produced a response (connect, timeout, body stream)
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn response(status: u16, description: impl Into<String>) -> Self {
        Self::Response {
            status,
            description: description.into(),
        }
    }

    /// Backend answered 409, e.g. a container created by a concurrent request
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Response { status: 409, .. })
    }

    /// Status description reported by the backend, if it answered at all
    pub fn transport_detail(&self) -> Option<&str> {
        match self {
            StorageError::Response { description, .. } => Some(description),
            _ => None,
        }
    }
}

/// Type alias for async reader
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// Blob content opened for reading
pub struct DownloadedBlob {
    pub content_type: String,
    pub content_length: Option<u64>,
    pub reader: BlobReader,
}

impl std::fmt::Debug for DownloadedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadedBlob")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Port for the blob-storage account behind the API.
///
/// Container names passed in are already lowercased.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobGateway: Send + Sync {
    async fn container_exists(&self, container: &str) -> Result<bool, StorageError>;

    /// Create a container with the given anonymous access level
    async fn create_container(
        &self,
        container: &str,
        policy: AccessPolicy,
    ) -> Result<(), StorageError>;

    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool, StorageError>;

    /// Create or overwrite a block blob
    async fn upload_blob(
        &self,
        container: &str,
        blob: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError>;

    async fn download_blob(
        &self,
        container: &str,
        blob: &str,
    ) -> Result<DownloadedBlob, StorageError>;

    /// Delete a blob; succeeds if it is already gone
    async fn delete_blob(&self, container: &str, blob: &str) -> Result<(), StorageError>;

    /// Blob names in the order the backend returns them
    async fn list_blobs(&self, container: &str) -> Result<Vec<String>, StorageError>;

    /// Direct URL of a blob, used for public containers
    fn blob_url(&self, container: &str, blob: &str) -> String;
}
