use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::value_objects::{ContainerName, FileName};

/// Mount point of the content-file routes
pub const API_BASE_PATH: &str = "/api/v1";

/// Unreserved characters stay as-is inside a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Canonical API path of a file: `/api/v1/{containername}/contentfiles/{fileName}`
pub fn content_file_path(container: &ContainerName, file: &FileName) -> String {
    format!(
        "{}/{}/contentfiles/{}",
        API_BASE_PATH,
        utf8_percent_encode(container.as_str(), PATH_SEGMENT),
        utf8_percent_encode(file.as_str(), PATH_SEGMENT)
    )
}

/// Entry of a container listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContainerFile {
    pub name: String,
}

/// File content received with an upload or patch
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub content_type: String,
    pub data: Bytes,
}

impl FilePayload {
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The file part was found but could not be read to the end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PayloadReadError(pub String);

/// File part as received: absent, complete, or cut off while reading
pub type ReceivedPayload = Result<Option<FilePayload>, PayloadReadError>;

/// Result of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// A new blob was written; `location` is where it can be fetched
    Created { location: String },
    /// An existing blob was overwritten
    Updated,
}
