mod blob_gateway;
mod telemetry;

pub use blob_gateway::{BlobGateway, BlobReader, DownloadedBlob, StorageError};
pub use telemetry::{Telemetry, TraceContext};

#[cfg(test)]
pub use blob_gateway::MockBlobGateway;
#[cfg(test)]
pub use telemetry::MockTelemetry;
