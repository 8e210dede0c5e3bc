mod azure_blob_store;
mod connection_string;
mod memory_blob_store;

pub use azure_blob_store::AzureBlobStore;
pub use connection_string::{ConnectionStringError, StorageConnectionString, StorageCredentials};
pub use memory_blob_store::MemoryBlobStore;
