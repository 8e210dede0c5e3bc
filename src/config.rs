use std::str::FromStr;

use thiserror::Error;

use crate::domain::value_objects::DEFAULT_PUBLIC_MARKER;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LISTEN_ADDR cannot be empty")]
    EmptyListenAddr,

    #[error("unknown STORAGE_BACKEND '{0}', expected 'azure' or 'memory'")]
    UnknownBackend(String),

    #[error("STORAGE_CONNECTION is required when STORAGE_BACKEND=azure")]
    MissingConnection,

    #[error("MAX_UPLOAD_BYTES must be greater than zero")]
    ZeroUploadLimit,

    #[error("HTTP_TIMEOUT_SECS must be at least 1 second")]
    ZeroTimeout,
}

/// Which blob account implementation backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Azure,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "azure" => Ok(Self::Azure),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_backend: String,
    pub storage_connection: Option<String>,
    pub public_container_marker: String,
    pub memory_public_base_url: String,
    pub max_upload_bytes: usize,
    pub http_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            storage_backend: "azure".to_string(),
            storage_connection: None,
            public_container_marker: DEFAULT_PUBLIC_MARKER.to_string(),
            memory_public_base_url: "http://127.0.0.1:10000/devstoreaccount1".to_string(),
            max_upload_bytes: 100 * 1024 * 1024,
            http_timeout_secs: 300,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            storage_backend: std::env::var("STORAGE_BACKEND").unwrap_or(defaults.storage_backend),
            storage_connection: std::env::var("STORAGE_CONNECTION")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            // Matched against lowercased container names
            public_container_marker: std::env::var("PUBLIC_CONTAINER_MARKER")
                .map(|marker| marker.to_lowercase())
                .unwrap_or(defaults.public_container_marker),
            memory_public_base_url: std::env::var("MEMORY_PUBLIC_BASE_URL")
                .unwrap_or(defaults.memory_public_base_url),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            log_format: match std::env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Config for the in-memory backend, used by tests and local runs
    pub fn in_memory() -> Self {
        Self {
            storage_backend: "memory".to_string(),
            ..Self::default()
        }
    }

    pub fn backend(&self) -> Result<StorageBackend, ConfigError> {
        self.storage_backend.parse()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.is_empty() {
            return Err(ConfigError::EmptyListenAddr);
        }

        if self.backend()? == StorageBackend::Azure && self.storage_connection.is_none() {
            return Err(ConfigError::MissingConnection);
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }

        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}
