//! # Container Files - REST façade over blob storage
//!
//! Exposes files held in blob-storage containers through a small HTTP API
//! under `/api/v1/{containername}/contentfiles`, built on Clean Architecture
//! principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Error taxonomy, parameter validation and naming rules
//! - **Application**: Use cases, ports (interfaces) and wiring
//! - **Infrastructure**: Azure Blob and in-memory storage adapters, telemetry sink
//! - **API**: HTTP handlers, error rendering and middleware
//!
//! ## Key Features
//!
//! - Containers are created on first upload; names containing `public` get
//!   anonymous blob read access and uploads return the direct blob URL
//! - Every validation failure for a request is reported at once as a list of
//!   numbered `ErrorResponse` entries
//! - Downloads are streamed straight from the storage account
//!
//! ## Example Usage
//!
//! ```no_run
//! use container_files::{api::create_router, application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::in_memory())
//!     .with_storage()?
//!     .build()?;
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::value_objects;
