use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, put},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{
    delete_handler, download_handler, health_handler, list_handler, patch_handler, upload_handler,
};
use crate::api::middleware::metrics;
use crate::api::openapi::swagger_ui;
use crate::application::dto::API_BASE_PATH;
use crate::application::use_cases::{
    DeleteFileUseCase, GetFileUseCase, ListFilesUseCase, PatchFileUseCase, UploadFileUseCase,
};

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub upload_use_case: Arc<UploadFileUseCase>,
    pub patch_use_case: Arc<PatchFileUseCase>,
    pub download_use_case: Arc<GetFileUseCase>,
    pub delete_use_case: Arc<DeleteFileUseCase>,
    pub list_use_case: Arc<ListFilesUseCase>,
    /// Largest accepted request body, multipart framing included
    pub max_upload_bytes: usize,
}

/// Routes relative to the API base path
fn content_file_routes(state: &AppState) -> Router {
    let file_path = "/{containername}/contentfiles/{fileName}";

    Router::new()
        .route(
            file_path,
            put(upload_handler).with_state(Arc::clone(&state.upload_use_case)),
        )
        .route(
            file_path,
            patch(patch_handler).with_state(Arc::clone(&state.patch_use_case)),
        )
        .route(
            file_path,
            get(download_handler).with_state(Arc::clone(&state.download_use_case)),
        )
        .route(
            file_path,
            delete(delete_handler).with_state(Arc::clone(&state.delete_use_case)),
        )
        .route(
            "/{containername}/contentfiles",
            get(list_handler).with_state(Arc::clone(&state.list_use_case)),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.max_upload_bytes))
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest(API_BASE_PATH, content_file_routes(&state))
        .merge(swagger_ui())
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
}
