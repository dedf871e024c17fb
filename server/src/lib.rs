//! HTTP service for the todo list.
//!
//! # Overview
//! `app` assembles the `/v1/items` router over an injected `ItemStore`;
//! `run` serves it on a listener. The binary in `main.rs` adds configuration,
//! logging and graceful shutdown on top.

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::storage::ItemStore;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::storage::{SqliteItemStore, StorageError, StoreOptions};

pub const DEFAULT_REQUEST_TIMEOUT: Duration =
    Duration::from_secs(config::DEFAULT_REQUEST_TIMEOUT_SECS);

/// Router with the default request timeout.
pub fn app(store: Arc<dyn ItemStore>) -> Router {
    app_with_timeout(store, DEFAULT_REQUEST_TIMEOUT)
}

/// Router whose requests are abandoned with 408 after `timeout`.
pub fn app_with_timeout(store: Arc<dyn ItemStore>, timeout: Duration) -> Router {
    let v1 = Router::new()
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/items/{id}",
            get(handlers::get_item)
                .patch(handlers::update_item)
                .delete(handlers::delete_item),
        );

    Router::new()
        .nest("/v1", v1)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serves `app(store)` until the listener fails.
pub async fn run(listener: TcpListener, store: Arc<dyn ItemStore>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
