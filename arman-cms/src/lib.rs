//! arman-cms library - content management service
//!
//! Store adapters, the intent resolver, the protection guard, the event
//! lifecycle and the HTTP adapter over them.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod service;
pub mod store;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::composers::routes())
        .merge(api::pieces::routes())
        .merge(api::venues::routes())
        .merge(api::programmes::routes())
        .merge(api::events::routes())
        .merge(api::biography::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
