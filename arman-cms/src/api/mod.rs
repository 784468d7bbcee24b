//! HTTP adapter
//!
//! Handlers decode the request, call one service method and encode its
//! result. No business rule lives here.

pub mod biography;
pub mod composers;
pub mod events;
pub mod health;
pub mod pieces;
pub mod programmes;
pub mod venues;

pub use health::health_routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body of a `201 Created` response.
///
/// `temp_id` echoes the client correlation id of the creating intent.
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
}

impl<T: Serialize> Created<T> {
    pub fn new(data: T, temp_id: Option<String>) -> Self {
        Self { data, temp_id }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}
