use super::Created;
use crate::error::ApiResult;
use crate::service::{VenueCommand, VenueService};
use crate::AppState;
use arman_common::content::{Venue, VenueWithDetails};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list).post(create))
        .route("/venues/:id", get(show).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<VenueWithDetails>>> {
    Ok(Json(VenueService::new(&state.db).list().await?))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<VenueWithDetails>> {
    let Path(id) = path?;
    Ok(Json(VenueService::new(&state.db).get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<VenueCommand>, JsonRejection>,
) -> ApiResult<Created<Venue>> {
    let Json(command) = payload?;
    let temp_id = command.venue.temp_id.clone();
    let venue = VenueService::new(&state.db).create(command).await?;
    Ok(Created::new(venue, temp_id))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<VenueCommand>, JsonRejection>,
) -> ApiResult<Json<Venue>> {
    let Path(id) = path?;
    let Json(command) = payload?;
    Ok(Json(VenueService::new(&state.db).update(id, command).await?))
}

async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    VenueService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
