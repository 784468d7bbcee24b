use super::Created;
use crate::error::ApiResult;
use crate::service::{EventCommand, EventService};
use crate::AppState;
use arman_common::content::{
    Event, EventStatus, EventWithProgramme, EventWithTimestamps, Timeframe,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

/// Optional listing filters, `?status=published&timeframe=upcoming`
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub timeframe: Option<Timeframe>,
}

#[derive(Debug, Deserialize)]
pub struct Notes {
    pub notes: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list).post(create))
        .route("/events/timestamps", get(list_with_timestamps))
        .route("/events/:id", get(show).put(update).delete(remove))
        .route("/events/:id/notes", put(update_notes))
        .route("/events/:id/draft", put(draft))
        .route("/events/:id/publish", put(publish))
        .route("/events/:id/archive", put(archive))
}

async fn list(
    State(state): State<AppState>,
    filter: Result<Query<EventFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Event>>> {
    let Query(filter) = filter?;
    Ok(Json(
        EventService::new(&state.db)
            .list(filter.status, filter.timeframe)
            .await?,
    ))
}

async fn list_with_timestamps(
    State(state): State<AppState>,
    filter: Result<Query<EventFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<EventWithTimestamps>>> {
    let Query(filter) = filter?;
    Ok(Json(
        EventService::new(&state.db)
            .list_with_timestamps(filter.status, filter.timeframe)
            .await?,
    ))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<EventWithProgramme>> {
    let Path(id) = path?;
    Ok(Json(EventService::new(&state.db).get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EventCommand>, JsonRejection>,
) -> ApiResult<Created<Event>> {
    let Json(command) = payload?;
    let temp_id = command.temp_id.clone();
    let event = EventService::new(&state.db).create(command).await?;
    Ok(Created::new(event, temp_id))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventCommand>, JsonRejection>,
) -> ApiResult<Json<EventWithProgramme>> {
    let Path(id) = path?;
    let Json(command) = payload?;
    Ok(Json(EventService::new(&state.db).update(id, command).await?))
}

async fn update_notes(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Notes>, JsonRejection>,
) -> ApiResult<Json<Event>> {
    let Path(id) = path?;
    let Json(body) = payload?;
    Ok(Json(EventService::new(&state.db).update_notes(id, body.notes).await?))
}

async fn draft(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Event>> {
    let Path(id) = path?;
    Ok(Json(EventService::new(&state.db).draft(id).await?))
}

async fn publish(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Event>> {
    let Path(id) = path?;
    Ok(Json(EventService::new(&state.db).publish(id).await?))
}

async fn archive(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Event>> {
    let Path(id) = path?;
    Ok(Json(EventService::new(&state.db).archive(id).await?))
}

async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    EventService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
