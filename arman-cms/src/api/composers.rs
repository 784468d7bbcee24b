use super::Created;
use crate::error::ApiResult;
use crate::service::ComposerService;
use crate::AppState;
use arman_common::content::{Composer, ComposerWithDetails};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/composers", get(list).post(create))
        .route("/composers/:id", get(show).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ComposerWithDetails>>> {
    Ok(Json(ComposerService::new(&state.db).list().await?))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ComposerWithDetails>> {
    let Path(id) = path?;
    Ok(Json(ComposerService::new(&state.db).get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Composer>, JsonRejection>,
) -> ApiResult<Created<Composer>> {
    let Json(composer) = payload?;
    let created = ComposerService::new(&state.db).create(composer).await?;
    Ok(Created::new(created, None))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Composer>, JsonRejection>,
) -> ApiResult<Json<Composer>> {
    let Path(id) = path?;
    let Json(composer) = payload?;
    Ok(Json(ComposerService::new(&state.db).update(id, composer).await?))
}

async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    ComposerService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
