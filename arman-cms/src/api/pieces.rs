use super::Created;
use crate::error::ApiResult;
use crate::service::{PieceCommand, PieceService};
use crate::AppState;
use arman_common::content::{Piece, PieceWithDetails};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pieces", get(list).post(create))
        .route("/pieces/:id", get(show).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PieceWithDetails>>> {
    Ok(Json(PieceService::new(&state.db).list().await?))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PieceWithDetails>> {
    let Path(id) = path?;
    Ok(Json(PieceService::new(&state.db).get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<PieceCommand>, JsonRejection>,
) -> ApiResult<Created<Piece>> {
    let Json(command) = payload?;
    let temp_id = command.piece.temp_id.clone();
    let piece = PieceService::new(&state.db).create(command).await?;
    Ok(Created::new(piece, temp_id))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PieceCommand>, JsonRejection>,
) -> ApiResult<Json<Piece>> {
    let Path(id) = path?;
    let Json(command) = payload?;
    Ok(Json(PieceService::new(&state.db).update(id, command).await?))
}

async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    PieceService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
