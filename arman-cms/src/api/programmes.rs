use super::Created;
use crate::error::ApiResult;
use crate::service::ProgrammeService;
use crate::AppState;
use arman_common::content::{Programme, ProgrammeWithDetails, ProgrammeWithPieces};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

/// Piece ids in performance order
#[derive(Debug, Deserialize)]
pub struct PieceList {
    pub piece_ids: Vec<i64>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/programmes", get(list).post(create))
        .route("/programmes/:id", get(show).put(update).delete(remove))
        .route("/programmes/:id/details", get(details))
        .route("/programmes/:id/pieces", put(update_pieces))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ProgrammeWithDetails>>> {
    Ok(Json(ProgrammeService::new(&state.db).list().await?))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProgrammeWithPieces>> {
    let Path(id) = path?;
    Ok(Json(ProgrammeService::new(&state.db).get(id).await?))
}

async fn details(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProgrammeWithDetails>> {
    let Path(id) = path?;
    Ok(Json(ProgrammeService::new(&state.db).get_details(id).await?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Programme>, JsonRejection>,
) -> ApiResult<Created<Programme>> {
    let Json(programme) = payload?;
    let created = ProgrammeService::new(&state.db).create(programme).await?;
    Ok(Created::new(created, None))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Programme>, JsonRejection>,
) -> ApiResult<Json<Programme>> {
    let Path(id) = path?;
    let Json(programme) = payload?;
    Ok(Json(ProgrammeService::new(&state.db).update(id, programme).await?))
}

async fn update_pieces(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PieceList>, JsonRejection>,
) -> ApiResult<Json<ProgrammeWithPieces>> {
    let Path(id) = path?;
    let Json(list) = payload?;
    Ok(Json(
        ProgrammeService::new(&state.db)
            .update_pieces(id, list.piece_ids)
            .await?,
    ))
}

async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    ProgrammeService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
