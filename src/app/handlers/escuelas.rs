// ==========================================
// Sistema BI Educativo - Rutas de escuelas
// ==========================================

use crate::api::error::ApiError;
use crate::app::handlers::common::{
    rol_del_llamador, BulkUploadRequest, BulkUploadResponse, DeleteResponse,
};
use crate::app::state::AppState;
use crate::domain::{ActualizacionEscuela, Escuela, NuevaEscuela};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).patch(update).delete(remove))
        .route("/bulk-upload", post(bulk_upload))
}

async fn find_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Escuela>>, ApiError> {
    Ok(Json(state.escuela_api.find_all().await?))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Escuela>, ApiError> {
    Ok(Json(state.escuela_api.find_one(id).await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(cuerpo): Json<NuevaEscuela>,
) -> Result<Json<Escuela>, ApiError> {
    let rol = rol_del_llamador(&headers);
    Ok(Json(state.escuela_api.create(cuerpo, rol).await?))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(cuerpo): Json<ActualizacionEscuela>,
) -> Result<Json<Escuela>, ApiError> {
    let rol = rol_del_llamador(&headers);
    Ok(Json(state.escuela_api.update(id, cuerpo, rol).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    let rol = rol_del_llamador(&headers);
    state.escuela_api.remove(id, rol).await?;
    Ok(Json(DeleteResponse::ok()))
}

async fn bulk_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(cuerpo): Json<BulkUploadRequest>,
) -> Result<Json<BulkUploadResponse>, ApiError> {
    let rol = rol_del_llamador(&headers);
    let resumen = state.import_api.import_escuelas(cuerpo.data, rol).await?;
    Ok(Json(BulkUploadResponse::from(resumen)))
}
