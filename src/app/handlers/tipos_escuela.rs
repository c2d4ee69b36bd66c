// ==========================================
// Sistema BI Educativo - Rutas de tipos de escuela
// ==========================================

use crate::api::error::ApiError;
use crate::app::handlers::common::{
    rol_del_llamador, BulkUploadRequest, BulkUploadResponse, DeleteResponse,
};
use crate::app::state::AppState;
use crate::domain::TipoEscuela;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TipoEscuelaRequest {
    pub nombre: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).patch(update).delete(remove))
        .route("/bulk-upload", post(bulk_upload))
}

async fn find_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TipoEscuela>>, ApiError> {
    Ok(Json(state.tipo_escuela_api.find_all().await?))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TipoEscuela>, ApiError> {
    Ok(Json(state.tipo_escuela_api.find_one(id).await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(cuerpo): Json<TipoEscuelaRequest>,
) -> Result<Json<TipoEscuela>, ApiError> {
    let rol = rol_del_llamador(&headers);
    Ok(Json(
        state.tipo_escuela_api.create(&cuerpo.nombre, rol).await?,
    ))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(cuerpo): Json<TipoEscuelaRequest>,
) -> Result<Json<TipoEscuela>, ApiError> {
    let rol = rol_del_llamador(&headers);
    Ok(Json(
        state
            .tipo_escuela_api
            .update(id, &cuerpo.nombre, rol)
            .await?,
    ))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    let rol = rol_del_llamador(&headers);
    state.tipo_escuela_api.remove(id, rol).await?;
    Ok(Json(DeleteResponse::ok()))
}

async fn bulk_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(cuerpo): Json<BulkUploadRequest>,
) -> Result<Json<BulkUploadResponse>, ApiError> {
    let rol = rol_del_llamador(&headers);
    let resumen = state
        .import_api
        .import_tipos_escuela(cuerpo.data, rol)
        .await?;
    Ok(Json(BulkUploadResponse::from(resumen)))
}
