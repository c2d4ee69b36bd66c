// ==========================================
// Sistema BI Educativo - Rutas de usuarios
// ==========================================
// Las respuestas nunca incluyen el hash de contraseña.
// La carga masiva está reservada al rol admin.
// ==========================================

use crate::api::error::ApiError;
use crate::app::handlers::common::{
    rol_del_llamador, BulkUploadRequest, BulkUploadResponse, DeleteResponse,
};
use crate::app::state::AppState;
use crate::domain::types::Rol;
use crate::domain::{ActualizacionUsuario, NuevoUsuario, UsuarioPublico};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateUsuarioRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<Rol>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).patch(update).delete(remove))
        .route("/bulk-upload", post(bulk_upload))
}

async fn find_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UsuarioPublico>>, ApiError> {
    Ok(Json(state.usuario_api.find_all().await?))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UsuarioPublico>, ApiError> {
    Ok(Json(state.usuario_api.find_one(id).await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(cuerpo): Json<CreateUsuarioRequest>,
) -> Result<Json<UsuarioPublico>, ApiError> {
    let nuevo = NuevoUsuario {
        username: cuerpo.username,
        email: cuerpo.email,
        password: cuerpo.password,
        role: cuerpo.role.unwrap_or(Rol::User),
    };
    Ok(Json(state.usuario_api.create(nuevo).await?))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(cuerpo): Json<ActualizacionUsuario>,
) -> Result<Json<UsuarioPublico>, ApiError> {
    let rol = rol_del_llamador(&headers);
    Ok(Json(state.usuario_api.update(id, cuerpo, rol).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    let rol = rol_del_llamador(&headers);
    state.usuario_api.remove(id, rol).await?;
    Ok(Json(DeleteResponse::ok()))
}

async fn bulk_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(cuerpo): Json<BulkUploadRequest>,
) -> Result<Json<BulkUploadResponse>, ApiError> {
    let rol = rol_del_llamador(&headers);
    let resumen = state.import_api.import_usuarios(cuerpo.data, rol).await?;
    Ok(Json(BulkUploadResponse::from(resumen)))
}
