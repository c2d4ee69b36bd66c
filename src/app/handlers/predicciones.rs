// ==========================================
// Sistema BI Educativo - Rutas de predicciones
// ==========================================

use crate::api::error::ApiError;
use crate::app::handlers::common::DeleteResponse;
use crate::app::state::AppState;
use crate::domain::{PrediccionIa, SolicitudPrediccion};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find_all))
        .route("/ejecutar", post(ejecutar))
        .route("/:id", get(find_one).delete(remove))
}

async fn ejecutar(
    State(state): State<Arc<AppState>>,
    Json(solicitud): Json<SolicitudPrediccion>,
) -> Result<Json<PrediccionIa>, ApiError> {
    Ok(Json(state.prediccion_api.ejecutar(solicitud, None).await?))
}

async fn find_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrediccionIa>>, ApiError> {
    Ok(Json(state.prediccion_api.find_all().await?))
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PrediccionIa>, ApiError> {
    Ok(Json(state.prediccion_api.find_one(id).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.prediccion_api.remove(id).await?;
    Ok(Json(DeleteResponse::ok()))
}
