// ==========================================
// Sistema BI Educativo - Rutas del tablero
// ==========================================

use crate::api::error::ApiError;
use crate::api::ResumenDashboard;
use crate::app::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/resumen", get(resumen))
}

async fn resumen(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResumenDashboard>, ApiError> {
    Ok(Json(state.dashboard_api.resumen().await?))
}
