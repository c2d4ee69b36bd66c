// ==========================================
// Sistema BI Educativo - Enrutador HTTP
// ==========================================
// Mismo mapa de rutas que consumía el SPA original:
// /municipios, /tipos-escuelas, /escuelas, /datos-educativos,
// /usuarios (cada uno con su /bulk-upload), /dashboard y
// /predicciones.
// ==========================================

use crate::app::handlers;
use crate::app::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    nombre: String,
    version: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/municipios", handlers::municipios::router())
        .nest("/tipos-escuelas", handlers::tipos_escuela::router())
        .nest("/escuelas", handlers::escuelas::router())
        .nest("/datos-educativos", handlers::datos_educativos::router())
        .nest("/usuarios", handlers::usuarios::router())
        .nest("/dashboard", handlers::dashboard::router())
        .nest("/predicciones", handlers::predicciones::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        nombre: crate::APP_NAME.to_string(),
        version: crate::VERSION.to_string(),
    })
}
