// ==========================================
// Sistema BI Educativo - Punto de entrada
// ==========================================
// Pila: Rust + SQLite + axum
// ==========================================

use std::sync::Arc;

use bi_educativo::app::{build_router, AppState};
use bi_educativo::config::AppConfig;
use bi_educativo::logging;

#[tokio::main]
async fn main() {
    // Inicializa el sistema de logs
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", bi_educativo::APP_NAME);
    tracing::info!("Versión: {}", bi_educativo::VERSION);
    tracing::info!("==================================================");

    // Configuración desde el entorno
    let config = AppConfig::from_env();
    tracing::info!("Base de datos: {}", config.db_path);
    tracing::info!("Escuchando en: {}", config.listen_addr);

    // Construye el estado de la aplicación
    let state = AppState::new(&config).expect("No se pudo inicializar AppState");
    let state = Arc::new(state);

    // Arranca el servidor HTTP
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("No se pudo enlazar la dirección de escucha");

    tracing::info!("Servidor listo");
    axum::serve(listener, router)
        .await
        .expect("Fallo del servidor HTTP");
}
