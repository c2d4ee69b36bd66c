// ==========================================
// Sistema BI Educativo - Capa de aplicación
// ==========================================
// Responsabilidad: integración HTTP (axum), estado compartido
// ==========================================

pub mod handlers;
pub mod routes;
pub mod state;

// Reexporta
pub use routes::build_router;
pub use state::AppState;
