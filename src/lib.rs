// ==========================================
// Sistema BI Educativo - Biblioteca central
// ==========================================
// Pila: Rust + SQLite + axum
// Dominio: estadísticas educativas (escuelas, municipios,
// métricas por ciclo) con carga masiva y tablero
// ==========================================

// Inicializa el sistema de internacionalización
rust_i18n::i18n!("locales", fallback = "es-MX");

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - entidades y tipos
pub mod domain;

// Capa de almacén - acceso a datos
pub mod repository;

// Capa de importación - carga masiva externa
pub mod importer;

// Capa de configuración
pub mod config;

// Infraestructura de base de datos (inicialización / PRAGMA unificados)
pub mod db;

// Sistema de logs
pub mod logging;

// Internacionalización
pub mod i18n;

// Capa API - interfaces de negocio
pub mod api;

// Capa de aplicación - integración HTTP
pub mod app;

// ==========================================
// Reexporta los tipos centrales
// ==========================================

// Tipos de dominio
pub use domain::types::{Rol, Semestre, TipoEntidad};

// Entidades de dominio
pub use domain::{
    DatosEducativos, Escuela, Municipio, PrediccionIa, TipoEscuela, Usuario, UsuarioPublico,
};

// Flujo de importación
pub use domain::import::{ImportSummary, RawRow};
pub use importer::{ImportCoordinator, ImportStrategy};

// API
pub use api::{DashboardApi, ImportApi, MunicipioApi};

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const APP_NAME: &str = "Sistema BI Educativo";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
