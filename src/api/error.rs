// ==========================================
// Sistema BI Educativo - Errores de la capa API
// ==========================================
// Responsabilidad: convertir errores técnicos del almacén en
// mensajes de negocio. Solo dos clases son fatales para una
// importación completa: autorización y solicitud malformada;
// todo problema por fila viaja dentro del resumen.
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errores de la capa API
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Fatales de la solicitud =====
    #[error("Acceso denegado: {0}")]
    Forbidden(String),

    #[error("Solicitud inválida: {0}")]
    BadRequest(String),

    #[error("Recurso no encontrado: {0}")]
    NotFound(String),

    // ===== Acceso a datos =====
    #[error("Error de base de datos: {0}")]
    Database(String),

    // ===== Importación =====
    #[error("Error de importación: {0}")]
    Import(String),

    // ===== Predicciones =====
    #[error("Error de predicción: {0}")]
    Prediction(String),

    // ===== Generales =====
    #[error("Error interno: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entidad, id } => {
                ApiError::NotFound(format!("{} con ID {} no encontrado", entidad, id))
            }
            RepositoryError::UniqueViolation(msg) => {
                ApiError::BadRequest(format!("El registro ya existe: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BadRequest(format!("Referencia inválida: {}", msg))
            }
            RepositoryError::ConnectionError(msg) | RepositoryError::LockError(msg) => {
                ApiError::Database(msg)
            }
            RepositoryError::TransactionError(msg) | RepositoryError::QueryError(msg) => {
                ApiError::Database(msg)
            }
            RepositoryError::Internal(msg) => ApiError::Internal(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Alias de Result para la capa API
pub type ApiResult<T> = Result<T, ApiError>;
