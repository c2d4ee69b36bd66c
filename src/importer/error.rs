// ==========================================
// Sistema BI Educativo - Errores del módulo de importación
// ==========================================
// Herramienta: macro derive de thiserror
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errores del módulo de importación
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Errores de archivo =====
    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de archivo no soportado: {0} (solo .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Fallo al leer el archivo: {0}")]
    FileReadError(String),

    #[error("Fallo al analizar el Excel: {0}")]
    ExcelParseError(String),

    #[error("Fallo al analizar el CSV: {0}")]
    CsvParseError(String),

    // ===== Errores por fila (recuperados dentro del resumen) =====
    /// Reimportación de un usuario ya registrado: nunca se sobreescribe
    #[error("Usuario con username o email ya existe")]
    UsuarioDuplicado,

    // ===== Errores de persistencia =====
    #[error(transparent)]
    Store(#[from] RepositoryError),

    // ===== Errores generales =====
    #[error("Error interno: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Alias de Result para el módulo de importación
pub type ImportResult<T> = Result<T, ImportError>;
