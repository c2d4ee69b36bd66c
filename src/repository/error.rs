// ==========================================
// Sistema BI Educativo - Errores de la capa de almacén
// ==========================================
// Herramienta: macro derive de thiserror
// ==========================================

use thiserror::Error;

/// Errores de la capa de almacén
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Errores de datos =====
    #[error("{entidad} con ID {id} no encontrado")]
    NotFound { entidad: String, id: i64 },

    #[error("Fallo de conexión a la base de datos: {0}")]
    ConnectionError(String),

    #[error("No se pudo obtener el candado de la base de datos: {0}")]
    LockError(String),

    #[error("Fallo de transacción: {0}")]
    TransactionError(String),

    #[error("Fallo de consulta: {0}")]
    QueryError(String),

    #[error("Violación de restricción única: {0}")]
    UniqueViolation(String),

    #[error("Violación de clave foránea: {0}")]
    ForeignKeyViolation(String),

    // ===== Errores generales =====
    #[error("Error interno: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::QueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::QueryError(
                "la consulta no devolvió filas".to_string(),
            ),
            _ => RepositoryError::QueryError(err.to_string()),
        }
    }
}

/// Alias de Result para la capa de almacén
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mensaje_no_encontrado() {
        let err = RepositoryError::NotFound {
            entidad: "Municipio".to_string(),
            id: 7,
        };
        assert_eq!(err.to_string(), "Municipio con ID 7 no encontrado");
    }

    #[test]
    fn test_conversion_unique() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(19),
            Some("UNIQUE constraint failed: municipios.nombre".to_string()),
        );
        match RepositoryError::from(err) {
            RepositoryError::UniqueViolation(msg) => assert!(msg.contains("municipios.nombre")),
            otro => panic!("se esperaba UniqueViolation, se obtuvo {:?}", otro),
        }
    }

    #[test]
    fn test_conversion_foreign_key() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(19),
            Some("FOREIGN KEY constraint failed".to_string()),
        );
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::ForeignKeyViolation(_)
        ));
    }
}
