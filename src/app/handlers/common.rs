// ==========================================
// Sistema BI Educativo - Utilidades de los manejadores
// ==========================================
// Mapeo de errores a HTTP, extracción del rol y cuerpos
// compartidos de la carga masiva.
// ==========================================

use crate::api::error::ApiError;
use crate::domain::import::{ImportSummary, RawRow};
use crate::domain::types::Rol;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Encabezado con el rol ya autenticado por el colaborador externo
pub const HEADER_ROL: &str = "x-user-role";

/// Respuesta de error devuelta al cliente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Código del error
    pub code: String,
    /// Mensaje legible
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "ACCESO_DENEGADO"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "SOLICITUD_INVALIDA"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NO_ENCONTRADO"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERROR_BASE_DATOS"),
            ApiError::Import(_) => (StatusCode::BAD_REQUEST, "ERROR_IMPORTACION"),
            ApiError::Prediction(_) => (StatusCode::BAD_GATEWAY, "ERROR_PREDICCION"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERROR_INTERNO"),
            ApiError::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERROR_INTERNO"),
        };

        let cuerpo = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
        };

        (status, Json(cuerpo)).into_response()
    }
}

/// Rol del llamador, ya autenticado aguas arriba.
/// Sin encabezado (o con un valor desconocido) se asume `user`.
pub fn rol_del_llamador(headers: &HeaderMap) -> Rol {
    headers
        .get(HEADER_ROL)
        .and_then(|v| v.to_str().ok())
        .map(Rol::parse)
        .unwrap_or(Rol::User)
}

// ==========================================
// Cuerpos de la carga masiva
// ==========================================

/// Cuerpo de POST /<entidad>/bulk-upload
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUploadRequest {
    #[serde(default)]
    pub data: Vec<RawRow>,
}

/// Respuesta de la carga masiva: el resumen completo envuelto
/// con la bandera de éxito de la solicitud
#[derive(Debug, Clone, Serialize)]
pub struct BulkUploadResponse {
    pub success: bool,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl From<ImportSummary> for BulkUploadResponse {
    fn from(resumen: ImportSummary) -> Self {
        BulkUploadResponse {
            success: true,
            imported: resumen.imported,
            failed: resumen.failed,
            errors: resumen.errors,
        }
    }
}

/// Respuesta de las eliminaciones
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        DeleteResponse {
            success: true,
            message: crate::i18n::t("common.eliminado"),
        }
    }
}
