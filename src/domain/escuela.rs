// ==========================================
// Sistema BI Educativo - Entidad Escuela
// ==========================================
// Clave natural: (nombre, municipio_id, tipo_id)
// La unicidad la garantiza la tabla (UNIQUE), no la importación.
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Escuela persistida
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escuela {
    pub id: i64,
    pub nombre: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub fecha_fundacion: Option<NaiveDate>,
    pub municipio_id: i64,
    pub tipo_id: i64,
    pub creado_en: DateTime<Utc>,
}

/// Datos para crear una escuela.
/// Acepta también los nombres camelCase que envía el SPA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuevaEscuela {
    pub nombre: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    #[serde(alias = "fecha_Fundacion")]
    pub fecha_fundacion: Option<NaiveDate>,
    #[serde(alias = "municipioId")]
    pub municipio_id: i64,
    #[serde(alias = "tipoId")]
    pub tipo_id: i64,
}

/// Actualización parcial de una escuela.
/// Los campos ausentes (None) conservan el valor persistido.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActualizacionEscuela {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    #[serde(alias = "fecha_Fundacion")]
    pub fecha_fundacion: Option<NaiveDate>,
    #[serde(alias = "municipioId")]
    pub municipio_id: Option<i64>,
    #[serde(alias = "tipoId")]
    pub tipo_id: Option<i64>,
}
