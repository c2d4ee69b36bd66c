// ==========================================
// Sistema BI Educativo - Datos educativos
// ==========================================
// Métricas por escuela, año y semestre.
// Clave natural: (escuela_id, anio, semestre).
// Tasas y promedios en escala 0-100 con dos decimales.
// ==========================================

use crate::domain::types::Semestre;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registro de métricas educativas persistido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatosEducativos {
    pub id: i64,
    pub escuela_id: i64,
    pub anio: i32,
    pub semestre: Semestre,
    pub cantidad_alumnos: i32,
    pub numero_inscripciones: i32,
    pub tasa_desercion: f64,
    pub tasa_promocion: Option<f64>,
    pub numero_maestros: Option<i32>,
    pub promedio_calificaciones: Option<f64>,
    pub es_urbana: bool,
    pub creado_en: DateTime<Utc>,
}

/// Datos para crear un registro de métricas.
/// Acepta también los nombres camelCase que envía el SPA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuevosDatosEducativos {
    #[serde(alias = "escuelaId")]
    pub escuela_id: i64,
    pub anio: i32,
    pub semestre: Semestre,
    #[serde(alias = "cantidadAlumnos")]
    pub cantidad_alumnos: i32,
    #[serde(alias = "numeroInscripciones")]
    pub numero_inscripciones: i32,
    #[serde(alias = "tasaDesercion")]
    pub tasa_desercion: f64,
    #[serde(alias = "tasaPromocion")]
    pub tasa_promocion: Option<f64>,
    #[serde(alias = "numeroMaestros")]
    pub numero_maestros: Option<i32>,
    #[serde(alias = "promedioCalificaciones")]
    pub promedio_calificaciones: Option<f64>,
    #[serde(alias = "esUrbana", default = "urbana_por_omision")]
    pub es_urbana: bool,
}

fn urbana_por_omision() -> bool {
    true
}

/// Actualización parcial de métricas.
/// Los campos ausentes (None) conservan el valor persistido.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActualizacionDatosEducativos {
    #[serde(alias = "cantidadAlumnos")]
    pub cantidad_alumnos: Option<i32>,
    #[serde(alias = "numeroInscripciones")]
    pub numero_inscripciones: Option<i32>,
    #[serde(alias = "tasaDesercion")]
    pub tasa_desercion: Option<f64>,
    #[serde(alias = "tasaPromocion")]
    pub tasa_promocion: Option<f64>,
    #[serde(alias = "numeroMaestros")]
    pub numero_maestros: Option<i32>,
    #[serde(alias = "promedioCalificaciones")]
    pub promedio_calificaciones: Option<f64>,
    #[serde(alias = "esUrbana")]
    pub es_urbana: Option<bool>,
}
