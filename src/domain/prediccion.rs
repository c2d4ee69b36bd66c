// ==========================================
// Sistema BI Educativo - Predicciones IA
// ==========================================
// Resultado persistido de una ejecución del script
// estadístico externo (matrícula / riesgo de deserción).
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Predicción persistida
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrediccionIa {
    pub id: i64,
    pub tipo_modelo: String,
    pub parametros_json: String,
    pub resultado_json: String,
    pub usuario_id: Option<i64>,
    pub creado_en: DateTime<Utc>,
}

/// Datos para registrar una predicción ejecutada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuevaPrediccion {
    pub tipo_modelo: String,
    pub parametros_json: String,
    pub resultado_json: String,
    pub usuario_id: Option<i64>,
}

// ==========================================
// Solicitud de predicción
// ==========================================
// El campo `model_type` selecciona el modelo del script externo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type")]
pub enum SolicitudPrediccion {
    /// Proyección de matrícula para el siguiente ciclo
    #[serde(rename = "enrollment")]
    Matricula {
        cantidad_alumnos: i32,
        numero_inscripciones: i32,
        anio: i32,
    },
    /// Riesgo de deserción escolar
    #[serde(rename = "dropout")]
    Desercion {
        cantidad_alumnos: i32,
        numero_inscripciones: i32,
        numero_maestros: i32,
        promedio_calificaciones: f64,
        es_urbana: bool,
    },
}

impl SolicitudPrediccion {
    pub fn tipo_modelo(&self) -> &'static str {
        match self {
            SolicitudPrediccion::Matricula { .. } => "enrollment",
            SolicitudPrediccion::Desercion { .. } => "dropout",
        }
    }
}
