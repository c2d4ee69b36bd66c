// ==========================================
// Sistema BI Educativo - Modelo de importación masiva
// ==========================================
// Estructuras intermedias del flujo de carga:
//   archivo/JSON → FilaCruda (RawRow) → fila normalizada por entidad
//   → validación → reconciliación → ResumenImportacion
// Las filas normalizadas son efímeras: viven solo dentro de
// una llamada de importación.
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==========================================
// RawRow - fila cruda tal como llega del archivo
// ==========================================
// Mapa de nombres de columna (con sinónimos heterogéneos) a
// celdas sin tipar. `rowIndex` es 1-based y lo asigna quien
// decodificó el archivo; se usa para señalar la línea fallida.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "rowIndex", default)]
    pub row_index: usize,

    #[serde(flatten)]
    pub cells: serde_json::Map<String, Value>,
}

impl RawRow {
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            cells: serde_json::Map::new(),
        }
    }

    /// Agrega una celda (constructor encadenable, útil en pruebas y en el
    /// analizador de archivos).
    pub fn with_cell(mut self, columna: &str, valor: impl Into<Value>) -> Self {
        self.cells.insert(columna.to_string(), valor.into());
        self
    }

    /// Devuelve la primera celda presente y no vacía entre los sinónimos
    /// dados, en orden. Una cadena en blanco o un `null` cuentan como
    /// ausentes.
    pub fn cell(&self, sinonimos: &[&str]) -> Option<&Value> {
        for nombre in sinonimos {
            if let Some(valor) = self.cells.get(*nombre) {
                match valor {
                    Value::Null => continue,
                    Value::String(s) if s.trim().is_empty() => continue,
                    _ => return Some(valor),
                }
            }
        }
        None
    }
}

// ==========================================
// Filas normalizadas por entidad
// ==========================================
// Todos los campos son Option: "ausente" y "presente" se
// distinguen explícitamente. Un campo obligatorio ausente lo
// reporta el validador; nunca se rellena con cero/falso.

/// Fila normalizada de municipio
#[derive(Debug, Clone)]
pub struct MunicipioRow {
    pub nombre: Option<String>,
    pub row_index: usize,
}

/// Fila normalizada de tipo de escuela
#[derive(Debug, Clone)]
pub struct TipoEscuelaRow {
    pub nombre: Option<String>,
    pub row_index: usize,
}

/// Fila normalizada de escuela
#[derive(Debug, Clone)]
pub struct EscuelaRow {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub fecha_fundacion: Option<chrono::NaiveDate>,
    pub municipio_id: Option<i64>,
    pub tipo_id: Option<i64>,
    pub row_index: usize,
}

/// Fila normalizada de datos educativos
#[derive(Debug, Clone)]
pub struct DatosEducativosRow {
    pub escuela_id: Option<i64>,
    pub anio: Option<i32>,
    pub semestre: Option<String>,
    pub cantidad_alumnos: Option<i32>,
    pub numero_inscripciones: Option<i32>,
    pub tasa_desercion: Option<f64>,
    pub tasa_promocion: Option<f64>,
    pub numero_maestros: Option<i32>,
    pub promedio_calificaciones: Option<f64>,
    pub es_urbana: Option<bool>,
    pub row_index: usize,
}

/// Fila normalizada de usuario
#[derive(Debug, Clone)]
pub struct UsuarioRow {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub row_index: usize,
}

// ==========================================
// ImportSummary - resumen devuelto al llamador
// ==========================================
// Los nombres de campo coinciden con el contrato HTTP
// ({ imported, failed, errors }).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Filas que terminaron en inserción o actualización
    pub imported: usize,
    /// Filas rechazadas en validación o en persistencia
    pub failed: usize,
    /// Mensajes de error en orden de fila ("Fila N: ...")
    pub errors: Vec<String>,
}

/// Resultado de reconciliar una fila válida contra el almacén
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// No existía registro con la clave natural: se insertó
    Inserted,
    /// Existía: se actualizó en sitio
    Updated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_row_deserializa_row_index_y_celdas() {
        let fila: RawRow =
            serde_json::from_value(json!({"nombre": "San Pedro", "rowIndex": 3})).unwrap();
        assert_eq!(fila.row_index, 3);
        assert_eq!(fila.cells.get("nombre"), Some(&json!("San Pedro")));
    }

    #[test]
    fn test_cell_respeta_orden_de_sinonimos() {
        let fila = RawRow::new(1)
            .with_cell("name", "Colegio B")
            .with_cell("nombre", "Colegio A");
        let valor = fila.cell(&["nombre", "name"]).unwrap();
        assert_eq!(valor, &json!("Colegio A"));
    }

    #[test]
    fn test_cell_ignora_vacios_y_nulos() {
        let fila = RawRow::new(1)
            .with_cell("nombre", "  ")
            .with_cell("name", Value::Null)
            .with_cell("school", "Colegio C");
        let valor = fila.cell(&["nombre", "name", "school"]).unwrap();
        assert_eq!(valor, &json!("Colegio C"));
        assert!(fila.cell(&["nombre", "name"]).is_none());
    }
}
