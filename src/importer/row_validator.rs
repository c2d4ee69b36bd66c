// ==========================================
// Sistema BI Educativo - Validador de filas
// ==========================================
// Responsabilidad: restricciones de campo por entidad.
// Cada regla se evalúa de forma independiente: se reportan
// todas las violaciones de la fila, no solo la primera.
// Cada mensaje lleva el prefijo "Fila {n}: " (índice 1-based
// del archivo original).
// ==========================================

use crate::domain::import::{
    DatosEducativosRow, EscuelaRow, MunicipioRow, TipoEscuelaRow, UsuarioRow,
};
use crate::domain::types::Semestre;

/// Longitud máxima del nombre de catálogos (municipios, tipos)
const MAX_NOMBRE_CATALOGO: usize = 100;
/// Longitud máxima del nombre y la dirección de escuela
const MAX_NOMBRE_ESCUELA: usize = 255;
/// Rango de años aceptado
const ANIO_MIN: i32 = 2000;
const ANIO_MAX: i32 = 2100;
/// Longitud mínima de contraseña
const MIN_PASSWORD: usize = 6;

pub struct RowValidator;

impl RowValidator {
    pub fn validate_municipio(&self, row: &MunicipioRow) -> Vec<String> {
        self.validate_nombre_catalogo(row.nombre.as_deref(), row.row_index)
    }

    pub fn validate_tipo_escuela(&self, row: &TipoEscuelaRow) -> Vec<String> {
        self.validate_nombre_catalogo(row.nombre.as_deref(), row.row_index)
    }

    pub fn validate_escuela(&self, row: &EscuelaRow) -> Vec<String> {
        let mut violaciones = Vec::new();

        match &row.nombre {
            None => violaciones.push(self.fila(row.row_index, "Nombre es obligatorio")),
            Some(nombre) if nombre.chars().count() > MAX_NOMBRE_ESCUELA => violaciones.push(
                self.fila(row.row_index, "Nombre no debe exceder 255 caracteres"),
            ),
            _ => {}
        }

        if let Some(direccion) = &row.direccion {
            if direccion.chars().count() > MAX_NOMBRE_ESCUELA {
                violaciones.push(
                    self.fila(row.row_index, "Dirección no debe exceder 255 caracteres"),
                );
            }
        }

        if row.municipio_id.is_none() {
            violaciones.push(self.fila(
                row.row_index,
                "Municipio no encontrado o no especificado",
            ));
        }

        if row.tipo_id.is_none() {
            violaciones.push(self.fila(
                row.row_index,
                "Tipo de escuela no encontrado o no especificado",
            ));
        }

        violaciones
    }

    pub fn validate_datos(&self, row: &DatosEducativosRow) -> Vec<String> {
        let mut violaciones = Vec::new();

        if row.escuela_id.is_none() {
            violaciones.push(self.fila(
                row.row_index,
                "Escuela no encontrada o no especificada",
            ));
        }

        match row.anio {
            Some(anio) if (ANIO_MIN..=ANIO_MAX).contains(&anio) => {}
            _ => violaciones.push(self.fila(row.row_index, "Año debe estar entre 2000 y 2100")),
        }

        let semestre_valido = row
            .semestre
            .as_deref()
            .and_then(Semestre::parse)
            .is_some();
        if !semestre_valido {
            violaciones.push(self.fila(row.row_index, "Semestre debe ser 1 o 2"));
        }

        match row.cantidad_alumnos {
            None => violaciones.push(self.fila(row.row_index, "Cantidad de alumnos es obligatoria")),
            Some(v) if v < 0 => violaciones.push(
                self.fila(row.row_index, "Cantidad de alumnos no puede ser negativa"),
            ),
            _ => {}
        }

        match row.numero_inscripciones {
            None => violaciones.push(
                self.fila(row.row_index, "Número de inscripciones es obligatorio"),
            ),
            Some(v) if v < 0 => violaciones.push(
                self.fila(row.row_index, "Número de inscripciones no puede ser negativo"),
            ),
            _ => {}
        }

        match row.tasa_desercion {
            None => violaciones.push(self.fila(row.row_index, "Tasa de deserción es obligatoria")),
            Some(v) if !(0.0..=100.0).contains(&v) => violaciones.push(
                self.fila(row.row_index, "Tasa de deserción debe estar entre 0 y 100"),
            ),
            _ => {}
        }

        if let Some(v) = row.tasa_promocion {
            if !(0.0..=100.0).contains(&v) {
                violaciones.push(
                    self.fila(row.row_index, "Tasa de promoción debe estar entre 0 y 100"),
                );
            }
        }

        if let Some(v) = row.promedio_calificaciones {
            if !(0.0..=100.0).contains(&v) {
                violaciones.push(self.fila(
                    row.row_index,
                    "Promedio de calificaciones debe estar entre 0 y 100",
                ));
            }
        }

        violaciones
    }

    pub fn validate_usuario(&self, row: &UsuarioRow) -> Vec<String> {
        let mut violaciones = Vec::new();

        if row.username.is_none() || row.email.is_none() || row.password.is_none() {
            violaciones.push(self.fila(
                row.row_index,
                "Faltan campos obligatorios (username, email, password)",
            ));
        }

        if let Some(password) = &row.password {
            if password.chars().count() < MIN_PASSWORD {
                violaciones.push(self.fila(
                    row.row_index,
                    "La contraseña debe tener al menos 6 caracteres",
                ));
            }
        }

        violaciones
    }

    // ==========================================
    // Auxiliares
    // ==========================================

    fn validate_nombre_catalogo(&self, nombre: Option<&str>, row_index: usize) -> Vec<String> {
        match nombre {
            None => vec![self.fila(row_index, "Nombre es obligatorio")],
            Some(n) if n.chars().count() > MAX_NOMBRE_CATALOGO => {
                vec![self.fila(row_index, "Nombre no debe exceder 100 caracteres")]
            }
            _ => Vec::new(),
        }
    }

    fn fila(&self, row_index: usize, mensaje: &str) -> String {
        format!("Fila {}: {}", row_index, mensaje)
    }
}
