// ==========================================
// Sistema BI Educativo - Catálogos base
// ==========================================
// Municipios y tipos de escuela: catálogos planos con
// nombre único (clave natural para la importación masiva)
// ==========================================

use serde::{Deserialize, Serialize};

/// Municipio registrado en el sistema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Municipio {
    pub id: i64,
    pub nombre: String,
}

/// Tipo de escuela (primaria, secundaria, técnica, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipoEscuela {
    pub id: i64,
    pub nombre: String,
}

// ==========================================
// CatalogoNombre - entrada de lista de referencia
// ==========================================
// Par (id, nombre) usado por el normalizador para resolver
// claves foráneas expresadas como nombre humano.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogoNombre {
    pub id: i64,
    pub nombre: String,
}

impl CatalogoNombre {
    pub fn new(id: i64, nombre: impl Into<String>) -> Self {
        Self {
            id,
            nombre: nombre.into(),
        }
    }
}

impl From<&Municipio> for CatalogoNombre {
    fn from(m: &Municipio) -> Self {
        CatalogoNombre::new(m.id, m.nombre.clone())
    }
}

impl From<&TipoEscuela> for CatalogoNombre {
    fn from(t: &TipoEscuela) -> Self {
        CatalogoNombre::new(t.id, t.nombre.clone())
    }
}
