// ==========================================
// Sistema BI Educativo - Tipos de dominio
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Rol de usuario
// ==========================================
// Solo dos roles: 'admin' controla toda la escritura
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    User,
}

impl Rol {
    /// Interpreta el rol recibido del colaborador de autenticación.
    /// Cualquier valor desconocido degrada a `User` (mínimo privilegio).
    pub fn parse(valor: &str) -> Rol {
        match valor.trim().to_lowercase().as_str() {
            "admin" => Rol::Admin,
            _ => Rol::User,
        }
    }

    pub fn es_admin(&self) -> bool {
        matches!(self, Rol::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::User => "user",
        }
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Semestre escolar
// ==========================================
// Persistido como texto '1' / '2' (clave natural de datos_educativos)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semestre {
    #[serde(rename = "1")]
    Primero,
    #[serde(rename = "2")]
    Segundo,
}

impl Semestre {
    pub fn parse(valor: &str) -> Option<Semestre> {
        match valor.trim() {
            "1" => Some(Semestre::Primero),
            "2" => Some(Semestre::Segundo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Semestre::Primero => "1",
            Semestre::Segundo => "2",
        }
    }
}

impl fmt::Display for Semestre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Clase de entidad importable
// ==========================================
// Usada por la importación desde archivo para despachar la estrategia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipoEntidad {
    Municipios,
    TiposEscuela,
    Escuelas,
    DatosEducativos,
    Usuarios,
}

impl TipoEntidad {
    pub fn parse(valor: &str) -> Option<TipoEntidad> {
        match valor.trim().to_lowercase().as_str() {
            "municipios" => Some(TipoEntidad::Municipios),
            "tipos-escuela" | "tipos_escuela" => Some(TipoEntidad::TiposEscuela),
            "escuelas" => Some(TipoEntidad::Escuelas),
            "datos-educativos" | "datos_educativos" => Some(TipoEntidad::DatosEducativos),
            "usuarios" => Some(TipoEntidad::Usuarios),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEntidad::Municipios => "municipios",
            TipoEntidad::TiposEscuela => "tipos-escuela",
            TipoEntidad::Escuelas => "escuelas",
            TipoEntidad::DatosEducativos => "datos-educativos",
            TipoEntidad::Usuarios => "usuarios",
        }
    }
}

impl fmt::Display for TipoEntidad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
