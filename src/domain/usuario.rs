// ==========================================
// Sistema BI Educativo - Entidad Usuario
// ==========================================
// Clave natural: username O email (ambos únicos).
// La contraseña siempre se persiste como hash salteado;
// nunca se expone en respuestas de listado o consulta.
// ==========================================

use crate::domain::types::Rol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Usuario persistido (incluye hash de contraseña; uso interno)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Rol,
    pub creado_en: DateTime<Utc>,
}

/// Vista pública del usuario (sin contraseña)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioPublico {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Rol,
    pub creado_en: DateTime<Utc>,
}

impl From<Usuario> for UsuarioPublico {
    fn from(u: Usuario) -> Self {
        UsuarioPublico {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            creado_en: u.creado_en,
        }
    }
}

/// Datos para crear un usuario (contraseña en claro, se hashea al persistir)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuevoUsuario {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Rol,
}

/// Actualización parcial de usuario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActualizacionUsuario {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Rol>,
}

// ==========================================
// Hash de contraseñas
// ==========================================
// Formato persistido: "sha256$<salt>$<digest-hex>"

/// Hashea una contraseña con un salt aleatorio
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest_con_salt(&salt, password);
    format!("sha256${}${}", salt, digest)
}

/// Verifica una contraseña contra un hash persistido
pub fn verify_password(password: &str, almacenado: &str) -> bool {
    let partes: Vec<&str> = almacenado.split('$').collect();
    if partes.len() != 3 || partes[0] != "sha256" {
        return false;
    }
    digest_con_salt(partes[1], password) == partes[2]
}

fn digest_con_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
