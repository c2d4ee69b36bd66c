// ==========================================
// Sistema BI Educativo - Configuración
// ==========================================
// Responsabilidad: configuración de arranque leída del entorno,
// con valores por omisión utilizables en desarrollo.
// ==========================================

use std::path::PathBuf;

/// Tiempo máximo por omisión del script de predicción (segundos)
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Configuración de la aplicación
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ruta del archivo SQLite
    pub db_path: String,
    /// Dirección de escucha del servidor HTTP
    pub listen_addr: String,
    /// Ruta del script Python de predicciones
    pub ai_script: PathBuf,
    /// Tiempo máximo del script de predicción (segundos)
    pub ai_timeout_secs: u64,
}

impl AppConfig {
    /// Lee la configuración de variables de entorno:
    /// - BI_EDUCATIVO_DB_PATH
    /// - BI_EDUCATIVO_LISTEN (por omisión 127.0.0.1:3000)
    /// - BI_EDUCATIVO_AI_SCRIPT (por omisión python-scripts/ai_model.py)
    /// - BI_EDUCATIVO_AI_TIMEOUT (segundos)
    pub fn from_env() -> Self {
        let listen_addr = std::env::var("BI_EDUCATIVO_LISTEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1:3000".to_string());

        let ai_script = std::env::var("BI_EDUCATIVO_AI_SCRIPT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("python-scripts/ai_model.py"));

        let ai_timeout_secs = std::env::var("BI_EDUCATIVO_AI_TIMEOUT")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_AI_TIMEOUT_SECS);

        Self {
            db_path: default_db_path(),
            listen_addr,
            ai_script,
            ai_timeout_secs,
        }
    }
}

/// Ruta por omisión de la base de datos
///
/// - BI_EDUCATIVO_DB_PATH la sobreescribe (depuración/pruebas/CI)
/// - si no, el directorio de datos del usuario
///   (bi-educativo-dev en builds de depuración)
/// - último recurso: ./bi_educativo.db
pub fn default_db_path() -> String {
    if let Ok(path) = std::env::var("BI_EDUCATIVO_DB_PATH") {
        let recortado = path.trim();
        if !recortado.is_empty() {
            return recortado.to_string();
        }
    }

    let mut path = PathBuf::from("./bi_educativo.db");

    if let Some(data_dir) = dirs::data_dir() {
        // directorio separado en desarrollo para no tocar datos reales
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("bi-educativo-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("bi-educativo");
        }

        std::fs::create_dir_all(&path).ok();
        path = path.join("bi_educativo.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_termina_en_db() {
        let path = default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }
}
