// ==========================================
// Sistema BI Educativo - Estado de la aplicación
// ==========================================
// Responsabilidad: construir las capas (conexión compartida →
// almacenes → APIs) y exponerlas a los manejadores HTTP.
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{
    DashboardApi, DatosEducativosApi, EscuelaApi, ImportApi, MunicipioApi, PrediccionApi,
    TipoEscuelaApi, UsuarioApi,
};
use crate::config::AppConfig;
use crate::db;
use crate::repository::{
    DatosEducativosRepository, EscuelaRepository, MunicipioRepository, PrediccionRepository,
    TipoEscuelaRepository, UsuarioRepository,
};

/// Estado de la aplicación
///
/// Contiene todas las instancias de API y los recursos compartidos.
pub struct AppState {
    /// Ruta de la base de datos
    pub db_path: String,

    pub municipio_api: Arc<MunicipioApi>,
    pub tipo_escuela_api: Arc<TipoEscuelaApi>,
    pub escuela_api: Arc<EscuelaApi>,
    pub datos_api: Arc<DatosEducativosApi>,
    pub usuario_api: Arc<UsuarioApi>,
    pub import_api: Arc<ImportApi>,
    pub dashboard_api: Arc<DashboardApi>,
    pub prediccion_api: Arc<PrediccionApi>,
}

impl AppState {
    /// Construye el estado completo de la aplicación
    ///
    /// # Pasos
    /// 1. Abre la conexión compartida y crea el esquema
    /// 2. Inicializa los almacenes sobre esa conexión
    /// 3. Crea las instancias de API
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        tracing::info!("Inicializando AppState, base de datos: {}", config.db_path);

        let conn = db::open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("No se pudo abrir la base de datos: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("No se pudo crear el esquema: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Capa de almacén
        // ==========================================
        let municipio_repo = Arc::new(MunicipioRepository::from_connection(conn.clone()));
        let tipo_repo = Arc::new(TipoEscuelaRepository::from_connection(conn.clone()));
        let escuela_repo = Arc::new(EscuelaRepository::from_connection(conn.clone()));
        let datos_repo = Arc::new(DatosEducativosRepository::from_connection(conn.clone()));
        let usuario_repo = Arc::new(UsuarioRepository::from_connection(conn.clone()));
        let prediccion_repo = Arc::new(PrediccionRepository::from_connection(conn.clone()));

        // ==========================================
        // Capa API
        // ==========================================
        let municipio_api = Arc::new(MunicipioApi::new(municipio_repo.clone()));
        let tipo_escuela_api = Arc::new(TipoEscuelaApi::new(tipo_repo.clone()));
        let escuela_api = Arc::new(EscuelaApi::new(
            escuela_repo.clone(),
            municipio_repo.clone(),
            tipo_repo.clone(),
        ));
        let datos_api = Arc::new(DatosEducativosApi::new(datos_repo.clone()));
        let usuario_api = Arc::new(UsuarioApi::new(usuario_repo.clone()));

        let import_api = Arc::new(ImportApi::new(
            municipio_repo.clone(),
            tipo_repo.clone(),
            escuela_repo.clone(),
            datos_repo.clone(),
            usuario_repo.clone(),
        ));

        let dashboard_api = Arc::new(DashboardApi::new(
            municipio_repo,
            tipo_repo,
            escuela_repo,
            datos_repo,
            usuario_repo,
        ));

        let prediccion_api = Arc::new(PrediccionApi::new(
            prediccion_repo,
            PathBuf::from(&config.ai_script),
            Duration::from_secs(config.ai_timeout_secs),
        ));

        tracing::info!("AppState inicializado");

        Ok(Self {
            db_path: config.db_path.clone(),
            municipio_api,
            tipo_escuela_api,
            escuela_api,
            datos_api,
            usuario_api,
            import_api,
            dashboard_api,
            prediccion_api,
        })
    }
}
