// ==========================================
// Sistema BI Educativo - Capa API
// ==========================================
// Responsabilidad: reglas de negocio por entidad (puertas de
// rol, validación de solicitud) sobre la capa de almacén.
// Los manejadores HTTP de app/ solo traducen transporte.
// ==========================================

pub mod dashboard_api;
pub mod datos_educativos_api;
pub mod error;
pub mod escuela_api;
pub mod import_api;
pub mod municipio_api;
pub mod prediccion_api;
pub mod tipo_escuela_api;
pub mod usuario_api;

// Reexporta los tipos centrales
pub use dashboard_api::{DashboardApi, DistribucionUrbana, ResumenDashboard};
pub use datos_educativos_api::DatosEducativosApi;
pub use error::{ApiError, ApiResult};
pub use escuela_api::EscuelaApi;
pub use import_api::ImportApi;
pub use municipio_api::MunicipioApi;
pub use prediccion_api::PrediccionApi;
pub use tipo_escuela_api::TipoEscuelaApi;
pub use usuario_api::UsuarioApi;
