// ==========================================
// Sistema BI Educativo - Capa de almacén
// ==========================================
// Responsabilidad: acceso a datos, sin lógica de negocio.
// Restricción: toda consulta es parametrizada.
// ==========================================

pub mod datos_educativos_repo;
pub mod error;
pub mod escuela_repo;
pub mod municipio_repo;
pub mod prediccion_repo;
pub mod tipo_escuela_repo;
pub mod usuario_repo;

// Reexporta los almacenes
pub use datos_educativos_repo::{
    AlumnosPorAnio, DatosEducativosRepository, DesercionPorMunicipio,
};
pub use error::{RepositoryError, RepositoryResult};
pub use escuela_repo::EscuelaRepository;
pub use municipio_repo::MunicipioRepository;
pub use prediccion_repo::PrediccionRepository;
pub use tipo_escuela_repo::TipoEscuelaRepository;
pub use usuario_repo::UsuarioRepository;
