// ==========================================
// Sistema BI Educativo - Capa de dominio
// ==========================================
// Responsabilidad: entidades, tipos y estructuras del flujo
// de importación. Sin acceso a datos ni lógica de transporte.
// ==========================================

pub mod catalogo;
pub mod datos_educativos;
pub mod escuela;
pub mod import;
pub mod prediccion;
pub mod types;
pub mod usuario;

// Reexporta los tipos centrales
pub use catalogo::{CatalogoNombre, Municipio, TipoEscuela};
pub use datos_educativos::{
    ActualizacionDatosEducativos, DatosEducativos, NuevosDatosEducativos,
};
pub use escuela::{ActualizacionEscuela, Escuela, NuevaEscuela};
pub use import::{
    DatosEducativosRow, EscuelaRow, ImportSummary, MunicipioRow, RawRow, Reconciliation,
    TipoEscuelaRow, UsuarioRow,
};
pub use prediccion::{NuevaPrediccion, PrediccionIa, SolicitudPrediccion};
pub use types::{Rol, Semestre, TipoEntidad};
pub use usuario::{
    hash_password, verify_password, ActualizacionUsuario, NuevoUsuario, Usuario, UsuarioPublico,
};
