// ==========================================
// Sistema BI Educativo - Capa de importación
// ==========================================
// Responsabilidad: carga masiva de datos externos.
// Flujo: archivo/JSON → normalizar → validar → reconciliar
// Un único pipeline genérico parametrizado por estrategia
// de entidad (municipios, tipos, escuelas, datos, usuarios).
// ==========================================

pub mod catalogo_import;
pub mod coordinator;
pub mod datos_import;
pub mod error;
pub mod escuela_import;
pub mod file_parser;
pub mod row_normalizer;
pub mod row_validator;
pub mod strategy;
pub mod usuario_import;

// Reexporta los tipos centrales
pub use catalogo_import::{MunicipioImportStrategy, TipoEscuelaImportStrategy};
pub use coordinator::{ImportCoordinator, BATCH_SIZE};
pub use datos_import::DatosEducativosImportStrategy;
pub use error::{ImportError, ImportResult};
pub use escuela_import::EscuelaImportStrategy;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use row_normalizer::RowNormalizer;
pub use row_validator::RowValidator;
pub use strategy::ImportStrategy;
pub use usuario_import::UsuarioImportStrategy;
