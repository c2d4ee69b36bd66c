// ==========================================
// Sistema BI Educativo - Manejadores HTTP
// ==========================================
// Solo traducción de transporte: extraer rol y cuerpo,
// delegar en la capa API y serializar la respuesta.
// ==========================================

pub mod common;
pub mod dashboard;
pub mod datos_educativos;
pub mod escuelas;
pub mod municipios;
pub mod predicciones;
pub mod tipos_escuela;
pub mod usuarios;
