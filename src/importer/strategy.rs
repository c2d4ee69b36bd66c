// ==========================================
// Sistema BI Educativo - Estrategia de importación
// ==========================================
// Responsabilidad: definir la interfaz que parametriza el
// coordinador genérico. Una estrategia por clase de entidad
// aporta: normalización, reglas de validación y la decisión
// de reconciliación (crear vs. actualizar por clave natural).
// ==========================================

use crate::domain::import::{RawRow, Reconciliation};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// ImportStrategy Trait
// ==========================================
// Implementadores: MunicipioImportStrategy, TipoEscuelaImportStrategy,
// EscuelaImportStrategy, DatosEducativosImportStrategy,
// UsuarioImportStrategy
#[async_trait]
pub trait ImportStrategy: Send + Sync {
    /// Fila normalizada de la entidad
    type Row: Send + Sync;

    /// Nombre de la entidad (para logs)
    fn entity_name(&self) -> &'static str;

    /// Normaliza una fila cruda a la fila tipada de la entidad.
    ///
    /// Función pura: los campos ausentes quedan en None y los
    /// reporta el validador, nunca se rellenan aquí.
    fn normalize(&self, raw: &RawRow) -> Self::Row;

    /// Devuelve las violaciones de la fila, ya prefijadas con
    /// "Fila {n}: ". Lista vacía = fila válida.
    fn validate(&self, row: &Self::Row) -> Vec<String>;

    /// Reconcilia una fila válida contra el almacén:
    /// - clave natural existente → actualización en sitio
    ///   (los campos opcionales ausentes conservan su valor)
    /// - clave natural inexistente → inserción
    ///
    /// Los errores de persistencia se devuelven como Err y el
    /// coordinador los convierte en un error de fila; nunca
    /// abortan el resto del lote.
    async fn reconcile(&self, row: &Self::Row) -> ImportResult<Reconciliation>;
}
