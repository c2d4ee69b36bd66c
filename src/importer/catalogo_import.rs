// ==========================================
// Sistema BI Educativo - Estrategias de catálogos
// ==========================================
// Municipios y tipos de escuela: clave natural = nombre.
// Reimportar el mismo nombre actualiza en sitio (idempotente).
// ==========================================

use crate::domain::import::{MunicipioRow, RawRow, Reconciliation, TipoEscuelaRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_normalizer::RowNormalizer;
use crate::importer::row_validator::RowValidator;
use crate::importer::strategy::ImportStrategy;
use crate::repository::{MunicipioRepository, TipoEscuelaRepository};
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// MunicipioImportStrategy
// ==========================================
pub struct MunicipioImportStrategy {
    repo: Arc<MunicipioRepository>,
    normalizer: RowNormalizer,
    validator: RowValidator,
}

impl MunicipioImportStrategy {
    pub fn new(repo: Arc<MunicipioRepository>) -> Self {
        Self {
            repo,
            normalizer: RowNormalizer,
            validator: RowValidator,
        }
    }
}

#[async_trait]
impl ImportStrategy for MunicipioImportStrategy {
    type Row = MunicipioRow;

    fn entity_name(&self) -> &'static str {
        "municipios"
    }

    fn normalize(&self, raw: &RawRow) -> MunicipioRow {
        self.normalizer.normalize_municipio(raw)
    }

    fn validate(&self, row: &MunicipioRow) -> Vec<String> {
        self.validator.validate_municipio(row)
    }

    async fn reconcile(&self, row: &MunicipioRow) -> ImportResult<Reconciliation> {
        let nombre = row
            .nombre
            .as_deref()
            .ok_or_else(|| ImportError::Internal("fila sin nombre tras validación".to_string()))?;

        match self.repo.find_by_nombre(nombre).await? {
            Some(existente) => {
                self.repo.update_nombre(existente.id, nombre).await?;
                Ok(Reconciliation::Updated)
            }
            None => {
                self.repo.insert(nombre).await?;
                Ok(Reconciliation::Inserted)
            }
        }
    }
}

// ==========================================
// TipoEscuelaImportStrategy
// ==========================================
pub struct TipoEscuelaImportStrategy {
    repo: Arc<TipoEscuelaRepository>,
    normalizer: RowNormalizer,
    validator: RowValidator,
}

impl TipoEscuelaImportStrategy {
    pub fn new(repo: Arc<TipoEscuelaRepository>) -> Self {
        Self {
            repo,
            normalizer: RowNormalizer,
            validator: RowValidator,
        }
    }
}

#[async_trait]
impl ImportStrategy for TipoEscuelaImportStrategy {
    type Row = TipoEscuelaRow;

    fn entity_name(&self) -> &'static str {
        "tipos-escuela"
    }

    fn normalize(&self, raw: &RawRow) -> TipoEscuelaRow {
        self.normalizer.normalize_tipo_escuela(raw)
    }

    fn validate(&self, row: &TipoEscuelaRow) -> Vec<String> {
        self.validator.validate_tipo_escuela(row)
    }

    async fn reconcile(&self, row: &TipoEscuelaRow) -> ImportResult<Reconciliation> {
        let nombre = row
            .nombre
            .as_deref()
            .ok_or_else(|| ImportError::Internal("fila sin nombre tras validación".to_string()))?;

        match self.repo.find_by_nombre(nombre).await? {
            Some(existente) => {
                self.repo.update_nombre(existente.id, nombre).await?;
                Ok(Reconciliation::Updated)
            }
            None => {
                self.repo.insert(nombre).await?;
                Ok(Reconciliation::Inserted)
            }
        }
    }
}
