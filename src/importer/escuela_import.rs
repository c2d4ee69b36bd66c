// ==========================================
// Sistema BI Educativo - Estrategia de escuelas
// ==========================================
// Clave natural: (nombre, municipio_id, tipo_id). Las listas de
// referencia de municipios y tipos las aporta el llamador al
// construir la estrategia; el normalizador resuelve contra ellas
// los nombres humanos.
// ==========================================

use crate::domain::import::{EscuelaRow, RawRow, Reconciliation};
use crate::domain::{ActualizacionEscuela, CatalogoNombre, NuevaEscuela};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_normalizer::RowNormalizer;
use crate::importer::row_validator::RowValidator;
use crate::importer::strategy::ImportStrategy;
use crate::repository::EscuelaRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct EscuelaImportStrategy {
    repo: Arc<EscuelaRepository>,
    municipios: Vec<CatalogoNombre>,
    tipos: Vec<CatalogoNombre>,
    normalizer: RowNormalizer,
    validator: RowValidator,
}

impl EscuelaImportStrategy {
    pub fn new(
        repo: Arc<EscuelaRepository>,
        municipios: Vec<CatalogoNombre>,
        tipos: Vec<CatalogoNombre>,
    ) -> Self {
        Self {
            repo,
            municipios,
            tipos,
            normalizer: RowNormalizer,
            validator: RowValidator,
        }
    }
}

#[async_trait]
impl ImportStrategy for EscuelaImportStrategy {
    type Row = EscuelaRow;

    fn entity_name(&self) -> &'static str {
        "escuelas"
    }

    fn normalize(&self, raw: &RawRow) -> EscuelaRow {
        self.normalizer
            .normalize_escuela(raw, &self.municipios, &self.tipos)
    }

    fn validate(&self, row: &EscuelaRow) -> Vec<String> {
        self.validator.validate_escuela(row)
    }

    async fn reconcile(&self, row: &EscuelaRow) -> ImportResult<Reconciliation> {
        let nombre = row
            .nombre
            .as_deref()
            .ok_or_else(|| ImportError::Internal("fila sin nombre tras validación".to_string()))?;
        let municipio_id = row
            .municipio_id
            .ok_or_else(|| ImportError::Internal("fila sin municipio tras validación".to_string()))?;
        let tipo_id = row
            .tipo_id
            .ok_or_else(|| ImportError::Internal("fila sin tipo tras validación".to_string()))?;

        match self
            .repo
            .find_by_natural_key(nombre, municipio_id, tipo_id)
            .await?
        {
            Some(existente) => {
                // Solo los campos presentes en la fila; los ausentes
                // conservan el valor persistido
                let cambios = ActualizacionEscuela {
                    nombre: None,
                    direccion: row.direccion.clone(),
                    telefono: row.telefono.clone(),
                    fecha_fundacion: row.fecha_fundacion,
                    municipio_id: None,
                    tipo_id: None,
                };
                self.repo.update(existente.id, &cambios).await?;
                Ok(Reconciliation::Updated)
            }
            None => {
                let nueva = NuevaEscuela {
                    nombre: nombre.to_string(),
                    direccion: row.direccion.clone(),
                    telefono: row.telefono.clone(),
                    fecha_fundacion: row.fecha_fundacion,
                    municipio_id,
                    tipo_id,
                };
                self.repo.insert(&nueva).await?;
                Ok(Reconciliation::Inserted)
            }
        }
    }
}
