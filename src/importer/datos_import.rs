// ==========================================
// Sistema BI Educativo - Estrategia de datos educativos
// ==========================================
// Clave natural: (escuela_id, anio, semestre). Dos filas del
// mismo archivo con la misma clave se resuelven en orden:
// la primera inserta, la segunda actualiza (gana la última
// escritura sobre los campos compartidos).
// ==========================================

use crate::domain::import::{DatosEducativosRow, RawRow, Reconciliation};
use crate::domain::types::Semestre;
use crate::domain::{
    ActualizacionDatosEducativos, CatalogoNombre, NuevosDatosEducativos,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_normalizer::RowNormalizer;
use crate::importer::row_validator::RowValidator;
use crate::importer::strategy::ImportStrategy;
use crate::repository::DatosEducativosRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct DatosEducativosImportStrategy {
    repo: Arc<DatosEducativosRepository>,
    escuelas: Vec<CatalogoNombre>,
    normalizer: RowNormalizer,
    validator: RowValidator,
}

impl DatosEducativosImportStrategy {
    pub fn new(repo: Arc<DatosEducativosRepository>, escuelas: Vec<CatalogoNombre>) -> Self {
        Self {
            repo,
            escuelas,
            normalizer: RowNormalizer,
            validator: RowValidator,
        }
    }
}

#[async_trait]
impl ImportStrategy for DatosEducativosImportStrategy {
    type Row = DatosEducativosRow;

    fn entity_name(&self) -> &'static str {
        "datos-educativos"
    }

    fn normalize(&self, raw: &RawRow) -> DatosEducativosRow {
        self.normalizer.normalize_datos(raw, &self.escuelas)
    }

    fn validate(&self, row: &DatosEducativosRow) -> Vec<String> {
        self.validator.validate_datos(row)
    }

    async fn reconcile(&self, row: &DatosEducativosRow) -> ImportResult<Reconciliation> {
        let escuela_id = row
            .escuela_id
            .ok_or_else(|| ImportError::Internal("fila sin escuela tras validación".to_string()))?;
        let anio = row
            .anio
            .ok_or_else(|| ImportError::Internal("fila sin año tras validación".to_string()))?;
        let semestre = row
            .semestre
            .as_deref()
            .and_then(Semestre::parse)
            .ok_or_else(|| ImportError::Internal("fila sin semestre tras validación".to_string()))?;
        let cantidad_alumnos = row
            .cantidad_alumnos
            .ok_or_else(|| ImportError::Internal("fila sin alumnos tras validación".to_string()))?;
        let numero_inscripciones = row.numero_inscripciones.ok_or_else(|| {
            ImportError::Internal("fila sin inscripciones tras validación".to_string())
        })?;
        let tasa_desercion = row
            .tasa_desercion
            .ok_or_else(|| ImportError::Internal("fila sin deserción tras validación".to_string()))?;

        match self
            .repo
            .find_by_natural_key(escuela_id, anio, semestre)
            .await?
        {
            Some(existente) => {
                // Métricas presentes en la fila; las ausentes conservan
                // el valor persistido
                let cambios = ActualizacionDatosEducativos {
                    cantidad_alumnos: Some(cantidad_alumnos),
                    numero_inscripciones: Some(numero_inscripciones),
                    tasa_desercion: Some(tasa_desercion),
                    tasa_promocion: row.tasa_promocion,
                    numero_maestros: row.numero_maestros,
                    promedio_calificaciones: row.promedio_calificaciones,
                    es_urbana: row.es_urbana,
                };
                self.repo.update(existente.id, &cambios).await?;
                Ok(Reconciliation::Updated)
            }
            None => {
                let nuevos = NuevosDatosEducativos {
                    escuela_id,
                    anio,
                    semestre,
                    cantidad_alumnos,
                    numero_inscripciones,
                    tasa_desercion,
                    tasa_promocion: row.tasa_promocion,
                    numero_maestros: row.numero_maestros,
                    promedio_calificaciones: row.promedio_calificaciones,
                    // ausente en el alta → urbana (valor por omisión del original)
                    es_urbana: row.es_urbana.unwrap_or(true),
                };
                self.repo.insert(&nuevos).await?;
                Ok(Reconciliation::Inserted)
            }
        }
    }
}
