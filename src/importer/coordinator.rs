// ==========================================
// Sistema BI Educativo - Coordinador de importación
// ==========================================
// Responsabilidad: recorrer la secuencia completa de filas en
// lotes de tamaño fijo y acumular el resumen.
// Flujo por fila: normalizar → validar → reconciliar.
// - Las filas se procesan estrictamente en orden de archivo;
//   la fila N+1 no inicia hasta que la N terminó (éxito o error).
// - Los lotes NO tienen semántica transaccional: solo acotan el
//   uso de recursos por tanda.
// - Todo problema por fila queda dentro del resumen; el
//   coordinador no propaga excepciones.
// ==========================================

use crate::domain::import::{ImportSummary, RawRow};
use crate::importer::strategy::ImportStrategy;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Tamaño de lote fijo
pub const BATCH_SIZE: usize = 100;

pub struct ImportCoordinator<S: ImportStrategy> {
    strategy: S,
    batch_size: usize,
}

impl<S: ImportStrategy> ImportCoordinator<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            batch_size: BATCH_SIZE,
        }
    }

    /// Variante con tamaño de lote explícito (pruebas)
    pub fn with_batch_size(strategy: S, batch_size: usize) -> Self {
        Self {
            strategy,
            batch_size: batch_size.max(1),
        }
    }

    /// Procesa todas las filas y devuelve el resumen completo.
    ///
    /// El resumen se entrega solo al terminar: no hay resultado
    /// parcial ni mecanismo de cancelación.
    pub async fn run(&self, rows: &[RawRow]) -> ImportSummary {
        let lote_id = Uuid::new_v4().to_string();
        info!(
            lote_id = %lote_id,
            entidad = self.strategy.entity_name(),
            total_filas = rows.len(),
            "Inicia importación masiva"
        );

        let mut summary = ImportSummary::default();

        for (num_lote, lote) in rows.chunks(self.batch_size).enumerate() {
            debug!(lote_id = %lote_id, num_lote, filas = lote.len(), "Procesando lote");

            for raw in lote {
                let row = self.strategy.normalize(raw);

                let violaciones = self.strategy.validate(&row);
                if !violaciones.is_empty() {
                    summary.failed += 1;
                    summary.errors.extend(violaciones);
                    continue;
                }

                match self.strategy.reconcile(&row).await {
                    Ok(_) => summary.imported += 1,
                    Err(e) => {
                        warn!(
                            lote_id = %lote_id,
                            entidad = self.strategy.entity_name(),
                            fila = raw.row_index,
                            error = %e,
                            "Fila rechazada en persistencia"
                        );
                        summary.failed += 1;
                        summary.errors.push(format!("Fila {}: {}", raw.row_index, e));
                    }
                }
            }
        }

        info!(
            lote_id = %lote_id,
            entidad = self.strategy.entity_name(),
            imported = summary.imported,
            failed = summary.failed,
            "Importación masiva completada"
        );

        summary
    }
}
