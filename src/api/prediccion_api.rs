// ==========================================
// Sistema BI Educativo - API de predicciones
// ==========================================
// Puente delgado al script estadístico externo (Python):
// ejecución síncrona del proceso con los parámetros en JSON,
// respuesta JSON por stdout, tiempo máximo acotado.
// El resultado se persiste para su consulta posterior.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{NuevaPrediccion, PrediccionIa, SolicitudPrediccion};
use crate::repository::PrediccionRepository;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

pub struct PrediccionApi {
    repo: Arc<PrediccionRepository>,
    script: PathBuf,
    timeout: Duration,
}

impl PrediccionApi {
    pub fn new(repo: Arc<PrediccionRepository>, script: PathBuf, timeout: Duration) -> Self {
        Self {
            repo,
            script,
            timeout,
        }
    }

    /// Ejecuta el script externo y persiste el resultado.
    ///
    /// El script recibe un único argumento: los parámetros en JSON
    /// (con `model_type` adentro). Devuelve JSON por stdout; un
    /// `status == "error"` del script se trata como fallo.
    pub async fn ejecutar(
        &self,
        solicitud: SolicitudPrediccion,
        usuario_id: Option<i64>,
    ) -> ApiResult<PrediccionIa> {
        let parametros_json = serde_json::to_string(&solicitud)
            .map_err(|e| ApiError::Internal(format!("no se pudo serializar la solicitud: {}", e)))?;

        info!(
            script = %self.script.display(),
            tipo_modelo = solicitud.tipo_modelo(),
            "Ejecutando script de predicción"
        );

        let salida = tokio::time::timeout(
            self.timeout,
            Command::new("python3")
                .arg(&self.script)
                .arg(&parametros_json)
                .output(),
        )
        .await
        .map_err(|_| {
            ApiError::Prediction(format!(
                "El script de predicción excedió el tiempo máximo ({} s)",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| ApiError::Prediction(format!("Fallo al ejecutar el script: {}", e)))?;

        let stderr = String::from_utf8_lossy(&salida.stderr);
        if !stderr.trim().is_empty() {
            warn!(stderr = %stderr.trim(), "El script de predicción escribió en stderr");
        }

        let stdout = String::from_utf8_lossy(&salida.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Err(ApiError::Prediction(
                "El script de predicción no devolvió salida".to_string(),
            ));
        }

        let resultado: serde_json::Value = serde_json::from_str(stdout)
            .map_err(|e| ApiError::Prediction(format!("Salida del script no es JSON: {}", e)))?;

        if resultado.get("status").and_then(|v| v.as_str()) == Some("error") {
            let mensaje = resultado
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("El script devolvió estado de error");
            return Err(ApiError::Prediction(mensaje.to_string()));
        }

        let prediccion = self
            .repo
            .insert(&NuevaPrediccion {
                tipo_modelo: solicitud.tipo_modelo().to_string(),
                parametros_json,
                resultado_json: resultado.to_string(),
                usuario_id,
            })
            .await?;

        info!(id = prediccion.id, "Predicción registrada");
        Ok(prediccion)
    }

    pub async fn find_all(&self) -> ApiResult<Vec<PrediccionIa>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ApiResult<PrediccionIa> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Predicción con ID {} no encontrada", id)))
    }

    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        let afectadas = self.repo.delete(id).await?;
        if afectadas == 0 {
            return Err(ApiError::NotFound(format!(
                "Predicción con ID {} no encontrada",
                id
            )));
        }
        Ok(())
    }
}
