// ==========================================
// Sistema BI Educativo - API del tablero
// ==========================================
// Responsabilidad: agregados de solo lectura para las gráficas
// del tablero (totales, alumnos por año, deserción por
// municipio, distribución urbana/rural).
// ==========================================

use crate::api::error::ApiResult;
use crate::repository::{
    AlumnosPorAnio, DatosEducativosRepository, DesercionPorMunicipio, EscuelaRepository,
    MunicipioRepository, TipoEscuelaRepository, UsuarioRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Conteo de registros urbanos y rurales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistribucionUrbana {
    pub urbanas: i64,
    pub rurales: i64,
}

/// Resumen completo del tablero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenDashboard {
    pub total_municipios: i64,
    pub total_tipos_escuela: i64,
    pub total_escuelas: i64,
    pub total_registros: i64,
    pub total_usuarios: i64,
    pub alumnos_por_anio: Vec<AlumnosPorAnio>,
    pub desercion_por_municipio: Vec<DesercionPorMunicipio>,
    pub distribucion_urbana: DistribucionUrbana,
}

pub struct DashboardApi {
    municipio_repo: Arc<MunicipioRepository>,
    tipo_repo: Arc<TipoEscuelaRepository>,
    escuela_repo: Arc<EscuelaRepository>,
    datos_repo: Arc<DatosEducativosRepository>,
    usuario_repo: Arc<UsuarioRepository>,
}

impl DashboardApi {
    pub fn new(
        municipio_repo: Arc<MunicipioRepository>,
        tipo_repo: Arc<TipoEscuelaRepository>,
        escuela_repo: Arc<EscuelaRepository>,
        datos_repo: Arc<DatosEducativosRepository>,
        usuario_repo: Arc<UsuarioRepository>,
    ) -> Self {
        Self {
            municipio_repo,
            tipo_repo,
            escuela_repo,
            datos_repo,
            usuario_repo,
        }
    }

    /// Arma el resumen del tablero en una sola respuesta
    pub async fn resumen(&self) -> ApiResult<ResumenDashboard> {
        let total_municipios = self.municipio_repo.count().await?;
        let total_tipos_escuela = self.tipo_repo.count().await?;
        let total_escuelas = self.escuela_repo.count().await?;
        let total_registros = self.datos_repo.count().await?;
        let total_usuarios = self.usuario_repo.count().await?;

        let alumnos_por_anio = self.datos_repo.alumnos_por_anio().await?;
        let desercion_por_municipio = self.datos_repo.desercion_por_municipio().await?;
        let (urbanas, rurales) = self.datos_repo.distribucion_urbana().await?;

        Ok(ResumenDashboard {
            total_municipios,
            total_tipos_escuela,
            total_escuelas,
            total_registros,
            total_usuarios,
            alumnos_por_anio,
            desercion_por_municipio,
            distribucion_urbana: DistribucionUrbana { urbanas, rurales },
        })
    }
}
