// ==========================================
// Sistema BI Educativo - API de datos educativos
// ==========================================
// CRUD de métricas por escuela/año/semestre. La escritura
// exige rol admin. Consultas por escuela y por año para el
// tablero y los listados.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::Rol;
use crate::domain::{
    ActualizacionDatosEducativos, DatosEducativos, NuevosDatosEducativos,
};
use crate::repository::DatosEducativosRepository;
use std::sync::Arc;

pub struct DatosEducativosApi {
    repo: Arc<DatosEducativosRepository>,
}

impl DatosEducativosApi {
    pub fn new(repo: Arc<DatosEducativosRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<DatosEducativos>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ApiResult<DatosEducativos> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            ApiError::NotFound(format!("DatosEducativos con ID {} no encontrado", id))
        })
    }

    pub async fn find_by_escuela(&self, escuela_id: i64) -> ApiResult<Vec<DatosEducativos>> {
        Ok(self.repo.find_by_escuela(escuela_id).await?)
    }

    pub async fn find_by_anio(&self, anio: i32) -> ApiResult<Vec<DatosEducativos>> {
        Ok(self.repo.find_by_anio(anio).await?)
    }

    pub async fn create(
        &self,
        nuevos: NuevosDatosEducativos,
        rol: Rol,
    ) -> ApiResult<DatosEducativos> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden crear registros".to_string(),
            ));
        }
        if !(2000..=2100).contains(&nuevos.anio) {
            return Err(ApiError::BadRequest(
                "Año debe estar entre 2000 y 2100".to_string(),
            ));
        }
        if nuevos.cantidad_alumnos < 0 || nuevos.numero_inscripciones < 0 {
            return Err(ApiError::BadRequest(
                "Los conteos no pueden ser negativos".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&nuevos.tasa_desercion) {
            return Err(ApiError::BadRequest(
                "Tasa de deserción debe estar entre 0 y 100".to_string(),
            ));
        }
        Ok(self.repo.insert(&nuevos).await?)
    }

    pub async fn update(
        &self,
        id: i64,
        cambios: ActualizacionDatosEducativos,
        rol: Rol,
    ) -> ApiResult<DatosEducativos> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden actualizar registros".to_string(),
            ));
        }
        self.find_one(id).await?;
        self.repo.update(id, &cambios).await?;
        self.find_one(id).await
    }

    pub async fn remove(&self, id: i64, rol: Rol) -> ApiResult<()> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden eliminar registros".to_string(),
            ));
        }
        let afectadas = self.repo.delete(id).await?;
        if afectadas == 0 {
            return Err(ApiError::NotFound(format!(
                "DatosEducativos con ID {} no encontrado",
                id
            )));
        }
        Ok(())
    }
}
