// ==========================================
// Sistema BI Educativo - API de escuelas
// ==========================================
// CRUD de escuelas. La escritura exige rol admin; las
// referencias a municipio y tipo se verifican al crear.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::Rol;
use crate::domain::{ActualizacionEscuela, Escuela, NuevaEscuela};
use crate::repository::{EscuelaRepository, MunicipioRepository, TipoEscuelaRepository};
use std::sync::Arc;

pub struct EscuelaApi {
    repo: Arc<EscuelaRepository>,
    municipio_repo: Arc<MunicipioRepository>,
    tipo_repo: Arc<TipoEscuelaRepository>,
}

impl EscuelaApi {
    pub fn new(
        repo: Arc<EscuelaRepository>,
        municipio_repo: Arc<MunicipioRepository>,
        tipo_repo: Arc<TipoEscuelaRepository>,
    ) -> Self {
        Self {
            repo,
            municipio_repo,
            tipo_repo,
        }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<Escuela>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ApiResult<Escuela> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Escuela con ID {} no encontrada", id)))
    }

    pub async fn create(&self, nueva: NuevaEscuela, rol: Rol) -> ApiResult<Escuela> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden crear escuelas".to_string(),
            ));
        }

        let nombre = nueva.nombre.trim().to_string();
        if nombre.is_empty() || nombre.chars().count() > 255 {
            return Err(ApiError::BadRequest(
                "Nombre es obligatorio y no debe exceder 255 caracteres".to_string(),
            ));
        }

        // las referencias deben existir
        if self
            .municipio_repo
            .find_by_id(nueva.municipio_id)
            .await?
            .is_none()
        {
            return Err(ApiError::BadRequest(format!(
                "Municipio con ID {} no encontrado",
                nueva.municipio_id
            )));
        }
        if self.tipo_repo.find_by_id(nueva.tipo_id).await?.is_none() {
            return Err(ApiError::BadRequest(format!(
                "Tipo de escuela con ID {} no encontrado",
                nueva.tipo_id
            )));
        }

        let nueva = NuevaEscuela { nombre, ..nueva };
        Ok(self.repo.insert(&nueva).await?)
    }

    pub async fn update(
        &self,
        id: i64,
        cambios: ActualizacionEscuela,
        rol: Rol,
    ) -> ApiResult<Escuela> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden actualizar escuelas".to_string(),
            ));
        }
        self.find_one(id).await?;
        self.repo.update(id, &cambios).await?;
        self.find_one(id).await
    }

    pub async fn remove(&self, id: i64, rol: Rol) -> ApiResult<()> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden eliminar escuelas".to_string(),
            ));
        }
        let afectadas = self.repo.delete(id).await?;
        if afectadas == 0 {
            return Err(ApiError::NotFound(format!(
                "Escuela con ID {} no encontrada",
                id
            )));
        }
        Ok(())
    }
}
