// ==========================================
// Sistema BI Educativo - API de tipos de escuela
// ==========================================
// CRUD del catálogo de tipos. La escritura exige rol admin.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::Rol;
use crate::domain::TipoEscuela;
use crate::repository::TipoEscuelaRepository;
use std::sync::Arc;

pub struct TipoEscuelaApi {
    repo: Arc<TipoEscuelaRepository>,
}

impl TipoEscuelaApi {
    pub fn new(repo: Arc<TipoEscuelaRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<TipoEscuela>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ApiResult<TipoEscuela> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            ApiError::NotFound(format!("Tipo de escuela con ID {} no encontrado", id))
        })
    }

    pub async fn create(&self, nombre: &str, rol: Rol) -> ApiResult<TipoEscuela> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden crear tipos de escuela".to_string(),
            ));
        }
        let nombre = nombre.trim();
        if nombre.is_empty() || nombre.chars().count() > 100 {
            return Err(ApiError::BadRequest(
                "Nombre es obligatorio y no debe exceder 100 caracteres".to_string(),
            ));
        }
        Ok(self.repo.insert(nombre).await?)
    }

    pub async fn update(&self, id: i64, nombre: &str, rol: Rol) -> ApiResult<TipoEscuela> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden actualizar tipos de escuela".to_string(),
            ));
        }
        let nombre = nombre.trim();
        if nombre.is_empty() || nombre.chars().count() > 100 {
            return Err(ApiError::BadRequest(
                "Nombre es obligatorio y no debe exceder 100 caracteres".to_string(),
            ));
        }
        self.find_one(id).await?;
        self.repo.update_nombre(id, nombre).await?;
        Ok(TipoEscuela {
            id,
            nombre: nombre.to_string(),
        })
    }

    pub async fn remove(&self, id: i64, rol: Rol) -> ApiResult<()> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden eliminar tipos de escuela".to_string(),
            ));
        }
        let afectadas = self.repo.delete(id).await?;
        if afectadas == 0 {
            return Err(ApiError::NotFound(format!(
                "Tipo de escuela con ID {} no encontrado",
                id
            )));
        }
        Ok(())
    }
}
