// ==========================================
// Sistema BI Educativo - API de municipios
// ==========================================
// CRUD del catálogo de municipios. La escritura exige rol admin.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::Rol;
use crate::domain::Municipio;
use crate::repository::MunicipioRepository;
use std::sync::Arc;

pub struct MunicipioApi {
    repo: Arc<MunicipioRepository>,
}

impl MunicipioApi {
    pub fn new(repo: Arc<MunicipioRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<Municipio>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ApiResult<Municipio> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Municipio con ID {} no encontrado", id)))
    }

    pub async fn create(&self, nombre: &str, rol: Rol) -> ApiResult<Municipio> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden crear municipios".to_string(),
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

    pub async fn update(&self, id: i64, nombre: &str, rol: Rol) -> ApiResult<Municipio> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden actualizar municipios".to_string(),
            ));
        }
        let nombre = nombre.trim();
        if nombre.is_empty() || nombre.chars().count() > 100 {
            return Err(ApiError::BadRequest(
                "Nombre es obligatorio y no debe exceder 100 caracteres".to_string(),
            ));
        }
        // valida existencia antes de actualizar
        self.find_one(id).await?;
        self.repo.update_nombre(id, nombre).await?;
        Ok(Municipio {
            id,
            nombre: nombre.to_string(),
        })
    }

    pub async fn remove(&self, id: i64, rol: Rol) -> ApiResult<()> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden eliminar municipios".to_string(),
            ));
        }
        let afectadas = self.repo.delete(id).await?;
        if afectadas == 0 {
            return Err(ApiError::NotFound(format!(
                "Municipio con ID {} no encontrado",
                id
            )));
        }
        Ok(())
    }
}
