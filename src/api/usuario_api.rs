// ==========================================
// Sistema BI Educativo - API de usuarios
// ==========================================
// CRUD de usuarios. Las respuestas nunca incluyen el hash de
// contraseña. Crear no exige admin (registro), pero actualizar
// y eliminar sí.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::Rol;
use crate::domain::{
    hash_password, ActualizacionUsuario, NuevoUsuario, UsuarioPublico,
};
use crate::repository::UsuarioRepository;
use std::sync::Arc;

pub struct UsuarioApi {
    repo: Arc<UsuarioRepository>,
}

impl UsuarioApi {
    pub fn new(repo: Arc<UsuarioRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<UsuarioPublico>> {
        let usuarios = self.repo.find_all().await?;
        Ok(usuarios.into_iter().map(UsuarioPublico::from).collect())
    }

    pub async fn find_one(&self, id: i64) -> ApiResult<UsuarioPublico> {
        self.repo
            .find_by_id(id)
            .await?
            .map(UsuarioPublico::from)
            .ok_or_else(|| ApiError::NotFound(format!("Usuario con ID {} no encontrado", id)))
    }

    pub async fn create(&self, nuevo: NuevoUsuario) -> ApiResult<UsuarioPublico> {
        let username = nuevo.username.trim();
        let email = nuevo.email.trim();
        if username.is_empty() || email.is_empty() || nuevo.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Faltan campos obligatorios (username, email, password)".to_string(),
            ));
        }
        if nuevo.password.chars().count() < 6 {
            return Err(ApiError::BadRequest(
                "La contraseña debe tener al menos 6 caracteres".to_string(),
            ));
        }

        if self
            .repo
            .find_by_username_or_email(username, email)
            .await?
            .is_some()
        {
            return Err(ApiError::BadRequest(
                "El username o email ya existe".to_string(),
            ));
        }

        let hash = hash_password(&nuevo.password);
        let usuario = self
            .repo
            .insert(
                &NuevoUsuario {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: nuevo.password.clone(),
                    role: nuevo.role,
                },
                &hash,
            )
            .await?;
        Ok(UsuarioPublico::from(usuario))
    }

    pub async fn update(
        &self,
        id: i64,
        cambios: ActualizacionUsuario,
        rol: Rol,
    ) -> ApiResult<UsuarioPublico> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden actualizar usuarios".to_string(),
            ));
        }
        self.find_one(id).await?;

        // si llega contraseña nueva, se rehashea; nunca se guarda en claro
        let password_hash = match &cambios.password {
            Some(password) => {
                if password.chars().count() < 6 {
                    return Err(ApiError::BadRequest(
                        "La contraseña debe tener al menos 6 caracteres".to_string(),
                    ));
                }
                Some(hash_password(password))
            }
            None => None,
        };

        self.repo
            .update(id, &cambios, password_hash.as_deref())
            .await?;
        self.find_one(id).await
    }

    pub async fn remove(&self, id: i64, rol: Rol) -> ApiResult<()> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden eliminar usuarios".to_string(),
            ));
        }
        let afectadas = self.repo.delete(id).await?;
        if afectadas == 0 {
            return Err(ApiError::NotFound(format!(
                "Usuario con ID {} no encontrado",
                id
            )));
        }
        Ok(())
    }
}
