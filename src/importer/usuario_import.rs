// ==========================================
// Sistema BI Educativo - Estrategia de usuarios
// ==========================================
// Clave natural: username O email. A diferencia del resto de
// entidades, la reimportación NUNCA actualiza: un usuario
// existente se reporta como fallo ("ya existe") para no pisar
// un hash de contraseña vivo.
// ==========================================

use crate::domain::import::{RawRow, Reconciliation, UsuarioRow};
use crate::domain::types::Rol;
use crate::domain::{hash_password, NuevoUsuario};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_normalizer::RowNormalizer;
use crate::importer::row_validator::RowValidator;
use crate::importer::strategy::ImportStrategy;
use crate::repository::UsuarioRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UsuarioImportStrategy {
    repo: Arc<UsuarioRepository>,
    normalizer: RowNormalizer,
    validator: RowValidator,
}

impl UsuarioImportStrategy {
    pub fn new(repo: Arc<UsuarioRepository>) -> Self {
        Self {
            repo,
            normalizer: RowNormalizer,
            validator: RowValidator,
        }
    }
}

#[async_trait]
impl ImportStrategy for UsuarioImportStrategy {
    type Row = UsuarioRow;

    fn entity_name(&self) -> &'static str {
        "usuarios"
    }

    fn normalize(&self, raw: &RawRow) -> UsuarioRow {
        self.normalizer.normalize_usuario(raw)
    }

    fn validate(&self, row: &UsuarioRow) -> Vec<String> {
        self.validator.validate_usuario(row)
    }

    async fn reconcile(&self, row: &UsuarioRow) -> ImportResult<Reconciliation> {
        let username = row
            .username
            .as_deref()
            .ok_or_else(|| ImportError::Internal("fila sin username tras validación".to_string()))?;
        let email = row
            .email
            .as_deref()
            .ok_or_else(|| ImportError::Internal("fila sin email tras validación".to_string()))?;
        let password = row
            .password
            .as_deref()
            .ok_or_else(|| ImportError::Internal("fila sin password tras validación".to_string()))?;

        if self
            .repo
            .find_by_username_or_email(username, email)
            .await?
            .is_some()
        {
            return Err(ImportError::UsuarioDuplicado);
        }

        let nuevo = NuevoUsuario {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: row.role.as_deref().map(Rol::parse).unwrap_or(Rol::User),
        };
        let hash = hash_password(password);
        self.repo.insert(&nuevo, &hash).await?;
        Ok(Reconciliation::Inserted)
    }
}
