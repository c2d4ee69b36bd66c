// ==========================================
// Sistema BI Educativo - Almacén de usuarios
// ==========================================
// Clave natural: username O email (ambos UNIQUE).
// El hash de contraseña entra ya calculado; este almacén
// no conoce contraseñas en claro.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::Rol;
use crate::domain::{ActualizacionUsuario, NuevoUsuario, Usuario};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const COLUMNAS: &str = "id, username, email, password, role, creado_en";

pub struct UsuarioRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UsuarioRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Usuario> {
        let role: String = row.get(4)?;
        Ok(Usuario {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            role: Rol::parse(&role),
            creado_en: row
                .get::<_, String>(5)?
                .parse::<chrono::DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    /// Lista todos los usuarios, del más reciente al más antiguo
    pub async fn find_all(&self) -> RepositoryResult<Vec<Usuario>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM usuarios ORDER BY creado_en DESC", COLUMNAS);
        let mut stmt = conn.prepare(&sql)?;
        let usuarios = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Usuario>>>()?;
        Ok(usuarios)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Usuario>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM usuarios WHERE id = ?1", COLUMNAS);
        let resultado = conn.query_row(&sql, params![id], Self::map_row);
        match resultado {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<Usuario>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM usuarios WHERE username = ?1", COLUMNAS);
        let resultado = conn.query_row(&sql, params![username], Self::map_row);
        match resultado {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Búsqueda puntual por clave natural (username O email)
    pub async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> RepositoryResult<Option<Usuario>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM usuarios WHERE username = ?1 OR email = ?2",
            COLUMNAS
        );
        let resultado = conn.query_row(&sql, params![username, email], Self::map_row);
        match resultado {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserta un usuario; `password_hash` ya viene hasheado
    pub async fn insert(
        &self,
        nuevo: &NuevoUsuario,
        password_hash: &str,
    ) -> RepositoryResult<Usuario> {
        let conn = self.get_conn()?;
        let creado_en = Utc::now();
        conn.execute(
            "INSERT INTO usuarios (username, email, password, role, creado_en) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                nuevo.username,
                nuevo.email,
                password_hash,
                nuevo.role.as_str(),
                creado_en.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Usuario {
            id,
            username: nuevo.username.clone(),
            email: nuevo.email.clone(),
            password: password_hash.to_string(),
            role: nuevo.role,
            creado_en,
        })
    }

    /// Actualización parcial; `password_hash` ya viene hasheado si cambia
    pub async fn update(
        &self,
        id: i64,
        cambios: &ActualizacionUsuario,
        password_hash: Option<&str>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute(
            r#"
            UPDATE usuarios SET
                username = COALESCE(?1, username),
                email = COALESCE(?2, email),
                password = COALESCE(?3, password),
                role = COALESCE(?4, role)
            WHERE id = ?5
            "#,
            params![
                cambios.username,
                cambios.email,
                password_hash,
                cambios.role.map(|r| r.as_str().to_string()),
                id,
            ],
        )?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "Usuario".to_string(),
                id,
            });
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM usuarios WHERE id = ?1", params![id])?)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM usuarios", [], |row| row.get(0))?)
    }
}
