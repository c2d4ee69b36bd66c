// ==========================================
// Sistema BI Educativo - Almacén de tipos de escuela
// ==========================================
// Misma forma que el almacén de municipios: catálogo plano
// con nombre único.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::TipoEscuela;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct TipoEscuelaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TipoEscuelaRepository {
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

    pub async fn find_all(&self) -> RepositoryResult<Vec<TipoEscuela>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, nombre FROM tipos_escuela ORDER BY nombre ASC")?;
        let tipos = stmt
            .query_map([], |row| {
                Ok(TipoEscuela {
                    id: row.get(0)?,
                    nombre: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<TipoEscuela>>>()?;
        Ok(tipos)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<TipoEscuela>> {
        let conn = self.get_conn()?;
        let resultado = conn.query_row(
            "SELECT id, nombre FROM tipos_escuela WHERE id = ?1",
            params![id],
            |row| {
                Ok(TipoEscuela {
                    id: row.get(0)?,
                    nombre: row.get(1)?,
                })
            },
        );
        match resultado {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Búsqueda puntual por clave natural (nombre exacto)
    pub async fn find_by_nombre(&self, nombre: &str) -> RepositoryResult<Option<TipoEscuela>> {
        let conn = self.get_conn()?;
        let resultado = conn.query_row(
            "SELECT id, nombre FROM tipos_escuela WHERE nombre = ?1",
            params![nombre],
            |row| {
                Ok(TipoEscuela {
                    id: row.get(0)?,
                    nombre: row.get(1)?,
                })
            },
        );
        match resultado {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn insert(&self, nombre: &str) -> RepositoryResult<TipoEscuela> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO tipos_escuela (nombre) VALUES (?1)",
            params![nombre],
        )?;
        let id = conn.last_insert_rowid();
        Ok(TipoEscuela {
            id,
            nombre: nombre.to_string(),
        })
    }

    pub async fn update_nombre(&self, id: i64, nombre: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute(
            "UPDATE tipos_escuela SET nombre = ?1 WHERE id = ?2",
            params![nombre, id],
        )?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "TipoEscuela".to_string(),
                id,
            });
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM tipos_escuela WHERE id = ?1", params![id])?)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM tipos_escuela", [], |row| row.get(0))?)
    }
}
