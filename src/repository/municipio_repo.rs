// ==========================================
// Sistema BI Educativo - Almacén de municipios
// ==========================================
// Responsabilidad: acceso a la tabla municipios.
// Sin lógica de negocio; la reconciliación vive en el importador.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::Municipio;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct MunicipioRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MunicipioRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Crea el almacén sobre una conexión compartida
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Lista todos los municipios, ordenados por nombre
    pub async fn find_all(&self) -> RepositoryResult<Vec<Municipio>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, nombre FROM municipios ORDER BY nombre ASC")?;
        let municipios = stmt
            .query_map([], |row| {
                Ok(Municipio {
                    id: row.get(0)?,
                    nombre: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<Municipio>>>()?;
        Ok(municipios)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Municipio>> {
        let conn = self.get_conn()?;
        let resultado = conn.query_row(
            "SELECT id, nombre FROM municipios WHERE id = ?1",
            params![id],
            |row| {
                Ok(Municipio {
                    id: row.get(0)?,
                    nombre: row.get(1)?,
                })
            },
        );
        match resultado {
            Ok(m) => Ok(Some(m)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Búsqueda puntual por clave natural (nombre exacto)
    pub async fn find_by_nombre(&self, nombre: &str) -> RepositoryResult<Option<Municipio>> {
        let conn = self.get_conn()?;
        let resultado = conn.query_row(
            "SELECT id, nombre FROM municipios WHERE nombre = ?1",
            params![nombre],
            |row| {
                Ok(Municipio {
                    id: row.get(0)?,
                    nombre: row.get(1)?,
                })
            },
        );
        match resultado {
            Ok(m) => Ok(Some(m)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn insert(&self, nombre: &str) -> RepositoryResult<Municipio> {
        let conn = self.get_conn()?;
        conn.execute("INSERT INTO municipios (nombre) VALUES (?1)", params![nombre])?;
        let id = conn.last_insert_rowid();
        Ok(Municipio {
            id,
            nombre: nombre.to_string(),
        })
    }

    pub async fn update_nombre(&self, id: i64, nombre: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute(
            "UPDATE municipios SET nombre = ?1 WHERE id = ?2",
            params![nombre, id],
        )?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "Municipio".to_string(),
                id,
            });
        }
        Ok(())
    }

    /// Elimina un municipio; devuelve el número de filas afectadas
    pub async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM municipios WHERE id = ?1", params![id])?)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM municipios", [], |row| row.get(0))?)
    }
}
