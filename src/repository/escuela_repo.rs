// ==========================================
// Sistema BI Educativo - Almacén de escuelas
// ==========================================
// Clave natural: (nombre, municipio_id, tipo_id), respaldada por
// UNIQUE de tabla. Las actualizaciones parciales usan COALESCE:
// un campo ausente conserva el valor persistido.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{ActualizacionEscuela, Escuela, NuevaEscuela};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const COLUMNAS: &str =
    "id, nombre, direccion, telefono, fecha_fundacion, municipio_id, tipo_id, creado_en";

pub struct EscuelaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EscuelaRepository {
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

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Escuela> {
        Ok(Escuela {
            id: row.get(0)?,
            nombre: row.get(1)?,
            direccion: row.get(2)?,
            telefono: row.get(3)?,
            fecha_fundacion: row
                .get::<_, Option<String>>(4)?
                .and_then(|s| chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            municipio_id: row.get(5)?,
            tipo_id: row.get(6)?,
            creado_en: row
                .get::<_, String>(7)?
                .parse::<chrono::DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<Escuela>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM escuelas ORDER BY nombre ASC", COLUMNAS);
        let mut stmt = conn.prepare(&sql)?;
        let escuelas = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Escuela>>>()?;
        Ok(escuelas)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Escuela>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM escuelas WHERE id = ?1", COLUMNAS);
        let resultado = conn.query_row(&sql, params![id], Self::map_row);
        match resultado {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Búsqueda puntual por clave natural
    pub async fn find_by_natural_key(
        &self,
        nombre: &str,
        municipio_id: i64,
        tipo_id: i64,
    ) -> RepositoryResult<Option<Escuela>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM escuelas WHERE nombre = ?1 AND municipio_id = ?2 AND tipo_id = ?3",
            COLUMNAS
        );
        let resultado = conn.query_row(&sql, params![nombre, municipio_id, tipo_id], Self::map_row);
        match resultado {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn insert(&self, nueva: &NuevaEscuela) -> RepositoryResult<Escuela> {
        let conn = self.get_conn()?;
        let creado_en = Utc::now();
        conn.execute(
            r#"
            INSERT INTO escuelas
                (nombre, direccion, telefono, fecha_fundacion, municipio_id, tipo_id, creado_en)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                nueva.nombre,
                nueva.direccion,
                nueva.telefono,
                nueva.fecha_fundacion.map(|d| d.to_string()),
                nueva.municipio_id,
                nueva.tipo_id,
                creado_en.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Escuela {
            id,
            nombre: nueva.nombre.clone(),
            direccion: nueva.direccion.clone(),
            telefono: nueva.telefono.clone(),
            fecha_fundacion: nueva.fecha_fundacion,
            municipio_id: nueva.municipio_id,
            tipo_id: nueva.tipo_id,
            creado_en,
        })
    }

    /// Actualización parcial: los campos None conservan el valor actual
    pub async fn update(&self, id: i64, cambios: &ActualizacionEscuela) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute(
            r#"
            UPDATE escuelas SET
                nombre = COALESCE(?1, nombre),
                direccion = COALESCE(?2, direccion),
                telefono = COALESCE(?3, telefono),
                fecha_fundacion = COALESCE(?4, fecha_fundacion),
                municipio_id = COALESCE(?5, municipio_id),
                tipo_id = COALESCE(?6, tipo_id)
            WHERE id = ?7
            "#,
            params![
                cambios.nombre,
                cambios.direccion,
                cambios.telefono,
                cambios.fecha_fundacion.map(|d| d.to_string()),
                cambios.municipio_id,
                cambios.tipo_id,
                id,
            ],
        )?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "Escuela".to_string(),
                id,
            });
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM escuelas WHERE id = ?1", params![id])?)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM escuelas", [], |row| row.get(0))?)
    }
}
