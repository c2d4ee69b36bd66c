// ==========================================
// Sistema BI Educativo - Almacén de predicciones IA
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{NuevaPrediccion, PrediccionIa};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const COLUMNAS: &str = "id, tipo_modelo, parametros_json, resultado_json, usuario_id, creado_en";

pub struct PrediccionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PrediccionRepository {
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

    fn map_row(row: &Row<'_>) -> rusqlite::Result<PrediccionIa> {
        Ok(PrediccionIa {
            id: row.get(0)?,
            tipo_modelo: row.get(1)?,
            parametros_json: row.get(2)?,
            resultado_json: row.get(3)?,
            usuario_id: row.get(4)?,
            creado_en: row
                .get::<_, String>(5)?
                .parse::<chrono::DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    pub async fn insert(&self, nueva: &NuevaPrediccion) -> RepositoryResult<PrediccionIa> {
        let conn = self.get_conn()?;
        let creado_en = Utc::now();
        conn.execute(
            "INSERT INTO predicciones_ia (tipo_modelo, parametros_json, resultado_json, usuario_id, creado_en) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                nueva.tipo_modelo,
                nueva.parametros_json,
                nueva.resultado_json,
                nueva.usuario_id,
                creado_en.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(PrediccionIa {
            id,
            tipo_modelo: nueva.tipo_modelo.clone(),
            parametros_json: nueva.parametros_json.clone(),
            resultado_json: nueva.resultado_json.clone(),
            usuario_id: nueva.usuario_id,
            creado_en,
        })
    }

    /// Lista las predicciones, de la más reciente a la más antigua
    pub async fn find_all(&self) -> RepositoryResult<Vec<PrediccionIa>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM predicciones_ia ORDER BY creado_en DESC",
            COLUMNAS
        );
        let mut stmt = conn.prepare(&sql)?;
        let predicciones = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<PrediccionIa>>>()?;
        Ok(predicciones)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<PrediccionIa>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM predicciones_ia WHERE id = ?1", COLUMNAS);
        let resultado = conn.query_row(&sql, params![id], Self::map_row);
        match resultado {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM predicciones_ia WHERE id = ?1", params![id])?)
    }
}
