// ==========================================
// Sistema BI Educativo - Almacén de datos educativos
// ==========================================
// Clave natural: (escuela_id, anio, semestre), UNIQUE de tabla.
// Incluye las agregaciones SQL que alimentan el tablero.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::Semestre;
use crate::domain::{ActualizacionDatosEducativos, DatosEducativos, NuevosDatosEducativos};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

const COLUMNAS: &str = "id, escuela_id, anio, semestre, cantidad_alumnos, numero_inscripciones, \
     tasa_desercion, tasa_promocion, numero_maestros, promedio_calificaciones, es_urbana, creado_en";

/// Total de alumnos agregado por año (tablero)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlumnosPorAnio {
    pub anio: i32,
    pub total_alumnos: i64,
}

/// Tasa de deserción promedio por municipio (tablero)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesercionPorMunicipio {
    pub municipio: String,
    pub tasa_promedio: f64,
}

pub struct DatosEducativosRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DatosEducativosRepository {
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

    fn map_row(row: &Row<'_>) -> rusqlite::Result<DatosEducativos> {
        let semestre: String = row.get(3)?;
        Ok(DatosEducativos {
            id: row.get(0)?,
            escuela_id: row.get(1)?,
            anio: row.get(2)?,
            semestre: Semestre::parse(&semestre).unwrap_or(Semestre::Primero),
            cantidad_alumnos: row.get(4)?,
            numero_inscripciones: row.get(5)?,
            tasa_desercion: row.get(6)?,
            tasa_promocion: row.get(7)?,
            numero_maestros: row.get(8)?,
            promedio_calificaciones: row.get(9)?,
            es_urbana: row.get::<_, i64>(10)? != 0,
            creado_en: row
                .get::<_, String>(11)?
                .parse::<chrono::DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    /// Lista todos los registros, del ciclo más reciente al más antiguo
    pub async fn find_all(&self) -> RepositoryResult<Vec<DatosEducativos>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM datos_educativos ORDER BY anio DESC, semestre DESC",
            COLUMNAS
        );
        let mut stmt = conn.prepare(&sql)?;
        let datos = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<DatosEducativos>>>()?;
        Ok(datos)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<DatosEducativos>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM datos_educativos WHERE id = ?1", COLUMNAS);
        let resultado = conn.query_row(&sql, params![id], Self::map_row);
        match resultado {
            Ok(d) => Ok(Some(d)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Búsqueda puntual por clave natural
    pub async fn find_by_natural_key(
        &self,
        escuela_id: i64,
        anio: i32,
        semestre: Semestre,
    ) -> RepositoryResult<Option<DatosEducativos>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM datos_educativos WHERE escuela_id = ?1 AND anio = ?2 AND semestre = ?3",
            COLUMNAS
        );
        let resultado = conn.query_row(
            &sql,
            params![escuela_id, anio, semestre.as_str()],
            Self::map_row,
        );
        match resultado {
            Ok(d) => Ok(Some(d)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_escuela(&self, escuela_id: i64) -> RepositoryResult<Vec<DatosEducativos>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM datos_educativos WHERE escuela_id = ?1 ORDER BY anio DESC, semestre DESC",
            COLUMNAS
        );
        let mut stmt = conn.prepare(&sql)?;
        let datos = stmt
            .query_map(params![escuela_id], Self::map_row)?
            .collect::<SqliteResult<Vec<DatosEducativos>>>()?;
        Ok(datos)
    }

    pub async fn find_by_anio(&self, anio: i32) -> RepositoryResult<Vec<DatosEducativos>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM datos_educativos WHERE anio = ?1 ORDER BY semestre DESC",
            COLUMNAS
        );
        let mut stmt = conn.prepare(&sql)?;
        let datos = stmt
            .query_map(params![anio], Self::map_row)?
            .collect::<SqliteResult<Vec<DatosEducativos>>>()?;
        Ok(datos)
    }

    pub async fn insert(&self, nuevos: &NuevosDatosEducativos) -> RepositoryResult<DatosEducativos> {
        let conn = self.get_conn()?;
        let creado_en = Utc::now();
        conn.execute(
            r#"
            INSERT INTO datos_educativos
                (escuela_id, anio, semestre, cantidad_alumnos, numero_inscripciones,
                 tasa_desercion, tasa_promocion, numero_maestros, promedio_calificaciones,
                 es_urbana, creado_en)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                nuevos.escuela_id,
                nuevos.anio,
                nuevos.semestre.as_str(),
                nuevos.cantidad_alumnos,
                nuevos.numero_inscripciones,
                nuevos.tasa_desercion,
                nuevos.tasa_promocion,
                nuevos.numero_maestros,
                nuevos.promedio_calificaciones,
                nuevos.es_urbana as i64,
                creado_en.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(DatosEducativos {
            id,
            escuela_id: nuevos.escuela_id,
            anio: nuevos.anio,
            semestre: nuevos.semestre,
            cantidad_alumnos: nuevos.cantidad_alumnos,
            numero_inscripciones: nuevos.numero_inscripciones,
            tasa_desercion: nuevos.tasa_desercion,
            tasa_promocion: nuevos.tasa_promocion,
            numero_maestros: nuevos.numero_maestros,
            promedio_calificaciones: nuevos.promedio_calificaciones,
            es_urbana: nuevos.es_urbana,
            creado_en,
        })
    }

    /// Actualización parcial: los campos None conservan el valor actual
    pub async fn update(
        &self,
        id: i64,
        cambios: &ActualizacionDatosEducativos,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let afectadas = conn.execute(
            r#"
            UPDATE datos_educativos SET
                cantidad_alumnos = COALESCE(?1, cantidad_alumnos),
                numero_inscripciones = COALESCE(?2, numero_inscripciones),
                tasa_desercion = COALESCE(?3, tasa_desercion),
                tasa_promocion = COALESCE(?4, tasa_promocion),
                numero_maestros = COALESCE(?5, numero_maestros),
                promedio_calificaciones = COALESCE(?6, promedio_calificaciones),
                es_urbana = COALESCE(?7, es_urbana)
            WHERE id = ?8
            "#,
            params![
                cambios.cantidad_alumnos,
                cambios.numero_inscripciones,
                cambios.tasa_desercion,
                cambios.tasa_promocion,
                cambios.numero_maestros,
                cambios.promedio_calificaciones,
                cambios.es_urbana.map(|b| b as i64),
                id,
            ],
        )?;
        if afectadas == 0 {
            return Err(RepositoryError::NotFound {
                entidad: "DatosEducativos".to_string(),
                id,
            });
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM datos_educativos WHERE id = ?1", params![id])?)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM datos_educativos", [], |row| row.get(0))?)
    }

    // ==========================================
    // Agregaciones para el tablero
    // ==========================================

    /// Total de alumnos por año, ascendente
    pub async fn alumnos_por_anio(&self) -> RepositoryResult<Vec<AlumnosPorAnio>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT anio, SUM(cantidad_alumnos) FROM datos_educativos GROUP BY anio ORDER BY anio ASC",
        )?;
        let filas = stmt
            .query_map([], |row| {
                Ok(AlumnosPorAnio {
                    anio: row.get(0)?,
                    total_alumnos: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<AlumnosPorAnio>>>()?;
        Ok(filas)
    }

    /// Tasa de deserción promedio por municipio, descendente
    pub async fn desercion_por_municipio(&self) -> RepositoryResult<Vec<DesercionPorMunicipio>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT m.nombre, AVG(d.tasa_desercion)
            FROM datos_educativos d
            JOIN escuelas e ON e.id = d.escuela_id
            JOIN municipios m ON m.id = e.municipio_id
            GROUP BY m.id
            ORDER BY AVG(d.tasa_desercion) DESC
            "#,
        )?;
        let filas = stmt
            .query_map([], |row| {
                Ok(DesercionPorMunicipio {
                    municipio: row.get(0)?,
                    tasa_promedio: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<DesercionPorMunicipio>>>()?;
        Ok(filas)
    }

    /// Conteo de registros urbanos y rurales: (urbanas, rurales)
    pub async fn distribucion_urbana(&self) -> RepositoryResult<(i64, i64)> {
        let conn = self.get_conn()?;
        let (urbanas, rurales) = conn.query_row(
            "SELECT \
                 COALESCE(SUM(CASE WHEN es_urbana != 0 THEN 1 ELSE 0 END), 0), \
                 COALESCE(SUM(CASE WHEN es_urbana = 0 THEN 1 ELSE 0 END), 0) \
             FROM datos_educativos",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;
        Ok((urbanas, rurales))
    }
}
