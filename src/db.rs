// ==========================================
// Sistema BI Educativo - Inicialización SQLite
// ==========================================
// Objetivo:
// - Unificar los PRAGMA de toda Connection::open (claves foráneas
//   siempre activas, busy_timeout homogéneo)
// - Centralizar el esquema: las claves naturales de la importación
//   están respaldadas por restricciones UNIQUE de tabla
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout por defecto (milisegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura los PRAGMA unificados de una conexión SQLite
///
/// Nota:
/// - foreign_keys se activa por conexión, no por base
/// - busy_timeout también es por conexión
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre una conexión SQLite con la configuración unificada
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Crea el esquema si no existe.
///
/// Las restricciones UNIQUE sobre las claves naturales
/// (municipios.nombre, tipos_escuela.nombre,
/// escuelas(nombre, municipio_id, tipo_id),
/// datos_educativos(escuela_id, anio, semestre),
/// usuarios.username / usuarios.email) son la garantía de unicidad
/// en la que se apoya la reconciliación de la importación masiva.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS municipios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS tipos_escuela (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS escuelas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            direccion TEXT,
            telefono TEXT,
            fecha_fundacion TEXT,
            municipio_id INTEGER NOT NULL REFERENCES municipios(id) ON DELETE RESTRICT,
            tipo_id INTEGER NOT NULL REFERENCES tipos_escuela(id) ON DELETE RESTRICT,
            creado_en TEXT NOT NULL,
            UNIQUE (nombre, municipio_id, tipo_id)
        );

        CREATE TABLE IF NOT EXISTS datos_educativos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            escuela_id INTEGER NOT NULL REFERENCES escuelas(id) ON DELETE RESTRICT,
            anio INTEGER NOT NULL,
            semestre TEXT NOT NULL CHECK (semestre IN ('1', '2')),
            cantidad_alumnos INTEGER NOT NULL,
            numero_inscripciones INTEGER NOT NULL,
            tasa_desercion REAL NOT NULL,
            tasa_promocion REAL,
            numero_maestros INTEGER,
            promedio_calificaciones REAL,
            es_urbana INTEGER NOT NULL DEFAULT 1,
            creado_en TEXT NOT NULL,
            UNIQUE (escuela_id, anio, semestre)
        );

        CREATE TABLE IF NOT EXISTS usuarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            creado_en TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS predicciones_ia (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tipo_modelo TEXT NOT NULL,
            parametros_json TEXT NOT NULL,
            resultado_json TEXT NOT NULL,
            usuario_id INTEGER REFERENCES usuarios(id) ON DELETE SET NULL,
            creado_en TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_escuelas_municipio ON escuelas(municipio_id);
        CREATE INDEX IF NOT EXISTS idx_escuelas_tipo ON escuelas(tipo_id);
        CREATE INDEX IF NOT EXISTS idx_datos_escuela ON datos_educativos(escuela_id);
        CREATE INDEX IF NOT EXISTS idx_datos_anio ON datos_educativos(anio);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esquema_se_crea_en_memoria() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();

        // idempotente
        init_schema(&conn).unwrap();

        let tablas: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                 ('municipios', 'tipos_escuela', 'escuelas', 'datos_educativos', 'usuarios', 'predicciones_ia')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tablas, 6);
    }
}
