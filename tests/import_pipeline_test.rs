// ==========================================
// Pruebas de integración del flujo de importación masiva
// ==========================================
// Objetivo: verificar el pipeline completo
// (normalizar → validar → reconciliar → resumen)
// sobre una base SQLite real por entidad.
// ==========================================


use bi_educativo::api::ApiError;
use bi_educativo::domain::import::RawRow;
use bi_educativo::domain::types::{Rol, Semestre};
use bi_educativo::logging;
use bi_educativo::repository::{DatosEducativosRepository, EscuelaRepository, UsuarioRepository};
use serde_json::json;

fn fila(valor: serde_json::Value) -> RawRow {
    serde_json::from_value(valor).expect("fila cruda inválida")
}

// ==========================================
// Municipios
// ==========================================

#[tokio::test]
async fn test_municipios_fila_valida_y_fila_sin_nombre() {
    logging::init_test();
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![
        fila(json!({"nombre": "San Pedro", "rowIndex": 1})),
        fila(json!({"rowIndex": 2})),
    ];

    let resumen = api.import_municipios(filas, Rol::User).await.unwrap();

    assert_eq!(resumen.imported, 1);
    assert_eq!(resumen.failed, 1);
    assert_eq!(resumen.errors, vec!["Fila 2: Nombre es obligatorio".to_string()]);
    assert_eq!(test_helpers::contar_filas(&db_path, "municipios"), 1);
}

#[tokio::test]
async fn test_municipios_claves_distintas_importa_todo() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let filas: Vec<RawRow> = (1..=5)
        .map(|i| fila(json!({"nombre": format!("Municipio {}", i), "rowIndex": i})))
        .collect();

    let resumen = api.import_municipios(filas, Rol::User).await.unwrap();

    assert_eq!(resumen.imported, 5);
    assert_eq!(resumen.failed, 0);
    assert!(resumen.errors.is_empty());
}

#[tokio::test]
async fn test_municipios_reimportar_es_idempotente() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let filas = || {
        vec![
            fila(json!({"nombre": "San Pedro", "rowIndex": 1})),
            fila(json!({"nombre": "Centro", "rowIndex": 2})),
        ]
    };

    let primera = api.import_municipios(filas(), Rol::User).await.unwrap();
    assert_eq!(primera.imported, 2);

    // la segunda corrida cuenta igual (como actualizaciones) y no duplica
    let segunda = api.import_municipios(filas(), Rol::User).await.unwrap();
    assert_eq!(segunda.imported, 2);
    assert_eq!(segunda.failed, 0);
    assert_eq!(test_helpers::contar_filas(&db_path, "municipios"), 2);
}

#[tokio::test]
async fn test_entrada_vacia_es_error_de_solicitud() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let resultado = api.import_municipios(Vec::new(), Rol::Admin).await;
    assert!(matches!(resultado, Err(ApiError::BadRequest(_))));
}

// ==========================================
// Escuelas
// ==========================================

#[tokio::test]
async fn test_escuelas_resuelve_referencias_por_nombre() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "San Pedro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![fila(json!({
        "nombre": "Primaria Benito Juárez",
        "municipio": "san pedro",
        "tipo": "Primaria",
        "direccion": "Av. Central 12",
        "rowIndex": 1
    }))];

    let resumen = api.import_escuelas(filas, Rol::User).await.unwrap();
    assert_eq!(resumen.imported, 1);
    assert_eq!(resumen.failed, 0);

    let repo = EscuelaRepository::new(&db_path).unwrap();
    let escuela = repo
        .find_by_natural_key("Primaria Benito Juárez", municipio_id, tipo_id)
        .await
        .unwrap()
        .expect("la escuela debió insertarse");
    assert_eq!(escuela.direccion.as_deref(), Some("Av. Central 12"));
}

#[tokio::test]
async fn test_escuelas_referencia_sin_resolver_falla_la_fila() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    test_helpers::sembrar_municipio(&db_path, "San Pedro");
    let api = test_helpers::crear_import_api(&db_path);

    // no existe ningún tipo de escuela: tipoId queda sin resolver
    let filas = vec![fila(json!({
        "nombre": "Primaria Benito Juárez",
        "municipio": "San Pedro",
        "tipo": "Primaria",
        "rowIndex": 1
    }))];

    let resumen = api.import_escuelas(filas, Rol::User).await.unwrap();
    assert_eq!(resumen.imported, 0);
    assert_eq!(resumen.failed, 1);
    assert_eq!(
        resumen.errors,
        vec!["Fila 1: Tipo de escuela no encontrado o no especificado".to_string()]
    );
    assert_eq!(test_helpers::contar_filas(&db_path, "escuelas"), 0);
}

#[tokio::test]
async fn test_escuelas_misma_clave_en_una_llamada_inserta_y_actualiza() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Secundaria");
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![
        fila(json!({
            "nombre": "Secundaria Centro",
            "municipioId": municipio_id,
            "tipoId": tipo_id,
            "direccion": "Calle Vieja 1",
            "rowIndex": 1
        })),
        fila(json!({
            "nombre": "Secundaria Centro",
            "municipioId": municipio_id,
            "tipoId": tipo_id,
            "direccion": "Calle Nueva 2",
            "rowIndex": 2
        })),
    ];

    let resumen = api.import_escuelas(filas, Rol::User).await.unwrap();

    // la primera fila inserta, la segunda actualiza; ambas cuentan
    assert_eq!(resumen.imported, 2);
    assert_eq!(resumen.failed, 0);
    assert_eq!(test_helpers::contar_filas(&db_path, "escuelas"), 1);

    // el registro final refleja la segunda fila
    let repo = EscuelaRepository::new(&db_path).unwrap();
    let escuela = repo
        .find_by_natural_key("Secundaria Centro", municipio_id, tipo_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(escuela.direccion.as_deref(), Some("Calle Nueva 2"));
}

// ==========================================
// Datos educativos
// ==========================================

#[tokio::test]
async fn test_datos_cantidad_negativa_reporta_fila() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![fila(json!({
        "escuelaId": escuela_id,
        "anio": 2024,
        "semestre": "1",
        "cantidadAlumnos": -3,
        "numeroInscripciones": 10,
        "tasaDesercion": 5,
        "rowIndex": 1
    }))];

    let resumen = api.import_datos_educativos(filas, Rol::User).await.unwrap();

    assert_eq!(resumen.imported, 0);
    assert_eq!(resumen.failed, 1);
    assert_eq!(
        resumen.errors,
        vec!["Fila 1: Cantidad de alumnos no puede ser negativa".to_string()]
    );
}

#[tokio::test]
async fn test_datos_frontera_de_anio() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let api = test_helpers::crear_import_api(&db_path);

    let fila_con_anio = |anio: i64, row_index: usize| {
        fila(json!({
            "escuelaId": escuela_id,
            "anio": anio,
            "semestre": "1",
            "cantidad_alumnos": 100,
            "numero_inscripciones": 110,
            "tasa_desercion": 3.5,
            "rowIndex": row_index
        }))
    };

    // 1999 queda fuera de rango
    let resumen = api
        .import_datos_educativos(vec![fila_con_anio(1999, 1)], Rol::User)
        .await
        .unwrap();
    assert_eq!(resumen.imported, 0);
    assert_eq!(
        resumen.errors,
        vec!["Fila 1: Año debe estar entre 2000 y 2100".to_string()]
    );

    // 2000 y 2100 pasan
    let resumen = api
        .import_datos_educativos(vec![fila_con_anio(2000, 1), fila_con_anio(2100, 2)], Rol::User)
        .await
        .unwrap();
    assert_eq!(resumen.imported, 2);
    assert_eq!(resumen.failed, 0);
}

#[tokio::test]
async fn test_datos_misma_clave_gana_la_ultima_escritura() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![
        fila(json!({
            "escuelaId": escuela_id,
            "anio": 2024,
            "semestre": "1",
            "cantidad_alumnos": 100,
            "numero_inscripciones": 110,
            "tasa_desercion": 3.5,
            "numero_maestros": 8,
            "rowIndex": 1
        })),
        fila(json!({
            "escuelaId": escuela_id,
            "anio": 2024,
            "semestre": "1",
            "cantidad_alumnos": 250,
            "numero_inscripciones": 260,
            "tasa_desercion": 4.0,
            "rowIndex": 2
        })),
    ];

    let resumen = api.import_datos_educativos(filas, Rol::User).await.unwrap();
    assert_eq!(resumen.imported, 2);
    assert_eq!(test_helpers::contar_filas(&db_path, "datos_educativos"), 1);

    let repo = DatosEducativosRepository::new(&db_path).unwrap();
    let registro = repo
        .find_by_natural_key(escuela_id, 2024, Semestre::Primero)
        .await
        .unwrap()
        .unwrap();
    // los campos compartidos reflejan la segunda fila
    assert_eq!(registro.cantidad_alumnos, 250);
    assert_eq!(registro.numero_inscripciones, 260);
    assert_eq!(registro.tasa_desercion, 4.0);
    // el campo ausente en la segunda fila conserva el valor de la primera
    assert_eq!(registro.numero_maestros, Some(8));
}

#[tokio::test]
async fn test_datos_reimportacion_identica_es_idempotente() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let api = test_helpers::crear_import_api(&db_path);

    let filas = || {
        vec![fila(json!({
            "escuelaId": escuela_id,
            "anio": 2024,
            "semestre": "2",
            "cantidad_alumnos": 180,
            "numero_inscripciones": 190,
            "tasa_desercion": 2.25,
            "es_urbana": "sí",
            "rowIndex": 1
        }))]
    };

    let primera = api
        .import_datos_educativos(filas(), Rol::User)
        .await
        .unwrap();
    assert_eq!(primera.imported, 1);

    let segunda = api
        .import_datos_educativos(filas(), Rol::User)
        .await
        .unwrap();
    assert_eq!(segunda.imported, 1);
    assert_eq!(segunda.failed, 0);
    assert_eq!(test_helpers::contar_filas(&db_path, "datos_educativos"), 1);

    // el registro queda igual tras la segunda corrida
    let repo = DatosEducativosRepository::new(&db_path).unwrap();
    let registro = repo
        .find_by_natural_key(escuela_id, 2024, Semestre::Segundo)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registro.cantidad_alumnos, 180);
    assert_eq!(registro.tasa_desercion, 2.25);
    assert!(registro.es_urbana);
}

#[tokio::test]
async fn test_datos_multiples_violaciones_en_una_fila() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    // sin escuela, año fuera de rango y semestre inválido: tres errores
    // de la misma fila, la fila nunca se persiste
    let filas = vec![fila(json!({
        "anio": 1990,
        "semestre": "9",
        "cantidad_alumnos": 10,
        "numero_inscripciones": 10,
        "tasa_desercion": 1,
        "rowIndex": 4
    }))];

    let resumen = api.import_datos_educativos(filas, Rol::User).await.unwrap();
    assert_eq!(resumen.imported, 0);
    assert_eq!(resumen.failed, 1);
    assert_eq!(resumen.errors.len(), 3);
    assert!(resumen.errors.iter().all(|e| e.starts_with("Fila 4: ")));
    assert_eq!(test_helpers::contar_filas(&db_path, "datos_educativos"), 0);
}

// ==========================================
// Usuarios
// ==========================================

#[tokio::test]
async fn test_usuarios_exige_rol_admin() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![fila(json!({
        "username": "mlopez",
        "email": "mlopez@example.com",
        "password": "secreto123",
        "rowIndex": 1
    }))];

    let resultado = api.import_usuarios(filas, Rol::User).await;
    assert!(matches!(resultado, Err(ApiError::Forbidden(_))));
    // la puerta es previa al procesamiento: no se insertó nada
    assert_eq!(test_helpers::contar_filas(&db_path, "usuarios"), 0);
}

#[tokio::test]
async fn test_usuarios_reimportacion_falla_con_ya_existe() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let filas = || {
        vec![
            fila(json!({
                "username": "mlopez",
                "email": "mlopez@example.com",
                "password": "secreto123",
                "rowIndex": 1
            })),
            fila(json!({
                "username": "jperez",
                "email": "jperez@example.com",
                "password": "secreto456",
                "role": "admin",
                "rowIndex": 2
            })),
        ]
    };

    let primera = api.import_usuarios(filas(), Rol::Admin).await.unwrap();
    assert_eq!(primera.imported, 2);
    assert_eq!(primera.failed, 0);

    // los usuarios existentes nunca se sobreescriben
    let segunda = api.import_usuarios(filas(), Rol::Admin).await.unwrap();
    assert_eq!(segunda.imported, 0);
    assert_eq!(segunda.failed, 2);
    assert_eq!(segunda.errors.len(), 2);
    assert!(segunda.errors.iter().all(|e| e.contains("ya existe")));
    assert_eq!(test_helpers::contar_filas(&db_path, "usuarios"), 2);
}

#[tokio::test]
async fn test_usuarios_password_se_persiste_hasheada() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let filas = vec![fila(json!({
        "username": "mlopez",
        "email": "mlopez@example.com",
        "password": "secreto123",
        "rowIndex": 1
    }))];

    api.import_usuarios(filas, Rol::Admin).await.unwrap();

    let repo = UsuarioRepository::new(&db_path).unwrap();
    let usuario = repo.find_by_username("mlopez").await.unwrap().unwrap();
    assert_ne!(usuario.password, "secreto123");
    assert!(bi_educativo::domain::verify_password(
        "secreto123",
        &usuario.password
    ));
}

// ==========================================
// Importación desde archivo
// ==========================================

#[tokio::test]
async fn test_import_file_csv_de_municipios() {
    use std::io::Write;

    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "nombre").unwrap();
    writeln!(csv, "San Pedro").unwrap();
    writeln!(csv, "Centro").unwrap();
    writeln!(csv, "").unwrap();

    let resumen = api
        .import_file(
            bi_educativo::TipoEntidad::Municipios,
            csv.path(),
            Rol::Admin,
        )
        .await
        .unwrap();

    assert_eq!(resumen.imported, 2);
    assert_eq!(resumen.failed, 0);
    assert_eq!(test_helpers::contar_filas(&db_path, "municipios"), 2);
}

#[tokio::test]
async fn test_resumen_completo_sin_resultado_parcial() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let api = test_helpers::crear_import_api(&db_path);

    // mezcla de filas válidas e inválidas mayor a un lote lógico pequeño:
    // el resumen siempre cubre todas las filas
    let filas: Vec<RawRow> = (1..=150)
        .map(|i| {
            if i % 10 == 0 {
                fila(json!({"rowIndex": i}))
            } else {
                fila(json!({"nombre": format!("Municipio {}", i), "rowIndex": i}))
            }
        })
        .collect();

    let resumen = api.import_municipios(filas, Rol::User).await.unwrap();
    assert_eq!(resumen.imported + resumen.failed, 150);
    assert_eq!(resumen.failed, 15);
    assert_eq!(resumen.errors.len(), 15);
}
