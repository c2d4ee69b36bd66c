// ==========================================
// Pruebas de integración de la capa de almacén
// ==========================================
// Objetivo: búsquedas por clave natural, actualizaciones
// parciales con COALESCE y restricciones UNIQUE reales.
// ==========================================


use bi_educativo::domain::types::{Rol, Semestre};
use bi_educativo::domain::{
    ActualizacionDatosEducativos, ActualizacionEscuela, NuevaEscuela, NuevoUsuario,
    NuevosDatosEducativos,
};
use bi_educativo::repository::{
    DatosEducativosRepository, EscuelaRepository, MunicipioRepository, RepositoryError,
    UsuarioRepository,
};
use chrono::NaiveDate;

#[tokio::test]
async fn test_municipio_crud_y_clave_natural() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let repo = MunicipioRepository::new(&db_path).unwrap();

    let creado = repo.insert("San Pedro").await.unwrap();
    assert!(creado.id > 0);

    // búsqueda puntual por clave natural: exacta, no difusa
    let encontrado = repo.find_by_nombre("San Pedro").await.unwrap();
    assert!(encontrado.is_some());
    assert!(repo.find_by_nombre("san pedro").await.unwrap().is_none());

    repo.update_nombre(creado.id, "San Pedro Norte").await.unwrap();
    let actualizado = repo.find_by_id(creado.id).await.unwrap().unwrap();
    assert_eq!(actualizado.nombre, "San Pedro Norte");

    assert_eq!(repo.delete(creado.id).await.unwrap(), 1);
    assert!(repo.find_by_id(creado.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_municipio_nombre_duplicado_viola_unique() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let repo = MunicipioRepository::new(&db_path).unwrap();

    repo.insert("Centro").await.unwrap();
    let resultado = repo.insert("Centro").await;

    assert!(matches!(
        resultado,
        Err(RepositoryError::UniqueViolation(_))
    ));
}

#[tokio::test]
async fn test_escuela_actualizacion_parcial_conserva_campos() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let repo = EscuelaRepository::new(&db_path).unwrap();

    let creada = repo
        .insert(&NuevaEscuela {
            nombre: "Primaria 5".to_string(),
            direccion: Some("Av. Central 12".to_string()),
            telefono: Some("444-123-4567".to_string()),
            fecha_fundacion: NaiveDate::from_ymd_opt(1998, 5, 20),
            municipio_id,
            tipo_id,
        })
        .await
        .unwrap();

    // solo cambia el teléfono; el resto conserva su valor
    repo.update(
        creada.id,
        &ActualizacionEscuela {
            telefono: Some("444-765-4321".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let leida = repo.find_by_id(creada.id).await.unwrap().unwrap();
    assert_eq!(leida.telefono.as_deref(), Some("444-765-4321"));
    assert_eq!(leida.direccion.as_deref(), Some("Av. Central 12"));
    assert_eq!(leida.fecha_fundacion, NaiveDate::from_ymd_opt(1998, 5, 20));
}

#[tokio::test]
async fn test_escuela_clave_natural_compuesta() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_a = test_helpers::sembrar_municipio(&db_path, "Centro");
    let municipio_b = test_helpers::sembrar_municipio(&db_path, "San Pedro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let repo = EscuelaRepository::new(&db_path).unwrap();

    // mismo nombre en municipios distintos: claves naturales distintas
    for municipio_id in [municipio_a, municipio_b] {
        repo.insert(&NuevaEscuela {
            nombre: "Primaria 5".to_string(),
            direccion: None,
            telefono: None,
            fecha_fundacion: None,
            municipio_id,
            tipo_id,
        })
        .await
        .unwrap();
    }

    let en_centro = repo
        .find_by_natural_key("Primaria 5", municipio_a, tipo_id)
        .await
        .unwrap();
    let en_san_pedro = repo
        .find_by_natural_key("Primaria 5", municipio_b, tipo_id)
        .await
        .unwrap();
    assert!(en_centro.is_some());
    assert!(en_san_pedro.is_some());
    assert_ne!(en_centro.unwrap().id, en_san_pedro.unwrap().id);
}

#[tokio::test]
async fn test_datos_clave_natural_y_agregados() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let repo = DatosEducativosRepository::new(&db_path).unwrap();

    for (anio, semestre, alumnos, desercion) in [
        (2023, Semestre::Primero, 100, 4.0),
        (2023, Semestre::Segundo, 110, 6.0),
        (2024, Semestre::Primero, 120, 5.0),
    ] {
        repo.insert(&NuevosDatosEducativos {
            escuela_id,
            anio,
            semestre,
            cantidad_alumnos: alumnos,
            numero_inscripciones: alumnos + 5,
            tasa_desercion: desercion,
            tasa_promocion: None,
            numero_maestros: None,
            promedio_calificaciones: None,
            es_urbana: true,
        })
        .await
        .unwrap();
    }

    let registro = repo
        .find_by_natural_key(escuela_id, 2023, Semestre::Segundo)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registro.cantidad_alumnos, 110);

    let por_anio = repo.alumnos_por_anio().await.unwrap();
    assert_eq!(por_anio.len(), 2);
    assert_eq!(por_anio[0].anio, 2023);
    assert_eq!(por_anio[0].total_alumnos, 210);
    assert_eq!(por_anio[1].total_alumnos, 120);

    let por_municipio = repo.desercion_por_municipio().await.unwrap();
    assert_eq!(por_municipio.len(), 1);
    assert_eq!(por_municipio[0].municipio, "Centro");
    assert!((por_municipio[0].tasa_promedio - 5.0).abs() < 1e-9);

    let (urbanas, rurales) = repo.distribucion_urbana().await.unwrap();
    assert_eq!(urbanas, 3);
    assert_eq!(rurales, 0);
}

#[tokio::test]
async fn test_datos_actualizacion_parcial() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let repo = DatosEducativosRepository::new(&db_path).unwrap();

    let creado = repo
        .insert(&NuevosDatosEducativos {
            escuela_id,
            anio: 2024,
            semestre: Semestre::Primero,
            cantidad_alumnos: 100,
            numero_inscripciones: 105,
            tasa_desercion: 3.0,
            tasa_promocion: Some(95.0),
            numero_maestros: Some(9),
            promedio_calificaciones: None,
            es_urbana: false,
        })
        .await
        .unwrap();

    repo.update(
        creado.id,
        &ActualizacionDatosEducativos {
            cantidad_alumnos: Some(130),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let leido = repo.find_by_id(creado.id).await.unwrap().unwrap();
    assert_eq!(leido.cantidad_alumnos, 130);
    assert_eq!(leido.tasa_promocion, Some(95.0));
    assert_eq!(leido.numero_maestros, Some(9));
    assert!(!leido.es_urbana);
}

#[tokio::test]
async fn test_usuario_busqueda_por_username_o_email() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let repo = UsuarioRepository::new(&db_path).unwrap();

    repo.insert(
        &NuevoUsuario {
            username: "mlopez".to_string(),
            email: "mlopez@example.com".to_string(),
            password: "secreto123".to_string(),
            role: Rol::Admin,
        },
        "sha256$x$y",
    )
    .await
    .unwrap();

    // coincide por username
    assert!(repo
        .find_by_username_or_email("mlopez", "otro@example.com")
        .await
        .unwrap()
        .is_some());
    // coincide por email
    assert!(repo
        .find_by_username_or_email("otro", "mlopez@example.com")
        .await
        .unwrap()
        .is_some());
    // no coincide
    assert!(repo
        .find_by_username_or_email("otro", "otro@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_datos_clave_natural_duplicada_viola_unique() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let municipio_id = test_helpers::sembrar_municipio(&db_path, "Centro");
    let tipo_id = test_helpers::sembrar_tipo_escuela(&db_path, "Primaria");
    let escuela_id = test_helpers::sembrar_escuela(&db_path, "Primaria 5", municipio_id, tipo_id);
    let repo = DatosEducativosRepository::new(&db_path).unwrap();

    let nuevos = NuevosDatosEducativos {
        escuela_id,
        anio: 2024,
        semestre: Semestre::Primero,
        cantidad_alumnos: 100,
        numero_inscripciones: 105,
        tasa_desercion: 3.0,
        tasa_promocion: None,
        numero_maestros: None,
        promedio_calificaciones: None,
        es_urbana: true,
    };

    repo.insert(&nuevos).await.unwrap();
    let resultado = repo.insert(&nuevos).await;
    assert!(matches!(
        resultado,
        Err(RepositoryError::UniqueViolation(_))
    ));
}
