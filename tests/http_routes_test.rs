// ==========================================
// Pruebas del contrato HTTP
// ==========================================
// Objetivo: el enrutador completo de extremo a extremo con
// oneshot(): encabezado de rol, cuerpo de carga masiva y la
// envoltura { success, imported, failed, errors }.
// ==========================================


use axum::body::Body;
use axum::http::{Request, StatusCode};
use bi_educativo::app::{build_router, AppState};
use bi_educativo::config::AppConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn estado_de_prueba(db_path: &str) -> Arc<AppState> {
    let config = AppConfig {
        db_path: db_path.to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        ai_script: "python-scripts/ai_model.py".into(),
        ai_timeout_secs: 5,
    };
    Arc::new(AppState::new(&config).expect("no se pudo construir AppState"))
}

async fn cuerpo_json(respuesta: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(respuesta.into_body(), usize::MAX)
        .await
        .expect("no se pudo leer el cuerpo");
    serde_json::from_slice(&bytes).expect("el cuerpo no es JSON")
}

#[tokio::test]
async fn test_health() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let app = build_router(estado_de_prueba(&db_path));

    let respuesta = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(respuesta.status(), StatusCode::OK);
    let cuerpo = cuerpo_json(respuesta).await;
    assert_eq!(cuerpo["status"], "ok");
}

#[tokio::test]
async fn test_bulk_upload_de_municipios_envuelve_el_resumen() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let app = build_router(estado_de_prueba(&db_path));

    let cuerpo = json!({
        "data": [
            {"nombre": "San Pedro", "rowIndex": 1},
            {"rowIndex": 2}
        ]
    });

    let respuesta = app
        .oneshot(
            Request::post("/municipios/bulk-upload")
                .header("content-type", "application/json")
                .header("x-user-role", "admin")
                .body(Body::from(cuerpo.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(respuesta.status(), StatusCode::OK);
    let cuerpo = cuerpo_json(respuesta).await;
    assert_eq!(cuerpo["success"], true);
    assert_eq!(cuerpo["imported"], 1);
    assert_eq!(cuerpo["failed"], 1);
    assert_eq!(cuerpo["errors"][0], "Fila 2: Nombre es obligatorio");
}

#[tokio::test]
async fn test_bulk_upload_vacio_es_400() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let app = build_router(estado_de_prueba(&db_path));

    let respuesta = app
        .oneshot(
            Request::post("/municipios/bulk-upload")
                .header("content-type", "application/json")
                .body(Body::from(json!({"data": []}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(respuesta.status(), StatusCode::BAD_REQUEST);
    let cuerpo = cuerpo_json(respuesta).await;
    assert_eq!(cuerpo["code"], "SOLICITUD_INVALIDA");
}

#[tokio::test]
async fn test_bulk_upload_de_usuarios_sin_admin_es_403() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let app = build_router(estado_de_prueba(&db_path));

    let cuerpo = json!({
        "data": [
            {"username": "mlopez", "email": "m@example.com", "password": "secreto123", "rowIndex": 1}
        ]
    });

    let respuesta = app
        .oneshot(
            Request::post("/usuarios/bulk-upload")
                .header("content-type", "application/json")
                .header("x-user-role", "user")
                .body(Body::from(cuerpo.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(respuesta.status(), StatusCode::FORBIDDEN);
    let cuerpo = cuerpo_json(respuesta).await;
    assert_eq!(cuerpo["code"], "ACCESO_DENEGADO");
}

#[tokio::test]
async fn test_crear_municipio_sin_rol_es_403() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    let app = build_router(estado_de_prueba(&db_path));

    // sin encabezado x-user-role el rol degrada a user
    let respuesta = app
        .oneshot(
            Request::post("/municipios")
                .header("content-type", "application/json")
                .body(Body::from(json!({"nombre": "Centro"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(respuesta.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listado_y_consulta_de_municipios() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    test_helpers::sembrar_municipio(&db_path, "Centro");
    let app = build_router(estado_de_prueba(&db_path));

    let respuesta = app
        .clone()
        .oneshot(Request::get("/municipios").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(respuesta.status(), StatusCode::OK);
    let cuerpo = cuerpo_json(respuesta).await;
    assert_eq!(cuerpo.as_array().unwrap().len(), 1);

    let respuesta = app
        .oneshot(Request::get("/municipios/99").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(respuesta.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resumen_del_tablero_http() {
    let (_archivo, db_path) = test_helpers::create_test_db();
    test_helpers::sembrar_municipio(&db_path, "Centro");
    let app = build_router(estado_de_prueba(&db_path));

    let respuesta = app
        .oneshot(
            Request::get("/dashboard/resumen")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(respuesta.status(), StatusCode::OK);
    let cuerpo = cuerpo_json(respuesta).await;
    assert_eq!(cuerpo["total_municipios"], 1);
    assert_eq!(cuerpo["total_registros"], 0);
}
