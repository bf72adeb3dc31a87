//! API route tests
//!
//! Drives the router directly through tower, without binding a socket.
//! Status codes only; the store behind the routes has its own suites.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use furnizori_rs::api::ApiServer;
use furnizori_rs::config::SmtpConfig;
use furnizori_rs::directory::DirectoryStore;
use furnizori_rs::email::Mailer;
use furnizori_rs::settings::SettingsStore;
use serde_json::json;
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn test_router() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();

    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    let store = DirectoryStore::new(pool);
    store.init_db().await.unwrap();

    let settings = SettingsStore::load(dir.path().join("settings.json"))
        .await
        .unwrap();
    let mailer = Mailer::new(SmtpConfig {
        server: "127.0.0.1".to_string(),
        port: 1,
        timeout_secs: 5,
    });

    let server = ApiServer::new(
        store,
        settings,
        mailer,
        dir.path().join("attachments"),
        "127.0.0.1:0".to_string(),
    );

    (server.router(), dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (router, _dir) = test_router().await;

    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_agency_create_list_and_duplicate() {
    let (router, _dir) = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request("POST", "/agencies", json!({"name": "Vest"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(json_request("POST", "/agencies", json!({"name": "Vest"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router.oneshot(get("/agencies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_supplier_error_statuses() {
    let (router, _dir) = test_router().await;

    // Missing agency
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/agencies/42/suppliers",
            json!({"name": "SC Beton SRL"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    router
        .clone()
        .oneshot(json_request("POST", "/agencies", json!({"name": "Vest"})))
        .await
        .unwrap();

    // Dangling category reference
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/agencies/1/suppliers",
            json!({"name": "SC Beton SRL", "category_ids": [7]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid create
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/agencies/1/suppliers",
            json!({"name": "SC Beton SRL"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete: 204 then 404
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/suppliers/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/suppliers/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_kind_path_segment() {
    let (router, _dir) = test_router().await;

    let response = router
        .clone()
        .oneshot(get("/agencies/1/material/categories"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get("/agencies/1/echipamente/categories"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_offer_request() {
    let (router, _dir) = test_router().await;

    let payload = json!({
        "type_mode": "material",
        "subject": "Cerere ofertă",
        "tender_name": "Pod peste Bega",
        "tender_number": "TM-2024-17",
        "items": [{"name": "Cement", "quantity": "10", "unit": "tone"}],
        "recipients": ["furnizor@example.com"],
        "user": {
            "name": "Andrei Munteanu",
            "job_title": "Inginer ofertare",
            "email": "andrei@constructgrup.ro",
            "smtp_pass": "app-password",
            "phone_mobile": "0722 111 222"
        }
    });

    let response = router
        .oneshot(json_request("POST", "/preview-offer-request", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_user_config_roundtrip() {
    let (router, _dir) = test_router().await;

    let response = router.clone().oneshot(get("/user-config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = json!({
        "name": "Andrei Munteanu",
        "job_title": "Inginer ofertare",
        "email": "andrei@constructgrup.ro",
        "smtp_pass": "app-password",
        "phone_mobile": "0722 111 222"
    });

    let response = router
        .clone()
        .oneshot(json_request("POST", "/user-config", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(json_request("POST", "/user-config/reload", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
