mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

use common::{sample_store, setup_test_app};

#[tokio::test]
async fn test_healthcheck_reports_version() {
    let store = sample_store();
    let app = setup_test_app(store.clone());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/healthcheck")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, format!("OK {}", env!("CARGO_PKG_VERSION")));
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let app = setup_test_app(sample_store());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/login")
        .header(header::ORIGIN, "https://portal.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_openapi_document_lists_login() {
    let app = setup_test_app(sample_store());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"]["/v1/login"]["post"].is_object());
}
