use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use login_server::{
    build_app, config::AppConfig, models::user::UserRecord,
    services::user_store::MemoryUserStore,
};

pub fn record(id: i64, department: &str, purview: &str, logname: &str, logpassword: &str) -> UserRecord {
    UserRecord {
        id,
        department: department.to_string(),
        purview: purview.to_string(),
        logname: logname.to_string(),
        logpassword: logpassword.to_string(),
    }
}

/// Store seeded with the account used throughout the login tests.
pub fn sample_store() -> Arc<MemoryUserStore> {
    Arc::new(MemoryUserStore::with_records(vec![
        record(1, "eng", "admin", "alice", "secret"),
        record(2, "ops", "viewer", "bob", "hunter2"),
    ]))
}

pub fn setup_test_app(store: Arc<MemoryUserStore>) -> Router {
    setup_test_app_with_config(store, AppConfig::default())
}

pub fn setup_test_app_with_config(store: Arc<MemoryUserStore>, config: AppConfig) -> Router {
    build_app(Arc::new(config), store)
}

pub async fn post_login(app: Router, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/login")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
