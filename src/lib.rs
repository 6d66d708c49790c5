pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use services::auth::AuthService;
pub use services::user_store::UserStore;

#[derive(Clone)]
pub struct AppState {
    /// Credential lookup over the account store
    pub auth: AuthService,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::auth::login_handler, handlers::health::healthcheck),
    components(schemas(
        dto::auth::LoginRequest,
        dto::auth::LoginResponse,
        dto::auth::LoginErrorResponse
    )),
    tags(
        (name = "auth", description = "Account login"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

/// Compose the HTTP application from its collaborators.
///
/// Routes:
/// - `GET /healthcheck`
/// - `POST /v1/login`
/// - Swagger UI under `/v1/api-docs`
///
/// Every route runs behind the access log and a permissive CORS layer.
pub fn build_app(config: Arc<AppConfig>, store: Arc<dyn UserStore>) -> Router {
    let state = AppState {
        auth: AuthService::new(store),
        config,
    };

    Router::new()
        .route("/healthcheck", get(handlers::health::healthcheck))
        .route("/v1/login", post(handlers::auth::login_handler))
        .merge(
            SwaggerUi::new("/v1/api-docs").url("/v1/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(middleware::access_log))
        .with_state(state)
}
