use axum::extract::State;

use crate::AppState;

/// Liveness probe. Does not touch the database.
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "health"
)]
pub async fn healthcheck(State(app_state): State<AppState>) -> String {
    format!("OK {}", app_state.config.app.version)
}
