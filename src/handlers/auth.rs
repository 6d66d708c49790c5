use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    dto::auth::{LoginErrorResponse, LoginRequest, LoginResponse, LoginResult},
    error::AppError,
    models::user::Credential,
    services::auth::LoginOutcome,
    AppState,
};

/// Check a login name and plaintext password against the account table.
///
/// The body is read as JSON whatever the `Content-Type`; a `null` body and
/// differently-cased keys are accepted (see [`LoginRequest::from_json`]). A credential
/// mismatch answers `200` with `{"error": ...}` unless
/// `auth.reject_with_unauthorized` is set, in which case it answers `401`
/// with the same body.
#[utoipa::path(
    post,
    path = "/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Account found, or credential mismatch when the body is an error object", body = LoginResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Credential mismatch (only with auth.reject_with_unauthorized)", body = LoginErrorResponse),
        (status = 500, description = "Database error")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = LoginRequest::from_json(&body).map_err(|e| {
        error!("invalid request: {}", e);
        AppError::Decode(e)
    })?;
    let credential = Credential::from(request);

    let outcome = app_state
        .auth
        .authenticate(&credential)
        .await
        .map_err(|e| {
            error!("database query error: {}", e);
            AppError::Query(e)
        })?;

    match outcome {
        LoginOutcome::Authenticated(user) => {
            write_json(StatusCode::OK, &LoginResult::Success(LoginResponse::from(user)))
        }
        LoginOutcome::Rejected => {
            let status = if app_state.config.auth.reject_with_unauthorized {
                StatusCode::UNAUTHORIZED
            } else {
                StatusCode::OK
            };
            write_json(status, &LoginResult::Failure(LoginErrorResponse::mismatch()))
        }
    }
}

fn write_json(status: StatusCode, result: &LoginResult) -> Result<Response, AppError> {
    let body = serde_json::to_string(result).map_err(|e| {
        error!("response format to json error: {}", e);
        AppError::Encode(e.to_string())
    })?;

    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
