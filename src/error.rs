use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::user_store::StoreError;

/// Technical failures of a request. A credential mismatch is not one of
/// these: it is a normal response carrying an error body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Query(#[from] StoreError),
    #[error("response format to json error: {0}")]
    Encode(String),
}

/// Error body written by the error layer, never by the login handler itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Query(_) | AppError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "Your request is in a bad format.",
            AppError::Query(_) | AppError::Encode(_) => {
                "We encountered an error while processing your request."
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            status: status.as_u16(),
            message: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
