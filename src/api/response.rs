//! Response envelope and error-to-status mapping.
//!
//! Every response body uses the `{success, data | error, details}` envelope.
//! Internal store/runtime failures are logged with their detail and reported
//! as a generic server fault so nothing internal leaks to clients.

use crate::errors::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

/// Successful envelope around `data`.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

/// Wraps `data` in a 200 envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    Json(ApiEnvelope {
        success: true,
        data,
    })
    .into_response()
}

/// Wraps `data` in a 201 envelope.
pub fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiEnvelope {
            success: true,
            data,
        }),
    )
        .into_response()
}

fn failure(status: StatusCode, message: &str, details: Option<Value>) -> Response {
    let mut body = json!({ "success": false, "error": message });
    if let Some(details) = details {
        body["details"] = details;
    }
    (status, Json(body)).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation { message, details } => {
                failure(StatusCode::BAD_REQUEST, &message, details)
            }
            Error::Unauthorized => failure(
                StatusCode::UNAUTHORIZED,
                "missing or invalid credentials",
                None,
            ),
            Error::Forbidden => failure(
                StatusCode::FORBIDDEN,
                "not permitted to access this resource",
                None,
            ),
            Error::ProductNotFound { .. }
            | Error::ReportNotFound { .. }
            | Error::QuestionNotFound { .. } => {
                failure(StatusCode::NOT_FOUND, &self.to_string(), None)
            }
            Error::Database(_) | Error::Io(_) | Error::EnvVar(_) | Error::Config { .. } => {
                error!(error = %self, "Request failed with an internal error.");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error",
                    None,
                )
            }
        }
    }
}
