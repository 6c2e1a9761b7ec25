//! HTTP error mapping
//!
//! Wraps the shared error taxonomy for axum handlers: 400 Validation,
//! 404 NotFound, 409 InvalidTransition, 500 for everything storage-side.
//! Internal details are logged server-side; the client sees a generic
//! try-again message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use griot_common::Error;
use serde_json::json;
use tracing::error;

/// Error wrapper implementing IntoResponse for all handlers
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::InvalidTransition(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::Database(_)
            | Error::Io(_)
            | Error::Config(_)
            | Error::Integrity(_)
            | Error::Internal(_) => {
                error!("Internal error serving request: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error, please try again".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (Error::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                Error::InvalidTransition("decided".into()),
                StatusCode::CONFLICT,
            ),
            (
                Error::Integrity("missing extension".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                Error::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
