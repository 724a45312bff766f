//! Response envelope shared by all API endpoints.
//!
//! Every response carries `success` plus either `data` or a structured
//! `error` with a machine-readable code, a human message, and optional
//! details. Raw storage errors never appear here; they are only logged.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const ERR_CODE_INTERNAL_SERVER: &str = "INTERNAL_SERVER_ERROR";
pub const ERR_CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const ERR_CODE_VALIDATION: &str = "VALIDATION_ERROR";

/// Response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Structured error body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Build a success envelope around `data`.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }),
    )
        .into_response()
}

/// Build an error envelope.
pub fn error(status: StatusCode, code: &str, message: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ApiResponse::<serde_json::Value> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
                details,
            }),
        }),
    )
        .into_response()
}

/// 400 with the validation error code and the given details.
pub fn validation_error(details: impl Into<String>) -> Response {
    error(
        StatusCode::BAD_REQUEST,
        ERR_CODE_VALIDATION,
        "Request parameters are invalid",
        Some(details.into()),
    )
}

/// 404 with the not-found error code.
pub fn not_found(message: &str) -> Response {
    error(StatusCode::NOT_FOUND, ERR_CODE_NOT_FOUND, message, None)
}

/// 500 with the internal error code.
pub fn internal_error(message: &str) -> Response {
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ERR_CODE_INTERNAL_SERVER,
        message,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_error() {
        let body = serde_json::to_value(ApiResponse {
            success: true,
            data: Some(serde_json::json!({"message": "ok"})),
            error: None,
        })
        .unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["message"], "ok");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<serde_json::Value> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: ERR_CODE_NOT_FOUND.to_string(),
                message: "Wallet not found".to_string(),
                details: None,
            }),
        })
        .unwrap();

        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"].get("details").is_none());
    }

    #[test]
    fn test_helper_status_codes() {
        assert_eq!(
            validation_error("bad input").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(not_found("Wallet not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            internal_error("Internal server error").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
