//! Error types for the condominium dashboard

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::render;

/// Message shown when the backend gave nothing more specific.
pub const GENERIC_ERROR_MESSAGE: &str = "Ocurrió un error inesperado. Intente nuevamente.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status}")]
    Api {
        status: u16,
        message: Option<String>,
        detail: Option<String>,
    },

    #[error("Unexpected backend payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build an API error from a non-2xx backend response body.
    ///
    /// The backend reports failures either as `{"detail": ...}`, `{"message": ...}` or as a
    /// map of field names to lists of messages. The first field message is kept as `message`
    /// when neither key is present.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        let text_of = |value: &Value| -> Option<String> {
            match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
                _ => None,
            }
        };

        let (message, detail) = match parsed {
            Some(Value::Object(map)) => {
                let detail = map.get("detail").and_then(text_of);
                let message = map.get("message").and_then(text_of).or_else(|| {
                    if detail.is_some() {
                        return None;
                    }
                    map.iter()
                        .find_map(|(field, value)| text_of(value).map(|m| format!("{}: {}", field, m)))
                });
                (message, detail)
            }
            _ => (None, None),
        };

        AppError::Api { status, message, detail }
    }

    /// Most specific human-readable message for inline display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { detail: Some(detail), .. } => detail.clone(),
            AppError::Api { message: Some(message), .. } => message.clone(),
            AppError::Api { status: 404, .. } | AppError::NotFound(_) => {
                "El registro solicitado no existe.".to_string()
            }
            AppError::Transport(_) => "No se pudo conectar con el servidor.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Api { status: 404, .. } | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Business-rule rejections keep their client error status
            AppError::Api { status, .. } if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AppError::Api { .. } | AppError::Transport(_) | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Export(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, render::layout::error_page(status, &self.user_message())).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_message() {
        let err = AppError::from_api_response(
            400,
            r#"{"detail": "El visitante ya registró su salida.", "message": "Error"}"#,
        );
        assert_eq!(err.user_message(), "El visitante ya registró su salida.");
    }

    #[test]
    fn message_used_without_detail() {
        let err = AppError::from_api_response(409, r#"{"message": "Documento duplicado"}"#);
        assert_eq!(err.user_message(), "Documento duplicado");
    }

    #[test]
    fn field_errors_become_message() {
        let err = AppError::from_api_response(
            400,
            r#"{"documento_identidad": ["Este campo es requerido."]}"#,
        );
        assert_eq!(
            err.user_message(),
            "documento_identidad: Este campo es requerido."
        );
    }

    #[test]
    fn unparseable_body_falls_back_to_generic() {
        let err = AppError::from_api_response(500, "<html>Internal Server Error</html>");
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn backend_client_errors_keep_their_status() {
        let err = AppError::from_api_response(
            400,
            r#"{"detail": "El visitante ya registró su salida."}"#,
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from_api_response(409, r#"{"message": "Documento duplicado"}"#);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = AppError::from_api_response(503, "");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn backend_not_found_maps_to_404() {
        let err = AppError::from_api_response(404, r#"{"detail": "No encontrado."}"#);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "No encontrado.");
    }
}
