//! Server Error Types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while forwarding a request
#[derive(Error, Debug)]
pub enum ServerError {
    /// Backend could not be reached or its reply could not be read
    #[error("Backend unavailable: {0}")]
    Upstream(String),

    /// Forwarded response could not be assembled
    #[error("Invalid response: {0}")]
    Response(String),
}

/// Same shape as the backend's error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Upstream(_) => "BACKEND_UNAVAILABLE",
            ServerError::Response(_) => "PROXY_ERROR",
        }
    }
}

impl From<reqwest::Error> for ServerError {
    fn from(err: reqwest::Error) -> Self {
        ServerError::Upstream(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}
