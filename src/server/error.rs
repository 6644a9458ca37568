//! JSON error envelopes.
//!
//! Every failure leaves the API as `{success: false, error: <code>, message: <text>}`.
//! Handlers pick the [`ErrorKind`] for each failure themselves, so the same cause can
//! surface under different codes depending on the endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
    #[error("internal server error")]
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct ApiError {
    pub kind: ErrorKind,
    cause: Option<anyhow::Error>,
}

impl ApiError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, cause: None }
    }

    pub fn with_cause(kind: ErrorKind, cause: impl Into<anyhow::Error>) -> Self {
        Self {
            kind,
            cause: Some(cause.into()),
        }
    }
}

impl From<ErrorKind> for ApiError {
    fn from(kind: ErrorKind) -> Self {
        ApiError::new(kind)
    }
}

#[derive(Serialize)]
struct Envelope {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        match (&self.cause, self.kind) {
            (Some(cause), ErrorKind::Internal) => tracing::error!("{}: {:#}", self.kind, cause),
            (Some(cause), _) => tracing::info!("{}: {:#}", self.kind, cause),
            (None, _) => tracing::debug!("{}", self.kind),
        }
        let body = Envelope {
            success: false,
            error: status.as_u16(),
            message: self.kind.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Turns any failure into an [`ApiError`] of the chosen kind.
pub trait FailWith<T> {
    fn fail_with(self, kind: ErrorKind) -> Result<T, ApiError>;
}

impl<T, E> FailWith<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn fail_with(self, kind: ErrorKind) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::with_cause(kind, e))
    }
}

impl<T> FailWith<T> for Option<T> {
    fn fail_with(self, kind: ErrorKind) -> Result<T, ApiError> {
        self.ok_or(ApiError::new(kind))
    }
}

pub async fn not_found() -> ApiError {
    ApiError::new(ErrorKind::NotFound)
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::new(ErrorKind::MethodNotAllowed)
}
