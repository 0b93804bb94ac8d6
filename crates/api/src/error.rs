use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use iconlib_core::error::CoreError;
use iconlib_core::upload::UploadRejection;
use iconlib_db::StoreError;
use serde_json::json;

use crate::auth::login::AuthError;

/// Client-facing message for every sanitized 5xx response.
const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ success: false, message }`
/// envelope every endpoint uses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `iconlib_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A failed login.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An uploaded part refused before reaching disk.
    #[error(transparent)]
    Upload(#[from] UploadRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error. The detail is logged, never sent to the client.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// A failure inside a named operation. Sanitized server errors report
    /// `message` instead of the generic one; everything else passes through.
    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        source: Box<AppError>,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Attach the client message used if this turns out to be a sanitized
    /// server error.
    pub fn during(self, message: &'static str) -> Self {
        AppError::Operation {
            message,
            source: Box::new(self),
        }
    }

    /// Resolve the HTTP status, machine-readable code, and client message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
                CoreError::InvalidState(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_STATE", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        msg.clone(),
                    )
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                internal()
            }

            AppError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid username or password".to_string(),
            ),
            AppError::Auth(err) => {
                tracing::error!(error = ?err, "Login failed with a server error");
                internal()
            }

            AppError::Upload(rejection) => {
                (StatusCode::BAD_REQUEST, "UPLOAD_REJECTED", rejection.to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }

            AppError::Operation { message, source } => {
                let (status, code, inner) = source.parts();
                if inner == SERVER_ERROR_MESSAGE {
                    (status, code, message.to_string())
                } else {
                    (status, code, inner)
                }
            }
        }
    }

    /// Render with the `status` key instead of `success`, as the listing
    /// endpoints do.
    pub fn into_status_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "status": false,
            "message": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        SERVER_ERROR_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// [`AppError`] rendered with the `{ status: false, message }` envelope.
#[derive(Debug)]
pub struct StatusError(pub AppError);

impl From<AppError> for StatusError {
    fn from(err: AppError) -> Self {
        StatusError(err)
    }
}

impl From<CoreError> for StatusError {
    fn from(err: CoreError) -> Self {
        StatusError(AppError::Core(err))
    }
}

impl From<StoreError> for StatusError {
    fn from(err: StoreError) -> Self {
        StatusError(AppError::Store(err))
    }
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        self.0.into_status_response()
    }
}
