/// Domain error taxonomy shared by the storage accessor and the HTTP layer.
///
/// Each variant carries the client-facing message; the API crate decides the
/// status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The key already exists. Reported as 400, not 409, to keep the
    /// status codes clients already depend on.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The target exists but is in a state that forbids the operation
    /// (e.g. uploading into a deleted category).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
