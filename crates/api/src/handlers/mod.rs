pub mod auth;
pub mod icons;
pub mod uploads;

use crate::error::{AppError, AppResult};

/// Treat a missing or empty JSON field as absent, failing with `message`.
pub(crate) fn required(value: Option<String>, message: &str) -> AppResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}
