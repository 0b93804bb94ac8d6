//! Username/password login.

use iconlib_db::{CredentialStore, StoreError};

use super::jwt::{issue_token, JwtConfig};

/// Why a login attempt did not produce a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("server error")]
    Store(#[from] StoreError),

    #[error("server error")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Check `username`/`password` against the credential store and issue a
/// token on an exact match of both fields.
pub async fn login(
    credentials: &dyn CredentialStore,
    jwt: &JwtConfig,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let user = credentials
        .find_credential(username, password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    Ok(issue_token(&user.username, jwt)?)
}
