//! Request-pipeline middleware.
//!
//! - [`auth`] -- Auth Gate: bearer-token check in front of protected routes.
//! - [`cors`] -- CORS layer built from the configured origin allowlist.

pub mod auth;
pub mod cors;
