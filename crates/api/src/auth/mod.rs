//! Token Service.
//!
//! - [`jwt`] -- signed, time-limited identity tokens (issue / verify).
//! - [`login`] -- credential check that issues a token.

pub mod jwt;
pub mod login;
