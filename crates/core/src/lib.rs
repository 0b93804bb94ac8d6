//! Domain types and pure logic for the icon library service.
//!
//! Nothing in this crate touches the network, the database, or the
//! filesystem. Storage lives in `iconlib-db`, HTTP in `iconlib-api`.

pub mod error;
pub mod library;
pub mod types;
pub mod upload;
