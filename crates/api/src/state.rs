use std::sync::Arc;

use iconlib_db::CredentialStore;

use crate::config::ServerConfig;
use crate::services::IconLibraryService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Category and icon operations over the injected icon store.
    pub library: IconLibraryService,
    /// Credential lookup for login.
    pub credentials: Arc<dyn CredentialStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
