pub mod auth;
pub mod health;
pub mod icons;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the full route tree (without the outer middleware stack).
///
/// ```text
/// /health                               liveness (public)
/// /login, /check-auth                   authentication (public)
/// /add-icon-category ...                category + upload routes (bearer)
/// /public/icon-categories               showcase listing (public, optional)
/// /icons/*                              uploaded files (static)
/// ```
pub fn app_routes(state: &AppState) -> Router<AppState> {
    let mut router = Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(icons::protected(state));

    if state.config.public_showcase {
        router = router.merge(icons::showcase());
    }

    router.nest_service("/icons", ServeDir::new(state.library.icons_dir()))
}
