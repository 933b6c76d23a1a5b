use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Reference-data management and user administration, nested under
/// `/admin` by the caller. No authentication layer is applied: the legacy
/// service exposed these endpoints without any privilege check, and the
/// omission is kept for API compatibility.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /admin/towns
        // Creates a town; duplicate names answer 409.
        .route("/towns", post(handlers::create_town))
        // GET/DELETE /admin/users/{user_id}
        // Lookup returns the full projection with announcements and
        // favorites embedded; deletion cascades both at the store layer.
        .route(
            "/users/{user_id}",
            get(handlers::show_user).delete(handlers::delete_user),
        )
        // POST/GET /admin/filters
        .route(
            "/filters",
            post(handlers::create_category).get(handlers::list_categories),
        )
        // GET /admin/filters/{category_id}
        .route("/filters/{category_id}", get(handlers::show_category))
}
