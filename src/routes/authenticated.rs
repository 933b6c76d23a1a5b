use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated Router Module
///
/// Every mutating, ownership-scoped operation lives here. The `AuthUser`
/// extractor middleware on the layer above guarantees each handler runs
/// with a token that validated and resolved to a live user row.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /create_announcement
        // Multipart form (price, category_id, text, town_id, files[]).
        // Attachment ingestion is all-or-nothing per request.
        .route("/create_announcement", post(handlers::create_announcement))
        // PUT/DELETE /announcements/{id}
        // Update answers 202; delete removes backing image files before
        // the row. Ownership enforcement is config-gated.
        .route(
            "/announcements/{id}",
            put(handlers::update_announcement).delete(handlers::delete_announcement),
        )
        // GET /user/{user_id}/favorite
        // The principal's favorites. The path user id is ignored in favor
        // of the token identity, matching the legacy routes.
        .route("/user/{user_id}/favorite", get(handlers::list_favorites))
        // POST/DELETE /user/{user_id}/favorite/{announcement_id}
        .route(
            "/user/{user_id}/favorite/{announcement_id}",
            post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
}
