use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a token: the identity gateway (login and
/// registration) and all announcement read paths. The filtered listings
/// keep the legacy policy of answering 404 for an empty result set.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // POST /login
        // Form credentials in, bearer token out. Unknown user and wrong
        // password both answer 404.
        .route("/login", post(handlers::login))
        // POST /auth
        // User registration. 201 on success, 409 on duplicate email/phone.
        .route("/auth", post(handlers::register_user))
        // GET /announcements
        // Unfiltered listing, no pagination.
        .route("/announcements", get(handlers::show_all_announcements))
        // GET /announcements/{id}
        .route("/announcements/{id}", get(handlers::show_announcement))
        // GET /announcements/user/{user_id}
        .route(
            "/announcements/user/{user_id}",
            get(handlers::announcements_by_user),
        )
        // GET /announcements/town/{town_id}
        .route(
            "/announcements/town/{town_id}",
            get(handlers::announcements_by_town),
        )
        // GET /announcements/category/{category_id}
        .route(
            "/announcements/category/{category_id}",
            get(handlers::announcements_by_category),
        )
        // GET /announcements/search/{term}
        // Exact match with substring fallback; empty result is a 200.
        .route(
            "/announcements/search/{term}",
            get(handlers::search_announcements),
        )
}
