use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod hashing;
pub mod models;
pub mod repository;
pub mod storage;

// Routing segregation (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Core state types for the application entry point and tests.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};
pub use storage::{FsAttachmentStore, MockAttachmentStore, StorageState};

/// ApiDoc
///
/// Aggregates every annotated handler and schema into the OpenAPI document
/// served at `/api-docs/openapi.json` and rendered by the Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::register_user,
        handlers::create_announcement, handlers::update_announcement,
        handlers::show_all_announcements, handlers::show_announcement,
        handlers::announcements_by_user, handlers::announcements_by_town,
        handlers::announcements_by_category, handlers::search_announcements,
        handlers::delete_announcement,
        handlers::add_favorite, handlers::list_favorites, handlers::remove_favorite,
        handlers::create_town, handlers::show_user, handlers::delete_user,
        handlers::create_category, handlers::list_categories, handlers::show_category
    ),
    components(
        schemas(
            models::User, models::Town, models::Category, models::Announcement,
            models::Image, models::Favorite,
            models::RegisterUserRequest, models::LoginRequest, models::AnnouncementBody,
            models::CreateTownRequest, models::CreateCategoryRequest,
            models::TokenResponse, models::DetailResponse,
            models::TownName, models::CategoryName, models::ImagePath,
            models::AnnouncementOwner, models::ShortUser, models::AnnouncementResponse,
            models::FavoriteResponse, models::UserResponse,
        )
    ),
    tags(
        (name = "adboard", description = "Classifieds board API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding all shared services and
/// configuration, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: relational persistence behind a trait object.
    pub repo: RepositoryState,
    /// Attachment layer: filesystem-backed image storage.
    pub storage: StorageState,
    /// Loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors pull individual services out of the shared state without
// depending on the whole of it.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the authenticated route tier. Extracting
/// `AuthUser` runs the full token validation and user lookup; a failure
/// rejects the request with the opaque 401 before the handler executes.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies the scoped auth layer and the
/// global observability layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name used for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Documentation: auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Authenticated routes: token validation before every handler.
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Admin routes, nested under '/admin'. Deliberately unlayered; see
        // routes::admin.
        .nest("/admin", admin::admin_routes())
        .with_state(state);

    // Observability and correlation layers, outermost first.
    base_router
        .layer(
            ServiceBuilder::new()
                // Request ID generation for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Request tracing with the generated id in the span.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Return the request id to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// Customizes span creation for `TraceLayer`: method, URI and the
/// correlation id on every request span.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
