use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Database Rows ---

/// User
///
/// Canonical identity record. `email` and `mobile_phone` are each globally
/// unique; the row is created by registration and only ever removed by an
/// administrator, cascading to the user's announcements and favorites.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_phone: i64,
    // FK to towns.id.
    pub town_id: i32,
    /// bcrypt digest. Never serialized into a response body.
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Reference entity. Immutable once referenced; `town_name` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Town {
    pub id: i32,
    pub town_name: String,
}

/// Reference entity. Immutable once referenced; `category_name` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
}

/// Announcement
///
/// The listing itself. Owned exclusively by its creator (`user_id`);
/// `price`, `category_id`, `text` and `town_id` are the only mutable
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Announcement {
    pub id: i32,
    // FK to users.id (owner).
    pub user_id: i32,
    pub price: f64,
    pub category_id: i32,
    pub text: String,
    pub town_id: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Image
///
/// One stored attachment. `data_path` is the path under the attachment
/// root where the bytes live; the row and the file are created and
/// destroyed together.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Image {
    pub id: i32,
    pub announcement_id: i32,
    pub data_path: String,
}

/// Favorite
///
/// Bookmark row. The schema allows at most one favorite row per
/// announcement, regardless of user.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub announcement_id: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Request Payloads ---

/// Input payload for registration (POST /auth). The password arrives as
/// plaintext and is digested before it touches the store.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RegisterUserRequest {
    pub email: String,
    pub mobile_phone: i64,
    pub first_name: String,
    pub last_name: String,
    pub town_id: i32,
    pub password: String,
}

/// Form credentials for POST /login. `username` carries the email, the
/// field name kept for OAuth2 password-flow client compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The four mutable announcement fields. Serves both as the PUT request
/// body and as the compact announcement projection embedded in favorite
/// and user responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AnnouncementBody {
    pub price: f64,
    pub category_id: i32,
    pub text: String,
    pub town_id: i32,
}

/// Input payload for creating a town (POST /admin/towns).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTownRequest {
    pub town_name: String,
}

/// Input payload for creating a category (POST /admin/filters).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateCategoryRequest {
    pub category_name: String,
}

// --- Response Projections ---

/// Bearer token envelope returned by POST /login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

/// Generic message body used by mutation endpoints that have no entity to
/// return.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DetailResponse {
    pub detail: String,
}

/// Town projection without the id, as embedded in user and announcement
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TownName {
    pub town_name: String,
}

/// Category projection without the id.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CategoryName {
    pub category_name: String,
}

/// Image projection exposing only the stored path.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ImagePath {
    pub data_path: String,
}

/// Owner projection embedded in announcement responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AnnouncementOwner {
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: i64,
    pub id: i32,
    pub email: String,
    pub town: TownName,
}

/// Short user projection (no id) embedded in favorite responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ShortUser {
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: i64,
    pub email: String,
    pub town: TownName,
}

/// AnnouncementResponse
///
/// The full announcement projection: owner, reference names and image
/// paths resolved, matching the legacy wire shape (which carries no
/// announcement id).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AnnouncementResponse {
    pub user: AnnouncementOwner,
    pub price: f64,
    pub category: CategoryName,
    pub text: String,
    pub town: TownName,
    pub image: Vec<ImagePath>,
}

/// Favorite row with its announcement body and owning user embedded.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct FavoriteResponse {
    pub id: i32,
    pub user_id: i32,
    pub announcement_id: i32,
    pub announcement: AnnouncementBody,
    pub user: ShortUser,
}

/// UserResponse
///
/// Full user projection returned by registration and the admin lookup:
/// town resolved, announcements and favorites embedded.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserResponse {
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: i64,
    pub id: i32,
    pub email: String,
    pub town: TownName,
    pub announcement: Vec<AnnouncementBody>,
    pub favorite: Vec<FavoriteResponse>,
}
