use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    hashing,
    models::{
        Announcement, AnnouncementBody, AnnouncementOwner, AnnouncementResponse, Category,
        CategoryName, CreateCategoryRequest, CreateTownRequest, DetailResponse, Favorite,
        FavoriteResponse, ImagePath, LoginRequest, RegisterUserRequest, ShortUser, TokenResponse,
        Town, TownName, User, UserResponse,
    },
    repository::AnnouncementFilter,
    storage,
};
use axum::{
    Form, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

// --- Response Assembly ---

// The legacy wire shapes embed resolved reference names and owner
// projections rather than raw foreign keys, so every read path goes
// through these helpers. Referential integrity is enforced by the schema;
// a dangling reference here is a store-level fault, not a client error.

async fn town_name(state: &AppState, town_id: i32) -> Result<TownName, ApiError> {
    let town = state
        .repo
        .get_town(town_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("town {town_id} missing")))?;
    Ok(TownName {
        town_name: town.town_name,
    })
}

async fn announcement_response(
    state: &AppState,
    announcement: &Announcement,
) -> Result<AnnouncementResponse, ApiError> {
    let owner = state
        .repo
        .get_user(announcement.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(format!("announcement {} owner missing", announcement.id))
        })?;
    let owner_town = town_name(state, owner.town_id).await?;
    let category = state
        .repo
        .get_category(announcement.category_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(format!("category {} missing", announcement.category_id))
        })?;
    let town = town_name(state, announcement.town_id).await?;
    let images = state.repo.images_for(announcement.id).await?;

    Ok(AnnouncementResponse {
        user: AnnouncementOwner {
            first_name: owner.first_name,
            last_name: owner.last_name,
            mobile_phone: owner.mobile_phone,
            id: owner.id,
            email: owner.email,
            town: owner_town,
        },
        price: announcement.price,
        category: CategoryName {
            category_name: category.category_name,
        },
        text: announcement.text.clone(),
        town,
        image: images
            .into_iter()
            .map(|image| ImagePath {
                data_path: image.data_path,
            })
            .collect(),
    })
}

async fn announcement_responses(
    state: &AppState,
    announcements: &[Announcement],
) -> Result<Vec<AnnouncementResponse>, ApiError> {
    let mut responses = Vec::with_capacity(announcements.len());
    for announcement in announcements {
        responses.push(announcement_response(state, announcement).await?);
    }
    Ok(responses)
}

async fn short_user(state: &AppState, user: &User) -> Result<ShortUser, ApiError> {
    let town = town_name(state, user.town_id).await?;
    Ok(ShortUser {
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        mobile_phone: user.mobile_phone,
        email: user.email.clone(),
        town,
    })
}

async fn favorite_response(
    state: &AppState,
    favorite: &Favorite,
    user: &ShortUser,
) -> Result<FavoriteResponse, ApiError> {
    let announcement = state
        .repo
        .get_announcement(favorite.announcement_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(format!(
                "favorite {} references missing announcement",
                favorite.id
            ))
        })?;
    Ok(FavoriteResponse {
        id: favorite.id,
        user_id: favorite.user_id,
        announcement_id: favorite.announcement_id,
        announcement: AnnouncementBody {
            price: announcement.price,
            category_id: announcement.category_id,
            text: announcement.text,
            town_id: announcement.town_id,
        },
        user: user.clone(),
    })
}

async fn user_response(state: &AppState, user: &User) -> Result<UserResponse, ApiError> {
    let town = town_name(state, user.town_id).await?;
    let announcements = state
        .repo
        .list_announcements(AnnouncementFilter {
            user_id: Some(user.id),
            ..Default::default()
        })
        .await?;
    let short = short_user(state, user).await?;
    let favorites = state.repo.favorites_for(user.id).await?;
    let mut favorite = Vec::with_capacity(favorites.len());
    for row in &favorites {
        favorite.push(favorite_response(state, row, &short).await?);
    }

    Ok(UserResponse {
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        mobile_phone: user.mobile_phone,
        id: user.id,
        email: user.email.clone(),
        town,
        announcement: announcements
            .into_iter()
            .map(|a| AnnouncementBody {
                price: a.price,
                category_id: a.category_id,
                text: a.text,
                town_id: a.town_id,
            })
            .collect(),
        favorite,
    })
}

/// Best-effort removal of files staged during a failed create request.
/// Failures here are logged, not surfaced: the request is already failing
/// with the original error.
async fn discard_staged_files(state: &AppState, paths: &[String]) {
    for path in paths {
        if let Err(err) = state.storage.delete(path).await {
            tracing::warn!("failed to discard staged attachment {path}: {err}");
        }
    }
}

// --- Identity Handlers ---

/// login
///
/// [Public Route] Exchanges form credentials for a bearer token. An
/// unknown email and a wrong password both answer 404, matching the
/// legacy service (notably not 401).
#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 404, description = "Unknown user or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .repo
        .get_user_by_email(&payload.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid Credentials".to_string()))?;

    if !hashing::verify(&user.password_hash, &payload.password) {
        return Err(ApiError::NotFound("Incorrect password".to_string()));
    }

    let access_token = auth::create_access_token(&user.email, &state.config.jwt_secret)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// register_user
///
/// [Public Route] Creates a user. Email and mobile phone are each unique;
/// a duplicate of either answers 409, as does a town id that does not
/// exist.
#[utoipa::path(
    post,
    path = "/auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Registered", body = UserResponse),
        (status = 409, description = "Duplicate email/phone or malformed input")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let digest = hashing::hash(&payload.password)?;
    let user = state
        .repo
        .create_user(&payload, &digest)
        .await
        .map_err(|err| match err {
            ApiError::Conflict(_) => ApiError::Conflict(format!(
                "email {} or mobile phone {} is already registered",
                payload.email, payload.mobile_phone
            )),
            other => other,
        })?;

    let response = user_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// --- Announcement Handlers ---

/// create_announcement
///
/// [Authenticated Route] Creates an announcement from a multipart form
/// (price, category_id, text, town_id, files[]), attributed to the
/// resolved principal.
///
/// Attachment ingestion is all-or-nothing per request: every file is
/// staged to the attachment store first, the image rows are inserted in a
/// single transaction afterwards, and staged files are discarded if either
/// step fails.
#[utoipa::path(
    post,
    path = "/create_announcement",
    responses(
        (status = 200, description = "Created", body = AnnouncementResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_announcement(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnnouncementResponse>, ApiError> {
    let mut price: Option<f64> = None;
    let mut category_id: Option<i32> = None;
    let mut town_id: Option<i32> = None;
    let mut text: Option<String> = None;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::InvalidInput(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "price" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::InvalidInput("unreadable price field".to_string()))?;
                price = Some(value.parse().map_err(|_| {
                    ApiError::InvalidInput(format!("price must be a number, got {value:?}"))
                })?);
            }
            "category_id" => {
                let value = field.text().await.map_err(|_| {
                    ApiError::InvalidInput("unreadable category_id field".to_string())
                })?;
                category_id = Some(value.parse().map_err(|_| {
                    ApiError::InvalidInput(format!("category_id must be an integer, got {value:?}"))
                })?);
            }
            "town_id" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::InvalidInput("unreadable town_id field".to_string()))?;
                town_id = Some(value.parse().map_err(|_| {
                    ApiError::InvalidInput(format!("town_id must be an integer, got {value:?}"))
                })?);
            }
            "text" => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::InvalidInput("unreadable text field".to_string()))?,
                );
            }
            "files" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let bytes = field.bytes().await.map_err(|err| {
                    ApiError::InvalidInput(format!("unreadable file {filename}: {err}"))
                })?;
                files.push((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let body = AnnouncementBody {
        price: price.ok_or_else(|| ApiError::InvalidInput("missing form field: price".into()))?,
        category_id: category_id
            .ok_or_else(|| ApiError::InvalidInput("missing form field: category_id".into()))?,
        text: text.ok_or_else(|| ApiError::InvalidInput("missing form field: text".into()))?,
        town_id: town_id
            .ok_or_else(|| ApiError::InvalidInput("missing form field: town_id".into()))?,
    };

    // The announcement row is committed first so an id exists for the
    // image rows to reference.
    let announcement = state.repo.create_announcement(user_id, &body).await?;

    // Stage every file before any metadata is written.
    let mut staged: Vec<String> = Vec::with_capacity(files.len());
    for (filename, bytes) in &files {
        let key = storage::storage_key(filename);
        match state.storage.write(&key, bytes).await {
            Ok(path) => staged.push(path),
            Err(err) => {
                discard_staged_files(&state, &staged).await;
                return Err(err);
            }
        }
    }

    if let Err(err) = state.repo.add_images(announcement.id, &staged).await {
        discard_staged_files(&state, &staged).await;
        return Err(err);
    }

    let response = announcement_response(&state, &announcement).await?;
    Ok(Json(response))
}

/// update_announcement
///
/// [Authenticated Route] Replaces the four mutable fields. 404 when the id
/// does not exist. The legacy service never compared the principal against
/// the owner; that check only runs when `enforce_ownership` is switched
/// on, answering 403 on a mismatch.
#[utoipa::path(
    put,
    path = "/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement ID")),
    request_body = AnnouncementBody,
    responses(
        (status = 202, description = "Updated", body = DetailResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_announcement(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AnnouncementBody>,
) -> Result<(StatusCode, Json<DetailResponse>), ApiError> {
    let announcement = state
        .repo
        .get_announcement(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Announcement with id {id} not found")))?;

    if state.config.enforce_ownership && announcement.user_id != user_id {
        return Err(ApiError::Forbidden(format!(
            "announcement {id} belongs to another user"
        )));
    }

    state.repo.update_announcement(id, &payload).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(DetailResponse {
            detail: format!("Announcement with id {id} successfully updated"),
        }),
    ))
}

/// show_all_announcements
///
/// [Public Route] The unfiltered listing. No pagination; an empty board is
/// an empty list, not an error.
#[utoipa::path(
    get,
    path = "/announcements",
    responses((status = 200, description = "All announcements", body = [AnnouncementResponse]))
)]
pub async fn show_all_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = state
        .repo
        .list_announcements(AnnouncementFilter::default())
        .await?;
    let responses = announcement_responses(&state, &announcements).await?;
    Ok(Json(responses))
}

/// show_announcement
///
/// [Public Route] Single announcement by id.
#[utoipa::path(
    get,
    path = "/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Found", body = AnnouncementResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn show_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AnnouncementResponse>, ApiError> {
    let announcement = state
        .repo
        .get_announcement(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("announcement with id {id} not found")))?;
    let response = announcement_response(&state, &announcement).await?;
    Ok(Json(response))
}

/// announcements_by_user
///
/// [Public Route] Listings of one owner. An empty result answers 404, the
/// legacy service's conflation of "no such user" with "user has no
/// announcements".
#[utoipa::path(
    get,
    path = "/announcements/user/{user_id}",
    params(("user_id" = i32, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Owner's announcements", body = [AnnouncementResponse]),
        (status = 404, description = "No announcements for this user")
    )
)]
pub async fn announcements_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = state
        .repo
        .list_announcements(AnnouncementFilter {
            user_id: Some(user_id),
            ..Default::default()
        })
        .await?;
    if announcements.is_empty() {
        return Err(ApiError::NotFound(format!(
            "user with id {user_id} not found"
        )));
    }
    let responses = announcement_responses(&state, &announcements).await?;
    Ok(Json(responses))
}

/// announcements_by_town
///
/// [Public Route] Listings in one town; same empty-means-404 policy.
#[utoipa::path(
    get,
    path = "/announcements/town/{town_id}",
    params(("town_id" = i32, Path, description = "Town ID")),
    responses(
        (status = 200, description = "Town announcements", body = [AnnouncementResponse]),
        (status = 404, description = "No announcements in this town")
    )
)]
pub async fn announcements_by_town(
    State(state): State<AppState>,
    Path(town_id): Path<i32>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = state
        .repo
        .list_announcements(AnnouncementFilter {
            town_id: Some(town_id),
            ..Default::default()
        })
        .await?;
    if announcements.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Town with id {town_id} not found"
        )));
    }
    let responses = announcement_responses(&state, &announcements).await?;
    Ok(Json(responses))
}

/// announcements_by_category
///
/// [Public Route] Listings in one category; same empty-means-404 policy.
#[utoipa::path(
    get,
    path = "/announcements/category/{category_id}",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category announcements", body = [AnnouncementResponse]),
        (status = 404, description = "No announcements in this category")
    )
)]
pub async fn announcements_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = state
        .repo
        .list_announcements(AnnouncementFilter {
            category_id: Some(category_id),
            ..Default::default()
        })
        .await?;
    if announcements.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Category with id {category_id} not found"
        )));
    }
    let responses = announcement_responses(&state, &announcements).await?;
    Ok(Json(responses))
}

/// search_announcements
///
/// [Public Route] Exact text match first, substring fallback second. Both
/// sets empty yields an empty 200 list, never a 404.
#[utoipa::path(
    get,
    path = "/announcements/search/{term}",
    params(("term" = String, Path, description = "Search term")),
    responses((status = 200, description = "Matches", body = [AnnouncementResponse]))
)]
pub async fn search_announcements(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = state.repo.search_announcements(&term).await?;
    let responses = announcement_responses(&state, &announcements).await?;
    Ok(Json(responses))
}

/// delete_announcement
///
/// [Authenticated Route] Removes an announcement: every backing image file
/// is deleted from the attachment store first (a missing file fails the
/// whole operation), then the row, cascading image and favorite rows at
/// the store layer. Ownership is gated by `enforce_ownership` exactly as
/// for update.
#[utoipa::path(
    delete,
    path = "/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Deleted", body = DetailResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_announcement(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DetailResponse>, ApiError> {
    let announcement = state
        .repo
        .get_announcement(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Announcement with id {id} not found")))?;

    if state.config.enforce_ownership && announcement.user_id != user_id {
        return Err(ApiError::Forbidden(format!(
            "announcement {id} belongs to another user"
        )));
    }

    let images = state.repo.images_for(id).await?;
    for image in &images {
        // Hard failure on a missing file; metadata is only removed once
        // every backing file is gone.
        state.storage.delete(&image.data_path).await?;
    }

    state.repo.delete_announcement(id).await?;
    Ok(Json(DetailResponse {
        detail: format!("announcement with id {id} deleted"),
    }))
}

// --- Favorite Handlers ---

/// add_favorite
///
/// [Authenticated Route] Bookmarks an announcement for the principal. The
/// user id in the path is ignored; the token decides who favorites. The
/// schema allows a single favorite row per announcement, so a second
/// favorite by anyone answers 409.
#[utoipa::path(
    post,
    path = "/user/{user_id}/favorite/{announcement_id}",
    params(
        ("user_id" = i32, Path, description = "Ignored; the principal comes from the token"),
        ("announcement_id" = i32, Path, description = "Announcement ID")
    ),
    responses(
        (status = 200, description = "Added", body = DetailResponse),
        (status = 409, description = "Already favorited")
    )
)]
pub async fn add_favorite(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path((_path_user_id, announcement_id)): Path<(i32, i32)>,
) -> Result<Json<DetailResponse>, ApiError> {
    state
        .repo
        .add_favorite(user_id, announcement_id)
        .await
        .map_err(|err| match err {
            ApiError::Conflict(_) => ApiError::Conflict(format!(
                "announcement with id {announcement_id} is already in favorites"
            )),
            other => other,
        })?;
    Ok(Json(DetailResponse {
        detail: format!("announcement with id {announcement_id} added to favorites"),
    }))
}

/// list_favorites
///
/// [Authenticated Route] The principal's favorites with embedded
/// announcement bodies and the short user projection.
#[utoipa::path(
    get,
    path = "/user/{user_id}/favorite",
    params(("user_id" = i32, Path, description = "Ignored; the principal comes from the token")),
    responses((status = 200, description = "Favorites", body = [FavoriteResponse]))
)]
pub async fn list_favorites(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(_path_user_id): Path<i32>,
) -> Result<Json<Vec<FavoriteResponse>>, ApiError> {
    let user = state
        .repo
        .get_user(user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    let short = short_user(&state, &user).await?;

    let favorites = state.repo.favorites_for(user_id).await?;
    let mut responses = Vec::with_capacity(favorites.len());
    for favorite in &favorites {
        responses.push(favorite_response(&state, favorite, &short).await?);
    }
    Ok(Json(responses))
}

/// remove_favorite
///
/// [Authenticated Route] Drops the favorite row referencing an
/// announcement. The deletion filters by announcement id only, as the
/// legacy service did; 404 when no such row exists.
#[utoipa::path(
    delete,
    path = "/user/{user_id}/favorite/{announcement_id}",
    params(
        ("user_id" = i32, Path, description = "Ignored; the principal comes from the token"),
        ("announcement_id" = i32, Path, description = "Announcement ID")
    ),
    responses(
        (status = 200, description = "Removed", body = DetailResponse),
        (status = 404, description = "Not favorited")
    )
)]
pub async fn remove_favorite(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path((_path_user_id, announcement_id)): Path<(i32, i32)>,
) -> Result<Json<DetailResponse>, ApiError> {
    if !state.repo.remove_favorite(announcement_id).await? {
        return Err(ApiError::NotFound(format!(
            "Announcement with id {announcement_id} not found"
        )));
    }
    Ok(Json(DetailResponse {
        detail: format!("announcement with id {announcement_id} deleted"),
    }))
}

// --- Admin Handlers ---

// The legacy service exposes these without any privilege check beyond
// reachability; kept that way for API compatibility.

/// create_town
///
/// [Admin Route] Creates a town. Duplicate names answer 409.
#[utoipa::path(
    post,
    path = "/admin/towns",
    request_body = CreateTownRequest,
    responses(
        (status = 201, description = "Created", body = Town),
        (status = 409, description = "Town already exists")
    )
)]
pub async fn create_town(
    State(state): State<AppState>,
    Json(payload): Json<CreateTownRequest>,
) -> Result<(StatusCode, Json<Town>), ApiError> {
    let town = state
        .repo
        .create_town(&payload.town_name)
        .await
        .map_err(|err| match err {
            ApiError::Conflict(_) => {
                ApiError::Conflict(format!("town {} already exists", payload.town_name))
            }
            other => other,
        })?;
    Ok((StatusCode::CREATED, Json(town)))
}

/// show_user
///
/// [Admin Route] Full user projection with announcements and favorites
/// embedded.
#[utoipa::path(
    get,
    path = "/admin/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Found", body = UserResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn show_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .repo
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {user_id} not found")))?;
    let response = user_response(&state, &user).await?;
    Ok(Json(response))
}

/// delete_user
///
/// [Admin Route] Removes a user. The user's announcements and favorites go
/// with the row via the store-layer cascade.
#[utoipa::path(
    delete,
    path = "/admin/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = DetailResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<DetailResponse>, ApiError> {
    if !state.repo.delete_user(user_id).await? {
        return Err(ApiError::NotFound(format!("user {user_id} not found")));
    }
    Ok(Json(DetailResponse {
        detail: format!("user with id {user_id} deleted"),
    }))
}

/// create_category
///
/// [Admin Route] Creates a category. Duplicate names answer 409.
#[utoipa::path(
    post,
    path = "/admin/filters",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Created", body = Category),
        (status = 409, description = "Category already exists")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .repo
        .create_category(&payload.category_name)
        .await
        .map_err(|err| match err {
            ApiError::Conflict(_) => {
                ApiError::Conflict(format!("category {} already exists", payload.category_name))
            }
            other => other,
        })?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// list_categories
///
/// [Admin Route] All categories.
#[utoipa::path(
    get,
    path = "/admin/filters",
    responses((status = 200, description = "Categories", body = [Category]))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.repo.list_categories().await?;
    Ok(Json(categories))
}

/// show_category
///
/// [Admin Route] Category by id.
#[utoipa::path(
    get,
    path = "/admin/filters/{category_id}",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Found", body = Category),
        (status = 404, description = "Not Found")
    )
)]
pub async fn show_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .repo
        .get_category(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category with id {category_id} not found")))?;
    Ok(Json(category))
}
