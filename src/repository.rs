use crate::error::ApiError;
use crate::models::{
    Announcement, AnnouncementBody, Category, Favorite, Image, RegisterUserRequest, Town, User,
};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;

/// Filter for announcement listings. At most one field is set per
/// endpoint; unset fields place no constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnouncementFilter {
    pub user_id: Option<i32>,
    pub town_id: Option<i32>,
    pub category_id: Option<i32>,
}

/// Repository Trait
///
/// Abstract contract for all persistence operations. Handlers talk to this
/// trait only, which keeps them testable against an in-memory
/// implementation.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) shareable across axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn create_user(
        &self,
        req: &RegisterUserRequest,
        password_hash: &str,
    ) -> Result<User, ApiError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, ApiError>;
    // Identity resolution path: tokens carry the email claim.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    // Returns false when no row existed. Cascades to the user's
    // announcements and favorites at the store layer.
    async fn delete_user(&self, id: i32) -> Result<bool, ApiError>;

    // --- Reference data ---
    async fn create_town(&self, name: &str) -> Result<Town, ApiError>;
    async fn get_town(&self, id: i32) -> Result<Option<Town>, ApiError>;
    async fn create_category(&self, name: &str) -> Result<Category, ApiError>;
    async fn get_category(&self, id: i32) -> Result<Option<Category>, ApiError>;
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    // --- Announcements ---
    async fn create_announcement(
        &self,
        user_id: i32,
        body: &AnnouncementBody,
    ) -> Result<Announcement, ApiError>;
    // Updates the four mutable fields in place; id, owner and created_at
    // are immutable. Returns false when the id does not exist.
    async fn update_announcement(&self, id: i32, body: &AnnouncementBody) -> Result<bool, ApiError>;
    async fn get_announcement(&self, id: i32) -> Result<Option<Announcement>, ApiError>;
    async fn list_announcements(
        &self,
        filter: AnnouncementFilter,
    ) -> Result<Vec<Announcement>, ApiError>;
    // Exact text match first; substring fallback only when the exact set
    // is empty. An empty result is a valid outcome, not an error.
    async fn search_announcements(&self, term: &str) -> Result<Vec<Announcement>, ApiError>;
    // Cascades to images and favorites at the store layer. The caller is
    // responsible for removing backing files first.
    async fn delete_announcement(&self, id: i32) -> Result<bool, ApiError>;

    // --- Images ---
    // All rows for one request are inserted in a single transaction, so a
    // mid-batch failure leaves no metadata behind.
    async fn add_images(
        &self,
        announcement_id: i32,
        paths: &[String],
    ) -> Result<Vec<Image>, ApiError>;
    async fn images_for(&self, announcement_id: i32) -> Result<Vec<Image>, ApiError>;

    // --- Favorites ---
    // A duplicate favorite surfaces the schema's uniqueness constraint as
    // a Conflict.
    async fn add_favorite(&self, user_id: i32, announcement_id: i32) -> Result<Favorite, ApiError>;
    // Filters by announcement id only, matching the legacy behavior.
    async fn remove_favorite(&self, announcement_id: i32) -> Result<bool, ApiError>;
    async fn favorites_for(&self, user_id: i32) -> Result<Vec<Favorite>, ApiError>;
}

/// The concrete type used to share persistence access across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The production implementation, backed by a pooled Postgres connection.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ANNOUNCEMENT_COLUMNS: &str = "id, user_id, price, category_id, text, town_id, created_at";
const USER_COLUMNS: &str =
    "id, first_name, last_name, email, mobile_phone, town_id, password_hash, created_at";

#[async_trait]
impl Repository for PostgresRepository {
    async fn create_user(
        &self,
        req: &RegisterUserRequest,
        password_hash: &str,
    ) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, mobile_phone, town_id, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, mobile_phone, town_id, password_hash, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(req.mobile_phone)
        .bind(req.town_id)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, ApiError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_town(&self, name: &str) -> Result<Town, ApiError> {
        let town = sqlx::query_as::<_, Town>(
            "INSERT INTO towns (town_name) VALUES ($1) RETURNING id, town_name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(town)
    }

    async fn get_town(&self, id: i32) -> Result<Option<Town>, ApiError> {
        let town = sqlx::query_as::<_, Town>("SELECT id, town_name FROM towns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(town)
    }

    async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (category_name) VALUES ($1) RETURNING id, category_name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn get_category(&self, id: i32) -> Result<Option<Category>, ApiError> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, category_name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, category_name FROM categories ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn create_announcement(
        &self,
        user_id: i32,
        body: &AnnouncementBody,
    ) -> Result<Announcement, ApiError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (user_id, price, category_id, text, town_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, price, category_id, text, town_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(body.price)
        .bind(body.category_id)
        .bind(&body.text)
        .bind(body.town_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(announcement)
    }

    async fn update_announcement(
        &self,
        id: i32,
        body: &AnnouncementBody,
    ) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "UPDATE announcements SET price = $2, category_id = $3, text = $4, town_id = $5 WHERE id = $1",
        )
        .bind(id)
        .bind(body.price)
        .bind(body.category_id)
        .bind(&body.text)
        .bind(body.town_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_announcement(&self, id: i32) -> Result<Option<Announcement>, ApiError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(announcement)
    }

    /// Composed listing query. Uses QueryBuilder for safe parameterization
    /// of whichever filter fields are present.
    async fn list_announcements(
        &self,
        filter: AnnouncementFilter,
    ) -> Result<Vec<Announcement>, ApiError> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE TRUE"
        ));

        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ");
            builder.push_bind(user_id);
        }
        if let Some(town_id) = filter.town_id {
            builder.push(" AND town_id = ");
            builder.push_bind(town_id);
        }
        if let Some(category_id) = filter.category_id {
            builder.push(" AND category_id = ");
            builder.push_bind(category_id);
        }

        builder.push(" ORDER BY created_at DESC");

        let announcements = builder
            .build_query_as::<Announcement>()
            .fetch_all(&self.pool)
            .await?;
        Ok(announcements)
    }

    async fn search_announcements(&self, term: &str) -> Result<Vec<Announcement>, ApiError> {
        let exact = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE text = $1"
        ))
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        if !exact.is_empty() {
            return Ok(exact);
        }

        let pattern = format!("%{term}%");
        let like = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE text LIKE $1"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(like)
    }

    async fn delete_announcement(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_images(
        &self,
        announcement_id: i32,
        paths: &[String],
    ) -> Result<Vec<Image>, ApiError> {
        let mut tx = self.pool.begin().await?;
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let image = sqlx::query_as::<_, Image>(
                r#"
                INSERT INTO images (announcement_id, data_path)
                VALUES ($1, $2)
                RETURNING id, announcement_id, data_path
                "#,
            )
            .bind(announcement_id)
            .bind(path)
            .fetch_one(&mut *tx)
            .await?;
            images.push(image);
        }
        tx.commit().await?;
        Ok(images)
    }

    async fn images_for(&self, announcement_id: i32) -> Result<Vec<Image>, ApiError> {
        let images = sqlx::query_as::<_, Image>(
            "SELECT id, announcement_id, data_path FROM images WHERE announcement_id = $1 ORDER BY id ASC",
        )
        .bind(announcement_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    async fn add_favorite(
        &self,
        user_id: i32,
        announcement_id: i32,
    ) -> Result<Favorite, ApiError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, announcement_id)
            VALUES ($1, $2)
            RETURNING id, user_id, announcement_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(announcement_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(favorite)
    }

    async fn remove_favorite(&self, announcement_id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM favorites WHERE announcement_id = $1")
            .bind(announcement_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn favorites_for(&self, user_id: i32) -> Result<Vec<Favorite>, ApiError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, announcement_id, created_at FROM favorites WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }
}
