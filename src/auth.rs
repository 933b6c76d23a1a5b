use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, error::ApiError, repository::RepositoryState};

/// Access tokens live for fifteen minutes from issuance. There is no
/// refresh or rotation mechanism; an expired token means a new login.
pub const TOKEN_TTL_MINUTES: i64 = 15;

/// Claims
///
/// Payload structure embedded in every access token. Signed with the
/// server's symmetric secret and validated on every identity-scoped
/// request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user's email, the key used to resolve the token
    /// back to a user row.
    pub sub: String,
    /// Expiration Time (exp): absolute timestamp after which the token is
    /// rejected.
    pub exp: usize,
    /// Issued At (iat): timestamp of issuance.
    pub iat: usize,
}

/// Issues a signed access token carrying `email` as its identity claim,
/// expiring [`TOKEN_TTL_MINUTES`] from now.
pub fn create_access_token(email: &str, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_owned(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp() as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|err| {
        tracing::error!("token encoding failed: {err:?}");
        ApiError::Internal("token issuance failed".to_string())
    })
}

/// Validates signature and expiry and returns the embedded email claim.
///
/// Every failure mode (bad signature, malformed payload, absent claim,
/// expired) collapses into the same opaque [`ApiError::Unauthorized`], so
/// the response never reveals which check rejected the token.
pub fn verify_token(token: &str, secret: &str) -> Result<String, ApiError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::default();
    validation.validate_exp = true;
    // No grace period: a token is invalid the second its expiry passes.
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims.sub)
        .map_err(|_| ApiError::Unauthorized)
}

/// AuthUser
///
/// The resolved identity of an authenticated request: the acting principal
/// for every ownership-scoped operation. Handlers take this as an argument
/// and never see the raw token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Primary key of the resolved user row.
    pub id: i32,
    /// The validated identity claim.
    pub email: String,
}

/// AuthUser Extractor
///
/// Implements axum's `FromRequestParts`, so any handler that lists
/// `AuthUser` as an argument only runs after the bearer token has been
/// validated and mapped to a live user row.
///
/// The steps are:
/// 1. Pull the repository and configuration out of the shared state.
/// 2. Extract the `Authorization: Bearer` header.
/// 3. Verify signature and expiry, recovering the email claim.
/// 4. Look the claim up in the record store. A token for a user deleted
///    after issuance is rejected here.
///
/// Rejection: [`ApiError::Unauthorized`] on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let email = verify_token(token, &config.jwt_secret)?;

        // The claim alone is not enough: the user must still exist.
        let user = repo
            .get_user_by_email(&email)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}
