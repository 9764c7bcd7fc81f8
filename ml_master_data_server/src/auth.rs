use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    headers::{authorization::Bearer, Authorization},
    http::{request::Parts, StatusCode},
    routing::post,
    Json, Router, TypedHeader,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ml_master_data_entities::schema::user;
use sea_orm::{prelude::*, DatabaseConnection};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{extract::ValidatedJson, response::{handle_error, APIError}, state::AppState};

pub const TOKEN_ISSUER: &str = "ml-master-data-api";
const TOKEN_LIFETIME_SECONDS: i64 = 24 * 60 * 60;

pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user_id: i32, username: &str, now: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            user_id,
            iat: now,
            nbf: now,
            exp: now + TOKEN_LIFETIME_SECONDS,
            iss: TOKEN_ISSUER.into(),
            sub: username.into(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.validate_nbf = true;
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    pub sub: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
}

pub struct ExtractAuthenticatedUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for ExtractAuthenticatedUser
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::UNAUTHORIZED, "No valid authorization header found"))?;

        let claims = state.keys.verify(bearer.token())
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

        Ok(ExtractAuthenticatedUser(AuthenticatedUser {
            user_id: claims.user_id,
            username: claims.sub,
        }))
    }
}

/// Hashes on the blocking pool, bcrypt is deliberately slow.
pub async fn hash_password(password: String) -> Result<String, anyhow::Error> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await??;
    Ok(hash)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, anyhow::Error> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(valid)
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, APIError> {
    let db: &DatabaseConnection = &state.db;
    let user = user::Entity::find()
        .filter(user::Column::Username.eq(request.username.clone()))
        .one(db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid username or password"))?;

    if !verify_password(request.password, user.password_hash).await? {
        return Err((StatusCode::UNAUTHORIZED, "Invalid username or password").into());
    }

    let token = state.keys.issue(user.user_id, &user.username, chrono::Utc::now().timestamp())
        .map_err(handle_error)?;
    info!("User {} logged in", user.username);

    Ok(Json(LoginResponse { token }))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_handler))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_issued_token_round_trips() {
        let keys = JwtKeys::new(b"secret");
        let now = chrono::Utc::now().timestamp();
        let token = keys.issue(4, "admin", now).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.user_id, 4);
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let token = JwtKeys::new(b"secret").issue(1, "admin", now).unwrap();
        assert!(JwtKeys::new(b"other").verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = JwtKeys::new(b"secret");
        let two_days_ago = chrono::Utc::now().timestamp() - 2 * TOKEN_LIFETIME_SECONDS;
        let token = keys.issue(1, "admin", two_days_ago).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let keys = JwtKeys::new(b"secret");
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            iat: now,
            nbf: now,
            exp: now + 60,
            iss: "someone-else".into(),
            sub: "admin".into(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn test_password_hash_verifies() {
        let hash = hash_password("hunter22".into()).await.unwrap();
        assert!(verify_password("hunter22".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".into(), hash).await.unwrap());
    }
}
