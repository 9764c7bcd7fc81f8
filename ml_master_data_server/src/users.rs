use axum::{extract::State, http::StatusCode, routing::{get, put}, Json, Router};
use ml_master_data_entities::schema::user;
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, AuthenticatedUser, ExtractAuthenticatedUser},
    extract::ValidatedJson,
    response::{handle_error, APIError},
    state::AppState,
};

pub async fn get_me_handler(
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Json<AuthenticatedUser> {
    Json(user)
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
    pub old_password: Option<String>,
}

pub async fn update_user_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(auth): ExtractAuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<user::Model>, APIError> {
    let existing = user::Entity::find_by_id(auth.user_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "User not found"))?;

    let mut model: user::ActiveModel = existing.clone().into();

    if let Some(password) = request.password {
        let old_password = request.old_password
            .ok_or((StatusCode::FORBIDDEN, "Old password is incorrect"))?;
        if !verify_password(old_password, existing.password_hash.clone()).await? {
            return Err((StatusCode::FORBIDDEN, "Old password is incorrect").into());
        }
        model.password_hash = ActiveValue::Set(hash_password(password).await?);
    }

    if let Some(username) = request.username.filter(|u| *u != existing.username) {
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username.clone()))
            .one(&db)
            .await
            .map_err(handle_error)?;
        if taken.is_some() {
            return Err((StatusCode::BAD_REQUEST, "Username is already taken").into());
        }
        model.username = ActiveValue::Set(username);
    }

    if !model.is_changed() {
        return Ok(Json(existing));
    }
    let updated = model.update(&db).await.map_err(handle_error)?;
    info!("Updated user {}", updated.user_id);
    Ok(Json(updated))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me_handler))
        .route("/user/update", put(update_user_handler))
}
