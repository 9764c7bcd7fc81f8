use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::schema::hero;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::images;
use crate::lookup::find_record;
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateHeroRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateHeroRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub image: Option<String>,
}

pub async fn list_heroes_handler(State(db): State<DatabaseConnection>) -> Result<Json<Vec<hero::Model>>, APIError> {
    let heroes = hero::Entity::find()
        .order_by_asc(hero::Column::Name)
        .all(&db)
        .await
        .map_err(handle_error)?;
    Ok(Json(heroes))
}

pub async fn create_hero_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateHeroRequest>,
) -> Result<(StatusCode, Json<hero::Model>), APIError> {
    let hero = hero::ActiveModel {
        name: ActiveValue::Set(request.name),
        image: ActiveValue::Set(images::image_or_default(&state.config, request.image)),
        ..Default::default()
    }.insert(&state.db).await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(hero)))
}

pub async fn get_hero_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(hero_id)): ValidPath<Id>,
) -> Result<Json<hero::Model>, APIError> {
    Ok(Json(find_record::<hero::Entity, _>(&db, hero_id, "Hero").await?))
}

pub async fn update_hero_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(hero_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdateHeroRequest>,
) -> Result<Json<hero::Model>, APIError> {
    let existing = find_record::<hero::Entity, _>(&db, hero_id, "Hero").await?;
    let mut model: hero::ActiveModel = existing.clone().into();
    if let Some(name) = request.name {
        model.name = ActiveValue::Set(name);
    }
    if let Some(image) = request.image {
        model.image = ActiveValue::Set(image);
    }
    if !model.is_changed() {
        return Ok(Json(existing));
    }
    Ok(Json(model.update(&db).await.map_err(handle_error)?))
}

/// Also strips the hero from every draft and lane annotation.
pub async fn delete_hero_handler(
    State(state): State<AppState>,
    ValidPath(Id(hero_id)): ValidPath<Id>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    let images = cascade::delete_hero(&transaction, hero_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Hero deleted"))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/heroes", get(list_heroes_handler).post(create_hero_handler))
        .route("/heroes/:hero_id", get(get_hero_handler).put(update_hero_handler).delete(delete_hero_handler))
}
