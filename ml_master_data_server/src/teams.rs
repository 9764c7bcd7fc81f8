use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::schema::team;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::info;
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::images;
use crate::lookup::find_record;
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub image: Option<String>,
}

pub async fn list_teams_handler(State(db): State<DatabaseConnection>) -> Result<Json<Vec<team::Model>>, APIError> {
    let teams = team::Entity::find()
        .order_by_asc(team::Column::Name)
        .all(&db)
        .await
        .map_err(handle_error)?;
    Ok(Json(teams))
}

pub async fn create_team_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<team::Model>), APIError> {
    let team = team::ActiveModel {
        name: ActiveValue::Set(request.name),
        image: ActiveValue::Set(images::image_or_default(&state.config, request.image)),
        ..Default::default()
    }.insert(&state.db).await.map_err(handle_error)?;
    info!("Created team {}", team.team_id);
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn get_team_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(team_id)): ValidPath<Id>,
) -> Result<Json<team::Model>, APIError> {
    Ok(Json(find_record::<team::Entity, _>(&db, team_id, "Team").await?))
}

pub async fn update_team_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(team_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdateTeamRequest>,
) -> Result<Json<team::Model>, APIError> {
    let existing = find_record::<team::Entity, _>(&db, team_id, "Team").await?;
    let mut model: team::ActiveModel = existing.clone().into();
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

/// Removes the team together with its roster and every match it played.
pub async fn delete_team_handler(
    State(state): State<AppState>,
    ValidPath(Id(team_id)): ValidPath<Id>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    let images = cascade::delete_team(&transaction, team_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Team deleted"))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams_handler).post(create_team_handler))
        .route("/teams/:team_id", get(get_team_handler).put(update_team_handler).delete(delete_team_handler))
}
