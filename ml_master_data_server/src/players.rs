use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::prelude::PlayerRole;
use ml_master_data_entities::queries::{find_with_team, WithTeam};
use ml_master_data_entities::schema::{player, player_match};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::images;
use crate::lookup::{ensure_team, find_record};
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub role: PlayerRole,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePlayerRequest {
    #[validate(range(min = 1))]
    pub team_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub role: Option<PlayerRole>,
    #[validate(length(min = 1, max = 2048))]
    pub image: Option<String>,
}

async fn find_player_view(db: &DatabaseConnection, player_id: i32) -> Result<WithTeam<player::Model>, APIError> {
    find_with_team(db, player::Entity::find_by_id(player_id))
        .await
        .map_err(handle_error)?
        .pop()
        .ok_or((StatusCode::NOT_FOUND, "Player not found").into())
}

pub async fn list_team_players_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(team_id)): ValidPath<Id>,
) -> Result<Json<Vec<WithTeam<player::Model>>>, APIError> {
    ensure_team(&db, team_id).await?;
    let players = find_with_team(
        &db,
        player::Entity::find()
            .filter(player::Column::TeamId.eq(team_id))
            .order_by_asc(player::Column::PlayerId)
    ).await.map_err(handle_error)?;
    Ok(Json(players))
}

pub async fn create_player_handler(
    State(state): State<AppState>,
    ValidPath(Id(team_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<player::Model>), APIError> {
    ensure_team(&state.db, team_id).await?;
    let player = player::ActiveModel {
        team_id: ActiveValue::Set(team_id),
        name: ActiveValue::Set(request.name),
        role: ActiveValue::Set(request.role),
        image: ActiveValue::Set(images::image_or_default(&state.config, request.image)),
        ..Default::default()
    }.insert(&state.db).await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_player_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(player_id)): ValidPath<Id>,
) -> Result<Json<WithTeam<player::Model>>, APIError> {
    Ok(Json(find_player_view(&db, player_id).await?))
}

pub async fn update_player_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(player_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdatePlayerRequest>,
) -> Result<Json<player::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let existing = find_record::<player::Entity, _>(&transaction, player_id, "Player").await?;
    let mut model: player::ActiveModel = existing.clone().into();
    if let Some(team_id) = request.team_id.filter(|team_id| *team_id != existing.team_id) {
        ensure_team(&transaction, team_id).await?;
        // Lineups of the old team no longer apply
        player_match::Entity::delete_many()
            .filter(player_match::Column::PlayerId.eq(existing.player_id))
            .exec(&transaction)
            .await
            .map_err(handle_error)?;
        model.team_id = ActiveValue::Set(team_id);
    }
    if let Some(name) = request.name {
        model.name = ActiveValue::Set(name);
    }
    if let Some(role) = request.role {
        model.role = ActiveValue::Set(role);
    }
    if let Some(image) = request.image {
        model.image = ActiveValue::Set(image);
    }
    if !model.is_changed() {
        return Ok(Json(existing));
    }
    let player = model.update(&transaction).await.map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(player))
}

pub async fn delete_player_handler(
    State(state): State<AppState>,
    ValidPath(Id(player_id)): ValidPath<Id>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    let images = cascade::delete_player(&transaction, player_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Player deleted"))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/teams/:team_id/players", get(list_team_players_handler).post(create_player_handler))
        .route("/players/:player_id", get(get_player_handler).put(update_player_handler).delete(delete_player_handler))
}
