use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::domain::games::{create_game, update_game, GamePatch, NewGame};
use ml_master_data_entities::queries::{find_with_team, query_games, GameView, WithTeam};
use ml_master_data_entities::schema::{self, game, game_result};
use sea_orm::{DatabaseConnection, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::images;
use crate::lookup::{find_match, find_match_game};
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateGameRequest {
    #[validate(range(min = 1))]
    pub first_pick_team_id: i32,
    #[validate(range(min = 1))]
    pub second_pick_team_id: i32,
    #[validate(range(min = 1))]
    pub winner_team_id: i32,
    #[validate(range(min = 1))]
    pub game_number: i32,
    #[validate(length(max = 2048))]
    pub video_link: Option<String>,
    #[validate(length(max = 2048))]
    pub full_draft_image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateGameRequest {
    #[validate(range(min = 1))]
    pub first_pick_team_id: Option<i32>,
    #[validate(range(min = 1))]
    pub second_pick_team_id: Option<i32>,
    #[validate(range(min = 1))]
    pub winner_team_id: Option<i32>,
    #[validate(range(min = 1))]
    pub game_number: Option<i32>,
    #[validate(length(max = 2048))]
    pub video_link: Option<String>,
    #[validate(length(max = 2048))]
    pub full_draft_image: Option<String>,
}

impl From<CreateGameRequest> for NewGame {
    fn from(request: CreateGameRequest) -> Self {
        NewGame {
            first_pick_team_id: request.first_pick_team_id,
            second_pick_team_id: request.second_pick_team_id,
            winner_team_id: request.winner_team_id,
            game_number: request.game_number,
            video_link: request.video_link,
            full_draft_image: request.full_draft_image,
        }
    }
}

impl From<UpdateGameRequest> for GamePatch {
    fn from(request: UpdateGameRequest) -> Self {
        GamePatch {
            first_pick_team_id: request.first_pick_team_id,
            second_pick_team_id: request.second_pick_team_id,
            winner_team_id: request.winner_team_id,
            game_number: request.game_number,
            video_link: request.video_link,
            full_draft_image: request.full_draft_image,
        }
    }
}

pub async fn list_games_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(match_id)): ValidPath<Id>,
) -> Result<Json<Vec<GameView>>, APIError> {
    find_match(&db, match_id).await?;
    let games = query_games(&db, game::Entity::find().filter(game::Column::MatchId.eq(match_id)))
        .await
        .map_err(handle_error)?;
    Ok(Json(games))
}

pub async fn create_game_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(match_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<CreateGameRequest>,
) -> Result<(StatusCode, Json<game::Model>), APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let match_ = find_match(&transaction, match_id).await?;
    let game = create_game(&transaction, &match_, request.into()).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn get_game_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
) -> Result<Json<GameView>, APIError> {
    let (_, game) = find_match_game(&db, match_id, game_id).await?;
    query_games(&db, game::Entity::find_by_id(game.game_id))
        .await
        .map_err(handle_error)?
        .pop()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Game not found").into())
}

pub async fn update_game_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<UpdateGameRequest>,
) -> Result<Json<game::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let (match_, existing) = find_match_game(&transaction, match_id, game_id).await?;
    let game = update_game(&transaction, &match_, existing, request.into()).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(game))
}

pub async fn delete_game_handler(
    State(state): State<AppState>,
    ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    find_match(&transaction, match_id).await?;
    let images = cascade::delete_game(&transaction, match_id, game_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Game deleted"))
}

pub async fn list_game_results_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
) -> Result<Json<Vec<WithTeam<game_result::Model>>>, APIError> {
    find_match_game(&db, match_id, game_id).await?;
    let results = find_with_team(
        &db,
        schema::game_result::Entity::find()
            .filter(game_result::Column::GameId.eq(game_id))
            .order_by_asc(game_result::Column::GameResultId)
    ).await.map_err(handle_error)?;
    Ok(Json(results))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/matches/:match_id/games", get(list_games_handler).post(create_game_handler))
        .route(
            "/matches/:match_id/games/:game_id",
            get(get_game_handler).put(update_game_handler).delete(delete_game_handler)
        )
        .route("/matches/:match_id/games/:game_id/results", get(list_game_results_handler))
}
