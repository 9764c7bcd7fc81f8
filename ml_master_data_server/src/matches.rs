use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::domain::matches::{update_match, MatchPatch};
use ml_master_data_entities::queries::{query_matches, MatchView};
use ml_master_data_entities::schema;
use sea_orm::{DatabaseConnection, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::images;
use crate::lookup::find_match;
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMatchRequest {
    #[validate(range(min = 0))]
    pub week: Option<i32>,
    #[validate(range(min = 0))]
    pub day: Option<i32>,
    #[validate(range(min = 0))]
    pub date: Option<i32>,
    #[validate(range(min = 1))]
    pub team_a_id: Option<i32>,
    #[validate(range(min = 1))]
    pub team_b_id: Option<i32>,
    #[validate(range(min = 0))]
    pub team_a_score: Option<i32>,
    #[validate(range(min = 0))]
    pub team_b_score: Option<i32>,
}

impl From<UpdateMatchRequest> for MatchPatch {
    fn from(request: UpdateMatchRequest) -> Self {
        MatchPatch {
            week: request.week,
            day: request.day,
            date: request.date,
            team_a_id: request.team_a_id,
            team_b_id: request.team_b_id,
            team_a_score: request.team_a_score,
            team_b_score: request.team_b_score,
        }
    }
}

pub async fn get_match_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(match_id)): ValidPath<Id>,
) -> Result<Json<MatchView>, APIError> {
    query_matches(&db, schema::matches::Entity::find_by_id(match_id))
        .await
        .map_err(handle_error)?
        .pop()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Match not found").into())
}

/// Changing either team re-points the match's detail rows and games.
pub async fn update_match_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(match_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdateMatchRequest>,
) -> Result<Json<schema::matches::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let existing = find_match(&transaction, match_id).await?;
    let updated = update_match(&transaction, existing, request.into()).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(updated))
}

pub async fn delete_match_handler(
    State(state): State<AppState>,
    ValidPath(Id(match_id)): ValidPath<Id>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    let images = cascade::delete_match(&transaction, match_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Match deleted"))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/matches/:match_id", get(get_match_handler).put(update_match_handler).delete(delete_match_handler))
}
