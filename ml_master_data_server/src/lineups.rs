use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::{delete, get}};

use ml_master_data_entities::domain::matches::find_match_team_detail;
use ml_master_data_entities::schema::{coach, coach_match, match_team_detail, player, player_match};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DatabaseConnection, QueryOrder};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::lookup::{find_match, find_record};
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AssignPlayerRequest {
    #[validate(range(min = 1))]
    pub player_id: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AssignCoachRequest {
    #[validate(range(min = 1))]
    pub coach_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAssignment {
    #[serde(flatten)]
    pub record: player_match::Model,
    pub player: Option<player::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachAssignment {
    #[serde(flatten)]
    pub record: coach_match::Model,
    pub coach: Option<coach::Model>,
}

async fn find_detail<C>(db: &C, match_id: i32, team_id: i32) -> Result<match_team_detail::Model, APIError> where C: ConnectionTrait {
    find_match(db, match_id).await?;
    Ok(find_match_team_detail(db, match_id, team_id).await?)
}

pub async fn list_players_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
) -> Result<Json<Vec<PlayerAssignment>>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let assignments = player_match::Entity::find()
        .filter(player_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
        .order_by_asc(player_match::Column::PlayerMatchId)
        .find_also_related(player::Entity)
        .all(&db)
        .await
        .map_err(handle_error)?;
    Ok(Json(assignments.into_iter().map(|(record, player)| PlayerAssignment { record, player }).collect()))
}

/// Adds a player of the detail's team to the lineup, at most once.
pub async fn assign_player_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<AssignPlayerRequest>,
) -> Result<(StatusCode, Json<player_match::Model>), APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let player = find_record::<player::Entity, _>(&db, request.player_id, "Player").await?;
    if player.team_id != detail.team_id {
        return Err((StatusCode::BAD_REQUEST, format!("Player {} does not play for team {}", player.player_id, detail.team_id)).into());
    }

    let existing = player_match::Entity::find()
        .filter(player_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
        .filter(player_match::Column::PlayerId.eq(player.player_id))
        .one(&db)
        .await
        .map_err(handle_error)?;
    if existing.is_some() {
        return Err((StatusCode::BAD_REQUEST, "Player is already in the lineup").into());
    }

    let assignment = player_match::ActiveModel {
        match_team_detail_id: ActiveValue::Set(detail.match_team_detail_id),
        player_id: ActiveValue::Set(player.player_id),
        ..Default::default()
    }.insert(&db).await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn unassign_player_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(assignment_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let result = player_match::Entity::delete_many()
        .filter(player_match::Column::PlayerMatchId.eq(assignment_id))
        .filter(player_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
        .exec(&db)
        .await
        .map_err(handle_error)?;
    if result.rows_affected == 0 {
        return Err((StatusCode::NOT_FOUND, "Player assignment not found").into());
    }
    Ok(MessageResponse::new("Player removed from lineup"))
}

pub async fn list_coaches_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
) -> Result<Json<Vec<CoachAssignment>>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let assignments = coach_match::Entity::find()
        .filter(coach_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
        .order_by_asc(coach_match::Column::CoachMatchId)
        .find_also_related(coach::Entity)
        .all(&db)
        .await
        .map_err(handle_error)?;
    Ok(Json(assignments.into_iter().map(|(record, coach)| CoachAssignment { record, coach }).collect()))
}

pub async fn assign_coach_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<AssignCoachRequest>,
) -> Result<(StatusCode, Json<coach_match::Model>), APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let coach = find_record::<coach::Entity, _>(&db, request.coach_id, "Coach").await?;
    if coach.team_id != detail.team_id {
        return Err((StatusCode::BAD_REQUEST, format!("Coach {} does not belong to team {}", coach.coach_id, detail.team_id)).into());
    }

    let existing = coach_match::Entity::find()
        .filter(coach_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
        .filter(coach_match::Column::CoachId.eq(coach.coach_id))
        .one(&db)
        .await
        .map_err(handle_error)?;
    if existing.is_some() {
        return Err((StatusCode::BAD_REQUEST, "Coach is already assigned to this match").into());
    }

    let assignment = coach_match::ActiveModel {
        match_team_detail_id: ActiveValue::Set(detail.match_team_detail_id),
        coach_id: ActiveValue::Set(coach.coach_id),
        ..Default::default()
    }.insert(&db).await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn unassign_coach_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(assignment_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let result = coach_match::Entity::delete_many()
        .filter(coach_match::Column::CoachMatchId.eq(assignment_id))
        .filter(coach_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
        .exec(&db)
        .await
        .map_err(handle_error)?;
    if result.rows_affected == 0 {
        return Err((StatusCode::NOT_FOUND, "Coach assignment not found").into());
    }
    Ok(MessageResponse::new("Coach removed from match"))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/matches/:match_id/teams/:team_id/players", get(list_players_handler).post(assign_player_handler))
        .route("/matches/:match_id/teams/:team_id/players/:assignment_id", delete(unassign_player_handler))
        .route("/matches/:match_id/teams/:team_id/coaches", get(list_coaches_handler).post(assign_coach_handler))
        .route("/matches/:match_id/teams/:team_id/coaches/:assignment_id", delete(unassign_coach_handler))
}
