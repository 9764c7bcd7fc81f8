use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::delete};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::domain::matches::{create_match, NewMatch};
use ml_master_data_entities::queries::{query_matches, query_tournament_teams, MatchView, TeamSummary};
use ml_master_data_entities::schema::{self, tournament, tournament_team};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, PaginatorTrait, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::info;
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::images;
use crate::lookup::{ensure_team, find_record};
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub season: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub season: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct AddTournamentTeamRequest {
    #[validate(range(min = 1))]
    pub team_id: i32,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(range(min = 0))]
    pub week: i32,
    #[validate(range(min = 0))]
    pub day: i32,
    #[validate(range(min = 0))]
    pub date: i32,
    #[validate(range(min = 1))]
    pub team_a_id: i32,
    #[validate(range(min = 1))]
    pub team_b_id: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub team_a_score: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub team_b_score: i32,
}

impl From<CreateMatchRequest> for NewMatch {
    fn from(request: CreateMatchRequest) -> Self {
        NewMatch {
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

async fn find_tournament(db: &DatabaseConnection, tournament_id: i32) -> Result<tournament::Model, APIError> {
    find_record::<tournament::Entity, _>(db, tournament_id, "Tournament").await
}

pub async fn list_tournaments_handler(State(db): State<DatabaseConnection>) -> Result<Json<Vec<tournament::Model>>, APIError> {
    let tournaments = tournament::Entity::find()
        .order_by_asc(tournament::Column::TournamentId)
        .all(&db)
        .await
        .map_err(handle_error)?;
    Ok(Json(tournaments))
}

pub async fn create_tournament_handler(
    State(db): State<DatabaseConnection>,
    ValidatedJson(request): ValidatedJson<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<tournament::Model>), APIError> {
    let tournament = tournament::ActiveModel {
        name: ActiveValue::Set(request.name),
        season: ActiveValue::Set(request.season),
        ..Default::default()
    }.insert(&db).await.map_err(handle_error)?;
    info!("Created tournament {}", tournament.tournament_id);
    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn get_tournament_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
) -> Result<Json<tournament::Model>, APIError> {
    Ok(Json(find_tournament(&db, tournament_id).await?))
}

pub async fn update_tournament_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdateTournamentRequest>,
) -> Result<Json<tournament::Model>, APIError> {
    let existing = find_tournament(&db, tournament_id).await?;
    let mut model: tournament::ActiveModel = existing.clone().into();
    if let Some(name) = request.name {
        model.name = ActiveValue::Set(name);
    }
    if let Some(season) = request.season {
        model.season = ActiveValue::Set(season);
    }
    if !model.is_changed() {
        return Ok(Json(existing));
    }
    Ok(Json(model.update(&db).await.map_err(handle_error)?))
}

pub async fn delete_tournament_handler(
    State(state): State<AppState>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    let images = cascade::delete_tournament(&transaction, tournament_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Tournament deleted"))
}

pub async fn list_tournament_teams_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
) -> Result<Json<Vec<TeamSummary>>, APIError> {
    find_tournament(&db, tournament_id).await?;
    Ok(Json(query_tournament_teams(&db, tournament_id).await.map_err(handle_error)?))
}

pub async fn add_tournament_team_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<AddTournamentTeamRequest>,
) -> Result<(StatusCode, Json<tournament_team::Model>), APIError> {
    find_tournament(&db, tournament_id).await?;
    ensure_team(&db, request.team_id).await?;

    let existing = tournament_team::Entity::find()
        .filter(tournament_team::Column::TournamentId.eq(tournament_id))
        .filter(tournament_team::Column::TeamId.eq(request.team_id))
        .one(&db)
        .await
        .map_err(handle_error)?;
    if existing.is_some() {
        return Err((StatusCode::BAD_REQUEST, "Team is already registered for this tournament").into());
    }

    let membership = tournament_team::ActiveModel {
        tournament_id: ActiveValue::Set(tournament_id),
        team_id: ActiveValue::Set(request.team_id),
        ..Default::default()
    }.insert(&db).await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(membership)))
}

pub async fn remove_tournament_team_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(tournament_id), Id(team_id))): ValidPath<(Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let scheduled = schema::matches::Entity::find()
        .filter(schema::matches::Column::TournamentId.eq(tournament_id))
        .filter(
            schema::matches::Column::TeamAId.eq(team_id)
                .or(schema::matches::Column::TeamBId.eq(team_id))
        )
        .count(&transaction)
        .await
        .map_err(handle_error)?;
    if scheduled > 0 {
        return Err((StatusCode::BAD_REQUEST, format!("Team {} still plays {} match(es) in this tournament", team_id, scheduled)).into());
    }

    let result = tournament_team::Entity::delete_many()
        .filter(tournament_team::Column::TournamentId.eq(tournament_id))
        .filter(tournament_team::Column::TeamId.eq(team_id))
        .exec(&transaction)
        .await
        .map_err(handle_error)?;
    if result.rows_affected == 0 {
        return Err((StatusCode::NOT_FOUND, "Tournament team not found").into());
    }
    transaction.commit().await.map_err(handle_error)?;
    Ok(MessageResponse::new("Team removed from tournament"))
}

pub async fn list_tournament_matches_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
) -> Result<Json<Vec<MatchView>>, APIError> {
    find_tournament(&db, tournament_id).await?;
    let matches = query_matches(
        &db,
        schema::matches::Entity::find().filter(schema::matches::Column::TournamentId.eq(tournament_id))
    ).await.map_err(handle_error)?;
    Ok(Json(matches))
}

pub async fn create_tournament_match_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(tournament_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<CreateMatchRequest>,
) -> Result<(StatusCode, Json<schema::matches::Model>), APIError> {
    find_tournament(&db, tournament_id).await?;

    let transaction = db.begin().await.map_err(handle_error)?;
    let match_ = create_match(&transaction, tournament_id, request.into()).await?;
    transaction.commit().await.map_err(handle_error)?;

    Ok((StatusCode::CREATED, Json(match_)))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/tournaments", get(list_tournaments_handler).post(create_tournament_handler))
        .route(
            "/tournaments/:tournament_id",
            get(get_tournament_handler).put(update_tournament_handler).delete(delete_tournament_handler)
        )
        .route("/tournaments/:tournament_id/teams", get(list_tournament_teams_handler).post(add_tournament_team_handler))
        .route("/tournaments/:tournament_id/teams/:team_id", delete(remove_tournament_team_handler))
        .route("/tournaments/:tournament_id/matches", get(list_tournament_matches_handler).post(create_tournament_match_handler))
}
