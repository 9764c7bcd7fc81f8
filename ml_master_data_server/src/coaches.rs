use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::prelude::CoachRole;
use ml_master_data_entities::queries::{find_with_team, WithTeam};
use ml_master_data_entities::schema::{coach, coach_match};
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
pub struct CreateCoachRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub role: CoachRole,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCoachRequest {
    #[validate(range(min = 1))]
    pub team_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub role: Option<CoachRole>,
    #[validate(length(min = 1, max = 2048))]
    pub image: Option<String>,
}

async fn find_coach_view(db: &DatabaseConnection, coach_id: i32) -> Result<WithTeam<coach::Model>, APIError> {
    find_with_team(db, coach::Entity::find_by_id(coach_id))
        .await
        .map_err(handle_error)?
        .pop()
        .ok_or((StatusCode::NOT_FOUND, "Coach not found").into())
}

pub async fn list_team_coaches_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(team_id)): ValidPath<Id>,
) -> Result<Json<Vec<WithTeam<coach::Model>>>, APIError> {
    ensure_team(&db, team_id).await?;
    let coaches = find_with_team(
        &db,
        coach::Entity::find()
            .filter(coach::Column::TeamId.eq(team_id))
            .order_by_asc(coach::Column::CoachId)
    ).await.map_err(handle_error)?;
    Ok(Json(coaches))
}

pub async fn create_coach_handler(
    State(state): State<AppState>,
    ValidPath(Id(team_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<CreateCoachRequest>,
) -> Result<(StatusCode, Json<coach::Model>), APIError> {
    ensure_team(&state.db, team_id).await?;
    let coach = coach::ActiveModel {
        team_id: ActiveValue::Set(team_id),
        name: ActiveValue::Set(request.name),
        role: ActiveValue::Set(request.role),
        image: ActiveValue::Set(images::image_or_default(&state.config, request.image)),
        ..Default::default()
    }.insert(&state.db).await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(coach)))
}

pub async fn get_coach_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(coach_id)): ValidPath<Id>,
) -> Result<Json<WithTeam<coach::Model>>, APIError> {
    Ok(Json(find_coach_view(&db, coach_id).await?))
}

pub async fn update_coach_handler(
    State(db): State<DatabaseConnection>,
    ValidPath(Id(coach_id)): ValidPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdateCoachRequest>,
) -> Result<Json<coach::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let existing = find_record::<coach::Entity, _>(&transaction, coach_id, "Coach").await?;
    let mut model: coach::ActiveModel = existing.clone().into();
    if let Some(team_id) = request.team_id.filter(|team_id| *team_id != existing.team_id) {
        ensure_team(&transaction, team_id).await?;
        // Lineups of the old team no longer apply
        coach_match::Entity::delete_many()
            .filter(coach_match::Column::CoachId.eq(existing.coach_id))
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
    let coach = model.update(&transaction).await.map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(coach))
}

pub async fn delete_coach_handler(
    State(state): State<AppState>,
    ValidPath(Id(coach_id)): ValidPath<Id>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = state.db.begin().await.map_err(handle_error)?;
    let images = cascade::delete_coach(&transaction, coach_id).await?;
    transaction.commit().await.map_err(handle_error)?;
    images::remove_images(&state.config, images).await;
    Ok(MessageResponse::new("Coach deleted"))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/teams/:team_id/coaches", get(list_team_coaches_handler).post(create_coach_handler))
        .route("/coaches/:coach_id", get(get_coach_handler).put(update_coach_handler).delete(delete_coach_handler))
}
