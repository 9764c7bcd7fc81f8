use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::hero_ban::{create_hero_ban, delete_hero_ban, update_hero_ban, BanFlag, HeroBanPatch, NewHeroBan};
use ml_master_data_entities::domain::hero_pick::{create_hero_pick, delete_hero_pick, update_hero_pick, HeroPickPatch, NewHeroPick, PickFlag};
use ml_master_data_entities::domain::matches::find_match_team_detail;
use ml_master_data_entities::prelude::*;
use ml_master_data_entities::queries::{find_with_hero, query_hero_bans, query_hero_picks, HeroBanView, HeroPickView, WithHero};
use ml_master_data_entities::schema::{hero_ban, hero_pick, match_team_detail};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DatabaseConnection, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::lookup::{ensure_hero, find_match};
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct PickGameRequest {
    #[validate(range(min = 1))]
    pub game_number: i32,
    pub is_picked: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct BanGameRequest {
    #[validate(range(min = 1))]
    pub game_number: i32,
    pub is_banned: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateHeroPickRequest {
    #[validate(range(min = 1))]
    pub hero_id: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub first_phase: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub second_phase: i32,
    #[validate(nested)]
    #[serde(default)]
    pub games: Vec<PickGameRequest>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateHeroPickRequest {
    #[validate(range(min = 1))]
    pub hero_id: Option<i32>,
    #[validate(range(min = 0))]
    pub first_phase: Option<i32>,
    #[validate(range(min = 0))]
    pub second_phase: Option<i32>,
    #[validate(nested)]
    #[serde(default)]
    pub games: Vec<PickGameRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateHeroBanRequest {
    #[validate(range(min = 1))]
    pub hero_id: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub first_phase: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub second_phase: i32,
    #[validate(nested)]
    #[serde(default)]
    pub games: Vec<BanGameRequest>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateHeroBanRequest {
    #[validate(range(min = 1))]
    pub hero_id: Option<i32>,
    #[validate(range(min = 0))]
    pub first_phase: Option<i32>,
    #[validate(range(min = 0))]
    pub second_phase: Option<i32>,
    #[validate(nested)]
    #[serde(default)]
    pub games: Vec<BanGameRequest>,
}

impl From<PickGameRequest> for PickFlag {
    fn from(request: PickGameRequest) -> Self {
        PickFlag { game_number: request.game_number, is_picked: request.is_picked }
    }
}

impl From<BanGameRequest> for BanFlag {
    fn from(request: BanGameRequest) -> Self {
        BanFlag { game_number: request.game_number, is_banned: request.is_banned }
    }
}

/// The detail row of `team_id` in `match_id`, 404 if either is unknown.
async fn find_detail<C>(db: &C, match_id: i32, team_id: i32) -> Result<match_team_detail::Model, APIError> where C: ConnectionTrait {
    find_match(db, match_id).await?;
    Ok(find_match_team_detail(db, match_id, team_id).await?)
}

async fn find_hero_pick<C>(db: &C, detail_id: i32, hero_pick_id: i32) -> Result<hero_pick::Model, APIError> where C: ConnectionTrait {
    hero_pick::Entity::find_by_id(hero_pick_id)
        .filter(hero_pick::Column::MatchTeamDetailId.eq(detail_id))
        .one(db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Hero pick not found").into())
}

async fn find_hero_ban<C>(db: &C, detail_id: i32, hero_ban_id: i32) -> Result<hero_ban::Model, APIError> where C: ConnectionTrait {
    hero_ban::Entity::find_by_id(hero_ban_id)
        .filter(hero_ban::Column::MatchTeamDetailId.eq(detail_id))
        .one(db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Hero ban not found").into())
}

pub async fn list_hero_picks_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
) -> Result<Json<Vec<HeroPickView>>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let picks = query_hero_picks(
        &db,
        hero_pick::Entity::find().filter(hero_pick::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
    ).await.map_err(handle_error)?;
    Ok(Json(picks))
}

/// Creates the pick with one flag row per listed game.
pub async fn create_hero_pick_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<CreateHeroPickRequest>,
) -> Result<(StatusCode, Json<hero_pick::Model>), APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let detail = find_detail(&transaction, match_id, team_id).await?;
    ensure_hero(&transaction, request.hero_id).await?;
    let pick = create_hero_pick(&transaction, detail.match_team_detail_id, NewHeroPick {
        hero_id: request.hero_id,
        first_phase: request.first_phase,
        second_phase: request.second_phase,
        games: request.games.into_iter().map(Into::into).collect(),
    }).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(pick)))
}

pub async fn get_hero_pick_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(hero_pick_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<HeroPickView>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let pick = find_hero_pick(&db, detail.match_team_detail_id, hero_pick_id).await?;
    query_hero_picks(&db, hero_pick::Entity::find_by_id(pick.hero_pick_id))
        .await
        .map_err(handle_error)?
        .pop()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Hero pick not found").into())
}

/// Merges the listed game flags into the stored ones; unlisted games are kept.
pub async fn update_hero_pick_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(hero_pick_id))): ValidPath<(Id, Id, Id)>,
    ValidatedJson(request): ValidatedJson<UpdateHeroPickRequest>,
) -> Result<Json<hero_pick::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let detail = find_detail(&transaction, match_id, team_id).await?;
    let existing = find_hero_pick(&transaction, detail.match_team_detail_id, hero_pick_id).await?;
    if let Some(hero_id) = request.hero_id {
        ensure_hero(&transaction, hero_id).await?;
    }
    let pick = update_hero_pick(&transaction, existing, HeroPickPatch {
        hero_id: request.hero_id,
        first_phase: request.first_phase,
        second_phase: request.second_phase,
        games: request.games.into_iter().map(Into::into).collect(),
    }).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(pick))
}

pub async fn delete_hero_pick_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(hero_pick_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let detail = find_detail(&transaction, match_id, team_id).await?;
    let pick = find_hero_pick(&transaction, detail.match_team_detail_id, hero_pick_id).await?;
    delete_hero_pick(&transaction, pick.hero_pick_id).await.map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(MessageResponse::new("Hero pick deleted"))
}

pub async fn list_hero_bans_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
) -> Result<Json<Vec<HeroBanView>>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let bans = query_hero_bans(
        &db,
        hero_ban::Entity::find().filter(hero_ban::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
    ).await.map_err(handle_error)?;
    Ok(Json(bans))
}

pub async fn create_hero_ban_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<CreateHeroBanRequest>,
) -> Result<(StatusCode, Json<hero_ban::Model>), APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let detail = find_detail(&transaction, match_id, team_id).await?;
    ensure_hero(&transaction, request.hero_id).await?;
    let ban = create_hero_ban(&transaction, detail.match_team_detail_id, NewHeroBan {
        hero_id: request.hero_id,
        first_phase: request.first_phase,
        second_phase: request.second_phase,
        games: request.games.into_iter().map(Into::into).collect(),
    }).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(ban)))
}

pub async fn get_hero_ban_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(hero_ban_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<HeroBanView>, APIError> {
    let detail = find_detail(&db, match_id, team_id).await?;
    let ban = find_hero_ban(&db, detail.match_team_detail_id, hero_ban_id).await?;
    query_hero_bans(&db, hero_ban::Entity::find_by_id(ban.hero_ban_id))
        .await
        .map_err(handle_error)?
        .pop()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Hero ban not found").into())
}

pub async fn update_hero_ban_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(hero_ban_id))): ValidPath<(Id, Id, Id)>,
    ValidatedJson(request): ValidatedJson<UpdateHeroBanRequest>,
) -> Result<Json<hero_ban::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let detail = find_detail(&transaction, match_id, team_id).await?;
    let existing = find_hero_ban(&transaction, detail.match_team_detail_id, hero_ban_id).await?;
    if let Some(hero_id) = request.hero_id {
        ensure_hero(&transaction, hero_id).await?;
    }
    let ban = update_hero_ban(&transaction, existing, HeroBanPatch {
        hero_id: request.hero_id,
        first_phase: request.first_phase,
        second_phase: request.second_phase,
        games: request.games.into_iter().map(Into::into).collect(),
    }).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(ban))
}

pub async fn delete_hero_ban_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(team_id), Id(hero_ban_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let detail = find_detail(&transaction, match_id, team_id).await?;
    let ban = find_hero_ban(&transaction, detail.match_team_detail_id, hero_ban_id).await?;
    delete_hero_ban(&transaction, ban.hero_ban_id).await.map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(MessageResponse::new("Hero ban deleted"))
}

/// Handlers for the priority and flex tables, which only differ in their
/// role set and the name of the rate column.
macro_rules! rated_pick_handlers {
    ($module:ident, $entity:ident, $id_column:ident, $id_field:ident, $role:ty, $rate:ident, $label:literal) => {
        pub mod $module {
            use super::*;
            use ml_master_data_entities::schema::$entity;

            #[derive(Debug, Serialize, Deserialize, Validate)]
            pub struct CreateRequest {
                #[validate(range(min = 1))]
                pub hero_id: i32,
                #[validate(range(min = 0))]
                pub total: i32,
                pub role: $role,
                #[validate(range(min = 0.0, max = 1.0))]
                pub $rate: f64,
            }

            #[derive(Debug, Default, Serialize, Deserialize, Validate)]
            pub struct UpdateRequest {
                #[validate(range(min = 1))]
                pub hero_id: Option<i32>,
                #[validate(range(min = 0))]
                pub total: Option<i32>,
                pub role: Option<$role>,
                #[validate(range(min = 0.0, max = 1.0))]
                pub $rate: Option<f64>,
            }

            async fn find_item<C>(db: &C, detail_id: i32, item_id: i32) -> Result<$entity::Model, APIError> where C: ConnectionTrait {
                $entity::Entity::find_by_id(item_id)
                    .filter($entity::Column::MatchTeamDetailId.eq(detail_id))
                    .one(db)
                    .await
                    .map_err(handle_error)?
                    .ok_or((StatusCode::NOT_FOUND, concat!($label, " not found")).into())
            }

            pub async fn list_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
            ) -> Result<Json<Vec<WithHero<$entity::Model>>>, APIError> {
                let detail = find_detail(&db, match_id, team_id).await?;
                let items = find_with_hero(
                    &db,
                    $entity::Entity::find()
                        .filter($entity::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
                        .order_by_asc($entity::Column::$id_column)
                ).await.map_err(handle_error)?;
                Ok(Json(items))
            }

            pub async fn create_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(team_id))): ValidPath<(Id, Id)>,
                ValidatedJson(request): ValidatedJson<CreateRequest>,
            ) -> Result<(StatusCode, Json<$entity::Model>), APIError> {
                let detail = find_detail(&db, match_id, team_id).await?;
                ensure_hero(&db, request.hero_id).await?;
                let item = $entity::ActiveModel {
                    match_team_detail_id: ActiveValue::Set(detail.match_team_detail_id),
                    hero_id: ActiveValue::Set(request.hero_id),
                    total: ActiveValue::Set(request.total),
                    role: ActiveValue::Set(request.role),
                    $rate: ActiveValue::Set(request.$rate),
                    ..Default::default()
                }.insert(&db).await.map_err(handle_error)?;
                Ok((StatusCode::CREATED, Json(item)))
            }

            pub async fn get_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(team_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
            ) -> Result<Json<WithHero<$entity::Model>>, APIError> {
                let detail = find_detail(&db, match_id, team_id).await?;
                let item = find_item(&db, detail.match_team_detail_id, item_id).await?;
                find_with_hero(&db, $entity::Entity::find_by_id(item.$id_field))
                    .await
                    .map_err(handle_error)?
                    .pop()
                    .map(Json)
                    .ok_or((StatusCode::NOT_FOUND, concat!($label, " not found")).into())
            }

            pub async fn update_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(team_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
                ValidatedJson(request): ValidatedJson<UpdateRequest>,
            ) -> Result<Json<$entity::Model>, APIError> {
                let detail = find_detail(&db, match_id, team_id).await?;
                let existing = find_item(&db, detail.match_team_detail_id, item_id).await?;
                let mut model: $entity::ActiveModel = existing.clone().into();
                if let Some(hero_id) = request.hero_id {
                    ensure_hero(&db, hero_id).await?;
                    model.hero_id = ActiveValue::Set(hero_id);
                }
                if let Some(total) = request.total {
                    model.total = ActiveValue::Set(total);
                }
                if let Some(role) = request.role {
                    model.role = ActiveValue::Set(role);
                }
                if let Some(rate) = request.$rate {
                    model.$rate = ActiveValue::Set(rate);
                }
                if !model.is_changed() {
                    return Ok(Json(existing));
                }
                Ok(Json(model.update(&db).await.map_err(handle_error)?))
            }

            pub async fn delete_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(team_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
            ) -> Result<Json<MessageResponse>, APIError> {
                let detail = find_detail(&db, match_id, team_id).await?;
                let item = find_item(&db, detail.match_team_detail_id, item_id).await?;
                $entity::Entity::delete_by_id(item.$id_field).exec(&db).await.map_err(handle_error)?;
                Ok(MessageResponse::new(concat!($label, " deleted")))
            }
        }
    };
}

rated_pick_handlers!(priority_picks, priority_pick, PriorityPickId, priority_pick_id, PriorityRole, pick_rate, "Priority pick");
rated_pick_handlers!(priority_bans, priority_ban, PriorityBanId, priority_ban_id, PriorityRole, ban_rate, "Priority ban");
rated_pick_handlers!(flex_picks, flex_pick, FlexPickId, flex_pick_id, FlexRole, pick_rate, "Flex pick");

const TEAM: &str = "/matches/:match_id/teams/:team_id";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(&format!("{TEAM}/hero-picks"), get(list_hero_picks_handler).post(create_hero_pick_handler))
        .route(
            &format!("{TEAM}/hero-picks/:item_id"),
            get(get_hero_pick_handler).put(update_hero_pick_handler).delete(delete_hero_pick_handler)
        )
        .route(&format!("{TEAM}/hero-bans"), get(list_hero_bans_handler).post(create_hero_ban_handler))
        .route(
            &format!("{TEAM}/hero-bans/:item_id"),
            get(get_hero_ban_handler).put(update_hero_ban_handler).delete(delete_hero_ban_handler)
        )
        .route(&format!("{TEAM}/priority-picks"), get(priority_picks::list_handler).post(priority_picks::create_handler))
        .route(
            &format!("{TEAM}/priority-picks/:item_id"),
            get(priority_picks::get_handler).put(priority_picks::update_handler).delete(priority_picks::delete_handler)
        )
        .route(&format!("{TEAM}/priority-bans"), get(priority_bans::list_handler).post(priority_bans::create_handler))
        .route(
            &format!("{TEAM}/priority-bans/:item_id"),
            get(priority_bans::get_handler).put(priority_bans::update_handler).delete(priority_bans::delete_handler)
        )
        .route(&format!("{TEAM}/flex-picks"), get(flex_picks::list_handler).post(flex_picks::create_handler))
        .route(
            &format!("{TEAM}/flex-picks/:item_id"),
            get(flex_picks::get_handler).put(flex_picks::update_handler).delete(flex_picks::delete_handler)
        )
}
