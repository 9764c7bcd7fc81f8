//! Per-game, per-team annotations: objective fights, the early trio around
//! mid and the two side lanes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};

use ml_master_data_entities::domain::trio_mid::{create_trio_mid, delete_trio_mid, update_trio_mid, NewTrioMid, TrioMidPatch};
use ml_master_data_entities::prelude::*;
use ml_master_data_entities::queries::{find_with_hero, find_with_team, query_trio_mids, TrioMidView, WithHero, WithTeam};
use ml_master_data_entities::schema::trio_mid;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DatabaseConnection, QueryOrder, TransactionTrait};
use sea_orm::prelude::*;
use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::extract::{Id, ValidPath, ValidatedJson};
use crate::lookup::{ensure_hero, ensure_match_team, find_match_game};
use crate::response::{APIError, MessageResponse, handle_error};
use crate::state::AppState;


#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateObjectiveRequest {
    #[validate(range(min = 1))]
    pub team_id: i32,
    #[validate(range(min = 1))]
    pub phase: i32,
    pub setup: ObjectiveSetup,
    pub initiate: YesNo,
    pub result: YesNo,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateObjectiveRequest {
    #[validate(range(min = 1))]
    pub team_id: Option<i32>,
    #[validate(range(min = 1))]
    pub phase: Option<i32>,
    pub setup: Option<ObjectiveSetup>,
    pub initiate: Option<YesNo>,
    pub result: Option<YesNo>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLaneRequest {
    #[validate(range(min = 1))]
    pub team_id: i32,
    #[validate(range(min = 1))]
    pub hero_id: i32,
    pub early_result: EarlyResult,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateLaneRequest {
    #[validate(range(min = 1))]
    pub team_id: Option<i32>,
    #[validate(range(min = 1))]
    pub hero_id: Option<i32>,
    pub early_result: Option<EarlyResult>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTrioMidRequest {
    #[validate(range(min = 1))]
    pub team_id: i32,
    pub role: TrioMidRole,
    #[validate(range(min = 1))]
    pub hero_id: i32,
    pub early_result: EarlyResult,
    #[serde(default)]
    pub opponent_hero_ids: Vec<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTrioMidRequest {
    pub role: Option<TrioMidRole>,
    #[validate(range(min = 1))]
    pub hero_id: Option<i32>,
    pub early_result: Option<EarlyResult>,
    pub opponent_hero_ids: Option<Vec<i32>>,
}

/// Generates list/create/get/update/delete handlers for an objective table.
macro_rules! objective_handlers {
    ($module:ident, $entity:ident, $id_column:ident, $id_field:ident, $label:literal) => {
        pub mod $module {
            use super::*;
            use ml_master_data_entities::schema::$entity;

            async fn find_item<C>(db: &C, game_id: i32, item_id: i32) -> Result<$entity::Model, APIError> where C: ConnectionTrait {
                $entity::Entity::find_by_id(item_id)
                    .filter($entity::Column::GameId.eq(game_id))
                    .one(db)
                    .await
                    .map_err(handle_error)?
                    .ok_or((StatusCode::NOT_FOUND, concat!($label, " not found")).into())
            }

            pub async fn list_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
            ) -> Result<Json<Vec<WithTeam<$entity::Model>>>, APIError> {
                find_match_game(&db, match_id, game_id).await?;
                let items = find_with_team(
                    &db,
                    $entity::Entity::find()
                        .filter($entity::Column::GameId.eq(game_id))
                        .order_by_asc($entity::Column::Phase)
                        .order_by_asc($entity::Column::$id_column)
                ).await.map_err(handle_error)?;
                Ok(Json(items))
            }

            pub async fn create_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
                ValidatedJson(request): ValidatedJson<CreateObjectiveRequest>,
            ) -> Result<(StatusCode, Json<$entity::Model>), APIError> {
                let (match_, _) = find_match_game(&db, match_id, game_id).await?;
                ensure_match_team(&match_, request.team_id)?;
                let item = $entity::ActiveModel {
                    game_id: ActiveValue::Set(game_id),
                    team_id: ActiveValue::Set(request.team_id),
                    phase: ActiveValue::Set(request.phase),
                    setup: ActiveValue::Set(request.setup),
                    initiate: ActiveValue::Set(request.initiate),
                    result: ActiveValue::Set(request.result),
                    ..Default::default()
                }.insert(&db).await.map_err(handle_error)?;
                Ok((StatusCode::CREATED, Json(item)))
            }

            pub async fn get_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
            ) -> Result<Json<WithTeam<$entity::Model>>, APIError> {
                find_match_game(&db, match_id, game_id).await?;
                let item = find_item(&db, game_id, item_id).await?;
                find_with_team(&db, $entity::Entity::find_by_id(item.$id_field))
                    .await
                    .map_err(handle_error)?
                    .pop()
                    .map(Json)
                    .ok_or((StatusCode::NOT_FOUND, concat!($label, " not found")).into())
            }

            pub async fn update_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
                ValidatedJson(request): ValidatedJson<UpdateObjectiveRequest>,
            ) -> Result<Json<$entity::Model>, APIError> {
                let (match_, _) = find_match_game(&db, match_id, game_id).await?;
                let existing = find_item(&db, game_id, item_id).await?;
                let mut model: $entity::ActiveModel = existing.clone().into();
                if let Some(team_id) = request.team_id {
                    ensure_match_team(&match_, team_id)?;
                    model.team_id = ActiveValue::Set(team_id);
                }
                if let Some(phase) = request.phase {
                    model.phase = ActiveValue::Set(phase);
                }
                if let Some(setup) = request.setup {
                    model.setup = ActiveValue::Set(setup);
                }
                if let Some(initiate) = request.initiate {
                    model.initiate = ActiveValue::Set(initiate);
                }
                if let Some(result) = request.result {
                    model.result = ActiveValue::Set(result);
                }
                if !model.is_changed() {
                    return Ok(Json(existing));
                }
                Ok(Json(model.update(&db).await.map_err(handle_error)?))
            }

            pub async fn delete_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
            ) -> Result<Json<MessageResponse>, APIError> {
                find_match_game(&db, match_id, game_id).await?;
                let item = find_item(&db, game_id, item_id).await?;
                $entity::Entity::delete_by_id(item.$id_field).exec(&db).await.map_err(handle_error)?;
                Ok(MessageResponse::new(concat!($label, " deleted")))
            }
        }
    };
}

/// Same as `objective_handlers` for the gold and exp lane tables.
macro_rules! lane_handlers {
    ($module:ident, $entity:ident, $id_column:ident, $id_field:ident, $label:literal) => {
        pub mod $module {
            use super::*;
            use ml_master_data_entities::schema::$entity;

            async fn find_item<C>(db: &C, game_id: i32, item_id: i32) -> Result<$entity::Model, APIError> where C: ConnectionTrait {
                $entity::Entity::find_by_id(item_id)
                    .filter($entity::Column::GameId.eq(game_id))
                    .one(db)
                    .await
                    .map_err(handle_error)?
                    .ok_or((StatusCode::NOT_FOUND, concat!($label, " not found")).into())
            }

            pub async fn list_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
            ) -> Result<Json<Vec<WithHero<$entity::Model>>>, APIError> {
                find_match_game(&db, match_id, game_id).await?;
                let items = find_with_hero(
                    &db,
                    $entity::Entity::find()
                        .filter($entity::Column::GameId.eq(game_id))
                        .order_by_asc($entity::Column::$id_column)
                ).await.map_err(handle_error)?;
                Ok(Json(items))
            }

            pub async fn create_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
                ValidatedJson(request): ValidatedJson<CreateLaneRequest>,
            ) -> Result<(StatusCode, Json<$entity::Model>), APIError> {
                let (match_, _) = find_match_game(&db, match_id, game_id).await?;
                ensure_match_team(&match_, request.team_id)?;
                ensure_hero(&db, request.hero_id).await?;
                let item = $entity::ActiveModel {
                    game_id: ActiveValue::Set(game_id),
                    team_id: ActiveValue::Set(request.team_id),
                    hero_id: ActiveValue::Set(request.hero_id),
                    early_result: ActiveValue::Set(request.early_result),
                    ..Default::default()
                }.insert(&db).await.map_err(handle_error)?;
                Ok((StatusCode::CREATED, Json(item)))
            }

            pub async fn get_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
            ) -> Result<Json<WithHero<$entity::Model>>, APIError> {
                find_match_game(&db, match_id, game_id).await?;
                let item = find_item(&db, game_id, item_id).await?;
                find_with_hero(&db, $entity::Entity::find_by_id(item.$id_field))
                    .await
                    .map_err(handle_error)?
                    .pop()
                    .map(Json)
                    .ok_or((StatusCode::NOT_FOUND, concat!($label, " not found")).into())
            }

            pub async fn update_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
                ValidatedJson(request): ValidatedJson<UpdateLaneRequest>,
            ) -> Result<Json<$entity::Model>, APIError> {
                let (match_, _) = find_match_game(&db, match_id, game_id).await?;
                let existing = find_item(&db, game_id, item_id).await?;
                let mut model: $entity::ActiveModel = existing.clone().into();
                if let Some(team_id) = request.team_id {
                    ensure_match_team(&match_, team_id)?;
                    model.team_id = ActiveValue::Set(team_id);
                }
                if let Some(hero_id) = request.hero_id {
                    ensure_hero(&db, hero_id).await?;
                    model.hero_id = ActiveValue::Set(hero_id);
                }
                if let Some(early_result) = request.early_result {
                    model.early_result = ActiveValue::Set(early_result);
                }
                if !model.is_changed() {
                    return Ok(Json(existing));
                }
                Ok(Json(model.update(&db).await.map_err(handle_error)?))
            }

            pub async fn delete_handler(
                State(db): State<DatabaseConnection>,
                ValidPath((Id(match_id), Id(game_id), Id(item_id))): ValidPath<(Id, Id, Id)>,
            ) -> Result<Json<MessageResponse>, APIError> {
                find_match_game(&db, match_id, game_id).await?;
                let item = find_item(&db, game_id, item_id).await?;
                $entity::Entity::delete_by_id(item.$id_field).exec(&db).await.map_err(handle_error)?;
                Ok(MessageResponse::new(concat!($label, " deleted")))
            }
        }
    };
}

objective_handlers!(turtle_results, turtle_result, TurtleResultId, turtle_result_id, "Turtle result");
objective_handlers!(lord_results, lord_result, LordResultId, lord_result_id, "Lord result");
lane_handlers!(goldlaners, goldlaner, GoldlanerId, goldlaner_id, "Goldlaner");
lane_handlers!(explaners, explaner, ExplanerId, explaner_id, "Explaner");

async fn find_trio_mid<C>(db: &C, game_id: i32, trio_mid_id: i32) -> Result<trio_mid::Model, APIError> where C: ConnectionTrait {
    trio_mid::Entity::find_by_id(trio_mid_id)
        .filter(trio_mid::Column::GameId.eq(game_id))
        .one(db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Trio mid not found").into())
}

async fn ensure_heroes<C>(db: &C, hero_ids: &[i32]) -> Result<(), APIError> where C: ConnectionTrait {
    for hero_id in hero_ids {
        ensure_hero(db, *hero_id).await?;
    }
    Ok(())
}

pub async fn list_trio_mids_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
) -> Result<Json<Vec<TrioMidView>>, APIError> {
    find_match_game(&db, match_id, game_id).await?;
    let trio_mids = query_trio_mids(&db, trio_mid::Entity::find().filter(trio_mid::Column::GameId.eq(game_id)))
        .await
        .map_err(handle_error)?;
    Ok(Json(trio_mids))
}

/// Stores the trio member together with the heroes it faced.
pub async fn create_trio_mid_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id))): ValidPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<CreateTrioMidRequest>,
) -> Result<(StatusCode, Json<trio_mid::Model>), APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    let (match_, _) = find_match_game(&transaction, match_id, game_id).await?;
    ensure_match_team(&match_, request.team_id)?;
    ensure_hero(&transaction, request.hero_id).await?;
    ensure_heroes(&transaction, &request.opponent_hero_ids).await?;

    let trio_mid = create_trio_mid(&transaction, game_id, request.team_id, NewTrioMid {
        role: request.role,
        hero_id: request.hero_id,
        early_result: request.early_result,
        opponent_hero_ids: request.opponent_hero_ids,
    }).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok((StatusCode::CREATED, Json(trio_mid)))
}

pub async fn get_trio_mid_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id), Id(trio_mid_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<TrioMidView>, APIError> {
    find_match_game(&db, match_id, game_id).await?;
    let trio_mid = find_trio_mid(&db, game_id, trio_mid_id).await?;
    query_trio_mids(&db, trio_mid::Entity::find_by_id(trio_mid.trio_mid_id))
        .await
        .map_err(handle_error)?
        .pop()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Trio mid not found").into())
}

pub async fn update_trio_mid_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id), Id(trio_mid_id))): ValidPath<(Id, Id, Id)>,
    ValidatedJson(request): ValidatedJson<UpdateTrioMidRequest>,
) -> Result<Json<trio_mid::Model>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    find_match_game(&transaction, match_id, game_id).await?;
    let existing = find_trio_mid(&transaction, game_id, trio_mid_id).await?;
    if let Some(hero_id) = request.hero_id {
        ensure_hero(&transaction, hero_id).await?;
    }
    if let Some(opponent_hero_ids) = &request.opponent_hero_ids {
        ensure_heroes(&transaction, opponent_hero_ids).await?;
    }

    let trio_mid = update_trio_mid(&transaction, existing, TrioMidPatch {
        role: request.role,
        hero_id: request.hero_id,
        early_result: request.early_result,
        opponent_hero_ids: request.opponent_hero_ids,
    }).await?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(Json(trio_mid))
}

pub async fn delete_trio_mid_handler(
    State(db): State<DatabaseConnection>,
    ValidPath((Id(match_id), Id(game_id), Id(trio_mid_id))): ValidPath<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, APIError> {
    let transaction = db.begin().await.map_err(handle_error)?;
    find_match_game(&transaction, match_id, game_id).await?;
    let trio_mid = find_trio_mid(&transaction, game_id, trio_mid_id).await?;
    delete_trio_mid(&transaction, trio_mid.trio_mid_id).await.map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(MessageResponse::new("Trio mid deleted"))
}

const GAME: &str = "/matches/:match_id/games/:game_id";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(&format!("{GAME}/turtle-results"), get(turtle_results::list_handler).post(turtle_results::create_handler))
        .route(
            &format!("{GAME}/turtle-results/:item_id"),
            get(turtle_results::get_handler).put(turtle_results::update_handler).delete(turtle_results::delete_handler)
        )
        .route(&format!("{GAME}/lord-results"), get(lord_results::list_handler).post(lord_results::create_handler))
        .route(
            &format!("{GAME}/lord-results/:item_id"),
            get(lord_results::get_handler).put(lord_results::update_handler).delete(lord_results::delete_handler)
        )
        .route(&format!("{GAME}/trio-mids"), get(list_trio_mids_handler).post(create_trio_mid_handler))
        .route(
            &format!("{GAME}/trio-mids/:item_id"),
            get(get_trio_mid_handler).put(update_trio_mid_handler).delete(delete_trio_mid_handler)
        )
        .route(&format!("{GAME}/goldlaners"), get(goldlaners::list_handler).post(goldlaners::create_handler))
        .route(
            &format!("{GAME}/goldlaners/:item_id"),
            get(goldlaners::get_handler).put(goldlaners::update_handler).delete(goldlaners::delete_handler)
        )
        .route(&format!("{GAME}/explaners"), get(explaners::list_handler).post(explaners::create_handler))
        .route(
            &format!("{GAME}/explaners/:item_id"),
            get(explaners::get_handler).put(explaners::update_handler).delete(explaners::delete_handler)
        )
}
