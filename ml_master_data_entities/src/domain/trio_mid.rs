use sea_orm::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};

use crate::error::DomainError;
use crate::schema;
use crate::schema::sea_orm_active_enums::{EarlyResult, TrioMidRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrioMid {
    pub role: TrioMidRole,
    pub hero_id: i32,
    pub early_result: EarlyResult,
    pub opponent_hero_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrioMidPatch {
    pub role: Option<TrioMidRole>,
    pub hero_id: Option<i32>,
    pub early_result: Option<EarlyResult>,
    /// Replaces the stored opponents when present.
    pub opponent_hero_ids: Option<Vec<i32>>,
}

pub async fn create_trio_mid<C>(db: &C, game_id: i32, team_id: i32, trio_mid: NewTrioMid) -> Result<schema::trio_mid::Model, DomainError> where C: ConnectionTrait {
    let model = schema::trio_mid::ActiveModel {
        game_id: ActiveValue::Set(game_id),
        team_id: ActiveValue::Set(team_id),
        role: ActiveValue::Set(trio_mid.role),
        hero_id: ActiveValue::Set(trio_mid.hero_id),
        early_result: ActiveValue::Set(trio_mid.early_result),
        ..Default::default()
    }.insert(db).await?;

    insert_opponents(db, model.trio_mid_id, trio_mid.opponent_hero_ids).await?;
    Ok(model)
}

pub async fn update_trio_mid<C>(db: &C, existing: schema::trio_mid::Model, patch: TrioMidPatch) -> Result<schema::trio_mid::Model, DomainError> where C: ConnectionTrait {
    if let Some(opponent_hero_ids) = patch.opponent_hero_ids {
        schema::trio_mid_hero::Entity::delete_many()
            .filter(schema::trio_mid_hero::Column::TrioMidId.eq(existing.trio_mid_id))
            .exec(db)
            .await?;
        insert_opponents(db, existing.trio_mid_id, opponent_hero_ids).await?;
    }

    let mut model: schema::trio_mid::ActiveModel = existing.clone().into();
    if let Some(role) = patch.role {
        model.role = ActiveValue::Set(role);
    }
    if let Some(hero_id) = patch.hero_id {
        model.hero_id = ActiveValue::Set(hero_id);
    }
    if let Some(early_result) = patch.early_result {
        model.early_result = ActiveValue::Set(early_result);
    }

    if model.is_changed() {
        Ok(model.update(db).await?)
    } else {
        Ok(existing)
    }
}

pub async fn delete_trio_mid<C>(db: &C, trio_mid_id: i32) -> Result<(), DbErr> where C: ConnectionTrait {
    delete_with_opponents(db, vec![trio_mid_id]).await
}

pub(crate) async fn delete_with_opponents<C>(db: &C, trio_mid_ids: Vec<i32>) -> Result<(), DbErr> where C: ConnectionTrait {
    if trio_mid_ids.is_empty() {
        return Ok(());
    }
    schema::trio_mid_hero::Entity::delete_many()
        .filter(schema::trio_mid_hero::Column::TrioMidId.is_in(trio_mid_ids.clone()))
        .exec(db)
        .await?;
    schema::trio_mid::Entity::delete_many()
        .filter(schema::trio_mid::Column::TrioMidId.is_in(trio_mid_ids))
        .exec(db)
        .await?;
    Ok(())
}

async fn insert_opponents<C>(db: &C, trio_mid_id: i32, hero_ids: Vec<i32>) -> Result<(), DbErr> where C: ConnectionTrait {
    if hero_ids.is_empty() {
        return Ok(());
    }
    schema::trio_mid_hero::Entity::insert_many(
        hero_ids.into_iter().map(|hero_id| schema::trio_mid_hero::ActiveModel {
            trio_mid_id: ActiveValue::Set(trio_mid_id),
            hero_id: ActiveValue::Set(hero_id),
            ..Default::default()
        })
    ).exec(db).await?;
    Ok(())
}
