use std::collections::HashMap;

use itertools::Itertools;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, QuerySelect};

use crate::domain::ensure_distinct_game_numbers;
use crate::error::DomainError;
use crate::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanFlag {
    pub game_number: i32,
    pub is_banned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroBan {
    pub hero_id: i32,
    pub first_phase: i32,
    pub second_phase: i32,
    pub games: Vec<BanFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroBanPatch {
    pub hero_id: Option<i32>,
    pub first_phase: Option<i32>,
    pub second_phase: Option<i32>,
    pub games: Vec<BanFlag>,
}

pub async fn create_hero_ban<C>(db: &C, match_team_detail_id: i32, ban: NewHeroBan) -> Result<schema::hero_ban::Model, DomainError> where C: ConnectionTrait {
    ensure_distinct_game_numbers(ban.games.iter().map(|g| g.game_number))?;

    let total = ban.games.iter().filter(|g| g.is_banned).count() as i32;
    let model = schema::hero_ban::ActiveModel {
        match_team_detail_id: ActiveValue::Set(match_team_detail_id),
        hero_id: ActiveValue::Set(ban.hero_id),
        first_phase: ActiveValue::Set(ban.first_phase),
        second_phase: ActiveValue::Set(ban.second_phase),
        total: ActiveValue::Set(total),
        ..Default::default()
    }.insert(db).await?;

    if !ban.games.is_empty() {
        schema::hero_ban_game::Entity::insert_many(
            ban.games.iter().map(|g| schema::hero_ban_game::ActiveModel {
                hero_ban_id: ActiveValue::Set(model.hero_ban_id),
                game_number: ActiveValue::Set(g.game_number),
                is_banned: ActiveValue::Set(g.is_banned),
                ..Default::default()
            })
        ).exec(db).await?;
    }

    Ok(model)
}

/// Same merge semantics as picks.
pub async fn update_hero_ban<C>(db: &C, existing: schema::hero_ban::Model, patch: HeroBanPatch) -> Result<schema::hero_ban::Model, DomainError> where C: ConnectionTrait {
    ensure_distinct_game_numbers(patch.games.iter().map(|g| g.game_number))?;

    let stored: HashMap<i32, schema::hero_ban_game::Model> = schema::hero_ban_game::Entity::find()
        .filter(schema::hero_ban_game::Column::HeroBanId.eq(existing.hero_ban_id))
        .all(db)
        .await?
        .into_iter()
        .map(|g| (g.game_number, g))
        .collect();

    let mut delta = 0;
    let mut new_flags = vec![];
    for flag in patch.games {
        match stored.get(&flag.game_number) {
            Some(game) if game.is_banned != flag.is_banned => {
                delta += if flag.is_banned { 1 } else { -1 };
                schema::hero_ban_game::ActiveModel {
                    hero_ban_game_id: ActiveValue::Unchanged(game.hero_ban_game_id),
                    is_banned: ActiveValue::Set(flag.is_banned),
                    ..Default::default()
                }.update(db).await?;
            },
            Some(_) => {},
            None => {
                if flag.is_banned {
                    delta += 1;
                }
                new_flags.push(schema::hero_ban_game::ActiveModel {
                    hero_ban_id: ActiveValue::Set(existing.hero_ban_id),
                    game_number: ActiveValue::Set(flag.game_number),
                    is_banned: ActiveValue::Set(flag.is_banned),
                    ..Default::default()
                });
            }
        }
    }

    if !new_flags.is_empty() {
        schema::hero_ban_game::Entity::insert_many(new_flags).exec(db).await?;
    }

    let mut model: schema::hero_ban::ActiveModel = existing.clone().into();
    if let Some(hero_id) = patch.hero_id {
        model.hero_id = ActiveValue::Set(hero_id);
    }
    if let Some(first_phase) = patch.first_phase {
        model.first_phase = ActiveValue::Set(first_phase);
    }
    if let Some(second_phase) = patch.second_phase {
        model.second_phase = ActiveValue::Set(second_phase);
    }
    if delta != 0 {
        model.total = ActiveValue::Set(existing.total + delta);
    }

    if model.is_changed() {
        Ok(model.update(db).await?)
    } else {
        Ok(existing)
    }
}

pub async fn delete_hero_ban<C>(db: &C, hero_ban_id: i32) -> Result<(), DbErr> where C: ConnectionTrait {
    delete_with_games(db, vec![hero_ban_id]).await
}

pub(crate) async fn delete_with_games<C>(db: &C, hero_ban_ids: Vec<i32>) -> Result<(), DbErr> where C: ConnectionTrait {
    if hero_ban_ids.is_empty() {
        return Ok(());
    }
    schema::hero_ban_game::Entity::delete_many()
        .filter(schema::hero_ban_game::Column::HeroBanId.is_in(hero_ban_ids.clone()))
        .exec(db)
        .await?;
    schema::hero_ban::Entity::delete_many()
        .filter(schema::hero_ban::Column::HeroBanId.is_in(hero_ban_ids))
        .exec(db)
        .await?;
    Ok(())
}

pub(crate) async fn remove_game_number<C>(db: &C, game_number: i32) -> Result<(), DbErr> where C: ConnectionTrait {
    let flags: Vec<(i32, i32, bool)> = schema::hero_ban_game::Entity::find()
        .select_only()
        .column(schema::hero_ban_game::Column::HeroBanGameId)
        .column(schema::hero_ban_game::Column::HeroBanId)
        .column(schema::hero_ban_game::Column::IsBanned)
        .filter(schema::hero_ban_game::Column::GameNumber.eq(game_number))
        .into_tuple()
        .all(db)
        .await?;

    if flags.is_empty() {
        return Ok(());
    }

    let decrements = flags.iter()
        .filter(|(_, _, is_banned)| *is_banned)
        .map(|(_, hero_ban_id, _)| *hero_ban_id)
        .counts();
    for (hero_ban_id, count) in decrements {
        schema::hero_ban::Entity::update_many()
            .col_expr(schema::hero_ban::Column::Total, Expr::col(schema::hero_ban::Column::Total).sub(count as i32))
            .filter(schema::hero_ban::Column::HeroBanId.eq(hero_ban_id))
            .exec(db)
            .await?;
    }

    schema::hero_ban_game::Entity::delete_many()
        .filter(schema::hero_ban_game::Column::HeroBanGameId.is_in(flags.into_iter().map(|(id, _, _)| id)))
        .exec(db)
        .await?;
    Ok(())
}
