use std::collections::HashMap;

use itertools::Itertools;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, QuerySelect};

use crate::domain::ensure_distinct_game_numbers;
use crate::error::DomainError;
use crate::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickFlag {
    pub game_number: i32,
    pub is_picked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroPick {
    pub hero_id: i32,
    pub first_phase: i32,
    pub second_phase: i32,
    pub games: Vec<PickFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroPickPatch {
    pub hero_id: Option<i32>,
    pub first_phase: Option<i32>,
    pub second_phase: Option<i32>,
    pub games: Vec<PickFlag>,
}

/// Inserts a pick together with its per-game flags.
///
/// `total` starts at the number of flags that are set.
pub async fn create_hero_pick<C>(db: &C, match_team_detail_id: i32, pick: NewHeroPick) -> Result<schema::hero_pick::Model, DomainError> where C: ConnectionTrait {
    ensure_distinct_game_numbers(pick.games.iter().map(|g| g.game_number))?;

    let total = pick.games.iter().filter(|g| g.is_picked).count() as i32;
    let model = schema::hero_pick::ActiveModel {
        match_team_detail_id: ActiveValue::Set(match_team_detail_id),
        hero_id: ActiveValue::Set(pick.hero_id),
        first_phase: ActiveValue::Set(pick.first_phase),
        second_phase: ActiveValue::Set(pick.second_phase),
        total: ActiveValue::Set(total),
        ..Default::default()
    }.insert(db).await?;

    if !pick.games.is_empty() {
        schema::hero_pick_game::Entity::insert_many(
            pick.games.iter().map(|g| schema::hero_pick_game::ActiveModel {
                hero_pick_id: ActiveValue::Set(model.hero_pick_id),
                game_number: ActiveValue::Set(g.game_number),
                is_picked: ActiveValue::Set(g.is_picked),
                ..Default::default()
            })
        ).exec(db).await?;
    }

    Ok(model)
}

/// Applies the set fields of `patch` and merges its flags into the stored ones.
///
/// Flags are matched by game number. Numbers missing from the patch keep their
/// stored flag; `total` moves by the delta of every flag that changed.
pub async fn update_hero_pick<C>(db: &C, existing: schema::hero_pick::Model, patch: HeroPickPatch) -> Result<schema::hero_pick::Model, DomainError> where C: ConnectionTrait {
    ensure_distinct_game_numbers(patch.games.iter().map(|g| g.game_number))?;

    let stored: HashMap<i32, schema::hero_pick_game::Model> = schema::hero_pick_game::Entity::find()
        .filter(schema::hero_pick_game::Column::HeroPickId.eq(existing.hero_pick_id))
        .all(db)
        .await?
        .into_iter()
        .map(|g| (g.game_number, g))
        .collect();

    let mut delta = 0;
    let mut new_flags = vec![];
    for flag in patch.games {
        match stored.get(&flag.game_number) {
            Some(game) if game.is_picked != flag.is_picked => {
                delta += if flag.is_picked { 1 } else { -1 };
                schema::hero_pick_game::ActiveModel {
                    hero_pick_game_id: ActiveValue::Unchanged(game.hero_pick_game_id),
                    is_picked: ActiveValue::Set(flag.is_picked),
                    ..Default::default()
                }.update(db).await?;
            },
            Some(_) => {},
            None => {
                if flag.is_picked {
                    delta += 1;
                }
                new_flags.push(schema::hero_pick_game::ActiveModel {
                    hero_pick_id: ActiveValue::Set(existing.hero_pick_id),
                    game_number: ActiveValue::Set(flag.game_number),
                    is_picked: ActiveValue::Set(flag.is_picked),
                    ..Default::default()
                });
            }
        }
    }

    if !new_flags.is_empty() {
        schema::hero_pick_game::Entity::insert_many(new_flags).exec(db).await?;
    }

    let mut model: schema::hero_pick::ActiveModel = existing.clone().into();
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

pub async fn delete_hero_pick<C>(db: &C, hero_pick_id: i32) -> Result<(), DbErr> where C: ConnectionTrait {
    delete_with_games(db, vec![hero_pick_id]).await
}

pub(crate) async fn delete_with_games<C>(db: &C, hero_pick_ids: Vec<i32>) -> Result<(), DbErr> where C: ConnectionTrait {
    if hero_pick_ids.is_empty() {
        return Ok(());
    }
    schema::hero_pick_game::Entity::delete_many()
        .filter(schema::hero_pick_game::Column::HeroPickId.is_in(hero_pick_ids.clone()))
        .exec(db)
        .await?;
    schema::hero_pick::Entity::delete_many()
        .filter(schema::hero_pick::Column::HeroPickId.is_in(hero_pick_ids))
        .exec(db)
        .await?;
    Ok(())
}

/// Drops every flag recorded for `game_number` and takes the set ones off
/// their parents' totals.
///
/// Flags carry no match of their own, so this reaches picks of every match
/// that uses the number.
pub(crate) async fn remove_game_number<C>(db: &C, game_number: i32) -> Result<(), DbErr> where C: ConnectionTrait {
    let flags: Vec<(i32, i32, bool)> = schema::hero_pick_game::Entity::find()
        .select_only()
        .column(schema::hero_pick_game::Column::HeroPickGameId)
        .column(schema::hero_pick_game::Column::HeroPickId)
        .column(schema::hero_pick_game::Column::IsPicked)
        .filter(schema::hero_pick_game::Column::GameNumber.eq(game_number))
        .into_tuple()
        .all(db)
        .await?;

    if flags.is_empty() {
        return Ok(());
    }

    let decrements = flags.iter()
        .filter(|(_, _, is_picked)| *is_picked)
        .map(|(_, hero_pick_id, _)| *hero_pick_id)
        .counts();
    for (hero_pick_id, count) in decrements {
        schema::hero_pick::Entity::update_many()
            .col_expr(schema::hero_pick::Column::Total, Expr::col(schema::hero_pick::Column::Total).sub(count as i32))
            .filter(schema::hero_pick::Column::HeroPickId.eq(hero_pick_id))
            .exec(db)
            .await?;
    }

    schema::hero_pick_game::Entity::delete_many()
        .filter(schema::hero_pick_game::Column::HeroPickGameId.is_in(flags.into_iter().map(|(id, _, _)| id)))
        .exec(db)
        .await?;
    Ok(())
}
