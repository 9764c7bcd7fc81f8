use sea_orm::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, JoinType, PaginatorTrait, QuerySelect};

use crate::error::DomainError;
use crate::schema;
use crate::schema::sea_orm_active_enums::GameOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub first_pick_team_id: i32,
    pub second_pick_team_id: i32,
    pub winner_team_id: i32,
    pub game_number: i32,
    pub video_link: Option<String>,
    pub full_draft_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    pub first_pick_team_id: Option<i32>,
    pub second_pick_team_id: Option<i32>,
    pub winner_team_id: Option<i32>,
    pub game_number: Option<i32>,
    pub video_link: Option<String>,
    pub full_draft_image: Option<String>,
}

/// Inserts a game and records a result row for each side of the match.
pub async fn create_game<C>(db: &C, match_: &schema::matches::Model, game: NewGame) -> Result<schema::game::Model, DomainError> where C: ConnectionTrait {
    check_sides(match_, game.first_pick_team_id, game.second_pick_team_id, game.winner_team_id)?;
    check_game_number(db, match_.match_id, game.game_number, None).await?;

    let model = schema::game::ActiveModel {
        match_id: ActiveValue::Set(match_.match_id),
        first_pick_team_id: ActiveValue::Set(game.first_pick_team_id),
        second_pick_team_id: ActiveValue::Set(game.second_pick_team_id),
        winner_team_id: ActiveValue::Set(game.winner_team_id),
        game_number: ActiveValue::Set(game.game_number),
        video_link: ActiveValue::Set(game.video_link),
        full_draft_image: ActiveValue::Set(game.full_draft_image),
        ..Default::default()
    }.insert(db).await?;

    write_results(db, match_, &model).await?;
    Ok(model)
}

/// Applies the set fields of `patch`, keeping the per-side results in line
/// with the winner.
pub async fn update_game<C>(db: &C, match_: &schema::matches::Model, existing: schema::game::Model, patch: GamePatch) -> Result<schema::game::Model, DomainError> where C: ConnectionTrait {
    check_sides(
        match_,
        patch.first_pick_team_id.unwrap_or(existing.first_pick_team_id),
        patch.second_pick_team_id.unwrap_or(existing.second_pick_team_id),
        patch.winner_team_id.unwrap_or(existing.winner_team_id),
    )?;
    if let Some(game_number) = patch.game_number.filter(|n| *n != existing.game_number) {
        check_game_number(db, match_.match_id, game_number, Some(existing.game_id)).await?;
        let flagged = count_draft_flags(db, match_.match_id, existing.game_number).await?;
        if flagged > 0 {
            return Err(DomainError::Invalid(format!(
                "Game {} still has {} pick/ban flag(s) recorded and cannot be renumbered", existing.game_number, flagged
            )));
        }
    }

    let mut model: schema::game::ActiveModel = existing.clone().into();
    if let Some(first_pick_team_id) = patch.first_pick_team_id {
        model.first_pick_team_id = ActiveValue::Set(first_pick_team_id);
    }
    if let Some(second_pick_team_id) = patch.second_pick_team_id {
        model.second_pick_team_id = ActiveValue::Set(second_pick_team_id);
    }
    if let Some(winner_team_id) = patch.winner_team_id {
        model.winner_team_id = ActiveValue::Set(winner_team_id);
    }
    if let Some(game_number) = patch.game_number {
        model.game_number = ActiveValue::Set(game_number);
    }
    if let Some(video_link) = patch.video_link {
        model.video_link = ActiveValue::Set(Some(video_link));
    }
    if let Some(full_draft_image) = patch.full_draft_image {
        model.full_draft_image = ActiveValue::Set(Some(full_draft_image));
    }

    if !model.is_changed() {
        return Ok(existing);
    }

    let updated = model.update(db).await?;
    if updated.winner_team_id != existing.winner_team_id {
        write_results(db, match_, &updated).await?;
    }
    Ok(updated)
}

pub async fn find_game<C>(db: &C, match_id: i32, game_id: i32) -> Result<schema::game::Model, DomainError> where C: ConnectionTrait {
    schema::game::Entity::find_by_id(game_id)
        .filter(schema::game::Column::MatchId.eq(match_id))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Game"))
}

fn check_sides(match_: &schema::matches::Model, first_pick_team_id: i32, second_pick_team_id: i32, winner_team_id: i32) -> Result<(), DomainError> {
    for team_id in [first_pick_team_id, second_pick_team_id, winner_team_id] {
        if !match_.has_team(team_id) {
            return Err(DomainError::Invalid(format!("Team {} does not play in match {}", team_id, match_.match_id)));
        }
    }
    if first_pick_team_id == second_pick_team_id {
        return Err(DomainError::invalid("First and second pick must be different teams"));
    }
    Ok(())
}

async fn check_game_number<C>(db: &C, match_id: i32, game_number: i32, ignore_game: Option<i32>) -> Result<(), DomainError> where C: ConnectionTrait {
    if game_number < 1 {
        return Err(DomainError::invalid("Game number must be positive"));
    }

    let mut query = schema::game::Entity::find()
        .filter(schema::game::Column::MatchId.eq(match_id))
        .filter(schema::game::Column::GameNumber.eq(game_number));
    if let Some(game_id) = ignore_game {
        query = query.filter(schema::game::Column::GameId.ne(game_id));
    }

    if query.count(db).await? > 0 {
        return Err(DomainError::Invalid(format!("Game {} already exists in match {}", game_number, match_id)));
    }
    Ok(())
}

/// Pick and ban flags of the match's teams recorded under `game_number`.
async fn count_draft_flags<C>(db: &C, match_id: i32, game_number: i32) -> Result<u64, DbErr> where C: ConnectionTrait {
    let picks = schema::hero_pick_game::Entity::find()
        .inner_join(schema::hero_pick::Entity)
        .join(JoinType::InnerJoin, schema::hero_pick::Relation::MatchTeamDetail.def())
        .filter(schema::match_team_detail::Column::MatchId.eq(match_id))
        .filter(schema::hero_pick_game::Column::GameNumber.eq(game_number))
        .count(db)
        .await?;
    let bans = schema::hero_ban_game::Entity::find()
        .inner_join(schema::hero_ban::Entity)
        .join(JoinType::InnerJoin, schema::hero_ban::Relation::MatchTeamDetail.def())
        .filter(schema::match_team_detail::Column::MatchId.eq(match_id))
        .filter(schema::hero_ban_game::Column::GameNumber.eq(game_number))
        .count(db)
        .await?;
    Ok(picks + bans)
}

async fn write_results<C>(db: &C, match_: &schema::matches::Model, game: &schema::game::Model) -> Result<(), DbErr> where C: ConnectionTrait {
    schema::game_result::Entity::delete_many()
        .filter(schema::game_result::Column::GameId.eq(game.game_id))
        .exec(db)
        .await?;

    schema::game_result::Entity::insert_many(
        match_.team_ids().into_iter().map(|team_id| schema::game_result::ActiveModel {
            game_id: ActiveValue::Set(game.game_id),
            team_id: ActiveValue::Set(team_id),
            result: ActiveValue::Set(
                if team_id == game.winner_team_id { GameOutcome::Win } else { GameOutcome::Lose }
            ),
            ..Default::default()
        })
    ).exec(db).await?;
    Ok(())
}
