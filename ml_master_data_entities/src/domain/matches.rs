use itertools::Itertools;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, PaginatorTrait};
use tracing::info;

use crate::error::DomainError;
use crate::schema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub week: i32,
    pub day: i32,
    pub date: i32,
    pub team_a_id: i32,
    pub team_b_id: i32,
    pub team_a_score: i32,
    pub team_b_score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPatch {
    pub week: Option<i32>,
    pub day: Option<i32>,
    pub date: Option<i32>,
    pub team_a_id: Option<i32>,
    pub team_b_id: Option<i32>,
    pub team_a_score: Option<i32>,
    pub team_b_score: Option<i32>,
}

/// Inserts the match and one detail row per side.
pub async fn create_match<C>(db: &C, tournament_id: i32, new_match: NewMatch) -> Result<schema::matches::Model, DomainError> where C: ConnectionTrait {
    check_pairing(db, tournament_id, new_match.team_a_id, new_match.team_b_id).await?;

    let model = schema::matches::ActiveModel {
        tournament_id: ActiveValue::Set(tournament_id),
        week: ActiveValue::Set(new_match.week),
        day: ActiveValue::Set(new_match.day),
        date: ActiveValue::Set(new_match.date),
        team_a_id: ActiveValue::Set(new_match.team_a_id),
        team_b_id: ActiveValue::Set(new_match.team_b_id),
        team_a_score: ActiveValue::Set(new_match.team_a_score),
        team_b_score: ActiveValue::Set(new_match.team_b_score),
        ..Default::default()
    }.insert(db).await?;

    schema::match_team_detail::Entity::insert_many(
        model.team_ids().into_iter().map(|team_id| schema::match_team_detail::ActiveModel {
            match_id: ActiveValue::Set(model.match_id),
            team_id: ActiveValue::Set(team_id),
            ..Default::default()
        })
    ).exec(db).await?;

    info!("Created match {} in tournament {}", model.match_id, tournament_id);
    Ok(model)
}

/// Applies the set fields of `patch`.
///
/// When the pairing changes, the detail row of a team that left the match is
/// handed to the team that replaced it. Its lineup is dropped since those
/// players belong to the old roster, while draft annotations stay attached.
/// Games and per-game annotations that named the old team follow the swap.
pub async fn update_match<C>(db: &C, existing: schema::matches::Model, patch: MatchPatch) -> Result<schema::matches::Model, DomainError> where C: ConnectionTrait {
    let team_a_id = patch.team_a_id.unwrap_or(existing.team_a_id);
    let team_b_id = patch.team_b_id.unwrap_or(existing.team_b_id);

    let old_teams = existing.team_ids();
    let new_teams = [team_a_id, team_b_id];
    if old_teams != new_teams {
        check_pairing(db, existing.tournament_id, team_a_id, team_b_id).await?;

        let departed = old_teams.iter().filter(|t| !new_teams.contains(t)).copied().collect_vec();
        let arrived = new_teams.iter().filter(|t| !old_teams.contains(t)).copied().collect_vec();
        for (old_team, new_team) in departed.into_iter().zip(arrived) {
            repoint_team(db, &existing, old_team, new_team).await?;
        }
    }

    let mut model: schema::matches::ActiveModel = existing.clone().into();
    if let Some(week) = patch.week {
        model.week = ActiveValue::Set(week);
    }
    if let Some(day) = patch.day {
        model.day = ActiveValue::Set(day);
    }
    if let Some(date) = patch.date {
        model.date = ActiveValue::Set(date);
    }
    if let Some(team_a_id) = patch.team_a_id {
        model.team_a_id = ActiveValue::Set(team_a_id);
    }
    if let Some(team_b_id) = patch.team_b_id {
        model.team_b_id = ActiveValue::Set(team_b_id);
    }
    if let Some(team_a_score) = patch.team_a_score {
        model.team_a_score = ActiveValue::Set(team_a_score);
    }
    if let Some(team_b_score) = patch.team_b_score {
        model.team_b_score = ActiveValue::Set(team_b_score);
    }

    if model.is_changed() {
        Ok(model.update(db).await?)
    } else {
        Ok(existing)
    }
}

/// Looks up the detail row for one side of a match.
pub async fn find_match_team_detail<C>(db: &C, match_id: i32, team_id: i32) -> Result<schema::match_team_detail::Model, DomainError> where C: ConnectionTrait {
    schema::match_team_detail::Entity::find()
        .filter(schema::match_team_detail::Column::MatchId.eq(match_id))
        .filter(schema::match_team_detail::Column::TeamId.eq(team_id))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Match team"))
}

async fn check_pairing<C>(db: &C, tournament_id: i32, team_a_id: i32, team_b_id: i32) -> Result<(), DomainError> where C: ConnectionTrait {
    if team_a_id == team_b_id {
        return Err(DomainError::invalid("A team cannot play against itself"));
    }

    for team_id in [team_a_id, team_b_id] {
        if schema::team::Entity::find_by_id(team_id).one(db).await?.is_none() {
            return Err(DomainError::NotFound("Team"));
        }
        let membership = schema::tournament_team::Entity::find()
            .filter(schema::tournament_team::Column::TournamentId.eq(tournament_id))
            .filter(schema::tournament_team::Column::TeamId.eq(team_id))
            .count(db)
            .await?;
        if membership == 0 {
            return Err(DomainError::Invalid(format!("Team {} is not part of tournament {}", team_id, tournament_id)));
        }
    }
    Ok(())
}

async fn repoint_team<C>(db: &C, match_: &schema::matches::Model, old_team: i32, new_team: i32) -> Result<(), DbErr> where C: ConnectionTrait {
    let detail = schema::match_team_detail::Entity::find()
        .filter(schema::match_team_detail::Column::MatchId.eq(match_.match_id))
        .filter(schema::match_team_detail::Column::TeamId.eq(old_team))
        .one(db)
        .await?;

    if let Some(detail) = detail {
        schema::player_match::Entity::delete_many()
            .filter(schema::player_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
            .exec(db)
            .await?;
        schema::coach_match::Entity::delete_many()
            .filter(schema::coach_match::Column::MatchTeamDetailId.eq(detail.match_team_detail_id))
            .exec(db)
            .await?;
        schema::match_team_detail::ActiveModel {
            match_team_detail_id: ActiveValue::Unchanged(detail.match_team_detail_id),
            team_id: ActiveValue::Set(new_team),
            ..Default::default()
        }.update(db).await?;
    }

    let game_ids: Vec<i32> = schema::game::Entity::find()
        .filter(schema::game::Column::MatchId.eq(match_.match_id))
        .all(db)
        .await?
        .into_iter()
        .map(|g| g.game_id)
        .collect();
    if game_ids.is_empty() {
        return Ok(());
    }

    for column in [
        schema::game::Column::FirstPickTeamId,
        schema::game::Column::SecondPickTeamId,
        schema::game::Column::WinnerTeamId,
    ] {
        schema::game::Entity::update_many()
            .col_expr(column, Expr::value(new_team))
            .filter(schema::game::Column::GameId.is_in(game_ids.clone()))
            .filter(column.eq(old_team))
            .exec(db)
            .await?;
    }

    schema::game_result::Entity::update_many()
        .col_expr(schema::game_result::Column::TeamId, Expr::value(new_team))
        .filter(schema::game_result::Column::GameId.is_in(game_ids.clone()))
        .filter(schema::game_result::Column::TeamId.eq(old_team))
        .exec(db)
        .await?;
    schema::turtle_result::Entity::update_many()
        .col_expr(schema::turtle_result::Column::TeamId, Expr::value(new_team))
        .filter(schema::turtle_result::Column::GameId.is_in(game_ids.clone()))
        .filter(schema::turtle_result::Column::TeamId.eq(old_team))
        .exec(db)
        .await?;
    schema::lord_result::Entity::update_many()
        .col_expr(schema::lord_result::Column::TeamId, Expr::value(new_team))
        .filter(schema::lord_result::Column::GameId.is_in(game_ids.clone()))
        .filter(schema::lord_result::Column::TeamId.eq(old_team))
        .exec(db)
        .await?;
    schema::trio_mid::Entity::update_many()
        .col_expr(schema::trio_mid::Column::TeamId, Expr::value(new_team))
        .filter(schema::trio_mid::Column::GameId.is_in(game_ids.clone()))
        .filter(schema::trio_mid::Column::TeamId.eq(old_team))
        .exec(db)
        .await?;
    schema::goldlaner::Entity::update_many()
        .col_expr(schema::goldlaner::Column::TeamId, Expr::value(new_team))
        .filter(schema::goldlaner::Column::GameId.is_in(game_ids.clone()))
        .filter(schema::goldlaner::Column::TeamId.eq(old_team))
        .exec(db)
        .await?;
    schema::explaner::Entity::update_many()
        .col_expr(schema::explaner::Column::TeamId, Expr::value(new_team))
        .filter(schema::explaner::Column::GameId.is_in(game_ids))
        .filter(schema::explaner::Column::TeamId.eq(old_team))
        .exec(db)
        .await?;

    Ok(())
}
