use itertools::Itertools;
use sea_orm::prelude::*;
use sea_orm::{ConnectionTrait, QuerySelect};
use tracing::info;

use crate::domain::{games, hero_ban, hero_pick, trio_mid};
use crate::error::DomainError;
use crate::schema;

/// Deletes a game of `match_id` together with its per-game annotations.
///
/// Pick and ban flags recorded under the game's number are removed as well, in
/// every match, and the owning `total` counters are decremented. Returns
/// the image URLs that became orphaned and should be unlinked after commit.
pub async fn delete_game<C>(db: &C, match_id: i32, game_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let game = games::find_game(db, match_id, game_id).await?;
    let images = delete_game_rows(db, game).await?;
    info!("Deleted game {} of match {}", game_id, match_id);
    Ok(images)
}

pub async fn delete_match<C>(db: &C, match_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let match_ = schema::matches::Entity::find_by_id(match_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Match"))?;

    let images = delete_match_rows(db, match_).await?;
    info!("Deleted match {}", match_id);
    Ok(images)
}

pub async fn delete_tournament<C>(db: &C, tournament_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let tournament = schema::tournament::Entity::find_by_id(tournament_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Tournament"))?;

    let matches = schema::matches::Entity::find()
        .filter(schema::matches::Column::TournamentId.eq(tournament.tournament_id))
        .all(db)
        .await?;

    let mut images = vec![];
    for match_ in matches {
        images.extend(delete_match_rows(db, match_).await?);
    }

    schema::tournament_team::Entity::delete_many()
        .filter(schema::tournament_team::Column::TournamentId.eq(tournament.tournament_id))
        .exec(db)
        .await?;
    schema::tournament::Entity::delete_by_id(tournament.tournament_id).exec(db).await?;

    info!("Deleted tournament {}", tournament_id);
    Ok(images)
}

/// Removes a team, every match it played in and its roster.
pub async fn delete_team<C>(db: &C, team_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let team = schema::team::Entity::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Team"))?;

    let matches = schema::matches::Entity::find()
        .filter(
            schema::matches::Column::TeamAId.eq(team.team_id)
                .or(schema::matches::Column::TeamBId.eq(team.team_id))
        )
        .all(db)
        .await?;

    let mut images = vec![];
    for match_ in matches {
        images.extend(delete_match_rows(db, match_).await?);
    }

    let players = schema::player::Entity::find()
        .filter(schema::player::Column::TeamId.eq(team.team_id))
        .all(db)
        .await?;
    for player in players {
        images.push(delete_player_rows(db, player).await?);
    }

    let coaches = schema::coach::Entity::find()
        .filter(schema::coach::Column::TeamId.eq(team.team_id))
        .all(db)
        .await?;
    for coach in coaches {
        images.push(delete_coach_rows(db, coach).await?);
    }

    schema::tournament_team::Entity::delete_many()
        .filter(schema::tournament_team::Column::TeamId.eq(team.team_id))
        .exec(db)
        .await?;
    schema::team::Entity::delete_by_id(team.team_id).exec(db).await?;

    images.push(team.image);
    info!("Deleted team {}", team_id);
    Ok(images)
}

pub async fn delete_player<C>(db: &C, player_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let player = schema::player::Entity::find_by_id(player_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Player"))?;

    let image = delete_player_rows(db, player).await?;
    info!("Deleted player {}", player_id);
    Ok(vec![image])
}

pub async fn delete_coach<C>(db: &C, coach_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let coach = schema::coach::Entity::find_by_id(coach_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Coach"))?;

    let image = delete_coach_rows(db, coach).await?;
    info!("Deleted coach {}", coach_id);
    Ok(vec![image])
}

/// Removes a hero and every annotation that mentions it.
pub async fn delete_hero<C>(db: &C, hero_id: i32) -> Result<Vec<String>, DomainError> where C: ConnectionTrait {
    let hero = schema::hero::Entity::find_by_id(hero_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("Hero"))?;

    let pick_ids: Vec<i32> = schema::hero_pick::Entity::find()
        .select_only()
        .column(schema::hero_pick::Column::HeroPickId)
        .filter(schema::hero_pick::Column::HeroId.eq(hero.hero_id))
        .into_tuple()
        .all(db)
        .await?;
    hero_pick::delete_with_games(db, pick_ids).await?;

    let ban_ids: Vec<i32> = schema::hero_ban::Entity::find()
        .select_only()
        .column(schema::hero_ban::Column::HeroBanId)
        .filter(schema::hero_ban::Column::HeroId.eq(hero.hero_id))
        .into_tuple()
        .all(db)
        .await?;
    hero_ban::delete_with_games(db, ban_ids).await?;

    schema::trio_mid_hero::Entity::delete_many()
        .filter(schema::trio_mid_hero::Column::HeroId.eq(hero.hero_id))
        .exec(db)
        .await?;
    let trio_mid_ids: Vec<i32> = schema::trio_mid::Entity::find()
        .select_only()
        .column(schema::trio_mid::Column::TrioMidId)
        .filter(schema::trio_mid::Column::HeroId.eq(hero.hero_id))
        .into_tuple()
        .all(db)
        .await?;
    trio_mid::delete_with_opponents(db, trio_mid_ids).await?;

    schema::priority_pick::Entity::delete_many()
        .filter(schema::priority_pick::Column::HeroId.eq(hero.hero_id))
        .exec(db)
        .await?;
    schema::priority_ban::Entity::delete_many()
        .filter(schema::priority_ban::Column::HeroId.eq(hero.hero_id))
        .exec(db)
        .await?;
    schema::flex_pick::Entity::delete_many()
        .filter(schema::flex_pick::Column::HeroId.eq(hero.hero_id))
        .exec(db)
        .await?;
    schema::goldlaner::Entity::delete_many()
        .filter(schema::goldlaner::Column::HeroId.eq(hero.hero_id))
        .exec(db)
        .await?;
    schema::explaner::Entity::delete_many()
        .filter(schema::explaner::Column::HeroId.eq(hero.hero_id))
        .exec(db)
        .await?;

    schema::hero::Entity::delete_by_id(hero.hero_id).exec(db).await?;

    info!("Deleted hero {}", hero_id);
    Ok(vec![hero.image])
}

async fn delete_game_rows<C>(db: &C, game: schema::game::Model) -> Result<Vec<String>, DbErr> where C: ConnectionTrait {
    let trio_mid_ids: Vec<i32> = schema::trio_mid::Entity::find()
        .select_only()
        .column(schema::trio_mid::Column::TrioMidId)
        .filter(schema::trio_mid::Column::GameId.eq(game.game_id))
        .into_tuple()
        .all(db)
        .await?;
    trio_mid::delete_with_opponents(db, trio_mid_ids).await?;

    schema::goldlaner::Entity::delete_many()
        .filter(schema::goldlaner::Column::GameId.eq(game.game_id))
        .exec(db)
        .await?;
    schema::explaner::Entity::delete_many()
        .filter(schema::explaner::Column::GameId.eq(game.game_id))
        .exec(db)
        .await?;
    schema::lord_result::Entity::delete_many()
        .filter(schema::lord_result::Column::GameId.eq(game.game_id))
        .exec(db)
        .await?;
    schema::turtle_result::Entity::delete_many()
        .filter(schema::turtle_result::Column::GameId.eq(game.game_id))
        .exec(db)
        .await?;
    schema::game_result::Entity::delete_many()
        .filter(schema::game_result::Column::GameId.eq(game.game_id))
        .exec(db)
        .await?;

    hero_pick::remove_game_number(db, game.game_number).await?;
    hero_ban::remove_game_number(db, game.game_number).await?;

    schema::game::Entity::delete_by_id(game.game_id).exec(db).await?;

    Ok(game.full_draft_image.into_iter().collect())
}

async fn delete_match_rows<C>(db: &C, match_: schema::matches::Model) -> Result<Vec<String>, DbErr> where C: ConnectionTrait {
    let games = schema::game::Entity::find()
        .filter(schema::game::Column::MatchId.eq(match_.match_id))
        .all(db)
        .await?;

    let mut images = vec![];
    for game in games {
        images.extend(delete_game_rows(db, game).await?);
    }

    let detail_ids: Vec<i32> = schema::match_team_detail::Entity::find()
        .select_only()
        .column(schema::match_team_detail::Column::MatchTeamDetailId)
        .filter(schema::match_team_detail::Column::MatchId.eq(match_.match_id))
        .into_tuple()
        .all(db)
        .await?;

    let pick_ids: Vec<i32> = schema::hero_pick::Entity::find()
        .select_only()
        .column(schema::hero_pick::Column::HeroPickId)
        .filter(schema::hero_pick::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .into_tuple()
        .all(db)
        .await?;
    hero_pick::delete_with_games(db, pick_ids).await?;

    let ban_ids: Vec<i32> = schema::hero_ban::Entity::find()
        .select_only()
        .column(schema::hero_ban::Column::HeroBanId)
        .filter(schema::hero_ban::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .into_tuple()
        .all(db)
        .await?;
    hero_ban::delete_with_games(db, ban_ids).await?;

    schema::flex_pick::Entity::delete_many()
        .filter(schema::flex_pick::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .exec(db)
        .await?;
    schema::priority_pick::Entity::delete_many()
        .filter(schema::priority_pick::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .exec(db)
        .await?;
    schema::priority_ban::Entity::delete_many()
        .filter(schema::priority_ban::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .exec(db)
        .await?;
    schema::coach_match::Entity::delete_many()
        .filter(schema::coach_match::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .exec(db)
        .await?;
    schema::player_match::Entity::delete_many()
        .filter(schema::player_match::Column::MatchTeamDetailId.is_in(detail_ids.clone()))
        .exec(db)
        .await?;

    schema::match_team_detail::Entity::delete_many()
        .filter(schema::match_team_detail::Column::MatchTeamDetailId.is_in(detail_ids))
        .exec(db)
        .await?;
    schema::matches::Entity::delete_by_id(match_.match_id).exec(db).await?;

    Ok(images)
}

async fn delete_player_rows<C>(db: &C, player: schema::player::Model) -> Result<String, DbErr> where C: ConnectionTrait {
    schema::player_match::Entity::delete_many()
        .filter(schema::player_match::Column::PlayerId.eq(player.player_id))
        .exec(db)
        .await?;
    schema::player::Entity::delete_by_id(player.player_id).exec(db).await?;
    Ok(player.image)
}

async fn delete_coach_rows<C>(db: &C, coach: schema::coach::Model) -> Result<String, DbErr> where C: ConnectionTrait {
    schema::coach_match::Entity::delete_many()
        .filter(schema::coach_match::Column::CoachId.eq(coach.coach_id))
        .exec(db)
        .await?;
    schema::coach::Entity::delete_by_id(coach.coach_id).exec(db).await?;
    Ok(coach.image)
}

/// Image URLs deduplicated in first-seen order.
pub fn distinct_images(images: Vec<String>) -> Vec<String> {
    images.into_iter().filter(|image| !image.is_empty()).unique().collect()
}
