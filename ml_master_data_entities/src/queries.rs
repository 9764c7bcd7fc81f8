use std::collections::HashMap;

use itertools::Itertools;
use sea_orm::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::schema;

/// Short form of a team embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: i32,
    pub name: String,
    pub season: String,
}

impl From<schema::team::Model> for TeamSummary {
    fn from(team: schema::team::Model) -> Self {
        TeamSummary { id: team.team_id, name: team.name, image: team.image }
    }
}

impl From<schema::hero::Model> for HeroSummary {
    fn from(hero: schema::hero::Model) -> Self {
        HeroSummary { id: hero.hero_id, name: hero.name, image: hero.image }
    }
}

impl From<schema::tournament::Model> for TournamentSummary {
    fn from(tournament: schema::tournament::Model) -> Self {
        TournamentSummary { id: tournament.tournament_id, name: tournament.name, season: tournament.season }
    }
}

/// A record together with the team it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithTeam<M> {
    #[serde(flatten)]
    pub record: M,
    pub team: Option<TeamSummary>,
}

/// A record together with the hero it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithHero<M> {
    #[serde(flatten)]
    pub record: M,
    pub hero: Option<HeroSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub record: schema::matches::Model,
    pub tournament: Option<TournamentSummary>,
    pub team_a: Option<TeamSummary>,
    pub team_b: Option<TeamSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    #[serde(flatten)]
    pub record: schema::game::Model,
    pub first_pick_team: Option<TeamSummary>,
    pub second_pick_team: Option<TeamSummary>,
    pub winner_team: Option<TeamSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroPickView {
    #[serde(flatten)]
    pub record: schema::hero_pick::Model,
    pub hero: Option<HeroSummary>,
    pub games: Vec<schema::hero_pick_game::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroBanView {
    #[serde(flatten)]
    pub record: schema::hero_ban::Model,
    pub hero: Option<HeroSummary>,
    pub games: Vec<schema::hero_ban_game::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrioMidView {
    #[serde(flatten)]
    pub record: schema::trio_mid::Model,
    pub hero: Option<HeroSummary>,
    pub opponents: Vec<HeroSummary>,
}

pub async fn find_with_team<C, E>(db: &C, query: Select<E>) -> Result<Vec<WithTeam<E::Model>>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait + Related<schema::team::Entity>,
{
    Ok(
        query.find_also_related(schema::team::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(record, team)| WithTeam { record, team: team.map(Into::into) })
            .collect()
    )
}

pub async fn find_with_hero<C, E>(db: &C, query: Select<E>) -> Result<Vec<WithHero<E::Model>>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait + Related<schema::hero::Entity>,
{
    Ok(
        query.find_also_related(schema::hero::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(record, hero)| WithHero { record, hero: hero.map(Into::into) })
            .collect()
    )
}

pub async fn team_summaries<C, I>(db: &C, team_ids: I) -> Result<HashMap<i32, TeamSummary>, DbErr> where C: ConnectionTrait, I: IntoIterator<Item = i32> {
    let team_ids = team_ids.into_iter().unique().collect_vec();
    if team_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(
        schema::team::Entity::find()
            .filter(schema::team::Column::TeamId.is_in(team_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|team| (team.team_id, team.into()))
            .collect()
    )
}

pub async fn hero_summaries<C, I>(db: &C, hero_ids: I) -> Result<HashMap<i32, HeroSummary>, DbErr> where C: ConnectionTrait, I: IntoIterator<Item = i32> {
    let hero_ids = hero_ids.into_iter().unique().collect_vec();
    if hero_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(
        schema::hero::Entity::find()
            .filter(schema::hero::Column::HeroId.is_in(hero_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|hero| (hero.hero_id, hero.into()))
            .collect()
    )
}

/// Teams registered for a tournament, ordered by name.
pub async fn query_tournament_teams<C>(db: &C, tournament_id: i32) -> Result<Vec<TeamSummary>, DbErr> where C: ConnectionTrait {
    Ok(
        schema::tournament_team::Entity::find()
            .filter(schema::tournament_team::Column::TournamentId.eq(tournament_id))
            .find_also_related(schema::team::Entity)
            .order_by_asc(schema::team::Column::Name)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, team)| team.map(Into::into))
            .collect()
    )
}

pub async fn query_matches<C>(db: &C, query: Select<schema::matches::Entity>) -> Result<Vec<MatchView>, DbErr> where C: ConnectionTrait {
    let matches = query
        .order_by_asc(schema::matches::Column::Week)
        .order_by_asc(schema::matches::Column::Day)
        .order_by_asc(schema::matches::Column::MatchId)
        .find_also_related(schema::tournament::Entity)
        .all(db)
        .await?;
    let teams = team_summaries(db, matches.iter().flat_map(|(m, _)| m.team_ids())).await?;

    Ok(
        matches.into_iter().map(|(record, tournament)| MatchView {
            tournament: tournament.map(Into::into),
            team_a: teams.get(&record.team_a_id).cloned(),
            team_b: teams.get(&record.team_b_id).cloned(),
            record,
        }).collect()
    )
}

pub async fn query_games<C>(db: &C, query: Select<schema::game::Entity>) -> Result<Vec<GameView>, DbErr> where C: ConnectionTrait {
    let games = query
        .order_by_asc(schema::game::Column::GameNumber)
        .all(db)
        .await?;
    let teams = team_summaries(
        db,
        games.iter().flat_map(|g| [g.first_pick_team_id, g.second_pick_team_id, g.winner_team_id])
    ).await?;

    Ok(
        games.into_iter().map(|record| GameView {
            first_pick_team: teams.get(&record.first_pick_team_id).cloned(),
            second_pick_team: teams.get(&record.second_pick_team_id).cloned(),
            winner_team: teams.get(&record.winner_team_id).cloned(),
            record,
        }).collect()
    )
}

pub async fn query_hero_picks<C>(db: &C, query: Select<schema::hero_pick::Entity>) -> Result<Vec<HeroPickView>, DbErr> where C: ConnectionTrait {
    let picks = find_with_hero(db, query.order_by_asc(schema::hero_pick::Column::HeroPickId)).await?;
    let mut games = schema::hero_pick_game::Entity::find()
        .filter(schema::hero_pick_game::Column::HeroPickId.is_in(picks.iter().map(|p| p.record.hero_pick_id)))
        .order_by_asc(schema::hero_pick_game::Column::GameNumber)
        .all(db)
        .await?
        .into_iter()
        .into_group_map_by(|g| g.hero_pick_id);

    Ok(
        picks.into_iter().map(|WithHero { record, hero }| HeroPickView {
            games: games.remove(&record.hero_pick_id).unwrap_or_default(),
            record,
            hero,
        }).collect()
    )
}

pub async fn query_hero_bans<C>(db: &C, query: Select<schema::hero_ban::Entity>) -> Result<Vec<HeroBanView>, DbErr> where C: ConnectionTrait {
    let bans = find_with_hero(db, query.order_by_asc(schema::hero_ban::Column::HeroBanId)).await?;
    let mut games = schema::hero_ban_game::Entity::find()
        .filter(schema::hero_ban_game::Column::HeroBanId.is_in(bans.iter().map(|b| b.record.hero_ban_id)))
        .order_by_asc(schema::hero_ban_game::Column::GameNumber)
        .all(db)
        .await?
        .into_iter()
        .into_group_map_by(|g| g.hero_ban_id);

    Ok(
        bans.into_iter().map(|WithHero { record, hero }| HeroBanView {
            games: games.remove(&record.hero_ban_id).unwrap_or_default(),
            record,
            hero,
        }).collect()
    )
}

pub async fn query_trio_mids<C>(db: &C, query: Select<schema::trio_mid::Entity>) -> Result<Vec<TrioMidView>, DbErr> where C: ConnectionTrait {
    let trio_mids = find_with_hero(db, query.order_by_asc(schema::trio_mid::Column::TrioMidId)).await?;
    let opponent_rows = schema::trio_mid_hero::Entity::find()
        .filter(schema::trio_mid_hero::Column::TrioMidId.is_in(trio_mids.iter().map(|t| t.record.trio_mid_id)))
        .order_by_asc(schema::trio_mid_hero::Column::TrioMidHeroId)
        .all(db)
        .await?;
    let heroes = hero_summaries(db, opponent_rows.iter().map(|o| o.hero_id)).await?;
    let mut opponents = opponent_rows.into_iter()
        .filter_map(|o| heroes.get(&o.hero_id).cloned().map(|hero| (o.trio_mid_id, hero)))
        .into_group_map();

    Ok(
        trio_mids.into_iter().map(|WithHero { record, hero }| TrioMidView {
            opponents: opponents.remove(&record.trio_mid_id).unwrap_or_default(),
            record,
            hero,
        }).collect()
    )
}
