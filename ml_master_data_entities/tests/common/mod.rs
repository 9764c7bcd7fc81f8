#![allow(dead_code)]

use migration::MigratorTrait;
use ml_master_data_entities::prelude::*;
use ml_master_data_entities::schema;
use sea_orm::{prelude::*, ActiveValue, Database};

pub async fn set_up_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Ids of the records inserted by [`seed_league`].
pub struct League {
    pub tournament_id: i32,
    pub team_a: i32,
    pub team_b: i32,
    pub team_c: i32,
    pub heroes: Vec<i32>,
}

/// A tournament with three registered teams, one player and one coach per
/// team and three heroes.
pub async fn seed_league(db: &DatabaseConnection) -> Result<League, DbErr> {
    let tournament = schema::tournament::ActiveModel {
        name: ActiveValue::Set("MPL".into()),
        season: ActiveValue::Set("S13".into()),
        ..Default::default()
    }.insert(db).await?;

    let mut teams = vec![];
    for name in ["Alpha", "Bravo", "Charlie"] {
        let team = schema::team::ActiveModel {
            name: ActiveValue::Set(name.into()),
            image: ActiveValue::Set(format!("http://localhost:8080/uploads/{}.png", name.to_lowercase())),
            ..Default::default()
        }.insert(db).await?;

        schema::tournament_team::ActiveModel {
            tournament_id: ActiveValue::Set(tournament.tournament_id),
            team_id: ActiveValue::Set(team.team_id),
            ..Default::default()
        }.insert(db).await?;

        schema::player::ActiveModel {
            team_id: ActiveValue::Set(team.team_id),
            name: ActiveValue::Set(format!("{} Gold", name)),
            role: ActiveValue::Set(PlayerRole::Gold),
            image: ActiveValue::Set(format!("http://localhost:8080/uploads/{}-gold.png", name.to_lowercase())),
            ..Default::default()
        }.insert(db).await?;

        schema::coach::ActiveModel {
            team_id: ActiveValue::Set(team.team_id),
            name: ActiveValue::Set(format!("{} Coach", name)),
            role: ActiveValue::Set(CoachRole::Head),
            image: ActiveValue::Set(format!("http://localhost:8080/uploads/{}-coach.png", name.to_lowercase())),
            ..Default::default()
        }.insert(db).await?;

        teams.push(team.team_id);
    }

    let mut heroes = vec![];
    for name in ["Ling", "Fanny", "Layla"] {
        let hero = schema::hero::ActiveModel {
            name: ActiveValue::Set(name.into()),
            image: ActiveValue::Set(format!("http://localhost:8080/uploads/{}.png", name.to_lowercase())),
            ..Default::default()
        }.insert(db).await?;
        heroes.push(hero.hero_id);
    }

    Ok(League {
        tournament_id: tournament.tournament_id,
        team_a: teams[0],
        team_b: teams[1],
        team_c: teams[2],
        heroes,
    })
}
