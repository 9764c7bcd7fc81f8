use ml_master_data_entities::{domain::games::find_game, schema, DomainError};
use sea_orm::{prelude::*, ConnectionTrait};

use crate::response::{handle_error, APIError};

/// Loads a record by key, answering 404 with `what` when it is absent.
pub async fn find_record<E, C>(db: &C, id: i32, what: &'static str) -> Result<E::Model, APIError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await
        .map_err(handle_error)?
        .ok_or_else(|| DomainError::NotFound(what).into())
}

pub async fn find_match<C>(db: &C, match_id: i32) -> Result<schema::matches::Model, APIError> where C: ConnectionTrait {
    find_record::<schema::matches::Entity, _>(db, match_id, "Match").await
}

/// A match and one of its games, both of which must exist.
pub async fn find_match_game<C>(db: &C, match_id: i32, game_id: i32) -> Result<(schema::matches::Model, schema::game::Model), APIError> where C: ConnectionTrait {
    let match_ = find_match(db, match_id).await?;
    let game = find_game(db, match_id, game_id).await?;
    Ok((match_, game))
}

pub async fn ensure_hero<C>(db: &C, hero_id: i32) -> Result<(), APIError> where C: ConnectionTrait {
    find_record::<schema::hero::Entity, _>(db, hero_id, "Hero").await.map(|_| ())
}

pub async fn ensure_team<C>(db: &C, team_id: i32) -> Result<(), APIError> where C: ConnectionTrait {
    find_record::<schema::team::Entity, _>(db, team_id, "Team").await.map(|_| ())
}

/// Per-game and per-team annotations may only name one of the two sides.
pub fn ensure_match_team(match_: &schema::matches::Model, team_id: i32) -> Result<(), APIError> {
    if match_.has_team(team_id) {
        Ok(())
    } else {
        Err(DomainError::invalid(format!("Team {} does not play in match {}", team_id, match_.match_id)).into())
    }
}
