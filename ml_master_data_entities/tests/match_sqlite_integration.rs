mod common;

use common::{seed_league, set_up_db};
use ml_master_data_entities::domain::games::{create_game, update_game, GamePatch, NewGame};
use ml_master_data_entities::domain::hero_ban::{create_hero_ban, BanFlag, NewHeroBan};
use ml_master_data_entities::domain::matches::{create_match, find_match_team_detail, update_match, MatchPatch, NewMatch};
use ml_master_data_entities::prelude::*;
use ml_master_data_entities::queries::{query_games, query_matches, query_tournament_teams};
use ml_master_data_entities::schema;
use sea_orm::{prelude::*, ActiveValue, PaginatorTrait};

fn new_match(team_a_id: i32, team_b_id: i32) -> NewMatch {
    NewMatch {
        week: 1,
        day: 2,
        date: 1_700_000_000,
        team_a_id,
        team_b_id,
        team_a_score: 0,
        team_b_score: 0,
    }
}

#[tokio::test]
async fn test_create_match_adds_two_details() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;

    let match_ = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_b)).await?;

    let mut detail_teams = schema::match_team_detail::Entity::find()
        .filter(schema::match_team_detail::Column::MatchId.eq(match_.match_id))
        .all(&db)
        .await?
        .into_iter()
        .map(|d| d.team_id)
        .collect::<Vec<_>>();
    detail_teams.sort();
    assert_eq!(detail_teams, vec![league.team_a, league.team_b]);
    Ok(())
}

#[tokio::test]
async fn test_create_match_rejects_same_team() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;

    let result = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_a)).await;
    assert!(matches!(result, Err(DomainError::Invalid(_))));
    assert_eq!(schema::matches::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_create_match_requires_membership() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let outsider = schema::team::ActiveModel {
        name: ActiveValue::Set("Delta".into()),
        image: ActiveValue::Set("".into()),
        ..Default::default()
    }.insert(&db).await?;

    let result = create_match(&db, league.tournament_id, new_match(league.team_a, outsider.team_id)).await;
    assert!(matches!(result, Err(DomainError::Invalid(_))));

    let result = create_match(&db, league.tournament_id, new_match(league.team_a, 999)).await;
    assert!(matches!(result, Err(DomainError::NotFound("Team"))));
    Ok(())
}

#[tokio::test]
async fn test_update_match_repoints_detail_and_games() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_b)).await?;
    let game = create_game(&db, &match_, NewGame {
        first_pick_team_id: league.team_b,
        second_pick_team_id: league.team_a,
        winner_team_id: league.team_b,
        game_number: 1,
        video_link: None,
        full_draft_image: None,
    }).await?;
    let old_detail = find_match_team_detail(&db, match_.match_id, league.team_b).await?;

    let updated = update_match(&db, match_.clone(), MatchPatch {
        team_b_id: Some(league.team_c),
        team_a_score: Some(1),
        ..Default::default()
    }).await?;

    assert_eq!(updated.team_b_id, league.team_c);
    assert_eq!(updated.team_a_score, 1);

    let new_detail = find_match_team_detail(&db, match_.match_id, league.team_c).await?;
    assert_eq!(new_detail.match_team_detail_id, old_detail.match_team_detail_id);
    assert!(find_match_team_detail(&db, match_.match_id, league.team_b).await.is_err());
    assert_eq!(
        schema::match_team_detail::Entity::find().filter(schema::match_team_detail::Column::MatchId.eq(match_.match_id)).count(&db).await?,
        2
    );

    let game = schema::game::Entity::find_by_id(game.game_id).one(&db).await?.unwrap();
    assert_eq!(game.first_pick_team_id, league.team_c);
    assert_eq!(game.second_pick_team_id, league.team_a);
    assert_eq!(game.winner_team_id, league.team_c);

    let winner_result = schema::game_result::Entity::find()
        .filter(schema::game_result::Column::GameId.eq(game.game_id))
        .filter(schema::game_result::Column::TeamId.eq(league.team_c))
        .one(&db)
        .await?
        .unwrap();
    assert_eq!(winner_result.result, GameOutcome::Win);
    Ok(())
}

#[tokio::test]
async fn test_update_match_swapping_sides_keeps_details() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_b)).await?;

    let updated = update_match(&db, match_.clone(), MatchPatch {
        team_a_id: Some(league.team_b),
        team_b_id: Some(league.team_a),
        ..Default::default()
    }).await?;
    assert_eq!(updated.team_ids(), [league.team_b, league.team_a]);

    let result = update_match(&db, updated, MatchPatch {
        team_a_id: Some(league.team_a),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(DomainError::Invalid(_))));
    Ok(())
}

#[tokio::test]
async fn test_game_numbers_are_unique_per_match() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_b)).await?;
    let other = create_match(&db, league.tournament_id, new_match(league.team_b, league.team_c)).await?;

    let game = NewGame {
        first_pick_team_id: league.team_a,
        second_pick_team_id: league.team_b,
        winner_team_id: league.team_a,
        game_number: 1,
        video_link: Some("https://youtu.be/xyz".into()),
        full_draft_image: None,
    };
    create_game(&db, &match_, game.clone()).await?;
    let duplicate = create_game(&db, &match_, game.clone()).await;
    assert!(matches!(duplicate, Err(DomainError::Invalid(_))));

    let not_positive = create_game(&db, &match_, NewGame { game_number: 0, ..game.clone() }).await;
    assert!(matches!(not_positive, Err(DomainError::Invalid(_))));

    let same_pick = create_game(&db, &match_, NewGame { game_number: 2, second_pick_team_id: league.team_a, ..game.clone() }).await;
    assert!(matches!(same_pick, Err(DomainError::Invalid(_))));

    let foreign_team = create_game(&db, &match_, NewGame { game_number: 2, winner_team_id: league.team_c, ..game.clone() }).await;
    assert!(matches!(foreign_team, Err(DomainError::Invalid(_))));

    create_game(&db, &other, NewGame {
        first_pick_team_id: league.team_b,
        second_pick_team_id: league.team_c,
        winner_team_id: league.team_c,
        ..game
    }).await?;
    assert_eq!(schema::game::Entity::find().count(&db).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_renumbering_flagged_game_is_rejected() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_b)).await?;
    let game = NewGame {
        first_pick_team_id: league.team_a,
        second_pick_team_id: league.team_b,
        winner_team_id: league.team_a,
        game_number: 1,
        video_link: None,
        full_draft_image: None,
    };
    let flagged = create_game(&db, &match_, game.clone()).await?;
    let unflagged = create_game(&db, &match_, NewGame { game_number: 2, ..game }).await?;

    let detail = find_match_team_detail(&db, match_.match_id, league.team_b).await?;
    create_hero_ban(&db, detail.match_team_detail_id, NewHeroBan {
        hero_id: league.heroes[0],
        first_phase: 1,
        second_phase: 0,
        games: vec![BanFlag { game_number: 1, is_banned: false }],
    }).await?;

    let renumbered = update_game(&db, &match_, flagged.clone(), GamePatch { game_number: Some(3), ..Default::default() }).await;
    assert!(matches!(renumbered, Err(DomainError::Invalid(_))));
    let stored = schema::game::Entity::find_by_id(flagged.game_id).one(&db).await?.unwrap();
    assert_eq!(stored.game_number, 1);

    // Keeping the number is fine
    update_game(&db, &match_, flagged, GamePatch { game_number: Some(1), video_link: Some("https://youtu.be/g1".into()), ..Default::default() }).await?;

    let moved = update_game(&db, &match_, unflagged, GamePatch { game_number: Some(3), ..Default::default() }).await?;
    assert_eq!(moved.game_number, 3);
    Ok(())
}

#[tokio::test]
async fn test_game_results_follow_winner() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_match(&db, league.tournament_id, new_match(league.team_a, league.team_b)).await?;
    let game = create_game(&db, &match_, NewGame {
        first_pick_team_id: league.team_a,
        second_pick_team_id: league.team_b,
        winner_team_id: league.team_a,
        game_number: 1,
        video_link: None,
        full_draft_image: None,
    }).await?;

    let outcome_of = |results: &Vec<schema::game_result::Model>, team_id: i32| {
        results.iter().find(|r| r.team_id == team_id).map(|r| r.result)
    };

    let results = schema::game_result::Entity::find().all(&db).await?;
    assert_eq!(results.len(), 2);
    assert_eq!(outcome_of(&results, league.team_a), Some(GameOutcome::Win));
    assert_eq!(outcome_of(&results, league.team_b), Some(GameOutcome::Lose));

    let updated = update_game(&db, &match_, game, GamePatch {
        winner_team_id: Some(league.team_b),
        ..Default::default()
    }).await?;
    assert_eq!(updated.winner_team_id, league.team_b);

    let results = schema::game_result::Entity::find().all(&db).await?;
    assert_eq!(results.len(), 2);
    assert_eq!(outcome_of(&results, league.team_a), Some(GameOutcome::Lose));
    assert_eq!(outcome_of(&results, league.team_b), Some(GameOutcome::Win));
    Ok(())
}

#[tokio::test]
async fn test_match_and_game_projections() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_match(&db, league.tournament_id, new_match(league.team_b, league.team_a)).await?;
    create_game(&db, &match_, NewGame {
        first_pick_team_id: league.team_a,
        second_pick_team_id: league.team_b,
        winner_team_id: league.team_b,
        game_number: 1,
        video_link: None,
        full_draft_image: None,
    }).await?;

    let matches = query_matches(
        &db,
        schema::matches::Entity::find().filter(schema::matches::Column::TournamentId.eq(league.tournament_id))
    ).await?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record, match_);
    assert_eq!(matches[0].tournament.as_ref().map(|t| t.season.as_str()), Some("S13"));
    assert_eq!(matches[0].team_a.as_ref().map(|t| t.name.as_str()), Some("Bravo"));
    assert_eq!(matches[0].team_b.as_ref().map(|t| t.name.as_str()), Some("Alpha"));

    let games = query_games(
        &db,
        schema::game::Entity::find().filter(schema::game::Column::MatchId.eq(match_.match_id))
    ).await?;
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].first_pick_team.as_ref().map(|t| t.id), Some(league.team_a));
    assert_eq!(games[0].winner_team.as_ref().map(|t| t.id), Some(league.team_b));

    let teams = query_tournament_teams(&db, league.tournament_id).await?;
    assert_eq!(teams.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["Alpha", "Bravo", "Charlie"]);
    Ok(())
}
