mod common;

use common::{seed_league, set_up_db, League};
use ml_master_data_entities::domain::cascade;
use ml_master_data_entities::domain::games::{create_game, NewGame};
use ml_master_data_entities::domain::hero_ban::{create_hero_ban, BanFlag, NewHeroBan};
use ml_master_data_entities::domain::hero_pick::{create_hero_pick, NewHeroPick, PickFlag};
use ml_master_data_entities::domain::matches::{create_match, find_match_team_detail, NewMatch};
use ml_master_data_entities::domain::trio_mid::{create_trio_mid, NewTrioMid};
use ml_master_data_entities::prelude::*;
use ml_master_data_entities::schema;
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, PaginatorTrait, TransactionTrait};

async fn create_test_match(db: &DatabaseConnection, league: &League, team_a: i32, team_b: i32) -> Result<schema::matches::Model, anyhow::Error> {
    let txn = db.begin().await?;
    let match_ = create_match(&txn, league.tournament_id, NewMatch {
        week: 1,
        day: 1,
        date: 1_700_000_000,
        team_a_id: team_a,
        team_b_id: team_b,
        team_a_score: 0,
        team_b_score: 0,
    }).await?;
    txn.commit().await?;
    Ok(match_)
}

async fn create_test_game(db: &DatabaseConnection, match_: &schema::matches::Model, game_number: i32) -> Result<schema::game::Model, anyhow::Error> {
    let txn = db.begin().await?;
    let game = create_game(&txn, match_, NewGame {
        first_pick_team_id: match_.team_a_id,
        second_pick_team_id: match_.team_b_id,
        winner_team_id: match_.team_a_id,
        game_number,
        video_link: None,
        full_draft_image: Some(format!("http://localhost:8080/uploads/draft-{}.png", game_number)),
    }).await?;
    txn.commit().await?;
    Ok(game)
}

#[tokio::test]
async fn test_delete_game_decrements_pick_totals() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    let game_1 = create_test_game(&db, &match_, 1).await?;
    create_test_game(&db, &match_, 2).await?;

    let detail = find_match_team_detail(&db, match_.match_id, league.team_a).await?;
    let pick = create_hero_pick(&db, detail.match_team_detail_id, NewHeroPick {
        hero_id: league.heroes[0],
        first_phase: 1,
        second_phase: 1,
        games: vec![
            PickFlag { game_number: 1, is_picked: true },
            PickFlag { game_number: 2, is_picked: true },
        ],
    }).await?;
    let ban = create_hero_ban(&db, detail.match_team_detail_id, NewHeroBan {
        hero_id: league.heroes[1],
        first_phase: 1,
        second_phase: 0,
        games: vec![
            BanFlag { game_number: 1, is_banned: false },
            BanFlag { game_number: 2, is_banned: true },
        ],
    }).await?;
    assert_eq!(pick.total, 2);
    assert_eq!(ban.total, 1);

    let txn = db.begin().await?;
    let images = cascade::delete_game(&txn, match_.match_id, game_1.game_id).await?;
    txn.commit().await?;

    assert_eq!(images, vec!["http://localhost:8080/uploads/draft-1.png".to_string()]);

    let pick = schema::hero_pick::Entity::find_by_id(pick.hero_pick_id).one(&db).await?.unwrap();
    assert_eq!(pick.total, 1);
    let remaining_pick_games = schema::hero_pick_game::Entity::find()
        .filter(schema::hero_pick_game::Column::HeroPickId.eq(pick.hero_pick_id))
        .all(&db).await?;
    assert_eq!(remaining_pick_games.len(), 1);
    assert_eq!(remaining_pick_games[0].game_number, 2);

    let ban = schema::hero_ban::Entity::find_by_id(ban.hero_ban_id).one(&db).await?.unwrap();
    assert_eq!(ban.total, 1);
    assert_eq!(
        schema::hero_ban_game::Entity::find().filter(schema::hero_ban_game::Column::GameNumber.eq(1)).count(&db).await?,
        0
    );

    assert!(schema::game::Entity::find_by_id(game_1.game_id).one(&db).await?.is_none());
    assert_eq!(
        schema::game_result::Entity::find().filter(schema::game_result::Column::GameId.eq(game_1.game_id)).count(&db).await?,
        0
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_game_clears_number_in_every_match() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let first = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    let second = create_test_match(&db, &league, league.team_a, league.team_c).await?;
    let game = create_test_game(&db, &first, 1).await?;
    create_test_game(&db, &second, 1).await?;

    let detail = find_match_team_detail(&db, second.match_id, league.team_a).await?;
    let pick = create_hero_pick(&db, detail.match_team_detail_id, NewHeroPick {
        hero_id: league.heroes[0],
        first_phase: 1,
        second_phase: 0,
        games: vec![
            PickFlag { game_number: 1, is_picked: true },
            PickFlag { game_number: 2, is_picked: true },
        ],
    }).await?;
    let ban = create_hero_ban(&db, detail.match_team_detail_id, NewHeroBan {
        hero_id: league.heroes[1],
        first_phase: 1,
        second_phase: 0,
        games: vec![BanFlag { game_number: 1, is_banned: true }],
    }).await?;

    cascade::delete_game(&db, first.match_id, game.game_id).await?;

    let pick = schema::hero_pick::Entity::find_by_id(pick.hero_pick_id).one(&db).await?.unwrap();
    assert_eq!(pick.total, 1);
    let remaining: Vec<i32> = schema::hero_pick_game::Entity::find()
        .filter(schema::hero_pick_game::Column::HeroPickId.eq(pick.hero_pick_id))
        .all(&db)
        .await?
        .into_iter()
        .map(|g| g.game_number)
        .collect();
    assert_eq!(remaining, vec![2]);

    let ban = schema::hero_ban::Entity::find_by_id(ban.hero_ban_id).one(&db).await?.unwrap();
    assert_eq!(ban.total, 0);
    assert_eq!(
        schema::hero_ban_game::Entity::find().filter(schema::hero_ban_game::Column::HeroBanId.eq(ban.hero_ban_id)).count(&db).await?,
        0
    );

    // The other match's game itself is untouched
    assert_eq!(
        schema::game::Entity::find().filter(schema::game::Column::MatchId.eq(second.match_id)).count(&db).await?,
        1
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_game_of_other_match_is_not_found() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let first = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    let second = create_test_match(&db, &league, league.team_b, league.team_c).await?;
    let game = create_test_game(&db, &first, 1).await?;

    let result = cascade::delete_game(&db, second.match_id, game.game_id).await;
    assert!(matches!(result, Err(DomainError::NotFound("Game"))));
    assert!(schema::game::Entity::find_by_id(game.game_id).one(&db).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_delete_team_cascades_through_matches() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ab = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    let match_ca = create_test_match(&db, &league, league.team_c, league.team_a).await?;
    let match_bc = create_test_match(&db, &league, league.team_b, league.team_c).await?;
    create_test_game(&db, &match_ab, 1).await?;

    let player = schema::player::Entity::find()
        .filter(schema::player::Column::TeamId.eq(league.team_a))
        .one(&db).await?.unwrap();
    let detail = find_match_team_detail(&db, match_ab.match_id, league.team_a).await?;
    schema::player_match::ActiveModel {
        match_team_detail_id: ActiveValue::Set(detail.match_team_detail_id),
        player_id: ActiveValue::Set(player.player_id),
        ..Default::default()
    }.insert(&db).await?;

    let txn = db.begin().await?;
    let images = cascade::delete_team(&txn, league.team_a).await?;
    txn.commit().await?;

    assert!(images.contains(&"http://localhost:8080/uploads/alpha.png".to_string()));
    assert!(images.contains(&"http://localhost:8080/uploads/alpha-gold.png".to_string()));
    assert!(images.contains(&"http://localhost:8080/uploads/alpha-coach.png".to_string()));
    assert!(images.contains(&"http://localhost:8080/uploads/draft-1.png".to_string()));

    assert!(schema::team::Entity::find_by_id(league.team_a).one(&db).await?.is_none());
    assert!(schema::matches::Entity::find_by_id(match_ab.match_id).one(&db).await?.is_none());
    assert!(schema::matches::Entity::find_by_id(match_ca.match_id).one(&db).await?.is_none());
    assert!(schema::matches::Entity::find_by_id(match_bc.match_id).one(&db).await?.is_some());

    assert_eq!(schema::player::Entity::find().filter(schema::player::Column::TeamId.eq(league.team_a)).count(&db).await?, 0);
    assert_eq!(schema::coach::Entity::find().filter(schema::coach::Column::TeamId.eq(league.team_a)).count(&db).await?, 0);
    assert_eq!(schema::player_match::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::tournament_team::Entity::find().filter(schema::tournament_team::Column::TeamId.eq(league.team_a)).count(&db).await?, 0);
    assert_eq!(schema::game::Entity::find().count(&db).await?, 0);

    let details = schema::match_team_detail::Entity::find().all(&db).await?;
    assert_eq!(details.len(), 2);
    assert!(details.iter().all(|d| d.match_id == match_bc.match_id));

    assert_eq!(schema::team::Entity::find().count(&db).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_delete_tournament_removes_schedule_and_membership() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    create_test_game(&db, &match_, 1).await?;

    let txn = db.begin().await?;
    cascade::delete_tournament(&txn, league.tournament_id).await?;
    txn.commit().await?;

    assert!(schema::tournament::Entity::find_by_id(league.tournament_id).one(&db).await?.is_none());
    assert_eq!(schema::matches::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::match_team_detail::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::game::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::tournament_team::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::team::Entity::find().count(&db).await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_delete_hero_removes_every_mention() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    let game = create_test_game(&db, &match_, 1).await?;
    let detail = find_match_team_detail(&db, match_.match_id, league.team_b).await?;
    let hero = league.heroes[2];

    create_hero_pick(&db, detail.match_team_detail_id, NewHeroPick {
        hero_id: hero,
        first_phase: 0,
        second_phase: 1,
        games: vec![PickFlag { game_number: 1, is_picked: true }],
    }).await?;
    schema::priority_pick::ActiveModel {
        match_team_detail_id: ActiveValue::Set(detail.match_team_detail_id),
        hero_id: ActiveValue::Set(hero),
        total: ActiveValue::Set(3),
        role: ActiveValue::Set(PriorityRole::Gold),
        pick_rate: ActiveValue::Set(0.5),
        ..Default::default()
    }.insert(&db).await?;
    schema::goldlaner::ActiveModel {
        game_id: ActiveValue::Set(game.game_id),
        team_id: ActiveValue::Set(league.team_b),
        hero_id: ActiveValue::Set(hero),
        early_result: ActiveValue::Set(EarlyResult::Win),
        ..Default::default()
    }.insert(&db).await?;
    let kept = create_trio_mid(&db, game.game_id, league.team_a, NewTrioMid {
        role: TrioMidRole::Midlaner,
        hero_id: league.heroes[0],
        early_result: EarlyResult::Draw,
        opponent_hero_ids: vec![hero, league.heroes[1]],
    }).await?;
    create_trio_mid(&db, game.game_id, league.team_b, NewTrioMid {
        role: TrioMidRole::Roamer,
        hero_id: hero,
        early_result: EarlyResult::Lose,
        opponent_hero_ids: vec![league.heroes[0]],
    }).await?;

    let txn = db.begin().await?;
    let images = cascade::delete_hero(&txn, hero).await?;
    txn.commit().await?;

    assert_eq!(images, vec!["http://localhost:8080/uploads/layla.png".to_string()]);
    assert_eq!(schema::hero_pick::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::hero_pick_game::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::priority_pick::Entity::find().count(&db).await?, 0);
    assert_eq!(schema::goldlaner::Entity::find().count(&db).await?, 0);

    let trio_mids = schema::trio_mid::Entity::find().all(&db).await?;
    assert_eq!(trio_mids, vec![kept.clone()]);
    let opponents = schema::trio_mid_hero::Entity::find().all(&db).await?;
    assert_eq!(opponents.len(), 1);
    assert_eq!(opponents[0].trio_mid_id, kept.trio_mid_id);
    assert_eq!(opponents[0].hero_id, league.heroes[1]);
    Ok(())
}

#[tokio::test]
async fn test_delete_player_removes_assignments() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_test_match(&db, &league, league.team_a, league.team_b).await?;
    let detail = find_match_team_detail(&db, match_.match_id, league.team_b).await?;
    let player = schema::player::Entity::find()
        .filter(schema::player::Column::TeamId.eq(league.team_b))
        .one(&db).await?.unwrap();
    schema::player_match::ActiveModel {
        match_team_detail_id: ActiveValue::Set(detail.match_team_detail_id),
        player_id: ActiveValue::Set(player.player_id),
        ..Default::default()
    }.insert(&db).await?;

    let images = cascade::delete_player(&db, player.player_id).await?;

    assert_eq!(images, vec![player.image]);
    assert_eq!(schema::player_match::Entity::find().count(&db).await?, 0);
    assert!(schema::player::Entity::find_by_id(player.player_id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_twice_is_not_found() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    let match_ = create_test_match(&db, &league, league.team_a, league.team_b).await?;

    cascade::delete_match(&db, match_.match_id).await?;
    let second = cascade::delete_match(&db, match_.match_id).await;
    assert!(matches!(second, Err(DomainError::NotFound("Match"))));

    cascade::delete_coach(&db, 1).await?;
    assert!(matches!(cascade::delete_coach(&db, 1).await, Err(DomainError::NotFound("Coach"))));
    assert!(matches!(cascade::delete_tournament(&db, 999).await, Err(DomainError::NotFound("Tournament"))));
    assert!(matches!(cascade::delete_hero(&db, 999).await, Err(DomainError::NotFound("Hero"))));

    assert_eq!(schema::team::Entity::find().count(&db).await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_uncommitted_cascade_rolls_back() -> Result<(), anyhow::Error> {
    let db = set_up_db().await?;
    let league = seed_league(&db).await?;
    create_test_match(&db, &league, league.team_a, league.team_b).await?;

    {
        let txn = db.begin().await?;
        cascade::delete_team(&txn, league.team_a).await?;
    }

    assert!(schema::team::Entity::find_by_id(league.team_a).one(&db).await?.is_some());
    assert_eq!(schema::matches::Entity::find().count(&db).await?, 1);
    assert_eq!(schema::match_team_detail::Entity::find().count(&db).await?, 2);
    Ok(())
}
