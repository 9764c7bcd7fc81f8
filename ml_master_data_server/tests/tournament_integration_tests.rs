mod common;

use common::{seed_league, Fixture};
use serde_json::{json, Value};
use tracing_test::traced_test;


#[tokio::test]
#[traced_test]
async fn test_tournament_projections() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;

    let mut response = fixture.get(&format!("/api/tournaments/{}/teams", league.tournament_id)).await;
    assert_eq!(response.status(), 200);
    let teams: Vec<Value> = response.json().await;
    let names: Vec<_> = teams.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);
    assert_eq!(teams[0]["image"], "http://localhost:3000/uploads/default.png");

    let mut response = fixture.get(&format!("/api/tournaments/{}/matches", league.tournament_id)).await;
    let matches: Vec<Value> = response.json().await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["match_id"], league.match_id);
    assert_eq!(matches[0]["team_a"]["name"], "Alpha");
    assert_eq!(matches[0]["team_b"]["name"], "Bravo");
    assert_eq!(matches[0]["tournament"]["season"], "S13");
    assert_eq!(matches[0]["team_a_score"], 0);

    let mut response = fixture.get(&format!("/api/matches/{}", league.match_id)).await;
    assert_eq!(response.status(), 200);
    let match_: Value = response.json().await;
    assert_eq!(match_["team_a"]["id"], league.team_a);
}

#[tokio::test]
#[traced_test]
async fn test_team_registration_is_unique() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;

    let response = fixture.post_json(
        &format!("/api/tournaments/{}/teams", league.tournament_id),
        json!({"team_id": league.team_a})
    ).await;
    assert_eq!(response.status(), 400);

    let response = fixture.post_json(
        &format!("/api/tournaments/{}/teams", league.tournament_id),
        json!({"team_id": 999})
    ).await;
    assert_eq!(response.status(), 404);

    let extra = fixture.create("/api/teams", json!({"name": "Charlie"})).await["team_id"].as_i64().unwrap();
    fixture.create(&format!("/api/tournaments/{}/teams", league.tournament_id), json!({"team_id": extra})).await;
    let path = format!("/api/tournaments/{}/teams/{}", league.tournament_id, extra);
    assert_eq!(fixture.delete(&path).await.status(), 200);
    assert_eq!(fixture.delete(&path).await.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_scheduled_team_keeps_membership() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;
    let path = format!("/api/tournaments/{}/teams/{}", league.tournament_id, league.team_a);

    let mut response = fixture.delete(&path).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("still plays"));

    let mut response = fixture.get(&format!("/api/tournaments/{}/teams", league.tournament_id)).await;
    let teams: Vec<Value> = response.json().await;
    assert_eq!(teams.len(), 2);

    assert_eq!(fixture.delete(&format!("/api/matches/{}", league.match_id)).await.status(), 200);
    assert_eq!(fixture.delete(&path).await.status(), 200);
}

#[tokio::test]
#[traced_test]
async fn test_match_requires_distinct_teams() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;

    let response = fixture.post_json(
        &format!("/api/tournaments/{}/matches", league.tournament_id),
        json!({"week": 1, "day": 2, "date": 1_700_000_000, "team_a_id": league.team_a, "team_b_id": league.team_a})
    ).await;
    assert_eq!(response.status(), 400);

    let response = fixture.put_json(
        &format!("/api/matches/{}", league.match_id),
        json!({"team_b_id": league.team_a})
    ).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[traced_test]
async fn test_malformed_requests_are_rejected() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;

    assert_eq!(fixture.get("/api/tournaments/abc").await.status(), 400);
    assert_eq!(fixture.get("/api/tournaments/0").await.status(), 400);
    assert_eq!(fixture.get("/api/tournaments/-3").await.status(), 400);

    let response = fixture.post_json("/api/tournaments", json!({"name": "", "season": "S1"})).await;
    assert_eq!(response.status(), 400);

    let response = fixture.post_json("/api/tournaments", json!({"name": "No season"})).await;
    assert_eq!(response.status(), 400);

    let response = fixture.post_json(
        &format!("/api/teams/{}/players", league.team_a),
        json!({"name": "Kairi", "role": "support"})
    ).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[traced_test]
async fn test_update_and_delete_tournament() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;
    let path = format!("/api/tournaments/{}", league.tournament_id);

    let mut response = fixture.put_json(&path, json!({"season": "S14"})).await;
    assert_eq!(response.status(), 200);
    let tournament: Value = response.json().await;
    assert_eq!(tournament["name"], "MPL ID");
    assert_eq!(tournament["season"], "S14");

    assert_eq!(fixture.delete(&path).await.status(), 200);
    assert_eq!(fixture.get(&path).await.status(), 404);
    assert_eq!(fixture.get(&format!("/api/matches/{}", league.match_id)).await.status(), 404);
    assert_eq!(fixture.delete(&path).await.status(), 404);

    // Teams outlive the tournament
    assert_eq!(fixture.get(&format!("/api/teams/{}", league.team_a)).await.status(), 200);
}

#[tokio::test]
#[traced_test]
async fn test_roster_follows_team() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;

    let player = fixture.create(
        &format!("/api/teams/{}/players", league.team_a),
        json!({"name": "Kairi", "role": "jungler"})
    ).await;
    let player_id = player["player_id"].as_i64().unwrap();

    let mut response = fixture.get(&format!("/api/players/{}", player_id)).await;
    let player: Value = response.json().await;
    assert_eq!(player["team"]["name"], "Alpha");

    let response = fixture.post_json(
        &format!("/api/matches/{}/teams/{}/players", league.match_id, league.team_b),
        json!({"player_id": player_id})
    ).await;
    assert_eq!(response.status(), 400);

    let lineup_path = format!("/api/matches/{}/teams/{}/players", league.match_id, league.team_a);
    let assignment = fixture.create(&lineup_path, json!({"player_id": player_id})).await;
    assert_eq!(fixture.post_json(&lineup_path, json!({"player_id": player_id})).await.status(), 400);

    let mut response = fixture.get(&lineup_path).await;
    let lineup: Vec<Value> = response.json().await;
    assert_eq!(lineup.len(), 1);
    assert_eq!(lineup[0]["player"]["name"], "Kairi");

    assert_eq!(fixture.delete(&format!("/api/teams/{}", league.team_a)).await.status(), 200);
    assert_eq!(fixture.get(&format!("/api/players/{}", player_id)).await.status(), 404);
    let assignment_path = format!("{}/{}", lineup_path, assignment["player_match_id"]);
    assert_eq!(fixture.delete(&assignment_path).await.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_changing_team_drops_lineups() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;

    let player = fixture.create(
        &format!("/api/teams/{}/players", league.team_a),
        json!({"name": "Kairi", "role": "jungler"})
    ).await;
    let coach = fixture.create(
        &format!("/api/teams/{}/coaches", league.team_a),
        json!({"name": "Zeys", "role": "head"})
    ).await;

    let players_path = format!("/api/matches/{}/teams/{}/players", league.match_id, league.team_a);
    let coaches_path = format!("/api/matches/{}/teams/{}/coaches", league.match_id, league.team_a);
    fixture.create(&players_path, json!({"player_id": player["player_id"]})).await;
    let assignment = fixture.create(&coaches_path, json!({"coach_id": coach["coach_id"]})).await;
    assert_eq!(fixture.post_json(&coaches_path, json!({"coach_id": coach["coach_id"]})).await.status(), 400);

    let mut response = fixture.get(&coaches_path).await;
    let staff: Vec<Value> = response.json().await;
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0]["coach"]["name"], "Zeys");

    // Same team again is a no-op and keeps the lineup
    let response = fixture.put_json(&format!("/api/players/{}", player["player_id"]), json!({"team_id": league.team_a})).await;
    assert_eq!(response.status(), 200);
    let mut response = fixture.get(&players_path).await;
    let lineup: Vec<Value> = response.json().await;
    assert_eq!(lineup.len(), 1);

    let mut response = fixture.put_json(&format!("/api/players/{}", player["player_id"]), json!({"team_id": league.team_b})).await;
    assert_eq!(response.status(), 200);
    let moved: Value = response.json().await;
    assert_eq!(moved["team_id"], league.team_b);
    let response = fixture.put_json(&format!("/api/coaches/{}", coach["coach_id"]), json!({"team_id": league.team_b})).await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get(&players_path).await;
    let lineup: Vec<Value> = response.json().await;
    assert!(lineup.is_empty());
    let mut response = fixture.get(&coaches_path).await;
    let staff: Vec<Value> = response.json().await;
    assert!(staff.is_empty());

    let assignment_path = format!("{}/{}", coaches_path, assignment["coach_match_id"]);
    assert_eq!(fixture.delete(&assignment_path).await.status(), 404);

    // Moving to a missing team changes nothing
    let response = fixture.put_json(&format!("/api/players/{}", player["player_id"]), json!({"team_id": 999})).await;
    assert_eq!(response.status(), 404);
    let mut response = fixture.get(&format!("/api/players/{}", player["player_id"])).await;
    let player: Value = response.json().await;
    assert_eq!(player["team"]["name"], "Bravo");
}

#[tokio::test]
#[traced_test]
async fn test_coach_lineup_requires_own_team() {
    let mut fixture = Fixture::default().await;
    let league = seed_league(&mut fixture).await;
    let coach = fixture.create(
        &format!("/api/teams/{}/coaches", league.team_b),
        json!({"name": "Yeb", "role": "analyst"})
    ).await;

    let response = fixture.post_json(
        &format!("/api/matches/{}/teams/{}/coaches", league.match_id, league.team_a),
        json!({"coach_id": coach["coach_id"]})
    ).await;
    assert_eq!(response.status(), 400);

    let response = fixture.post_json(
        &format!("/api/teams/{}/coaches", league.team_b),
        json!({"name": "Nobody", "role": "manager"})
    ).await;
    assert_eq!(response.status(), 400);

    let coaches_path = format!("/api/matches/{}/teams/{}/coaches", league.match_id, league.team_b);
    let assignment = fixture.create(&coaches_path, json!({"coach_id": coach["coach_id"]})).await;
    let assignment_path = format!("{}/{}", coaches_path, assignment["coach_match_id"]);
    assert_eq!(fixture.delete(&assignment_path).await.status(), 200);
    assert_eq!(fixture.delete(&assignment_path).await.status(), 404);
}
