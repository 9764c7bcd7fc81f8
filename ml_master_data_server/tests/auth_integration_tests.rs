mod common;

use assert_matches::assert_matches;
use common::{Auth, Fixture, ADMIN_PASSWORD, ADMIN_USERNAME};
use ml_master_data_entities::schema::user;
use ml_master_data_server::auth::{hash_password, LoginResponse};
use sea_orm::{ActiveModelTrait, ActiveValue};
use serde_json::{json, Value};
use tracing_test::traced_test;


#[tokio::test]
#[traced_test]
async fn test_login_issues_usable_token() {
    let fixture = Fixture::default().await;
    let mut fixture = fixture.with_auth(Auth::None);

    let mut response = fixture.post_json("/login", json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD})).await;
    assert_eq!(response.status(), 200);
    let login: LoginResponse = response.json().await;

    let claims = fixture.state.keys.verify(&login.token).unwrap();
    assert_eq!(claims.sub, ADMIN_USERNAME);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);

    let mut fixture = fixture.with_auth(Auth::Bearer { token: login.token });
    let mut response = fixture.get("/api/me").await;
    assert_eq!(response.status(), 200);
    let me: Value = response.json().await;
    assert_eq!(me["username"], ADMIN_USERNAME);
}

#[tokio::test]
#[traced_test]
async fn test_login_rejects_bad_credentials() {
    let mut fixture = Fixture::default().await.with_auth(Auth::None);

    let response = fixture.post_json("/login", json!({"username": ADMIN_USERNAME, "password": "wrong"})).await;
    assert_eq!(response.status(), 401);

    let mut response = fixture.post_json("/login", json!({"username": "nobody", "password": ADMIN_PASSWORD})).await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
#[traced_test]
async fn test_login_requires_both_fields() {
    let mut fixture = Fixture::default().await.with_auth(Auth::None);

    let response = fixture.post_json("/login", json!({"username": ADMIN_USERNAME})).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[traced_test]
async fn test_api_requires_bearer_token() {
    let mut fixture = Fixture::default().await.with_auth(Auth::None);
    let response = fixture.get("/api/tournaments").await;
    assert_eq!(response.status(), 401);

    let mut fixture = fixture.with_auth(Auth::Bearer { token: "not-a-jwt".into() });
    let response = fixture.get("/api/tournaments").await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[traced_test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let fixture = Fixture::default().await;
    let foreign = ml_master_data_server::auth::JwtKeys::new(b"some-other-secret");
    let token = foreign.issue(1, ADMIN_USERNAME, chrono::Utc::now().timestamp()).unwrap();

    let mut fixture = fixture.with_auth(Auth::Bearer { token });
    let response = fixture.get("/api/me").await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[traced_test]
async fn test_password_change_requires_old_password() {
    let mut fixture = Fixture::default().await;

    let response = fixture.put_json("/api/user/update", json!({"password": "new-password"})).await;
    assert_eq!(response.status(), 403);

    let response = fixture.put_json("/api/user/update", json!({"password": "new-password", "old_password": "wrong"})).await;
    assert_eq!(response.status(), 403);

    let response = fixture.put_json("/api/user/update", json!({"password": "new-password", "old_password": ADMIN_PASSWORD})).await;
    assert_eq!(response.status(), 200);

    let mut fixture = fixture.with_auth(Auth::None);
    let response = fixture.post_json("/login", json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD})).await;
    assert_eq!(response.status(), 401);
    let response = fixture.post_json("/login", json!({"username": ADMIN_USERNAME, "password": "new-password"})).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[traced_test]
async fn test_rename_rejects_taken_username() {
    let mut fixture = Fixture::default().await;
    user::ActiveModel {
        username: ActiveValue::Set("analyst".into()),
        password_hash: ActiveValue::Set(hash_password("secret".into()).await.unwrap()),
        ..Default::default()
    }.insert(&fixture.state.db).await.unwrap();

    let mut response = fixture.put_json("/api/user/update", json!({"username": "analyst"})).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_matches!(body["error"].as_str(), Some("Username is already taken"));

    let mut response = fixture.put_json("/api/user/update", json!({"username": "coach"})).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["username"], "coach");
    assert!(body.get("password_hash").is_none());
}
