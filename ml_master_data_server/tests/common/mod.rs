use std::borrow::BorrowMut;

use axum::{response::Response, http::{Request, request::Builder}, body::Body};
use http_body::{combinators::UnsyncBoxBody, Body as _};
use ml_master_data_server::{auth::hash_password, state::AppState};
use ml_master_data_entities::schema::user;
use sea_orm::{ActiveModelTrait, ActiveValue};
use serde_json::{json, Value};
use tower::Service;


pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password123";

pub struct Fixture {
    pub app: axum::Router,
    pub state: AppState,
    pub auth: Auth,
}

#[allow(dead_code)]
pub enum Auth {
    None,
    Bearer {
        token: String,
    },
}

pub struct APIResponse {
    response: Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>,
}

impl APIResponse {
    pub fn status(&self) -> axum::http::StatusCode {
        self.response.status()
    }

    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> T {
        let mut buf = Vec::new();

        let body = self.response.body_mut();

        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        serde_json::from_slice(&buf).unwrap()
    }

    #[allow(dead_code)]
    pub async fn text(&mut self) -> String {
        let mut buf = Vec::new();

        let body = self.response.body_mut();

        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        String::from_utf8(buf).unwrap()
    }
}

impl From<Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>> for APIResponse {
    fn from(response: Response<UnsyncBoxBody<hyper::body::Bytes, axum::Error>>) -> Self {
        Self {
            response,
        }
    }
}

impl Fixture {
    /// A fresh in-memory app with one admin user, logged in by bearer token.
    pub async fn default() -> Self {
        let state = AppState::new_test_app().await;
        let admin = user::ActiveModel {
            username: ActiveValue::Set(ADMIN_USERNAME.into()),
            password_hash: ActiveValue::Set(hash_password(ADMIN_PASSWORD.into()).await.unwrap()),
            ..Default::default()
        }.insert(&state.db).await.unwrap();

        let token = state.keys.issue(admin.user_id, &admin.username, chrono::Utc::now().timestamp()).unwrap();
        let app = ml_master_data_server::app_with_state(state.clone()).await;

        Self {
            app,
            state,
            auth: Auth::Bearer { token },
        }
    }

    #[allow(dead_code)]
    pub fn with_auth(self, auth: Auth) -> Self {
        Self {
            auth,
            ..self
        }
    }

    fn get_base_request(&self) -> Builder {
        let builder = Request::builder();

        match &self.auth {
            Auth::None => builder,
            Auth::Bearer { token } => {
                builder.header(
                    "Authorization",
                    format!("Bearer {}", token)
                )
            }
        }
    }

    async fn send(&mut self, request: Request<Body>) -> APIResponse {
        self.app.borrow_mut()
            .call(request)
            .await
            .unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn get(&mut self, path: &str) -> APIResponse {
        let request = self.get_base_request()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    #[allow(dead_code)]
    pub async fn delete(&mut self, path: &str) -> APIResponse {
        let request = self.get_base_request()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    #[allow(dead_code)]
    pub async fn post_json<T>(&mut self, path: &str, body: T) -> APIResponse where T: serde::Serialize
    {
        let request = self.get_base_request()
            .method("POST")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(
                Body::from(
                    serde_json::to_string(&body).unwrap()
                )
            )
            .unwrap();
        self.send(request).await
    }

    #[allow(dead_code)]
    pub async fn put_json<T>(&mut self, path: &str, body: T) -> APIResponse where T: serde::Serialize
    {
        let request = self.get_base_request()
            .method("PUT")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(
                Body::from(
                    serde_json::to_string(&body).unwrap()
                )
            )
            .unwrap();
        self.send(request).await
    }

    /// Posts and returns the created record, asserting a 201.
    #[allow(dead_code)]
    pub async fn create(&mut self, path: &str, body: Value) -> Value {
        let mut response = self.post_json(path, body).await;
        assert_eq!(response.status(), 201, "POST {} failed: {}", path, response.text().await);
        response.json().await
    }
}

/// Ids of a small league: one tournament with two registered teams and a
/// match between them.
#[allow(dead_code)]
pub struct League {
    pub tournament_id: i64,
    pub team_a: i64,
    pub team_b: i64,
    pub match_id: i64,
    pub hero: i64,
}

#[allow(dead_code)]
pub async fn seed_league(fixture: &mut Fixture) -> League {
    let tournament = fixture.create("/api/tournaments", json!({"name": "MPL ID", "season": "S13"})).await;
    let tournament_id = tournament["tournament_id"].as_i64().unwrap();

    let team_a = fixture.create("/api/teams", json!({"name": "Alpha"})).await["team_id"].as_i64().unwrap();
    let team_b = fixture.create("/api/teams", json!({"name": "Bravo"})).await["team_id"].as_i64().unwrap();
    for team_id in [team_a, team_b] {
        fixture.create(&format!("/api/tournaments/{}/teams", tournament_id), json!({"team_id": team_id})).await;
    }

    let match_ = fixture.create(
        &format!("/api/tournaments/{}/matches", tournament_id),
        json!({"week": 1, "day": 1, "date": 1_700_000_000, "team_a_id": team_a, "team_b_id": team_b})
    ).await;
    let hero = fixture.create("/api/heroes", json!({"name": "Ling"})).await["hero_id"].as_i64().unwrap();

    League {
        tournament_id,
        team_a,
        team_b,
        match_id: match_["match_id"].as_i64().unwrap(),
        hero,
    }
}
