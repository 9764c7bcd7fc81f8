use std::{any::Any, net::SocketAddr};

use axum::{middleware, response::{IntoResponse, Response}, Router};
use hyper::StatusCode;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{auth::ExtractAuthenticatedUser, response::APIError, state::AppState};

pub mod auth;
pub mod coaches;
pub mod commands;
pub mod config;
pub mod db;
pub mod draft;
pub mod extract;
pub mod game_annotations;
pub mod games;
pub mod heroes;
pub mod images;
pub mod lineups;
pub mod lookup;
pub mod matches;
pub mod players;
pub mod response;
pub mod state;
pub mod teams;
pub mod tournaments;
pub mod users;

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    APIError { message: "Internal server error".into(), code: StatusCode::INTERNAL_SERVER_ERROR }.into_response()
}

pub async fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .merge(users::router())
        .merge(tournaments::router())
        .merge(teams::router())
        .merge(players::router())
        .merge(coaches::router())
        .merge(heroes::router())
        .merge(matches::router())
        .merge(games::router())
        .merge(game_annotations::router())
        .merge(draft::router())
        .merge(lineups::router())
        .route_layer(middleware::from_extractor_with_state::<ExtractAuthenticatedUser, _>(state.clone()));

    Router::new()
        .nest("/api", api)
        .merge(auth::router())
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn app() -> Result<Router, anyhow::Error> {
    let state = AppState::new(config::read_config()).await?;
    Ok(app_with_state(state).await)
}

pub async fn serve(state: AppState) -> Result<(), anyhow::Error> {
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;
    let app = app_with_state(state).await;

    info!("Listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
