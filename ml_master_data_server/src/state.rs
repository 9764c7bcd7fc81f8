use std::sync::Arc;
use axum::extract::FromRef;
use db::DatabaseConfig;
use migration::MigratorTrait;

use crate::{auth::JwtKeys, config::Config, db};
use sea_orm::prelude::*;


#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<AppState, anyhow::Error> {
        let db = db::set_up_db(
            DatabaseConfig::new(
                config.db_url.clone(),
                config.db_name.clone(),
            )
        ).await?;
        Self::new_with_db(db, config).await
    }

    pub async fn new_with_db(db: DatabaseConnection, config: Config) -> Result<AppState, anyhow::Error> {
        anyhow::ensure!(!config.jwt_secret.is_empty(), "JWT_SECRET must be set");
        migration::Migrator::up(&db, None).await?;
        Ok(AppState {
            db,
            keys: Arc::new(JwtKeys::new(config.jwt_secret.as_bytes())),
            config: Arc::new(config),
        })
    }

    pub async fn new_test_app() -> AppState {
        let db = db::set_up_db(
            DatabaseConfig::new(
                "sqlite::memory:".into(),
                "test".into(),
            )
        ).await.expect("Failed to set up database");
        let config = Config {
            jwt_secret: "test-secret".into(),
            base_url: "http://localhost:3000".into(),
            upload_dir: std::env::temp_dir().join("ml_master_data_test_uploads").to_string_lossy().into_owned(),
            ..Default::default()
        };
        Self::new_with_db(db, config).await.expect("Failed to set up test app")
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(app_state: &AppState) -> DatabaseConnection {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Arc<Config> {
        app_state.config.clone()
    }
}
