use crate::{auth::hash_password, state::AppState};
use ml_master_data_entities::schema::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::info;

#[derive(clap::Subcommand)]
pub enum Command {
    /// Runs the HTTP server (the default).
    Serve,
    /// Creates a login for the back office.
    CreateUser {
        username: String,
        password: String,
    },
}

impl Command {
    pub async fn run(&self, app_state: AppState) -> anyhow::Result<()> {
        match self {
            Command::Serve => crate::serve(app_state).await,
            Command::CreateUser { username, password } => {
                anyhow::ensure!(!username.trim().is_empty(), "Username must not be empty");
                anyhow::ensure!(!password.is_empty(), "Password must not be empty");

                let existing = user::Entity::find()
                    .filter(user::Column::Username.eq(username.clone()))
                    .one(&app_state.db)
                    .await?;
                anyhow::ensure!(existing.is_none(), "User {} already exists", username);

                let user = user::ActiveModel {
                    username: Set(username.clone()),
                    password_hash: Set(hash_password(password.clone()).await?),
                    ..Default::default()
                }.insert(&app_state.db).await?;
                info!("Created user {} with id {}", user.username, user.user_id);
                Ok(())
            }
        }
    }
}
