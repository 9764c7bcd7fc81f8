use clap::Parser;
use ml_master_data_server::{commands::Command, config::read_config, state::AppState};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(version, about = "Back office for league master data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = read_config();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.logging_config))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(config).await?;
    let command = cli.command.unwrap_or(Command::Serve);
    command.run(state).await
}
