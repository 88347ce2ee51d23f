use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;
use crate::config::Config;
use crate::controller::AppState;

pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_ansi(!config.is_production())
        .init();
    info!("Starting FoodGuide API in {} mode", config.environment);

    let app_state = AppState::from_config(&config)?;
    controller::serve(app_state, &config).await
}
