//! Initialize the audio settings row and report whether its file exists.
//!
//! Safe to run repeatedly: an existing row is left untouched.

use anyhow::Context;
use lectern_core::media::{self, FileStatus};
use lectern_db::repositories::AudioSettingsRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectern_init=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = lectern_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    lectern_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let settings = AudioSettingsRepo::get_or_create(&pool, &config.defaults)
        .await
        .context("Failed to initialize audio settings")?;

    tracing::info!(
        title = %settings.title,
        relative_path = %settings.relative_path,
        "Audio settings initialized",
    );

    match media::file_status(&config.media.root, &settings.relative_path) {
        FileStatus::Present(path) => {
            tracing::info!(path = %path.display(), "Audio file exists and is accessible");
        }
        FileStatus::Missing(path) => {
            tracing::warn!(path = %path.display(), "Audio file does not exist");
        }
        FileStatus::Rejected(reason) => {
            tracing::warn!(
                relative_path = %settings.relative_path,
                %reason,
                "Audio file path is not allowed",
            );
        }
    }

    Ok(())
}
