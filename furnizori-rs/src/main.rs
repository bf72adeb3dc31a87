use furnizori_rs::api::ApiServer;
use furnizori_rs::config::Config;
use furnizori_rs::directory::DirectoryStore;
use furnizori_rs::email::Mailer;
use furnizori_rs::settings::SettingsStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = if std::path::Path::new("config.toml").exists() {
        Config::from_file("config.toml")?
    } else {
        Config::default()
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting furnizori-rs");
    info!("  Listening on: {}", config.server.listen_addr);
    info!("  Database: {}", config.storage.database_url);
    info!("  Attachments dir: {}", config.storage.attachments_dir);
    info!("  SMTP relay: {}:{}", config.smtp.server, config.smtp.port);

    // Directory store
    let options =
        SqliteConnectOptions::from_str(&config.storage.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    let store = DirectoryStore::new(pool);
    store.init_db().await?;

    // Sender settings + mailer
    let settings = SettingsStore::load(&config.storage.settings_path).await?;
    let mailer = Mailer::new(config.smtp.clone());

    let server = ApiServer::new(
        store,
        settings,
        mailer,
        config.storage.attachments_dir.clone().into(),
        config.server.listen_addr.clone(),
    );

    server.run().await?;

    Ok(())
}
