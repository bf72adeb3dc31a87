//! furnizori-rs: supplier-directory backend with an offer-request mailer
//!
//! Backend service for the Furnizori procurement app: agencies own
//! suppliers, suppliers are classified into material/service categories,
//! list their offerings and carry contact persons. Procurement inquiries
//! ("cereri de ofertă") are composed per recipient and submitted over
//! authenticated STARTTLS SMTP, with attachments, bulk sends with
//! per-recipient failure reporting, a dry-run preview and a credential test.
//!
//! # Modules
//!
//! - [`config`]: Service configuration (config.toml)
//! - [`error`]: Error types and HTTP status mapping
//! - [`directory`]: Relational store for agencies, categories, suppliers
//! - [`settings`]: Persisted sender identity and SMTP credentials
//! - [`email`]: Offer-request composition and SMTP submission
//! - [`api`]: HTTP routes
//!
//! # Example
//!
//! ```no_run
//! use furnizori_rs::api::ApiServer;
//! use furnizori_rs::config::Config;
//! use furnizori_rs::directory::DirectoryStore;
//! use furnizori_rs::email::Mailer;
//! use furnizori_rs::settings::SettingsStore;
//! use sqlx::SqlitePool;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!
//!     let pool = SqlitePool::connect(&config.storage.database_url).await?;
//!     let store = DirectoryStore::new(pool);
//!     store.init_db().await?;
//!
//!     let settings = SettingsStore::load(&config.storage.settings_path).await?;
//!     let mailer = Mailer::new(config.smtp.clone());
//!
//!     let server = ApiServer::new(
//!         store,
//!         settings,
//!         mailer,
//!         config.storage.attachments_dir.clone().into(),
//!         config.server.listen_addr.clone(),
//!     );
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod directory;
pub mod email;
pub mod error;
pub mod settings;

// Re-export commonly used types
pub use config::Config;
pub use error::{DirectoryError, Result};
