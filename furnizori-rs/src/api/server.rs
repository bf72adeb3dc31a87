//! API Server - HTTP server for the supplier directory and offer mailer

use axum::{
    routing::{get, post, put},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{directory, email, settings};
use crate::directory::DirectoryStore;
use crate::email::Mailer;
use crate::settings::SettingsStore;

/// Shared application state
pub struct AppState {
    pub store: DirectoryStore,
    pub settings: SettingsStore,
    pub mailer: Mailer,
    pub attachments_dir: PathBuf,
}

/// API server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        store: DirectoryStore,
        settings: SettingsStore,
        mailer: Mailer,
        attachments_dir: PathBuf,
        addr: String,
    ) -> Self {
        let state = Arc::new(AppState {
            store,
            settings,
            mailer,
            attachments_dir,
        });

        Self { state, addr }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(health))
            .route(
                "/agencies",
                get(directory::list_agencies).post(directory::create_agency),
            )
            .route(
                "/agencies/:id/suppliers",
                get(directory::list_suppliers).post(directory::create_supplier),
            )
            .route(
                "/agencies/:id/:kind/categories",
                get(directory::list_categories),
            )
            .route("/categories", post(directory::create_category))
            .route(
                "/agencies/:id/categories/:cat_id/suppliers",
                get(directory::list_suppliers_by_category),
            )
            .route(
                "/suppliers/:id",
                put(directory::update_supplier).delete(directory::delete_supplier),
            )
            .route("/suppliers/:id/offerings", get(directory::list_offerings))
            .route(
                "/agencies/:id/search/offerings",
                get(directory::search_offerings),
            )
            .route(
                "/user-config",
                get(settings::get_user_config).post(settings::set_user_config),
            )
            .route("/user-config/reload", post(settings::reload_user_config))
            .route("/send-offer-request", post(email::send_offer_request))
            .route(
                "/send-multiple-offer-requests",
                post(email::send_multiple_offer_requests),
            )
            .route("/preview-offer-request", post(email::preview_offer_request))
            .route("/test-email-connection", post(email::test_email_connection))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        info!("Starting API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// GET /health - liveness probe
async fn health() -> &'static str {
    "OK"
}
