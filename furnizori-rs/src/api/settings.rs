//! Sender-settings API endpoints

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::server::AppState;
use crate::error::Result;
use crate::settings::{MergedSettings, UserSettings};

/// GET /user-config - Stored settings merged with organizational defaults
pub async fn get_user_config(State(state): State<Arc<AppState>>) -> Json<MergedSettings> {
    let snapshot = state.settings.snapshot().await;
    Json(MergedSettings::from_user((*snapshot).clone()))
}

/// POST /user-config - Persist a new settings record
pub async fn set_user_config(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<UserSettings>,
) -> Result<Json<MergedSettings>> {
    let snapshot = state.settings.update(settings).await?;
    Ok(Json(MergedSettings::from_user((*snapshot).clone())))
}

/// POST /user-config/reload - Re-read the settings file
pub async fn reload_user_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MergedSettings>> {
    let snapshot = state.settings.reload().await?;
    Ok(Json(MergedSettings::from_user((*snapshot).clone())))
}
