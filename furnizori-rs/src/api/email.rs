//! Offer-request API endpoints

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::api::server::AppState;
use crate::email::composer;
use crate::email::types::{BulkEmailResult, DocumentRef, EmailResult, OfferRequest, UserData};
use crate::error::{DirectoryError, Result};

/// POST /send-offer-request - Compose and send one offer request.
///
/// Accepts a JSON body, or multipart form data with a `payload` JSON field
/// plus `files` parts that are stored under the attachments directory and
/// appended to the request's documents.
pub async fn send_offer_request(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response> {
    let offer = extract_offer_request(request, &state.attachments_dir).await?;

    let result = state.mailer.send(&offer).await;
    Ok(email_result_response(result))
}

/// POST /send-multiple-offer-requests - One message per target, partial
/// failures reported per recipient
pub async fn send_multiple_offer_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BulkEmailResult>> {
    let offer = extract_offer_request(request, &state.attachments_dir).await?;

    Ok(Json(state.mailer.send_bulk(&offer).await))
}

/// Preview response: the composed subject and HTML, no SMTP traffic
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub subject: String,
    pub html_content: String,
}

/// POST /preview-offer-request - Dry-run composition
pub async fn preview_offer_request(
    Json(offer): Json<OfferRequest>,
) -> Result<Json<PreviewResponse>> {
    let html_content = offer
        .custom_html
        .clone()
        .unwrap_or_else(|| composer::compose_html(&offer));

    Ok(Json(PreviewResponse {
        success: true,
        subject: offer.subject,
        html_content,
    }))
}

/// POST /test-email-connection - Validate SMTP credentials without sending.
///
/// Uses the submitted sender data when present, otherwise the stored
/// settings.
pub async fn test_email_connection(
    State(state): State<Arc<AppState>>,
    user: Option<Json<UserData>>,
) -> Json<EmailResult> {
    let user = match user {
        Some(Json(user)) => user,
        None => UserData::from(&*state.settings.snapshot().await),
    };

    if user.email.is_empty() {
        return Json(EmailResult::failure("No sender configured"));
    }

    Json(state.mailer.test_connection(&user).await)
}

/// 200 on success, 500 when the transport reported a failure
fn email_result_response(result: EmailResult) -> Response {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(result)).into_response()
}

/// Pull an [`OfferRequest`] out of either a JSON or a multipart body
async fn extract_offer_request(request: Request, attachments_dir: &Path) -> Result<OfferRequest> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| DirectoryError::Validation(e.to_string()))?;
        parse_multipart_offer(multipart, attachments_dir).await
    } else {
        let Json(offer) = Json::<OfferRequest>::from_request(request, &())
            .await
            .map_err(|e| DirectoryError::Validation(e.to_string()))?;
        Ok(offer)
    }
}

async fn parse_multipart_offer(
    mut multipart: Multipart,
    attachments_dir: &Path,
) -> Result<OfferRequest> {
    let mut payload: Option<OfferRequest> = None;
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DirectoryError::Validation(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());

        match name.as_deref() {
            Some("payload") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| DirectoryError::Validation(e.to_string()))?;
                payload = Some(serde_json::from_str(&text).map_err(|e| {
                    DirectoryError::Validation(format!("Invalid payload: {}", e))
                })?);
            }
            Some("files") => {
                let display_name = field
                    .file_name()
                    .unwrap_or("document")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| DirectoryError::Validation(e.to_string()))?;

                tokio::fs::create_dir_all(attachments_dir).await?;
                let stored = attachments_dir.join(format!("{}_{}", Uuid::new_v4(), display_name));
                tokio::fs::write(&stored, &data).await?;

                debug!("Stored uploaded document {}", stored.display());
                documents.push(DocumentRef {
                    path: stored.to_string_lossy().into_owned(),
                    display_name,
                });
            }
            _ => {}
        }
    }

    let mut offer = payload
        .ok_or_else(|| DirectoryError::Validation("Missing payload field".to_string()))?;
    offer.documents.extend(documents);

    Ok(offer)
}
