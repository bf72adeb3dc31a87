//! Offer-request types - transient, never persisted

use crate::directory::CategoryKind;
use crate::settings::UserSettings;
use serde::{Deserialize, Serialize};

/// Structured procurement inquiry, validated once at the API boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferRequest {
    /// Material vs. service inquiry; selects the introduction wording
    pub type_mode: CategoryKind,
    /// Service-mode only: ask about subcontracting availability instead of
    /// a price quote
    #[serde(default)]
    pub subcontract: bool,
    pub subject: String,
    pub tender_name: String,
    pub tender_number: String,
    #[serde(default)]
    pub items: Vec<OfferItem>,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    pub transfer_link: Option<String>,
    /// Direct recipient addresses (single send, or bulk without
    /// per-supplier contact lists)
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    /// Sender identity and credentials
    pub user: UserData,
    /// Pre-rendered HTML override; replaces composition entirely
    pub custom_html: Option<String>,
    /// Per-supplier recipient lists for bulk sends
    pub supplier_contacts: Option<Vec<SupplierContacts>>,
    /// Render items as an HTML table instead of a list
    #[serde(default)]
    pub use_table_format: bool,
}

/// One inquiry line: item name with optional quantity and unit
#[derive(Debug, Clone, Deserialize)]
pub struct OfferItem {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

/// Stored attachment reference: server-side path plus the name shown to the
/// recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    pub path: String,
    pub display_name: String,
}

/// Bulk-send target: one message per supplier, office email demoted to Cc by
/// the caller when contact addresses exist
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierContacts {
    pub name: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub cc_emails: Vec<String>,
}

/// Sender identity used for composition and SMTP authentication
#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub smtp_pass: String,
    pub phone_fixed: Option<String>,
    pub phone_mobile: String,
    pub smtp_server: Option<String>,
    pub smtp_port: Option<u16>,
}

impl From<&UserSettings> for UserData {
    fn from(settings: &UserSettings) -> Self {
        Self {
            name: settings.name.clone(),
            job_title: settings.job_title.clone(),
            email: settings.email.clone(),
            smtp_pass: settings.smtp_pass.clone(),
            phone_fixed: settings.phone_fixed.clone(),
            phone_mobile: settings.phone_mobile.clone(),
            smtp_server: settings.smtp_server.clone(),
            smtp_port: settings.smtp_port,
        }
    }
}

/// Outcome of one send or connection test
#[derive(Debug, Clone, Serialize)]
pub struct EmailResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl EmailResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            recipient: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            recipient: None,
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }
}

/// Aggregate of a bulk send; `success` is true only when every individual
/// result succeeded
#[derive(Debug, Clone, Serialize)]
pub struct BulkEmailResult {
    pub success: bool,
    pub results: Vec<EmailResult>,
}
