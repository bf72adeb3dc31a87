//! Settings types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed organizational details appended to every outgoing offer request
pub const ORG_NAME: &str = "CONSTRUCT GRUP SRL";
pub const ORG_FAX: &str = "+40 256 430 112";
pub const ORG_ADDRESS: &str = "Str. Gării nr. 14, Timișoara, România";
pub const ORG_WEBSITE: &str = "www.constructgrup.ro";

/// Persisted sender record: identity plus SMTP credentials.
///
/// The SMTP server/port are optional overrides; when absent the service-wide
/// defaults apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub smtp_pass: String,
    pub phone_fixed: Option<String>,
    pub phone_mobile: String,
    pub smtp_server: Option<String>,
    pub smtp_port: Option<u16>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Read-side view: the stored record merged with the organizational defaults
#[derive(Debug, Clone, Serialize)]
pub struct MergedSettings {
    #[serde(flatten)]
    pub user: UserSettings,
    pub organization: String,
    pub fax: String,
    pub address: String,
    pub website: String,
}

impl MergedSettings {
    pub fn from_user(user: UserSettings) -> Self {
        Self {
            user,
            organization: ORG_NAME.to_string(),
            fax: ORG_FAX.to_string(),
            address: ORG_ADDRESS.to_string(),
            website: ORG_WEBSITE.to_string(),
        }
    }
}
