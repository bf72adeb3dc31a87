//! Persisted sender settings
//!
//! Holds the sender identity and SMTP credentials used by the offer-request
//! mailer, merged with the fixed organizational details at read time.

pub mod store;
pub mod types;

pub use store::SettingsStore;
pub use types::{MergedSettings, UserSettings};
