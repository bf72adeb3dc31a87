//! REST API module for furnizori-rs
//!
//! Maps the directory, settings and offer-request operations onto HTTP
//! routes.

pub mod directory;
pub mod email;
pub mod server;
pub mod settings;

pub use server::{ApiServer, AppState};
