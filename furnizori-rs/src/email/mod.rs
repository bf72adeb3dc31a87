//! Offer-request email pipeline
//!
//! `composer` renders plain-text and HTML bodies from an [`OfferRequest`];
//! `mailer` submits them over authenticated STARTTLS SMTP. Composition is
//! pure; every transport failure is folded into an [`EmailResult`] instead of
//! crossing the component boundary as a fault.

pub mod composer;
pub mod mailer;
pub mod types;

pub use mailer::Mailer;
pub use types::{BulkEmailResult, DocumentRef, EmailResult, OfferItem, OfferRequest, UserData};
