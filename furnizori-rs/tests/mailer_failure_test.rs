//! Mailer failure-path tests
//!
//! These run without a live SMTP server: every scenario either fails before
//! the transport is opened, or targets a closed local port so the connection
//! is refused immediately.

use furnizori_rs::config::SmtpConfig;
use furnizori_rs::directory::CategoryKind;
use furnizori_rs::email::types::{DocumentRef, OfferRequest, SupplierContacts, UserData};
use furnizori_rs::email::Mailer;

fn unreachable_mailer() -> Mailer {
    Mailer::new(SmtpConfig {
        server: "127.0.0.1".to_string(),
        port: 1,
        timeout_secs: 5,
    })
}

fn test_user() -> UserData {
    UserData {
        name: "Andrei Munteanu".to_string(),
        job_title: "Inginer ofertare".to_string(),
        email: "andrei@constructgrup.ro".to_string(),
        smtp_pass: "wrong-password".to_string(),
        phone_fixed: None,
        phone_mobile: "0722 111 222".to_string(),
        smtp_server: None,
        smtp_port: None,
    }
}

fn base_request() -> OfferRequest {
    OfferRequest {
        type_mode: CategoryKind::Material,
        subcontract: false,
        subject: "Cerere ofertă".to_string(),
        tender_name: "Hala industrială Freidorf".to_string(),
        tender_number: "TM-2025-03".to_string(),
        items: vec![],
        documents: vec![],
        transfer_link: None,
        recipients: vec!["a@example.com".to_string()],
        cc: vec![],
        user: test_user(),
        custom_html: None,
        supplier_contacts: None,
        use_table_format: false,
    }
}

#[tokio::test]
async fn test_connection_failure_is_a_result_not_a_fault() {
    let mailer = unreachable_mailer();

    let result = mailer.test_connection(&test_user()).await;

    assert!(!result.success);
    assert!(!result.message.is_empty());
}

#[tokio::test]
async fn test_send_transport_failure_is_captured() {
    let mailer = unreachable_mailer();

    let result = mailer.send(&base_request()).await;

    assert!(!result.success);
}

#[tokio::test]
async fn test_send_missing_attachment_fails_before_transport() {
    let mailer = unreachable_mailer();

    let mut request = base_request();
    request.documents = vec![DocumentRef {
        path: "/nonexistent/caiet.pdf".to_string(),
        display_name: "Caiet de sarcini.pdf".to_string(),
    }];

    let result = mailer.send(&request).await;

    assert!(!result.success);
    assert!(result.message.contains("attachment"));
}

#[tokio::test]
async fn test_send_invalid_sender_address() {
    let mailer = unreachable_mailer();

    let mut request = base_request();
    request.user.email = "not-an-address".to_string();

    let result = mailer.send(&request).await;

    assert!(!result.success);
}

#[tokio::test]
async fn test_bulk_send_continues_past_failures() {
    let mailer = unreachable_mailer();

    let mut request = base_request();
    request.recipients = vec!["a@example.com".to_string(), "b@example.com".to_string()];

    let bulk = mailer.send_bulk(&request).await;

    // One result per recipient even though the first already failed
    assert_eq!(bulk.results.len(), 2);
    assert!(!bulk.success);
    assert_eq!(bulk.results[0].recipient.as_deref(), Some("a@example.com"));
    assert_eq!(bulk.results[1].recipient.as_deref(), Some("b@example.com"));
}

#[tokio::test]
async fn test_bulk_send_uses_supplier_contact_lists() {
    let mailer = unreachable_mailer();

    let mut request = base_request();
    request.supplier_contacts = Some(vec![
        SupplierContacts {
            name: "SC Fără Contacte SRL".to_string(),
            emails: vec![],
            cc_emails: vec![],
        },
        SupplierContacts {
            name: "SC Instal SRL".to_string(),
            emails: vec!["radu@example.com".to_string()],
            cc_emails: vec!["office@instal.ro".to_string()],
        },
    ]);

    let bulk = mailer.send_bulk(&request).await;

    // The supplier without addresses fails validation, the second fails at
    // the transport; both are reported and the batch ran to completion.
    assert_eq!(bulk.results.len(), 2);
    assert!(!bulk.success);
    assert_eq!(
        bulk.results[0].recipient.as_deref(),
        Some("SC Fără Contacte SRL")
    );
    assert_eq!(bulk.results[1].recipient.as_deref(), Some("SC Instal SRL"));
}
