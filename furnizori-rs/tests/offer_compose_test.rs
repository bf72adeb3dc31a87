//! Integration tests for offer-request composition

use furnizori_rs::directory::CategoryKind;
use furnizori_rs::email::composer::{compose_html, compose_text};
use furnizori_rs::email::types::{DocumentRef, OfferItem, OfferRequest, UserData};

fn test_user() -> UserData {
    UserData {
        name: "Andrei Munteanu".to_string(),
        job_title: "Inginer ofertare".to_string(),
        email: "andrei@constructgrup.ro".to_string(),
        smtp_pass: "app-password".to_string(),
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
        items: vec![
            OfferItem {
                name: "Cement".to_string(),
                quantity: Some("10".to_string()),
                unit: Some("tone".to_string()),
            },
            OfferItem {
                name: "Plasă sudată".to_string(),
                quantity: None,
                unit: None,
            },
        ],
        documents: vec![],
        transfer_link: None,
        recipients: vec!["furnizor@example.com".to_string()],
        cc: vec![],
        user: test_user(),
        custom_html: None,
        supplier_contacts: None,
        use_table_format: false,
    }
}

#[test]
fn test_item_line_formats() {
    let body = compose_text(&base_request());

    assert!(body.contains(" - Cement – 10 tone"));
    assert!(body.contains(" - Plasă sudată"));
    // The bare item gets no dangling separator
    assert!(!body.contains("Plasă sudată –"));
}

#[test]
fn test_intro_policy() {
    let mut request = base_request();

    request.type_mode = CategoryKind::Material;
    let material = compose_text(&request);

    request.type_mode = CategoryKind::Service;
    request.subcontract = true;
    let subcontract = compose_text(&request);

    request.subcontract = false;
    let service = compose_text(&request);

    // Three distinct introductions
    assert!(material.contains("materialele"));
    assert!(subcontract.contains("subantrepriză"));
    assert!(service.contains("serviciile"));
    assert!(!service.contains("subantrepriză"));
    assert_ne!(material, subcontract);
    assert_ne!(material, service);
    assert_ne!(subcontract, service);
}

#[test]
fn test_compose_is_byte_identical_for_identical_input() {
    let request = base_request();

    let first = compose_text(&request);
    let second = compose_text(&request);
    assert_eq!(first, second);

    let html_first = compose_html(&request);
    let html_second = compose_html(&request);
    assert_eq!(html_first, html_second);
}

#[test]
fn test_full_body_structure() {
    let mut request = base_request();
    request.documents = vec![DocumentRef {
        path: "/tmp/oferta/caiet.pdf".to_string(),
        display_name: "Caiet de sarcini.pdf".to_string(),
    }];
    request.transfer_link = Some("https://transfer.example.com/abc".to_string());
    request.user.phone_fixed = Some("0256 430 100".to_string());

    let body = compose_text(&request);

    // Sections appear in order: greeting, intro, items, documents, link,
    // closing, signature
    let intro_pos = body.find("Hala industrială Freidorf").unwrap();
    let item_pos = body.find(" - Cement").unwrap();
    let docs_pos = body.find("Documente atașate:").unwrap();
    let link_pos = body.find("https://transfer.example.com/abc").unwrap();
    let closing_pos = body.find("Cu stimă,").unwrap();
    let signature_pos = body.find("Andrei Munteanu").unwrap();

    assert!(intro_pos < item_pos);
    assert!(item_pos < docs_pos);
    assert!(docs_pos < link_pos);
    assert!(link_pos < closing_pos);
    assert!(closing_pos < signature_pos);

    // Signature carries both phones and the fixed organizational block
    assert!(body.contains("Mobil: 0722 111 222"));
    assert!(body.contains("Fix: 0256 430 100"));
}

#[test]
fn test_html_table_rendering() {
    let mut request = base_request();
    request.use_table_format = true;

    let html = compose_html(&request);
    assert!(html.contains("<table"));
    assert!(html.contains("<td>Cement</td><td>10</td><td>tone</td>"));
    // The bare item renders with empty quantity/unit cells
    assert!(html.contains("<td>Plasă sudată</td><td></td><td></td>"));
}
