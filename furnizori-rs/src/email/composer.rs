//! Offer-request body composition
//!
//! Pure string assembly over an already-validated [`OfferRequest`]: identical
//! input yields byte-identical output, and composition cannot fail.

use crate::directory::CategoryKind;
use crate::email::types::{OfferItem, OfferRequest};
use crate::settings::types::{ORG_ADDRESS, ORG_FAX, ORG_NAME, ORG_WEBSITE};

const GREETING: &str = "Bună ziua,";
const CLOSING: &str = "Cu stimă,";
const DOCUMENTS_HEADER: &str = "Documente atașate:";
const ENV_FOOTER: &str =
    "Vă rugăm să vă gândiți la mediu înainte de a printa acest e-mail.";

/// Select the introduction paragraph. Tender name and number are
/// interpolated verbatim.
fn intro(request: &OfferRequest) -> String {
    match (request.type_mode, request.subcontract) {
        (CategoryKind::Material, _) => format!(
            "Prin prezenta vă rugăm să ne transmiteți o ofertă de preț pentru materialele de mai jos, necesare la lucrarea „{}”, nr. {}:",
            request.tender_name, request.tender_number
        ),
        (CategoryKind::Service, true) => format!(
            "Prin prezenta dorim să aflăm disponibilitatea dumneavoastră de a executa în subantrepriză lucrări pentru obiectivul „{}”, nr. {}, conform listei de mai jos:",
            request.tender_name, request.tender_number
        ),
        (CategoryKind::Service, false) => format!(
            "Prin prezenta vă rugăm să ne transmiteți o ofertă de preț pentru serviciile de mai jos, necesare la lucrarea „{}”, nr. {}:",
            request.tender_name, request.tender_number
        ),
    }
}

fn item_line(item: &OfferItem) -> String {
    match (&item.quantity, &item.unit) {
        (Some(quantity), Some(unit)) => {
            format!(" - {} – {} {}", item.name, quantity, unit)
        }
        _ => format!(" - {}", item.name),
    }
}

/// Render the plain-text body
pub fn compose_text(request: &OfferRequest) -> String {
    let mut body = String::new();

    body.push_str(GREETING);
    body.push_str("\n\n");
    body.push_str(&intro(request));
    body.push('\n');

    for item in &request.items {
        body.push_str(&item_line(item));
        body.push('\n');
    }

    if !request.documents.is_empty() {
        body.push('\n');
        body.push_str(DOCUMENTS_HEADER);
        body.push('\n');
        for document in &request.documents {
            body.push_str(" • ");
            body.push_str(&document.display_name);
            body.push('\n');
        }
    }

    if let Some(link) = &request.transfer_link {
        body.push('\n');
        body.push_str(&format!("Puteți descărca documentația de aici: {}", link));
        body.push('\n');
    }

    body.push('\n');
    body.push_str(CLOSING);
    body.push_str("\n\n");
    body.push_str(&signature_text(request));

    body
}

fn signature_text(request: &OfferRequest) -> String {
    let user = &request.user;
    let mut signature = String::new();

    signature.push_str(&user.name);
    signature.push('\n');
    signature.push_str(&user.job_title);
    signature.push('\n');
    signature.push_str(ORG_NAME);
    signature.push('\n');
    signature.push_str(&format!("Mobil: {}", user.phone_mobile));
    signature.push('\n');
    if let Some(fixed) = &user.phone_fixed {
        signature.push_str(&format!("Fix: {}", fixed));
        signature.push('\n');
    }
    signature.push_str(&format!("Fax: {}", ORG_FAX));
    signature.push('\n');
    signature.push_str(ORG_ADDRESS);
    signature.push('\n');
    signature.push_str(ORG_WEBSITE);
    signature.push_str("\n\n");
    signature.push_str(ENV_FOOTER);
    signature.push('\n');

    signature
}

/// Render the HTML body, structurally equivalent to the text variant.
/// Items render as a table when `use_table_format` is set, as a list
/// otherwise.
pub fn compose_html(request: &OfferRequest) -> String {
    let mut html = String::new();

    html.push_str(&format!("<p>{}</p>\n", GREETING));
    html.push_str(&format!("<p>{}</p>\n", intro(request)));

    if !request.items.is_empty() {
        if request.use_table_format {
            html.push_str(&items_table(&request.items));
        } else {
            html.push_str("<ul>\n");
            for item in &request.items {
                let line = match (&item.quantity, &item.unit) {
                    (Some(quantity), Some(unit)) => {
                        format!("{} – {} {}", item.name, quantity, unit)
                    }
                    _ => item.name.clone(),
                };
                html.push_str(&format!("  <li>{}</li>\n", line));
            }
            html.push_str("</ul>\n");
        }
    }

    if !request.documents.is_empty() {
        html.push_str(&format!("<p><strong>{}</strong></p>\n", DOCUMENTS_HEADER));
        html.push_str("<ul>\n");
        for document in &request.documents {
            html.push_str(&format!("  <li>{}</li>\n", document.display_name));
        }
        html.push_str("</ul>\n");
    }

    if let Some(link) = &request.transfer_link {
        html.push_str(&format!(
            "<p>Puteți descărca documentația de aici: <a href=\"{}\">{}</a></p>\n",
            link, link
        ));
    }

    html.push_str(&format!("<p>{}</p>\n", CLOSING));
    html.push_str(&signature_html(request));

    html
}

fn items_table(items: &[OfferItem]) -> String {
    let mut table = String::new();

    table.push_str("<table border=\"1\" cellpadding=\"4\" cellspacing=\"0\">\n");
    table.push_str("  <tr><th>Denumire</th><th>Cantitate</th><th>UM</th></tr>\n");
    for item in items {
        table.push_str(&format!(
            "  <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            item.name,
            item.quantity.as_deref().unwrap_or(""),
            item.unit.as_deref().unwrap_or("")
        ));
    }
    table.push_str("</table>\n");

    table
}

fn signature_html(request: &OfferRequest) -> String {
    let user = &request.user;
    let mut signature = String::new();

    signature.push_str("<p>");
    signature.push_str(&user.name);
    signature.push_str("<br>");
    signature.push_str(&user.job_title);
    signature.push_str("<br>");
    signature.push_str(ORG_NAME);
    signature.push_str("<br>");
    signature.push_str(&format!("Mobil: {}", user.phone_mobile));
    if let Some(fixed) = &user.phone_fixed {
        signature.push_str("<br>");
        signature.push_str(&format!("Fix: {}", fixed));
    }
    signature.push_str("<br>");
    signature.push_str(&format!("Fax: {}", ORG_FAX));
    signature.push_str("<br>");
    signature.push_str(ORG_ADDRESS);
    signature.push_str("<br>");
    signature.push_str(ORG_WEBSITE);
    signature.push_str("</p>\n");
    signature.push_str(&format!("<p><em>{}</em></p>\n", ENV_FOOTER));

    signature
}
