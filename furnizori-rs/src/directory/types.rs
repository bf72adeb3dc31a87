//! Directory types and request payloads

use serde::{Deserialize, Serialize};

/// Organizational unit owning suppliers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub name: String,
}

/// Classification tag for suppliers, unique per (name, kind)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

/// Material vs. service classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Material,
    Service,
}

impl CategoryKind {
    /// Convert to database string
    pub fn to_db_string(&self) -> &'static str {
        match self {
            CategoryKind::Material => "material",
            CategoryKind::Service => "service",
        }
    }

    /// Parse from database string
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "material" => Some(CategoryKind::Material),
            "service" => Some(CategoryKind::Service),
            _ => None,
        }
    }
}

/// Vendor entity, hydrated with its child collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub agency_id: i64,
    pub name: String,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    pub contacts: Vec<Contact>,
    pub offerings: Vec<Offering>,
    pub category_ids: Vec<i64>,
}

/// Contact person attached to a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub supplier_id: i64,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Named item or service a supplier provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub id: i64,
    pub supplier_id: i64,
    pub name: String,
}

/// Request to create an agency
#[derive(Debug, Deserialize)]
pub struct CreateAgencyRequest {
    pub name: String,
}

/// Request to create a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

/// Request to create or fully update a supplier.
///
/// Child collections use full-replace semantics: the submitted sets become
/// the supplier's contacts, offerings and category links.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierRequest {
    pub name: String,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    #[serde(default)]
    pub contacts: Vec<ContactInput>,
    #[serde(default)]
    pub offerings: Vec<OfferingInput>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Contact payload inside a supplier write
#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Offering payload inside a supplier write
#[derive(Debug, Clone, Deserialize)]
pub struct OfferingInput {
    pub name: String,
}
