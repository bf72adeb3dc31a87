//! Supplier directory
//!
//! Agencies own suppliers; suppliers are tagged with material/service
//! categories, list named offerings and carry contact persons.

pub mod store;
pub mod types;

pub use store::DirectoryStore;
pub use types::{
    Agency, Category, CategoryKind, Contact, Offering, Supplier, SupplierRequest,
};
