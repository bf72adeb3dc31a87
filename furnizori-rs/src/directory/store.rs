//! Directory store - relational persistence for the supplier directory

use crate::directory::types::{
    Agency, Category, CategoryKind, Contact, CreateAgencyRequest, CreateCategoryRequest, Offering,
    Supplier, SupplierRequest,
};
use crate::error::{DirectoryError, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, Sqlite, Transaction};
use tracing::{debug, info};

/// Persistent store for agencies, categories, suppliers, contacts and
/// offerings. Owns a pooled SQLite connection; every multi-row write runs
/// inside a single transaction.
#[derive(Clone)]
pub struct DirectoryStore {
    db: SqlitePool,
}

impl DirectoryStore {
    /// Create a new directory store
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Initialize database tables
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS agencies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('material', 'service')),
                UNIQUE(name, kind)
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS suppliers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                agency_id INTEGER NOT NULL REFERENCES agencies(id),
                name TEXT NOT NULL,
                office_email TEXT,
                office_phone TEXT
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
                full_name TEXT NOT NULL,
                email TEXT,
                phone TEXT
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS offerings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
                name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS supplier_categories (
                supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
                category_id INTEGER NOT NULL REFERENCES categories(id),
                PRIMARY KEY (supplier_id, category_id)
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_suppliers_agency
            ON suppliers(agency_id)
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_offerings_supplier
            ON offerings(supplier_id)
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    // ---------------------------------------------------------------- agencies

    /// List all agencies ordered by name
    pub async fn list_agencies(&self) -> Result<Vec<Agency>> {
        let rows = sqlx::query("SELECT id, name FROM agencies ORDER BY name")
            .fetch_all(&self.db)
            .await?;

        rows.iter().map(row_to_agency).collect()
    }

    /// Create an agency; duplicate names are rejected
    pub async fn create_agency(&self, request: CreateAgencyRequest) -> Result<Agency> {
        let existing = sqlx::query("SELECT id FROM agencies WHERE name = ?")
            .bind(&request.name)
            .fetch_optional(&self.db)
            .await?;

        if existing.is_some() {
            return Err(DirectoryError::Validation(
                "Agency already exists".to_string(),
            ));
        }

        let result = sqlx::query("INSERT INTO agencies (name) VALUES (?)")
            .bind(&request.name)
            .execute(&self.db)
            .await?;

        info!("Created agency '{}'", request.name);

        Ok(Agency {
            id: result.last_insert_rowid(),
            name: request.name,
        })
    }

    async fn agency_exists(&self, agency_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM agencies WHERE id = ?")
            .bind(agency_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.is_some())
    }

    // -------------------------------------------------------------- categories

    /// Create a category; duplicate (name, kind) pairs are rejected
    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category> {
        let existing = sqlx::query("SELECT id FROM categories WHERE name = ? AND kind = ?")
            .bind(&request.name)
            .bind(request.kind.to_db_string())
            .fetch_optional(&self.db)
            .await?;

        if existing.is_some() {
            return Err(DirectoryError::Validation(
                "Category already exists".to_string(),
            ));
        }

        let result = sqlx::query("INSERT INTO categories (name, kind) VALUES (?, ?)")
            .bind(&request.name)
            .bind(request.kind.to_db_string())
            .execute(&self.db)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: request.name,
            kind: request.kind,
        })
    }

    /// List categories of a kind.
    ///
    /// `agency_id` is accepted for route compatibility but the lookup is
    /// global: the WHERE clause does not constrain by agency (parity with
    /// the historical query; see DESIGN.md).
    pub async fn list_categories_by_kind(
        &self,
        agency_id: i64,
        kind: CategoryKind,
    ) -> Result<Vec<Category>> {
        debug!(
            "Listing {} categories (agency {} not filtered)",
            kind.to_db_string(),
            agency_id
        );

        let rows = sqlx::query("SELECT id, name, kind FROM categories WHERE kind = ? ORDER BY name")
            .bind(kind.to_db_string())
            .fetch_all(&self.db)
            .await?;

        rows.iter().map(row_to_category).collect()
    }

    // --------------------------------------------------------------- suppliers

    /// Create a supplier under an agency, with its contacts, offerings and
    /// category links written in the same transaction.
    pub async fn create_supplier(
        &self,
        agency_id: i64,
        request: SupplierRequest,
    ) -> Result<Supplier> {
        if !self.agency_exists(agency_id).await? {
            return Err(DirectoryError::NotFound("Agency not found".to_string()));
        }

        let mut tx = self.db.begin().await?;

        validate_category_ids(&mut tx, &request.category_ids).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (agency_id, name, office_email, office_phone)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(agency_id)
        .bind(&request.name)
        .bind(&request.office_email)
        .bind(&request.office_phone)
        .execute(&mut *tx)
        .await?;

        let supplier_id = result.last_insert_rowid();
        insert_children(&mut tx, supplier_id, &request).await?;

        tx.commit().await?;

        info!("Created supplier '{}' in agency {}", request.name, agency_id);
        self.get_supplier(supplier_id).await
    }

    /// Fetch a supplier hydrated with contacts, offerings and category ids
    pub async fn get_supplier(&self, supplier_id: i64) -> Result<Supplier> {
        let row = sqlx::query(
            r#"
            SELECT id, agency_id, name, office_email, office_phone
            FROM suppliers WHERE id = ?
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| DirectoryError::NotFound("Supplier not found".to_string()))?;

        self.hydrate_supplier(&row).await
    }

    /// Fully update a supplier. Scalar fields are overwritten and child
    /// collections are replaced with the submitted sets, in one transaction.
    pub async fn update_supplier(
        &self,
        supplier_id: i64,
        request: SupplierRequest,
    ) -> Result<Supplier> {
        // Existence check outside the transaction keeps the 404 separate
        // from validation failures inside it.
        self.get_supplier(supplier_id).await?;

        let mut tx = self.db.begin().await?;

        validate_category_ids(&mut tx, &request.category_ids).await?;

        sqlx::query(
            r#"
            UPDATE suppliers
            SET name = ?, office_email = ?, office_phone = ?
            WHERE id = ?
            "#,
        )
        .bind(&request.name)
        .bind(&request.office_email)
        .bind(&request.office_phone)
        .bind(supplier_id)
        .execute(&mut *tx)
        .await?;

        delete_children(&mut tx, supplier_id).await?;
        insert_children(&mut tx, supplier_id, &request).await?;

        tx.commit().await?;

        self.get_supplier(supplier_id).await
    }

    /// Delete a supplier together with its contacts, offerings and category
    /// links. Categories themselves are left untouched.
    pub async fn delete_supplier(&self, supplier_id: i64) -> Result<()> {
        let mut tx = self.db.begin().await?;

        delete_children(&mut tx, supplier_id).await?;

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(supplier_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound("Supplier not found".to_string()));
        }

        tx.commit().await?;

        info!("Deleted supplier {}", supplier_id);
        Ok(())
    }

    /// List an agency's suppliers ordered by name
    pub async fn list_suppliers_by_agency(&self, agency_id: i64) -> Result<Vec<Supplier>> {
        let rows = sqlx::query(
            r#"
            SELECT id, agency_id, name, office_email, office_phone
            FROM suppliers WHERE agency_id = ? ORDER BY name
            "#,
        )
        .bind(agency_id)
        .fetch_all(&self.db)
        .await?;

        let mut suppliers = Vec::with_capacity(rows.len());
        for row in &rows {
            suppliers.push(self.hydrate_supplier(row).await?);
        }
        Ok(suppliers)
    }

    /// List an agency's suppliers linked to a category
    pub async fn list_suppliers_by_category(
        &self,
        agency_id: i64,
        category_id: i64,
    ) -> Result<Vec<Supplier>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.agency_id, s.name, s.office_email, s.office_phone
            FROM suppliers s
            JOIN supplier_categories sc ON sc.supplier_id = s.id
            WHERE s.agency_id = ? AND sc.category_id = ?
            ORDER BY s.name
            "#,
        )
        .bind(agency_id)
        .bind(category_id)
        .fetch_all(&self.db)
        .await?;

        let mut suppliers = Vec::with_capacity(rows.len());
        for row in &rows {
            suppliers.push(self.hydrate_supplier(row).await?);
        }
        Ok(suppliers)
    }

    /// List a supplier's offerings
    pub async fn list_offerings(&self, supplier_id: i64) -> Result<Vec<Offering>> {
        let rows = sqlx::query(
            "SELECT id, supplier_id, name FROM offerings WHERE supplier_id = ? ORDER BY name",
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        rows.iter().map(row_to_offering).collect()
    }

    /// Search an agency's suppliers by offering-name substring,
    /// optionally narrowed to a category kind.
    pub async fn search_suppliers_by_offering(
        &self,
        agency_id: i64,
        query: &str,
        kind: Option<CategoryKind>,
    ) -> Result<Vec<Supplier>> {
        let pattern = format!("%{}%", query.to_lowercase());

        let rows = match kind {
            Some(kind) => {
                sqlx::query(
                    r#"
                    SELECT DISTINCT s.id, s.agency_id, s.name, s.office_email, s.office_phone
                    FROM suppliers s
                    JOIN offerings o ON o.supplier_id = s.id
                    JOIN supplier_categories sc ON sc.supplier_id = s.id
                    JOIN categories c ON c.id = sc.category_id
                    WHERE s.agency_id = ? AND lower(o.name) LIKE ? AND c.kind = ?
                    ORDER BY s.name
                    "#,
                )
                .bind(agency_id)
                .bind(&pattern)
                .bind(kind.to_db_string())
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT DISTINCT s.id, s.agency_id, s.name, s.office_email, s.office_phone
                    FROM suppliers s
                    JOIN offerings o ON o.supplier_id = s.id
                    WHERE s.agency_id = ? AND lower(o.name) LIKE ?
                    ORDER BY s.name
                    "#,
                )
                .bind(agency_id)
                .bind(&pattern)
                .fetch_all(&self.db)
                .await?
            }
        };

        let mut suppliers = Vec::with_capacity(rows.len());
        for row in &rows {
            suppliers.push(self.hydrate_supplier(row).await?);
        }
        Ok(suppliers)
    }

    // ----------------------------------------------------------------- helpers

    async fn hydrate_supplier(&self, row: &SqliteRow) -> Result<Supplier> {
        let supplier_id: i64 = row.try_get("id")?;

        let contact_rows = sqlx::query(
            r#"
            SELECT id, supplier_id, full_name, email, phone
            FROM contacts WHERE supplier_id = ? ORDER BY id
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        let contacts = contact_rows
            .iter()
            .map(row_to_contact)
            .collect::<Result<Vec<_>>>()?;

        let offerings = self.list_offerings(supplier_id).await?;

        let category_rows = sqlx::query(
            "SELECT category_id FROM supplier_categories WHERE supplier_id = ? ORDER BY category_id",
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        let mut category_ids = Vec::with_capacity(category_rows.len());
        for cat_row in &category_rows {
            category_ids.push(cat_row.try_get("category_id")?);
        }

        Ok(Supplier {
            id: supplier_id,
            agency_id: row.try_get("agency_id")?,
            name: row.try_get("name")?,
            office_email: row.try_get("office_email")?,
            office_phone: row.try_get("office_phone")?,
            contacts,
            offerings,
            category_ids,
        })
    }
}

/// Reject the whole write when any referenced category id is unknown
async fn validate_category_ids(
    tx: &mut Transaction<'_, Sqlite>,
    category_ids: &[i64],
) -> Result<()> {
    let mut missing = Vec::new();

    for &category_id in category_ids {
        let row = sqlx::query("SELECT id FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&mut **tx)
            .await?;

        if row.is_none() {
            missing.push(category_id.to_string());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DirectoryError::Validation(format!(
            "Unknown category ids: {}",
            missing.join(", ")
        )))
    }
}

async fn delete_children(tx: &mut Transaction<'_, Sqlite>, supplier_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM contacts WHERE supplier_id = ?")
        .bind(supplier_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query("DELETE FROM offerings WHERE supplier_id = ?")
        .bind(supplier_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query("DELETE FROM supplier_categories WHERE supplier_id = ?")
        .bind(supplier_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn insert_children(
    tx: &mut Transaction<'_, Sqlite>,
    supplier_id: i64,
    request: &SupplierRequest,
) -> Result<()> {
    for contact in &request.contacts {
        sqlx::query(
            "INSERT INTO contacts (supplier_id, full_name, email, phone) VALUES (?, ?, ?, ?)",
        )
        .bind(supplier_id)
        .bind(&contact.full_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .execute(&mut **tx)
        .await?;
    }

    for offering in &request.offerings {
        sqlx::query("INSERT INTO offerings (supplier_id, name) VALUES (?, ?)")
            .bind(supplier_id)
            .bind(&offering.name)
            .execute(&mut **tx)
            .await?;
    }

    for &category_id in &request.category_ids {
        sqlx::query("INSERT INTO supplier_categories (supplier_id, category_id) VALUES (?, ?)")
            .bind(supplier_id)
            .bind(category_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

fn row_to_agency(row: &SqliteRow) -> Result<Agency> {
    Ok(Agency {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn row_to_category(row: &SqliteRow) -> Result<Category> {
    let kind_str: String = row.try_get("kind")?;
    let kind = CategoryKind::from_db_string(&kind_str)
        .ok_or_else(|| DirectoryError::Validation(format!("Unknown category kind: {}", kind_str)))?;

    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind,
    })
}

fn row_to_contact(row: &SqliteRow) -> Result<Contact> {
    Ok(Contact {
        id: row.try_get("id")?,
        supplier_id: row.try_get("supplier_id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
    })
}

fn row_to_offering(row: &SqliteRow) -> Result<Offering> {
    Ok(Offering {
        id: row.try_get("id")?,
        supplier_id: row.try_get("supplier_id")?,
        name: row.try_get("name")?,
    })
}
