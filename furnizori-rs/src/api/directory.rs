//! Directory API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::directory::types::{CreateAgencyRequest, CreateCategoryRequest};
use crate::directory::{Agency, Category, CategoryKind, Offering, Supplier, SupplierRequest};
use crate::error::{DirectoryError, Result};

/// GET /agencies - List all agencies
pub async fn list_agencies(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Agency>>> {
    Ok(Json(state.store.list_agencies().await?))
}

/// POST /agencies - Create an agency
pub async fn create_agency(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAgencyRequest>,
) -> Result<(StatusCode, Json<Agency>)> {
    let agency = state.store.create_agency(request).await?;
    Ok((StatusCode::CREATED, Json(agency)))
}

/// GET /agencies/:id/suppliers - List an agency's suppliers
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
    Path(agency_id): Path<i64>,
) -> Result<Json<Vec<Supplier>>> {
    Ok(Json(state.store.list_suppliers_by_agency(agency_id).await?))
}

/// POST /agencies/:id/suppliers - Create a supplier under an agency
pub async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Path(agency_id): Path<i64>,
    Json(request): Json<SupplierRequest>,
) -> Result<Json<Supplier>> {
    Ok(Json(state.store.create_supplier(agency_id, request).await?))
}

/// GET /agencies/:id/:kind/categories - List categories of a kind
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Path((agency_id, kind)): Path<(i64, String)>,
) -> Result<Json<Vec<Category>>> {
    let kind = CategoryKind::from_db_string(&kind)
        .ok_or_else(|| DirectoryError::Validation(format!("Unknown category kind: {}", kind)))?;

    Ok(Json(
        state.store.list_categories_by_kind(agency_id, kind).await?,
    ))
}

/// POST /categories - Create a category
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = state.store.create_category(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /agencies/:id/categories/:cat_id/suppliers - Suppliers linked to a
/// category
pub async fn list_suppliers_by_category(
    State(state): State<Arc<AppState>>,
    Path((agency_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<Supplier>>> {
    Ok(Json(
        state
            .store
            .list_suppliers_by_category(agency_id, category_id)
            .await?,
    ))
}

/// PUT /suppliers/:id - Fully update a supplier
pub async fn update_supplier(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<i64>,
    Json(request): Json<SupplierRequest>,
) -> Result<Json<Supplier>> {
    Ok(Json(state.store.update_supplier(supplier_id, request).await?))
}

/// DELETE /suppliers/:id - Delete a supplier and its children
pub async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<i64>,
) -> Result<StatusCode> {
    state.store.delete_supplier(supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /suppliers/:id/offerings - List a supplier's offerings
pub async fn list_offerings(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<i64>,
) -> Result<Json<Vec<Offering>>> {
    Ok(Json(state.store.list_offerings(supplier_id).await?))
}

/// Query parameters for the offering search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(rename = "type")]
    pub kind: Option<CategoryKind>,
}

/// GET /agencies/:id/search/offerings?q=&type= - Search suppliers by
/// offering-name substring
pub async fn search_offerings(
    State(state): State<Arc<AppState>>,
    Path(agency_id): Path<i64>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Supplier>>> {
    Ok(Json(
        state
            .store
            .search_suppliers_by_offering(agency_id, &params.q, params.kind)
            .await?,
    ))
}
