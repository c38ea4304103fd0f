//! # Catalog Routes
//!
//! `GET /api/products` serves the rentable catalog, cheapest-per-week
//! first, optionally filtered by category. The endpoint never fails: when
//! the database is unreachable or has no matching rows, the built-in list
//! answers instead.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::AppState;
use monis_core::catalog::builtin_catalog;
use monis_core::{Category, Product};

/// Query parameters for the catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Lists the catalog. Database first, built-in list as fallback.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<ProductsResponse> {
    debug!(category = ?query.category, "GET /api/products");

    if let Some(db) = &state.db {
        match db.products().list(query.category).await {
            Ok(products) if !products.is_empty() => {
                return Json(ProductsResponse { products });
            }
            Ok(_) => {
                warn!("Catalog table empty, serving built-in products");
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, serving built-in products");
            }
        }
    }

    Json(ProductsResponse {
        products: fallback_products(query.category),
    })
}

/// The built-in list, filtered like the database query would be.
fn fallback_products(category: Option<Category>) -> Vec<Product> {
    let catalog = builtin_catalog();
    match category {
        Some(category) => catalog
            .into_iter()
            .filter(|p| p.category == category)
            .collect(),
        None => catalog,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_unfiltered_is_full_catalog() {
        assert_eq!(fallback_products(None).len(), builtin_catalog().len());
    }

    #[test]
    fn test_fallback_filters_by_category() {
        let chairs = fallback_products(Some(Category::Chair));
        assert!(!chairs.is_empty());
        assert!(chairs.iter().all(|p| p.category == Category::Chair));
    }
}
