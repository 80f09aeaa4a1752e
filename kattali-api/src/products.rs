use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use kattali_catalog::Product;
use serde::Deserialize;

use crate::{error::AppError, state::AppState, unsupported_method};

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).fallback(unsupported_method))
        .route("/api/products/{id}", get(get_product).fallback(unsupported_method))
}

/// GET /api/products?category=silk&q=luxury
pub async fn list_products(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ProductQuery>, AppError>,
) -> Json<Vec<Product>> {
    let products = state
        .products
        .filter(query.category.as_deref(), query.q.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Json(products)
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    state
        .products
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
}
