use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use kattali_core::experiment::{assign_variant, Experiment};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState, unsupported_method};

#[derive(Debug, Deserialize)]
pub struct VariantQuery {
    pub visitor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VariantResponse {
    pub experiment: String,
    pub visitor: String,
    pub variant: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/experiments", get(list_experiments).fallback(unsupported_method))
        .route("/api/experiments/{key}", get(get_variant).fallback(unsupported_method))
}

/// GET /api/experiments
pub async fn list_experiments(State(state): State<AppState>) -> Json<Vec<Experiment>> {
    Json(state.experiments.as_ref().clone())
}

/// GET /api/experiments/{key}?visitor=<id>
/// The first call buckets the visitor; later calls return the same variant.
pub async fn get_variant(
    State(state): State<AppState>,
    Path(key): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<VariantQuery>, AppError>,
) -> Result<Json<VariantResponse>, AppError> {
    let visitor = query
        .visitor
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("Visitor id is required".to_string()))?;

    let experiment = state
        .experiment(&key)
        .ok_or_else(|| AppError::NotFound(format!("Experiment {} not found", key)))?;

    let store = state.variant_stores.for_visitor(&visitor);
    let variant = assign_variant(store.as_ref(), &mut rand::thread_rng(), experiment)
        .ok_or_else(|| AppError::internal("Experiment has no variants", &key))?;

    Ok(Json(VariantResponse {
        experiment: key,
        visitor,
        variant,
    }))
}
