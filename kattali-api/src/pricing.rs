use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use kattali_catalog::{format_currency, DiscountTier, FabricKey, PricingRequest, PricingResult};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState, unsupported_method};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricResponse {
    pub key: FabricKey,
    pub label: String,
    pub unit_price: i64,
    pub formatted_unit_price: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub result: PricingResult,
    pub fabric_name: Option<String>,
    pub formatted_unit_price: String,
    pub formatted_original_total: String,
    pub formatted_total: String,
    pub formatted_savings: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/fabrics", get(list_fabrics).fallback(unsupported_method))
        .route("/api/pricing/tiers", get(list_tiers).fallback(unsupported_method))
        .route("/api/pricing/quote", post(quote).fallback(unsupported_method))
}

/// GET /api/fabrics
pub async fn list_fabrics(State(state): State<AppState>) -> Json<Vec<FabricResponse>> {
    let fabrics = state
        .pricing
        .catalog()
        .iter()
        .map(|f| FabricResponse {
            key: f.key,
            label: f.label.clone(),
            unit_price: f.unit_price,
            formatted_unit_price: format_currency(f.unit_price),
        })
        .collect();

    Json(fabrics)
}

/// GET /api/pricing/tiers
pub async fn list_tiers(State(state): State<AppState>) -> Json<Vec<DiscountTier>> {
    Json(state.pricing.tiers().to_vec())
}

/// POST /api/pricing/quote
/// Unknown fabrics and non-positive quantities quote to zero rather than failing.
pub async fn quote(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<PricingRequest>, AppError>,
) -> Result<Json<QuoteResponse>, AppError> {
    let result = state.pricing.quote(&request);
    let fabric_name = result
        .fabric
        .map(|key| state.pricing.catalog().display_name(key));

    Ok(Json(QuoteResponse {
        fabric_name,
        formatted_unit_price: format_currency(result.unit_price),
        formatted_original_total: format_currency(result.original_total),
        formatted_total: format_currency(result.total),
        formatted_savings: format_currency(result.savings),
        result,
    }))
}
