use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use kattali_core::stock::{StockFilter, StockRow};

use crate::{error::AppError, state::AppState, unsupported_method};

const STOCKS_FAILURE: &str = "Failed to fetch stock data";

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/stocks", get(list_stocks).fallback(unsupported_method))
}

/// GET /api/stocks?exchange=dse&q=textile
pub async fn list_stocks(
    State(state): State<AppState>,
    WithRejection(Query(filter), _): WithRejection<Query<StockFilter>, AppError>,
) -> Result<Json<Vec<StockRow>>, AppError> {
    tokio::time::sleep(state.latency.stocks()).await;

    let rows = state
        .stocks
        .list_stocks()
        .await
        .map_err(|e| AppError::upstream(STOCKS_FAILURE, e))?;

    let rows = filter.apply(rows);
    tracing::debug!("Serving {} stock rows", rows.len());
    Ok(Json(rows))
}
