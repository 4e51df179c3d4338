//! Summary route.

use axum::{Json, Router, extract::State, routing::get};
use tracing::debug;

use crate::AppState;
use crate::error::ApiResult;
use carteira_core::aggregation::{AggregationEngine, Summary};

/// Creates the summary routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/summary", get(get_summary))
}

/// GET `/summary` - Totals of balances and expenses, and the net.
async fn get_summary(State(state): State<AppState>) -> ApiResult<Json<Summary>> {
    let (balances, expenses) = tokio::try_join!(state.balances.list(), state.expenses.list())?;

    let summary = AggregationEngine::summarize(&balances, &expenses);
    debug!(
        balances = balances.len(),
        expenses = expenses.len(),
        skipped = summary.skipped.len(),
        net = %summary.net_total,
        "Summary computed"
    );

    Ok(Json(summary))
}
