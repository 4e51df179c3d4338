//! Balance ("Saldo") routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};
use carteira_core::aggregation::AggregationEngine;
use carteira_core::currency::format_brl;
use carteira_core::records::{BalanceDraft, BalanceRecord};
use carteira_shared::RecordId;

/// Creates the balance routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balances", get(list_balances).post(create_balance))
        .route(
            "/balances/{id}",
            get(get_balance).put(update_balance).delete(delete_balance),
        )
}

/// Response for a balance.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Record id.
    pub id: RecordId,
    /// Description.
    pub description: String,
    /// Amount as stored.
    pub amount: String,
    /// Parsed amount, absent when the stored string is not a number.
    pub value: Option<Decimal>,
    /// Amount rendered as currency, absent when unparsable.
    pub formatted_amount: Option<String>,
}

impl From<BalanceRecord> for BalanceResponse {
    fn from(record: BalanceRecord) -> Self {
        let value = record.parsed_amount().ok();
        Self {
            formatted_amount: value.map(format_brl),
            value,
            id: record.id,
            description: record.description,
            amount: record.amount,
        }
    }
}

/// Response for the balance list.
#[derive(Debug, Serialize)]
pub struct BalanceListResponse {
    /// Balances, newest first.
    pub balances: Vec<BalanceResponse>,
    /// Sum of every parsable amount.
    pub total: Decimal,
    /// Total rendered as currency.
    pub formatted_total: String,
    /// Number of records whose amount was counted as zero.
    pub skipped: usize,
}

/// GET `/balances` - List balances with their total.
async fn list_balances(State(state): State<AppState>) -> ApiResult<Json<BalanceListResponse>> {
    let records = state.balances.list().await?;
    let tally = AggregationEngine::tally_balances(&records);

    Ok(Json(BalanceListResponse {
        formatted_total: format_brl(tally.total),
        total: tally.total,
        skipped: tally.skipped.len(),
        balances: records.into_iter().map(BalanceResponse::from).collect(),
    }))
}

/// POST `/balances` - Create a balance.
async fn create_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BalanceDraft>,
) -> ApiResult<(StatusCode, Json<BalanceResponse>)> {
    payload.validate()?;
    let record = state.balances.create(&payload).await?;

    info!(username = %auth.username(), record_id = %record.id, "Balance added");
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET `/balances/{id}` - Get one balance.
async fn get_balance(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<BalanceResponse>> {
    let record = state.balances.get(&id).await?;
    Ok(Json(record.into()))
}

/// PUT `/balances/{id}` - Replace a balance.
async fn update_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
    Json(payload): Json<BalanceDraft>,
) -> ApiResult<Json<BalanceResponse>> {
    payload.validate()?;
    let record = state.balances.update(&id, &payload).await?;

    info!(username = %auth.username(), record_id = %id, "Balance edited");
    Ok(Json(record.into()))
}

/// DELETE `/balances/{id}` - Delete a balance.
async fn delete_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
) -> ApiResult<StatusCode> {
    state.balances.delete(&id).await?;

    info!(username = %auth.username(), record_id = %id, "Balance removed");
    Ok(StatusCode::NO_CONTENT)
}
