//! Expense ("Contas") routes.

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
use carteira_core::records::{ExpenseDraft, ExpenseRecord};
use carteira_shared::RecordId;

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Record id.
    pub id: RecordId,
    /// Description.
    pub description: String,
    /// Amount as stored.
    pub amount: String,
    /// Installment count as stored.
    pub installments: String,
    /// Parsed amount, absent when the stored string is not a number.
    pub value: Option<Decimal>,
    /// Amount rendered as currency, absent when unparsable.
    pub formatted_amount: Option<String>,
}

impl From<ExpenseRecord> for ExpenseResponse {
    fn from(record: ExpenseRecord) -> Self {
        let value = record.parsed_amount().ok();
        Self {
            formatted_amount: value.map(format_brl),
            value,
            id: record.id,
            description: record.description,
            amount: record.amount,
            installments: record.installments,
        }
    }
}

/// Response for the expense list.
#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    /// Expenses, newest first.
    pub expenses: Vec<ExpenseResponse>,
    /// Sum of every parsable amount.
    pub total: Decimal,
    /// Total rendered as currency.
    pub formatted_total: String,
    /// Number of records whose amount was counted as zero.
    pub skipped: usize,
}

/// GET `/expenses` - List expenses with their total.
async fn list_expenses(State(state): State<AppState>) -> ApiResult<Json<ExpenseListResponse>> {
    let records = state.expenses.list().await?;
    let tally = AggregationEngine::tally_expenses(&records);

    Ok(Json(ExpenseListResponse {
        formatted_total: format_brl(tally.total),
        total: tally.total,
        skipped: tally.skipped.len(),
        expenses: records.into_iter().map(ExpenseResponse::from).collect(),
    }))
}

/// POST `/expenses` - Create an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ExpenseDraft>,
) -> ApiResult<(StatusCode, Json<ExpenseResponse>)> {
    payload.validate()?;
    let record = state.expenses.create(&payload).await?;

    info!(username = %auth.username(), record_id = %record.id, "Expense added");
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET `/expenses/{id}` - Get one expense.
async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<ExpenseResponse>> {
    let record = state.expenses.get(&id).await?;
    Ok(Json(record.into()))
}

/// PUT `/expenses/{id}` - Replace an expense.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
    Json(payload): Json<ExpenseDraft>,
) -> ApiResult<Json<ExpenseResponse>> {
    payload.validate()?;
    let record = state.expenses.update(&id, &payload).await?;

    info!(username = %auth.username(), record_id = %id, "Expense edited");
    Ok(Json(record.into()))
}

/// DELETE `/expenses/{id}` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
) -> ApiResult<StatusCode> {
    state.expenses.delete(&id).await?;

    info!(username = %auth.username(), record_id = %id, "Expense removed");
    Ok(StatusCode::NO_CONTENT)
}
