//! Account balance and budget endpoints.

use api_types::account::{AccountView, TopUp};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::{ServerError, server::AppState};

pub async fn get(State(state): State<AppState>) -> Json<AccountView> {
    let engine = state.engine.lock().await;
    let ledger = engine.ledger();

    Json(AccountView {
        balance_minor: ledger.balance_minor,
        daily_budget_minor: ledger.daily_budget_minor,
        weekly_budget_minor: ledger.weekly_budget_minor,
        spent_today_minor: ledger.spent_today_minor,
        spent_this_week_minor: ledger.spent_this_week_minor,
        spent_total_minor: ledger.spent_total_minor,
        leads_acquired_today: ledger.leads_acquired_today,
    })
}

pub async fn top_up(
    State(state): State<AppState>,
    Json(payload): Json<TopUp>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.lock().await;
    engine.top_up(payload.amount_minor, Utc::now())?;

    Ok(StatusCode::OK)
}
