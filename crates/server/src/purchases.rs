//! Purchase history endpoints.

use api_types::purchase::{PurchaseListResponse, PurchaseView};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{leads::lead_view, server::AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// Most recent purchases first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<PurchaseListResponse> {
    let engine = state.engine.lock().await;
    let limit = params.limit.unwrap_or(50);

    let purchases = engine
        .purchases()
        .iter()
        .rev()
        .take(limit)
        .map(|purchase| PurchaseView {
            id: purchase.id,
            occurred_at: purchase.occurred_at,
            leads: purchase.leads.iter().map(lead_view).collect(),
            total_minor: purchase.total_minor,
            status: purchase.status.as_str().to_string(),
        })
        .collect();

    Json(PurchaseListResponse { purchases })
}
